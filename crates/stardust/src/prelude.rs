//! Re-exports of the object model, validation and defaults.
pub use crate::{
    defaults::*,
    enc::*,
    helpers::*,
    params::*,
    types::*,
    validation::{Validate, ValidationResult},
};

pub use stardust_core::prelude::*;
