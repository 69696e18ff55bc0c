//! The Stardust ledger object model.
//!
//! Every wire object (addresses, outputs, unlocks, essences, payloads and blocks) implements
//! `ByteFormat` and round trips through its exact little-endian layout. Decoding fails fast with a
//! `SerError`; it checks only that bytes are well formed.
//!
//! The `validation` module checks the rest: ordering and uniqueness of lists, count and size
//! bounds, allowed variants per output kind, supply arithmetic and storage deposits. Validation is
//! always relative to a set of `ProtocolParameters` and reports every failing rule at once.
//!
//! The `testnet` feature switches the `defaults` module from Shimmer mainnet to the public testnet.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod defaults;
pub mod enc;
pub mod helpers;
pub mod params;
pub mod prelude;
pub mod types;
pub mod validation;

pub use enc::*;
pub use params::*;
pub use types::*;
