//! Structural validation of decoded ledger objects.
//!
//! Decoding only checks that bytes are well formed. Validation checks everything else the protocol
//! demands: ordering and uniqueness of lists, count and size bounds, allowed variants per output
//! kind, supply arithmetic and storage deposits. Every rule runs; a failure never stops the next
//! rule from running, so the caller sees all of an object's problems at once.

mod block;
mod features;
mod milestone;
mod native_tokens;
mod outputs;
mod transaction;
mod unlock_conditions;

pub use block::*;
pub use features::*;
pub use milestone::*;
pub use native_tokens::*;
pub use outputs::*;
pub use transaction::*;
pub use unlock_conditions::*;

use serde::{Deserialize, Serialize};

use crate::params::ProtocolParameters;

/// The outcome of validating an object: valid, or invalid with every reason found.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True if every rule passed
    pub is_valid: bool,
    /// The failure messages, in the order the rules ran
    pub errors: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// A failing result with one message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
        }
    }

    /// Fail with `message` unless `condition` holds.
    pub fn check(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::ok()
        } else {
            Self::fail(message())
        }
    }

    /// Record a failure.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    /// Combine two results. Valid only if both are; errors keep their order.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self
    }

    /// Log the failure, if any, at debug level. Returns the result unchanged.
    pub(crate) fn traced(self, subject: &'static str) -> Self {
        if !self.is_valid {
            tracing::debug!(subject, errors = self.errors.len(), "validation failed");
        }
        self
    }
}

impl std::iter::FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        iter.into_iter().fold(ValidationResult::ok(), ValidationResult::merge)
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid {
            write!(f, "valid")
        } else {
            write!(f, "invalid: {}", self.errors.join(" "))
        }
    }
}

/// Objects that can be checked against the protocol's structural rules.
pub trait Validate {
    /// Run every rule that applies to the object.
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult;
}

/// Check that a count lies in `min..=max`.
pub(crate) fn validate_count(count: usize, min: usize, max: usize, subject: &str) -> ValidationResult {
    ValidationResult::check(count >= min && count <= max, || {
        if min == max {
            format!("{} count must be equal to {}.", subject, max)
        } else {
            format!("{} count must be between {} and {}.", subject, min, max)
        }
    })
}

/// Walk adjacent keys once, reporting duplicates and descending pairs. Each problem is reported at
/// most once per list.
pub(crate) fn validate_distinct_ascending<K: Ord>(
    keys: impl IntoIterator<Item = K>,
    duplicate: impl FnOnce() -> String,
    unsorted: impl FnOnce() -> String,
) -> ValidationResult {
    let mut has_duplicate = false;
    let mut has_descent = false;
    let mut previous: Option<K> = None;
    for key in keys {
        if let Some(prev) = previous.as_ref() {
            match prev.cmp(&key) {
                std::cmp::Ordering::Equal => has_duplicate = true,
                std::cmp::Ordering::Greater => has_descent = true,
                std::cmp::Ordering::Less => {}
            }
        }
        previous = Some(key);
    }

    let mut result = ValidationResult::ok();
    if has_duplicate {
        result.push_error(duplicate());
    }
    if has_descent {
        result.push_error(unsorted());
    }
    result
}

/// Join names the way the allowed-type messages list them.
pub(crate) fn join_names(kinds: &[u8], name: fn(u8) -> &'static str) -> String {
    kinds.iter().map(|k| name(*k)).collect::<Vec<_>>().join(", ")
}
