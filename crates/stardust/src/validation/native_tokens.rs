use crate::{
    types::native_token::{NativeToken, MAX_NATIVE_TOKEN_COUNT},
    validation::{validate_distinct_ascending, ValidationResult},
};

/// Check the native tokens of an output: at most 64, every amount non-zero, ids unique and
/// ascending.
pub fn validate_native_tokens(tokens: &[NativeToken]) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if tokens.len() > MAX_NATIVE_TOKEN_COUNT {
        result.push_error("Max native tokens count exceeded.");
    }

    for token in tokens.iter().filter(|t| t.amount.is_zero()) {
        result.push_error(format!("Native token {} must have a value bigger than zero.", token.id));
    }

    result.merge(validate_distinct_ascending(
        tokens.iter().map(|t| t.id),
        || "No duplicate tokens are allowed.".to_owned(),
        || "Native Tokens must be lexicographically sorted based on Token id.".to_owned(),
    ))
}
