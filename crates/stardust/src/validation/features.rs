use crate::{
    params::ProtocolParameters,
    types::feature::{Feature, MAX_METADATA_LENGTH, MAX_TAG_LENGTH},
    validation::{join_names, validate_count, validate_distinct_ascending, Validate, ValidationResult},
};

/// Check a single feature's own bounds.
pub fn validate_feature(feature: &Feature) -> ValidationResult {
    match feature {
        Feature::Sender(_) | Feature::Issuer(_) => ValidationResult::ok(),
        Feature::Metadata(m) => ValidationResult::check(!m.data.is_empty() && m.data.len() <= MAX_METADATA_LENGTH, || {
            format!("Metadata Feature data length must be between 1 and {}.", MAX_METADATA_LENGTH)
        }),
        Feature::Tag(t) => ValidationResult::check(!t.tag.is_empty() && t.tag.len() <= MAX_TAG_LENGTH, || {
            format!("Tag Feature tag length must be between 1 and {}.", MAX_TAG_LENGTH)
        }),
    }
}

impl Validate for Feature {
    fn validate(&self, _params: &ProtocolParameters) -> ValidationResult {
        validate_feature(self)
    }
}

/// Check the features (or immutable features) of an output: count, allowed kinds, order and
/// uniqueness, then each feature's own bounds.
pub fn validate_features(features: &[Feature], output_name: &str, allowed: &[u8], immutable: bool) -> ValidationResult {
    let element = if immutable { "Immutable Feature" } else { "Feature" };
    let mut results = vec![validate_count(
        features.len(),
        0,
        allowed.len(),
        &format!("{} {}s", output_name, element),
    )];

    if !features.iter().all(|f| allowed.contains(&f.kind())) {
        let of = if immutable { "an Immutable Feature" } else { "a feature" };
        results.push(ValidationResult::fail(format!(
            "{} feature type of {} must define one of the following types: {}.",
            output_name,
            of,
            join_names(allowed, Feature::kind_name)
        )));
    }

    results.push(validate_distinct_ascending(
        features.iter().map(Feature::kind),
        || format!("{} must not contain more than one {} of each type.", output_name, element),
        || format!("{} {}s must be sorted in ascending order based on their {} Type.", output_name, element, element),
    ));

    results.extend(features.iter().map(validate_feature));
    results.into_iter().collect()
}
