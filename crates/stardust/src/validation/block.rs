use stardust_core::ser::ByteFormat;

use crate::{
    params::ProtocolParameters,
    types::{
        block::{Block, MAX_BLOCK_LENGTH, MAX_PARENTS, MIN_PARENTS},
        payload::Payload,
    },
    validation::{
        validate_count, validate_distinct_ascending, validate_milestone_payload, validate_tagged_data_payload,
        validate_transaction_payload, validate_treasury_transaction_payload, Validate, ValidationResult,
    },
};

/// Check a payload of any kind.
pub fn validate_payload(payload: &Payload, params: &ProtocolParameters) -> ValidationResult {
    match payload {
        Payload::Transaction(p) => validate_transaction_payload(p, params),
        Payload::TaggedData(p) => validate_tagged_data_payload(p),
        Payload::Milestone(p) => validate_milestone_payload(p, params),
        Payload::TreasuryTransaction(p) => validate_treasury_transaction_payload(p, params),
    }
}

impl Validate for Payload {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_payload(self, params)
    }
}

/// Check a block: protocol version, parents, total size, then its payload.
pub fn validate_block(block: &Block, params: &ProtocolParameters) -> ValidationResult {
    let mut results = vec![ValidationResult::check(block.protocol_version == params.version, || {
        format!("Block protocol version must be {}.", params.version)
    })];

    results.push(validate_count(block.parents.len(), MIN_PARENTS, MAX_PARENTS, "Parents"));
    results.push(validate_distinct_ascending(
        block.parents.iter(),
        || "Block parents must be unique.".to_owned(),
        || "Block parents must be lexicographically sorted.".to_owned(),
    ));

    results.push(ValidationResult::check(block.serialized_length() <= MAX_BLOCK_LENGTH, || {
        format!("Block length must not be larger than {} bytes.", MAX_BLOCK_LENGTH)
    }));

    if let Some(payload) = block.payload.as_ref() {
        results.push(validate_payload(payload, params));
    }

    results.into_iter().collect::<ValidationResult>().traced("block")
}

impl Validate for Block {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_block(self, params)
    }
}
