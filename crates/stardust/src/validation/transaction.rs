use std::collections::{BTreeSet, HashSet};

use crate::{
    params::ProtocolParameters,
    types::{
        essence::*,
        feature::MAX_TAG_LENGTH,
        input::Input,
        output::Output,
        payload::{TaggedDataPayload, TransactionPayload},
        unlock::{Signature, Unlock},
    },
    validation::{validate_count, validate_output, Validate, ValidationResult},
};

/// Check the inputs of an essence: count, distinct output references, output index bounds.
pub fn validate_inputs(inputs: &[Input]) -> ValidationResult {
    let mut results = vec![validate_count(inputs.len(), MIN_INPUT_COUNT, MAX_INPUT_COUNT, "Inputs")];

    let mut seen = HashSet::with_capacity(inputs.len());
    let mut has_duplicate = false;
    let mut index_out_of_range = false;
    for Input::Utxo(input) in inputs.iter() {
        has_duplicate |= !seen.insert(input.output_id());
        index_out_of_range |= input.transaction_output_index > MAX_OUTPUT_INDEX;
    }
    if has_duplicate {
        results.push(ValidationResult::fail(
            "Each pair of Transaction Id and Transaction Output Index must be unique in the list of inputs.",
        ));
    }
    if index_out_of_range {
        results.push(ValidationResult::fail(format!(
            "Transaction Output Index must be between 0 and {}.",
            MAX_OUTPUT_INDEX
        )));
    }
    results.into_iter().collect()
}

/// Check the outputs of an essence: count, allowed kinds, each output on its own, the total
/// amount and the number of distinct native tokens.
pub fn validate_outputs(outputs: &[Output], params: &ProtocolParameters) -> ValidationResult {
    let mut results = vec![validate_count(outputs.len(), MIN_OUTPUT_COUNT, MAX_OUTPUT_COUNT, "Outputs")];

    if outputs.iter().any(|o| matches!(o, Output::Treasury(_))) {
        results.push(ValidationResult::fail(
            "Output Type must be one of the following: Basic, Alias, Foundry and NFT.",
        ));
    }

    results.extend(outputs.iter().map(|o| validate_output(o, params)));

    let total: u128 = outputs.iter().map(|o| o.amount() as u128).sum();
    if total > params.token_supply as u128 {
        results.push(ValidationResult::fail(format!(
            "The sum of all outputs amount field must not be larger than {}.",
            params.token_supply
        )));
    }

    let distinct_tokens: BTreeSet<_> = outputs.iter().flat_map(|o| o.native_tokens().iter().map(|t| t.id)).collect();
    if distinct_tokens.len() > MAX_NATIVE_TOKENS_PER_TRANSACTION {
        results.push(ValidationResult::fail(format!(
            "The count of all distinct native tokens present in outputs must not be larger than {}.",
            MAX_NATIVE_TOKENS_PER_TRANSACTION
        )));
    }

    results.into_iter().collect()
}

/// Check that every unlock is well placed: signatures are not repeated, and reference, alias and
/// NFT unlocks point back at an earlier signature unlock.
pub fn validate_unlocks(unlocks: &[Unlock]) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let mut signatures: HashSet<&Signature> = HashSet::new();

    for (i, unlock) in unlocks.iter().enumerate() {
        let (name, reference) = match unlock {
            Unlock::Signature(s) => {
                if !signatures.insert(&s.signature) {
                    result.push_error(format!("The Signature Unlock at index {} must be unique.", i));
                }
                continue;
            }
            Unlock::Reference(u) => ("Reference", u.reference as usize),
            Unlock::Alias(u) => ("Alias", u.reference as usize),
            Unlock::Nft(u) => ("NFT", u.reference as usize),
        };

        if reference >= MAX_INPUT_COUNT {
            result.push_error(format!(
                "Reference Unlock Index must be between 0 and {}.",
                MAX_INPUT_COUNT
            ));
        } else if reference >= i {
            result.push_error(format!("The {} Unlock at index {} must have Reference < {}", name, i, i));
        } else if !matches!(unlocks[reference], Unlock::Signature(_)) {
            result.push_error(format!("The Unlock at index {} must Reference a Signature Unlock.", i));
        }
    }
    result
}

/// Check a tagged data payload. Only its tag is bounded.
pub fn validate_tagged_data_payload(payload: &TaggedDataPayload) -> ValidationResult {
    ValidationResult::check(payload.tag.len() <= MAX_TAG_LENGTH, || {
        format!("Tagged Data Payload tag length exceeds the maximum size of {}.", MAX_TAG_LENGTH)
    })
}

/// Check a transaction essence against the network it claims to be valid on.
pub fn validate_transaction_essence(essence: &TransactionEssence, params: &ProtocolParameters) -> ValidationResult {
    let expected = params.network_id();
    let mut results = vec![ValidationResult::check(essence.network_id == expected, || {
        format!(
            "Transaction Essence network id must be {}, derived from the network name {}.",
            expected, params.network_name
        )
    })];
    results.push(validate_inputs(&essence.inputs));
    results.push(validate_outputs(&essence.outputs, params));
    if let Some(payload) = essence.payload.as_ref() {
        results.push(validate_tagged_data_payload(payload));
    }
    results.into_iter().collect()
}

/// Check a transaction payload: its essence, its unlocks, and that there is one unlock per input.
pub fn validate_transaction_payload(payload: &TransactionPayload, params: &ProtocolParameters) -> ValidationResult {
    validate_transaction_essence(&payload.essence, params)
        .merge(validate_unlocks(&payload.unlocks))
        .merge(ValidationResult::check(
            payload.unlocks.len() == payload.essence.inputs.len(),
            || "Transaction payload unlocks count must match inputs count of the Transaction Essence.".to_owned(),
        ))
        .traced("transaction")
}

impl Validate for TaggedDataPayload {
    fn validate(&self, _params: &ProtocolParameters) -> ValidationResult {
        validate_tagged_data_payload(self)
    }
}

impl Validate for TransactionEssence {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_transaction_essence(self, params)
    }
}

impl Validate for TransactionPayload {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_transaction_payload(self, params)
    }
}
