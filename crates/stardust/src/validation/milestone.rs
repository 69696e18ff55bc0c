use crate::{
    params::ProtocolParameters,
    types::{
        block::{MAX_PARENTS, MIN_PARENTS},
        milestone::{MilestoneOption, MilestonePayload, ReceiptMilestoneOption, TreasuryTransactionPayload},
    },
    validation::{validate_count, validate_distinct_ascending, validate_treasury_output, Validate, ValidationResult},
};

/// The minimum number of funds a receipt migrates.
pub const MIN_MIGRATED_FUNDS_COUNT: usize = 1;
/// The maximum number of funds a receipt migrates.
pub const MAX_MIGRATED_FUNDS_COUNT: usize = 127;
/// The minimum number of coordinator signatures on a milestone.
pub const MIN_MILESTONE_SIGNATURES: usize = 1;
/// The maximum number of coordinator signatures on a milestone.
pub const MAX_MILESTONE_SIGNATURES: usize = 255;

/// Check a treasury transaction: only its output amount is bounded.
pub fn validate_treasury_transaction_payload(
    payload: &TreasuryTransactionPayload,
    params: &ProtocolParameters,
) -> ValidationResult {
    validate_treasury_output(&payload.output, params)
}

/// Check a receipt: the funds count, funds ordered by tail transaction hash, and the treasury
/// transaction.
pub fn validate_receipt_milestone_option(
    receipt: &ReceiptMilestoneOption,
    params: &ProtocolParameters,
) -> ValidationResult {
    vec![
        validate_count(
            receipt.funds.len(),
            MIN_MIGRATED_FUNDS_COUNT,
            MAX_MIGRATED_FUNDS_COUNT,
            "Migrated funds",
        ),
        validate_distinct_ascending(
            receipt.funds.iter().map(|f| f.tail_transaction_hash),
            || "Migrated funds tail transaction hashes must be unique.".to_owned(),
            || "Migrated funds must be lexicographically sorted by tail transaction hash.".to_owned(),
        ),
        validate_treasury_transaction_payload(&receipt.transaction, params),
    ]
    .into_iter()
    .collect()
}

/// Check a milestone: parents, option order, signature count and order, then each option.
pub fn validate_milestone_payload(payload: &MilestonePayload, params: &ProtocolParameters) -> ValidationResult {
    let mut results = vec![
        validate_count(payload.parents.len(), MIN_PARENTS, MAX_PARENTS, "Milestone parents"),
        validate_distinct_ascending(
            payload.parents.iter(),
            || "Milestone parents must be unique.".to_owned(),
            || "Milestone parents must be lexicographically sorted.".to_owned(),
        ),
        validate_distinct_ascending(
            payload.options.iter().map(MilestoneOption::kind),
            || "Milestone options must be unique per type.".to_owned(),
            || "Milestone options must be sorted in ascending order by type.".to_owned(),
        ),
        validate_count(
            payload.signatures.len(),
            MIN_MILESTONE_SIGNATURES,
            MAX_MILESTONE_SIGNATURES,
            "Milestone signatures",
        ),
        validate_distinct_ascending(
            payload.signatures.iter().map(|s| s.public_key()),
            || "Milestone signature public keys must be unique.".to_owned(),
            || "Milestone signatures must be lexicographically sorted by public key.".to_owned(),
        ),
    ];

    results.extend(payload.options.iter().filter_map(|o| match o {
        MilestoneOption::Receipt(r) => Some(validate_receipt_milestone_option(r, params)),
        MilestoneOption::ProtocolParams(_) => None,
    }));

    results.into_iter().collect::<ValidationResult>().traced("milestone")
}

impl Validate for TreasuryTransactionPayload {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_treasury_transaction_payload(self, params)
    }
}

impl Validate for ReceiptMilestoneOption {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_receipt_milestone_option(self, params)
    }
}

impl Validate for MilestonePayload {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_milestone_payload(self, params)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        params::test::params,
        types::milestone::{
            test::{milestone, receipt},
            MigratedFunds, ProtocolParamsMilestoneOption, TailTransactionHash,
        },
    };

    fn protocol_params_option() -> MilestoneOption {
        ProtocolParamsMilestoneOption {
            target_milestone_index: 13455,
            protocol_version: 3,
            params: vec![],
        }
        .into()
    }

    #[test]
    fn it_accepts_well_formed_milestones() {
        let p = params();
        let cases = [
            milestone(vec![]),
            milestone(vec![receipt(64, 2694).into()]),
            milestone(vec![receipt(64, 2694).into(), protocol_params_option()]),
        ];
        for m in cases.iter() {
            let result = m.validate(&p);
            assert!(result.is_valid, "{}", result);
        }
    }

    #[test]
    fn it_checks_milestone_parents_and_signatures() {
        let p = params();
        let mut m = milestone(vec![]);
        m.parents.reverse();
        m.signatures.push(m.signatures[0].clone());
        assert_eq!(
            m.validate(&p).errors,
            vec![
                "Milestone parents must be lexicographically sorted.",
                "Milestone signatures must be lexicographically sorted by public key.",
            ]
        );

        m.parents.clear();
        m.signatures.clear();
        assert_eq!(
            m.validate(&p).errors,
            vec![
                "Milestone parents count must be between 1 and 8.",
                "Milestone signatures count must be between 1 and 255.",
            ]
        );
    }

    #[test]
    fn it_orders_milestone_options_by_type() {
        let p = params();
        let unsorted = milestone(vec![protocol_params_option(), receipt(64, 2694).into()]);
        assert_eq!(
            unsorted.validate(&p).errors,
            vec!["Milestone options must be sorted in ascending order by type."]
        );

        let repeated = milestone(vec![protocol_params_option(), protocol_params_option()]);
        assert_eq!(repeated.validate(&p).errors, vec!["Milestone options must be unique per type."]);
    }

    #[test]
    fn it_checks_receipts() {
        let p = params();
        let mut r = receipt(64, 2694);
        let mut second: MigratedFunds = r.funds[0];
        second.tail_transaction_hash = TailTransactionHash([0x01; 49]);
        r.funds.push(second);
        r.transaction.output.amount = p.token_supply + 1;

        let errors = milestone(vec![r.clone().into()]).validate(&p).errors;
        assert_eq!(errors.len(), 2, "{:?}", errors);
        assert_eq!(errors[0], "Migrated funds must be lexicographically sorted by tail transaction hash.");
        assert!(errors[1].starts_with("Treasury output amount field must be"));

        r.funds.clear();
        r.transaction.output.amount = 1;
        assert_eq!(r.validate(&p).errors, vec!["Migrated funds count must be between 1 and 127."]);
    }
}
