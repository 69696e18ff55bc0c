use crate::{
    helpers::min_address_storage_deposit,
    params::RentStructure,
    types::unlock_condition::UnlockCondition,
    validation::{join_names, validate_count, validate_distinct_ascending, ValidationResult},
};

/// Check a single unlock condition. Storage deposit returns are checked against the amount of the
/// output that holds them.
pub fn validate_unlock_condition(condition: &UnlockCondition, output_amount: u64, rent: &RentStructure) -> ValidationResult {
    match condition {
        UnlockCondition::Timelock(c) => ValidationResult::check(c.unix_time > 0, || {
            "Timelock Unlock Condition unix time must be greater than zero.".to_owned()
        }),
        UnlockCondition::Expiration(c) => ValidationResult::check(c.unix_time > 0, || {
            "Expiration Unlock Condition unix time must be greater than zero.".to_owned()
        }),
        UnlockCondition::StorageDepositReturn(c) => {
            let mut result = ValidationResult::ok();
            if c.amount == 0 {
                result.push_error("Storage deposit amount must be larger than zero.");
            }
            let min = min_address_storage_deposit(&c.return_address, rent);
            if c.amount < min {
                result.push_error(format!(
                    "Storage deposit return amount is less than the min storage deposit of {}.",
                    min
                ));
            }
            if c.amount > output_amount {
                result.push_error("Storage deposit return amount exceeds target output's deposit.");
            }
            result
        }
        UnlockCondition::Address(_)
        | UnlockCondition::StateControllerAddress(_)
        | UnlockCondition::GovernorAddress(_)
        | UnlockCondition::ImmutableAliasAddress(_) => ValidationResult::ok(),
    }
}

/// Check the unlock conditions of an output: count, allowed kinds, order and uniqueness, then
/// each condition on its own.
pub fn validate_unlock_conditions(
    conditions: &[UnlockCondition],
    output_name: &str,
    allowed: &[u8],
    min_count: usize,
    output_amount: u64,
    rent: &RentStructure,
) -> ValidationResult {
    let mut results = vec![validate_count(
        conditions.len(),
        min_count,
        allowed.len(),
        &format!("{} Unlock Conditions", output_name),
    )];

    if !conditions.iter().all(|c| allowed.contains(&c.kind())) {
        results.push(ValidationResult::fail(format!(
            "{} unlock condition type of an unlock condition must define one of the following types: {}.",
            output_name,
            join_names(allowed, UnlockCondition::kind_name)
        )));
    }

    results.push(validate_distinct_ascending(
        conditions.iter().map(UnlockCondition::kind),
        || format!("{} must not contain more than one Unlock Condition of each type.", output_name),
        || {
            format!(
                "{} Unlock Conditions must be sorted in ascending order based on their Unlock Condition Type.",
                output_name
            )
        },
    ));

    results.extend(conditions.iter().map(|c| validate_unlock_condition(c, output_amount, rent)));
    results.into_iter().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{address::Ed25519Address, unlock_condition::*};

    const RENT: RentStructure = RentStructure::new(100, 1, 10);
    // 100 * (46 + 340 + 40)
    const MIN_DEPOSIT: u64 = 42_600;
    const BASIC_CONDITIONS: [u8; 4] = [
        ADDRESS_UNLOCK_CONDITION_TYPE,
        STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
        TIMELOCK_UNLOCK_CONDITION_TYPE,
        EXPIRATION_UNLOCK_CONDITION_TYPE,
    ];

    fn owner() -> Ed25519Address {
        Ed25519Address::new([9u8; 32])
    }

    #[test]
    fn it_accepts_sorted_distinct_conditions() {
        let conditions = vec![
            UnlockCondition::address(owner()),
            UnlockCondition::storage_deposit_return(owner(), MIN_DEPOSIT),
            UnlockCondition::timelock(1),
            UnlockCondition::expiration(owner(), 2),
        ];
        let result = validate_unlock_conditions(&conditions, "Basic output", &BASIC_CONDITIONS, 1, 1_000_000, &RENT);
        assert!(result.is_valid, "{}", result);
    }

    #[test]
    fn it_rejects_zero_times() {
        let cases = [
            (UnlockCondition::timelock(0), "Timelock Unlock Condition unix time must be greater than zero."),
            (
                UnlockCondition::expiration(owner(), 0),
                "Expiration Unlock Condition unix time must be greater than zero.",
            ),
        ];
        for (condition, message) in cases.iter() {
            assert_eq!(validate_unlock_condition(condition, 1_000_000, &RENT).errors, vec![*message]);
        }
    }

    #[test]
    fn it_checks_storage_deposit_returns() {
        let zero = UnlockCondition::storage_deposit_return(owner(), 0);
        assert_eq!(
            validate_unlock_condition(&zero, 1_000_000, &RENT).errors,
            vec![
                "Storage deposit amount must be larger than zero.".to_string(),
                format!("Storage deposit return amount is less than the min storage deposit of {}.", MIN_DEPOSIT),
            ]
        );

        let too_small = UnlockCondition::storage_deposit_return(owner(), MIN_DEPOSIT - 1);
        assert!(!validate_unlock_condition(&too_small, 1_000_000, &RENT).is_valid);

        let too_large = UnlockCondition::storage_deposit_return(owner(), 60_000);
        assert_eq!(
            validate_unlock_condition(&too_large, 50_000, &RENT).errors,
            vec!["Storage deposit return amount exceeds target output's deposit."]
        );
    }

    #[test]
    fn it_rejects_disallowed_and_misordered_conditions() {
        let conditions = vec![UnlockCondition::address(owner()), UnlockCondition::governor(owner())];
        let result = validate_unlock_conditions(&conditions, "Basic output", &BASIC_CONDITIONS, 1, 1_000_000, &RENT);
        assert_eq!(
            result.errors,
            vec!["Basic output unlock condition type of an unlock condition must define one of the following types: Address Unlock Condition, Storage Deposit Return Unlock Condition, Timelock Unlock Condition, Expiration Unlock Condition."]
        );

        let conditions = vec![UnlockCondition::timelock(5), UnlockCondition::address(owner())];
        let result = validate_unlock_conditions(&conditions, "NFT output", &BASIC_CONDITIONS, 1, 1_000_000, &RENT);
        assert_eq!(
            result.errors,
            vec!["NFT output Unlock Conditions must be sorted in ascending order based on their Unlock Condition Type."]
        );

        let conditions = vec![UnlockCondition::address(owner()), UnlockCondition::address(owner())];
        let result = validate_unlock_conditions(&conditions, "Basic output", &BASIC_CONDITIONS, 1, 1_000_000, &RENT);
        assert_eq!(
            result.errors,
            vec!["Basic output must not contain more than one Unlock Condition of each type."]
        );
    }

    #[test]
    fn it_bounds_the_condition_count() {
        let result = validate_unlock_conditions(&[], "Basic output", &BASIC_CONDITIONS, 1, 1_000_000, &RENT);
        assert_eq!(
            result.errors,
            vec!["Basic output Unlock Conditions count must be between 1 and 4."]
        );
    }
}
