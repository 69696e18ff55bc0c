use stardust_core::ser::ByteFormat;

use crate::{
    helpers::storage_deposit_for_length,
    params::ProtocolParameters,
    types::{
        address::Address,
        feature::{ISSUER_FEATURE_TYPE, METADATA_FEATURE_TYPE, MAX_METADATA_LENGTH, SENDER_FEATURE_TYPE, TAG_FEATURE_TYPE},
        native_token::NativeToken,
        output::{AliasOutput, BasicOutput, FoundryOutput, NftOutput, Output, TreasuryOutput},
        token_scheme::{SimpleTokenScheme, TokenScheme},
        unlock_condition::*,
    },
    validation::{validate_features, validate_native_tokens, validate_unlock_conditions, Validate, ValidationResult},
};

const BASIC_UNLOCK_CONDITIONS: [u8; 4] = [
    ADDRESS_UNLOCK_CONDITION_TYPE,
    STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
    TIMELOCK_UNLOCK_CONDITION_TYPE,
    EXPIRATION_UNLOCK_CONDITION_TYPE,
];
const BASIC_FEATURES: [u8; 3] = [SENDER_FEATURE_TYPE, METADATA_FEATURE_TYPE, TAG_FEATURE_TYPE];

const ALIAS_UNLOCK_CONDITIONS: [u8; 2] = [
    STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE,
    GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE,
];
const ALIAS_FEATURES: [u8; 2] = [SENDER_FEATURE_TYPE, METADATA_FEATURE_TYPE];
const ALIAS_IMMUTABLE_FEATURES: [u8; 2] = [ISSUER_FEATURE_TYPE, METADATA_FEATURE_TYPE];

const FOUNDRY_UNLOCK_CONDITIONS: [u8; 1] = [IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE];
const FOUNDRY_FEATURES: [u8; 1] = [METADATA_FEATURE_TYPE];
const FOUNDRY_IMMUTABLE_FEATURES: [u8; 1] = [METADATA_FEATURE_TYPE];

const NFT_UNLOCK_CONDITIONS: [u8; 4] = BASIC_UNLOCK_CONDITIONS;
const NFT_FEATURES: [u8; 3] = BASIC_FEATURES;
const NFT_IMMUTABLE_FEATURES: [u8; 2] = [ISSUER_FEATURE_TYPE, METADATA_FEATURE_TYPE];

/// The output amount is positive and within the token supply.
fn validate_amount(name: &str, amount: u64, params: &ProtocolParameters) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if amount == 0 {
        result.push_error(format!("{} amount field must be larger than zero.", name));
    }
    if amount > params.token_supply {
        result.push_error(format!("{} amount field must not be larger than max token supply.", name));
    }
    result
}

/// Rules every non-treasury output shares: amount bounds, storage deposit and native tokens.
fn validate_common(
    name: &str,
    amount: u64,
    serialized_length: usize,
    native_tokens: &[NativeToken],
    params: &ProtocolParameters,
) -> ValidationResult {
    let min = storage_deposit_for_length(serialized_length, &params.rent_structure);
    validate_amount(name, amount, params)
        .merge(ValidationResult::check(amount >= min, || {
            format!("{} amount field must cover the minimum storage deposit of {}.", name, min)
        }))
        .merge(validate_native_tokens(native_tokens))
}

fn has_condition(conditions: &[UnlockCondition], kind: u8) -> bool {
    conditions.iter().any(|c| c.kind() == kind)
}

/// Check a basic output.
pub fn validate_basic_output(output: &BasicOutput, params: &ProtocolParameters) -> ValidationResult {
    const NAME: &str = "Basic output";
    let mut results = vec![validate_common(
        NAME,
        output.amount,
        output.serialized_length(),
        &output.native_tokens,
        params,
    )];

    if !has_condition(&output.unlock_conditions, ADDRESS_UNLOCK_CONDITION_TYPE) {
        results.push(ValidationResult::fail(
            "Basic output unlock conditions must define an Address Unlock Condition.",
        ));
    }
    results.push(validate_unlock_conditions(
        &output.unlock_conditions,
        NAME,
        &BASIC_UNLOCK_CONDITIONS,
        1,
        output.amount,
        &params.rent_structure,
    ));
    results.push(validate_features(&output.features, NAME, &BASIC_FEATURES, false));
    results.into_iter().collect()
}

/// Check an alias output.
pub fn validate_alias_output(output: &AliasOutput, params: &ProtocolParameters) -> ValidationResult {
    const NAME: &str = "Alias output";
    let mut results = vec![validate_common(
        NAME,
        output.amount,
        output.serialized_length(),
        &output.native_tokens,
        params,
    )];

    if !has_condition(&output.unlock_conditions, STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE)
        || !has_condition(&output.unlock_conditions, GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE)
    {
        results.push(ValidationResult::fail(
            "Alias output unlock conditions must define a State Controller Address Unlock Condition and a Governor Address Unlock Condition.",
        ));
    }
    results.push(validate_unlock_conditions(
        &output.unlock_conditions,
        NAME,
        &ALIAS_UNLOCK_CONDITIONS,
        ALIAS_UNLOCK_CONDITIONS.len(),
        output.amount,
        &params.rent_structure,
    ));

    let own_address = Address::Alias(output.alias_address());
    let controlled_by_itself = output.unlock_conditions.iter().any(|c| match c {
        UnlockCondition::StateControllerAddress(c) => c.address == own_address,
        UnlockCondition::GovernorAddress(c) => c.address == own_address,
        _ => false,
    });
    if controlled_by_itself {
        results.push(ValidationResult::fail(
            "Alias output Address field of the State Controller Address Unlock Condition and Governor Address Unlock Condition must not be the same as the Alias address derived from Alias ID.",
        ));
    }

    if output.alias_id.is_null() && (output.state_index != 0 || output.foundry_counter != 0) {
        results.push(ValidationResult::fail(
            "Alias output Alias ID is zeroed out, State Index and Foundry Counter must be 0.",
        ));
    }

    if output.state_metadata.len() > MAX_METADATA_LENGTH {
        results.push(ValidationResult::fail(
            "Alias output state metadata length must not be greater than max metadata length.",
        ));
    }

    results.push(validate_features(&output.features, NAME, &ALIAS_FEATURES, false));
    results.push(validate_features(&output.immutable_features, NAME, &ALIAS_IMMUTABLE_FEATURES, true));
    results.into_iter().collect()
}

/// Check the supply arithmetic of a simple token scheme.
pub fn validate_simple_token_scheme(scheme: &SimpleTokenScheme) -> ValidationResult {
    let mut result = ValidationResult::ok();
    match scheme.circulating_supply() {
        None => result.push_error("Foundry output Token Scheme melted tokens must not be greater than minted tokens."),
        Some(circulating) if circulating > scheme.maximum_supply => result.push_error(
            "Foundry output Token Scheme circulating supply must not be greater than maximum supply.",
        ),
        Some(_) => {}
    }
    if scheme.maximum_supply.is_zero() {
        result.push_error("Foundry output Token Scheme maximum supply must be larger than zero.");
    }
    result
}

impl Validate for TokenScheme {
    fn validate(&self, _params: &ProtocolParameters) -> ValidationResult {
        match self {
            TokenScheme::Simple(s) => validate_simple_token_scheme(s),
        }
    }
}

/// Check a foundry output.
pub fn validate_foundry_output(output: &FoundryOutput, params: &ProtocolParameters) -> ValidationResult {
    const NAME: &str = "Foundry output";
    let mut results = vec![validate_common(
        NAME,
        output.amount,
        output.serialized_length(),
        &output.native_tokens,
        params,
    )];

    if !has_condition(&output.unlock_conditions, IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE) {
        results.push(ValidationResult::fail(
            "Foundry output unlock conditions must define an Immutable Alias Address Unlock Condition.",
        ));
    }
    results.push(validate_unlock_conditions(
        &output.unlock_conditions,
        NAME,
        &FOUNDRY_UNLOCK_CONDITIONS,
        FOUNDRY_UNLOCK_CONDITIONS.len(),
        output.amount,
        &params.rent_structure,
    ));
    results.push(validate_features(&output.features, NAME, &FOUNDRY_FEATURES, false));
    results.push(validate_features(&output.immutable_features, NAME, &FOUNDRY_IMMUTABLE_FEATURES, true));
    results.push(output.token_scheme.validate(params));
    results.into_iter().collect()
}

/// Check an NFT output.
pub fn validate_nft_output(output: &NftOutput, params: &ProtocolParameters) -> ValidationResult {
    const NAME: &str = "NFT output";
    let mut results = vec![validate_common(
        NAME,
        output.amount,
        output.serialized_length(),
        &output.native_tokens,
        params,
    )];

    if !has_condition(&output.unlock_conditions, ADDRESS_UNLOCK_CONDITION_TYPE) {
        results.push(ValidationResult::fail(
            "NFT output unlock conditions must define an Address Unlock Condition.",
        ));
    }
    results.push(validate_unlock_conditions(
        &output.unlock_conditions,
        NAME,
        &NFT_UNLOCK_CONDITIONS,
        1,
        output.amount,
        &params.rent_structure,
    ));

    let own_address = Address::Nft(output.nft_address());
    let owned_by_itself = output.unlock_conditions.iter().any(|c| match c {
        UnlockCondition::Address(c) => c.address == own_address,
        _ => false,
    });
    if owned_by_itself {
        results.push(ValidationResult::fail(
            "NFT output Address field of the Address Unlock Condition must not be the same as the NFT address derived from NFT ID.",
        ));
    }

    results.push(validate_features(&output.features, NAME, &NFT_FEATURES, false));
    results.push(validate_features(&output.immutable_features, NAME, &NFT_IMMUTABLE_FEATURES, true));
    results.into_iter().collect()
}

/// Check a treasury output. Only its amount is constrained.
pub fn validate_treasury_output(output: &TreasuryOutput, params: &ProtocolParameters) -> ValidationResult {
    validate_amount("Treasury output", output.amount, params)
}

impl Validate for BasicOutput {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_basic_output(self, params)
    }
}

impl Validate for AliasOutput {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_alias_output(self, params)
    }
}

impl Validate for FoundryOutput {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_foundry_output(self, params)
    }
}

impl Validate for NftOutput {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_nft_output(self, params)
    }
}

impl Validate for TreasuryOutput {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_treasury_output(self, params)
    }
}

/// Check an output of any kind.
pub fn validate_output(output: &Output, params: &ProtocolParameters) -> ValidationResult {
    let result = match output {
        Output::Treasury(o) => o.validate(params),
        Output::Basic(o) => o.validate(params),
        Output::Alias(o) => o.validate(params),
        Output::Foundry(o) => o.validate(params),
        Output::Nft(o) => o.validate(params),
    };
    result.traced(output.kind_name())
}

impl Validate for Output {
    fn validate(&self, params: &ProtocolParameters) -> ValidationResult {
        validate_output(self, params)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::{
        params::test::params,
        types::{
            address::{AliasAddress, Ed25519Address, NftAddress},
            feature::Feature,
            ids::{AliasId, NftId, TokenId},
        },
    };
    use stardust_core::U256;

    pub(crate) fn owner() -> Ed25519Address {
        Ed25519Address::new([0x69; 32])
    }

    pub(crate) fn basic(amount: u64) -> BasicOutput {
        BasicOutput::new(amount).with_unlock_condition(UnlockCondition::address(owner()))
    }

    fn alias() -> AliasOutput {
        AliasOutput {
            amount: 1_000_000,
            alias_id: AliasId([0x11; 32]),
            state_index: 3,
            foundry_counter: 1,
            unlock_conditions: vec![UnlockCondition::state_controller(owner()), UnlockCondition::governor(owner())],
            features: vec![Feature::sender(owner())],
            immutable_features: vec![Feature::issuer(owner())],
            ..Default::default()
        }
    }

    fn foundry(minted: u64, melted: u64, maximum: u64) -> FoundryOutput {
        FoundryOutput {
            amount: 1_000_000,
            native_tokens: vec![],
            serial_number: 1,
            token_scheme: TokenScheme::Simple(SimpleTokenScheme::new(
                U256::from(minted),
                U256::from(melted),
                U256::from(maximum),
            )),
            unlock_conditions: vec![UnlockCondition::immutable_alias(AliasAddress::new(AliasId([0x11; 32])))],
            features: vec![],
            immutable_features: vec![Feature::metadata(b"token".to_vec())],
        }
    }

    fn nft() -> NftOutput {
        NftOutput {
            amount: 1_000_000,
            nft_id: NftId([0x22; 32]),
            unlock_conditions: vec![UnlockCondition::address(owner())],
            immutable_features: vec![Feature::issuer(owner()), Feature::metadata(b"art".to_vec())],
            ..Default::default()
        }
    }

    #[test]
    fn it_accepts_well_formed_outputs() {
        let p = params();
        let cases: Vec<Output> = vec![
            basic(1_000_000).with_feature(Feature::tag(b"tag".to_vec())).into(),
            alias().into(),
            foundry(100, 20, 1000).into(),
            nft().into(),
            TreasuryOutput { amount: 5 }.into(),
        ];
        for output in cases.iter() {
            let result = output.validate(&p);
            assert!(result.is_valid, "{} {}", output.kind_name(), result);
        }
    }

    #[test]
    fn it_bounds_amounts() {
        let p = params();
        let over_supply = basic(p.token_supply + 1);
        assert!(over_supply
            .validate(&p)
            .errors
            .contains(&"Basic output amount field must not be larger than max token supply.".to_string()));

        let mut zero = nft();
        zero.amount = 0;
        let errors = zero.validate(&p).errors;
        assert_eq!(errors[0], "NFT output amount field must be larger than zero.");
        assert!(errors[1].starts_with("NFT output amount field must cover the minimum storage deposit of"));
    }

    #[test]
    fn it_requires_the_storage_deposit() {
        let p = params();
        // 46 data bytes, 34 key bytes weighted 10, 40 metadata bytes
        let min = 100 * (46 + 340 + 40);
        assert!(basic(min).validate(&p).is_valid);
        assert_eq!(
            basic(min - 1).validate(&p).errors,
            vec![format!("Basic output amount field must cover the minimum storage deposit of {}.", min)]
        );
    }

    #[test]
    fn it_requires_an_address_unlock_condition() {
        let p = params();
        let output = BasicOutput::new(1_000_000).with_unlock_condition(UnlockCondition::timelock(5));
        assert_eq!(
            output.validate(&p).errors,
            vec!["Basic output unlock conditions must define an Address Unlock Condition."]
        );
    }

    #[test]
    fn it_rejects_duplicate_and_unsorted_lists_for_every_kind() {
        let p = params();

        let mut b = basic(1_000_000);
        b.features = vec![Feature::tag(b"a".to_vec()), Feature::tag(b"b".to_vec())];
        assert!(b
            .validate(&p)
            .errors
            .contains(&"Basic output must not contain more than one Feature of each type.".to_string()));

        let mut a = alias();
        a.unlock_conditions.reverse();
        assert!(a.validate(&p).errors.contains(
            &"Alias output Unlock Conditions must be sorted in ascending order based on their Unlock Condition Type."
                .to_string()
        ));

        let mut f = foundry(1, 0, 1);
        f.immutable_features.push(Feature::metadata(b"again".to_vec()));
        assert!(f
            .validate(&p)
            .errors
            .contains(&"Foundry output must not contain more than one Immutable Feature of each type.".to_string()));

        let mut n = nft();
        n.immutable_features.reverse();
        assert!(n.validate(&p).errors.contains(
            &"NFT output Immutable Features must be sorted in ascending order based on their Immutable Feature Type."
                .to_string()
        ));
    }

    #[test]
    fn it_checks_alias_specific_rules() {
        let p = params();

        let mut own = alias();
        own.unlock_conditions[1] = UnlockCondition::governor(own.alias_address());
        assert_eq!(
            own.validate(&p).errors,
            vec!["Alias output Address field of the State Controller Address Unlock Condition and Governor Address Unlock Condition must not be the same as the Alias address derived from Alias ID."]
        );

        let mut fresh = alias();
        fresh.alias_id = AliasId::null();
        assert_eq!(
            fresh.validate(&p).errors,
            vec!["Alias output Alias ID is zeroed out, State Index and Foundry Counter must be 0."]
        );
        fresh.state_index = 0;
        fresh.foundry_counter = 0;
        assert!(fresh.validate(&p).is_valid);

        let mut single = alias();
        single.unlock_conditions.pop();
        assert_eq!(
            single.validate(&p).errors,
            vec![
                "Alias output unlock conditions must define a State Controller Address Unlock Condition and a Governor Address Unlock Condition.",
                "Alias output Unlock Conditions count must be equal to 2.",
            ]
        );

        let mut big = alias();
        big.amount = 10_000_000;
        big.state_metadata = vec![0u8; MAX_METADATA_LENGTH + 1];
        assert_eq!(
            big.validate(&p).errors,
            vec!["Alias output state metadata length must not be greater than max metadata length."]
        );
    }

    #[test]
    fn it_checks_foundry_supply_arithmetic() {
        let p = params();
        let cases = [
            (foundry(10, 11, 100), "Foundry output Token Scheme melted tokens must not be greater than minted tokens."),
            (foundry(0, 0, 0), "Foundry output Token Scheme maximum supply must be larger than zero."),
            (
                foundry(200, 50, 100),
                "Foundry output Token Scheme circulating supply must not be greater than maximum supply.",
            ),
        ];
        for (output, message) in cases.iter() {
            assert_eq!(output.validate(&p).errors, vec![*message]);
        }

        let mut unbound = foundry(1, 0, 1);
        unbound.unlock_conditions.clear();
        assert_eq!(
            unbound.validate(&p).errors,
            vec![
                "Foundry output unlock conditions must define an Immutable Alias Address Unlock Condition.",
                "Foundry output Unlock Conditions count must be equal to 1.",
            ]
        );
    }

    #[test]
    fn it_checks_nft_specific_rules() {
        let p = params();
        let mut own = nft();
        own.unlock_conditions = vec![UnlockCondition::address(NftAddress::new(own.nft_id))];
        assert_eq!(
            own.validate(&p).errors,
            vec!["NFT output Address field of the Address Unlock Condition must not be the same as the NFT address derived from NFT ID."]
        );

        let mut disallowed = nft();
        disallowed.features = vec![Feature::issuer(owner())];
        assert_eq!(
            disallowed.validate(&p).errors,
            vec!["NFT output feature type of a feature must define one of the following types: Sender Feature, Metadata Feature, Tag Feature."]
        );
    }

    #[test]
    fn it_checks_native_tokens_of_outputs() {
        let p = params();
        let output = basic(1_000_000).with_native_token(NativeToken::new(TokenId([8u8; 38]), U256::zero()));
        let errors = output.validate(&p).errors;
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("must have a value bigger than zero."));
    }
}
