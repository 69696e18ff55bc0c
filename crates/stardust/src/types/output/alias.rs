use stardust_core::ser::{ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream};

use super::ALIAS_OUTPUT_TYPE;
use crate::types::{
    address::AliasAddress,
    feature::{features_length, read_features, write_features, Feature},
    ids::AliasId,
    native_token::{native_tokens_length, read_native_tokens, write_native_tokens, NativeToken},
    unlock_condition::{read_unlock_conditions, unlock_conditions_length, write_unlock_conditions, UnlockCondition},
};

/// Minimum serialized length of an alias output.
pub const MIN_ALIAS_OUTPUT_LENGTH: usize = 1 // type
    + 8 // amount
    + 1 // native tokens
    + AliasId::LENGTH
    + 4 // state index
    + 2 // state metadata length
    + 4 // foundry counter
    + 1 // unlock conditions
    + 1 // features
    + 1; // immutable features

/// An alias: an account with a state controller and a governor, able to control foundries.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct AliasOutput {
    /// Base currency held
    pub amount: u64,
    /// Native tokens held
    pub native_tokens: Vec<NativeToken>,
    /// Zero when the alias is created
    pub alias_id: AliasId,
    /// Incremented on every state transition
    pub state_index: u32,
    /// Metadata owned by the state controller
    pub state_metadata: Vec<u8>,
    /// Number of foundries created by the alias
    pub foundry_counter: u32,
    /// Spending rules
    pub unlock_conditions: Vec<UnlockCondition>,
    /// Attached metadata
    pub features: Vec<Feature>,
    /// Metadata fixed at creation
    pub immutable_features: Vec<Feature>,
}

impl AliasOutput {
    /// The address the alias controls.
    pub fn alias_address(&self) -> AliasAddress {
        AliasAddress::new(self.alias_id)
    }
}

impl ByteFormat for AliasOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + 8
            + native_tokens_length(&self.native_tokens)
            + AliasId::LENGTH
            + 4
            + Prefix::U16.len()
            + self.state_metadata.len()
            + 4
            + unlock_conditions_length(&self.unlock_conditions)
            + features_length(&self.features)
            + features_length(&self.immutable_features)
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_ALIAS_OUTPUT_LENGTH, "aliasOutput")?;
        stream.read_type_u8("aliasOutput", ALIAS_OUTPUT_TYPE)?;
        let amount = stream.read_u64("aliasOutput.amount")?;
        let native_tokens = read_native_tokens(stream)?;
        let alias_id = AliasId::read_from(stream)?;
        let state_index = stream.read_u32("aliasOutput.stateIndex")?;
        let state_metadata = stream.read_prefixed_bytes("aliasOutput.stateMetadata", Prefix::U16)?;
        let foundry_counter = stream.read_u32("aliasOutput.foundryCounter")?;
        let unlock_conditions = read_unlock_conditions(stream)?;
        let features = read_features(stream, "features")?;
        let immutable_features = read_features(stream, "immutableFeatures")?;
        Ok(Self {
            amount,
            native_tokens,
            alias_id,
            state_index,
            state_metadata,
            foundry_counter,
            unlock_conditions,
            features,
            immutable_features,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("aliasOutput", ALIAS_OUTPUT_TYPE)?;
        len += stream.write_u64("aliasOutput.amount", self.amount)?;
        len += write_native_tokens(stream, &self.native_tokens)?;
        len += self.alias_id.write_to(stream)?;
        len += stream.write_u32("aliasOutput.stateIndex", self.state_index)?;
        len += stream.write_prefixed_bytes("aliasOutput.stateMetadata", Prefix::U16, &self.state_metadata)?;
        len += stream.write_u32("aliasOutput.foundryCounter", self.foundry_counter)?;
        len += write_unlock_conditions(stream, &self.unlock_conditions)?;
        len += write_features(stream, "features", &self.features)?;
        len += write_features(stream, "immutableFeatures", &self.immutable_features)?;
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::address::Ed25519Address;

    fn alias() -> AliasOutput {
        let controller = Ed25519Address::new([0x11; 32]);
        AliasOutput {
            amount: 1_000_000,
            alias_id: AliasId([0xaa; 32]),
            state_index: 2,
            state_metadata: b"state".to_vec(),
            foundry_counter: 1,
            unlock_conditions: vec![
                UnlockCondition::state_controller(controller),
                UnlockCondition::governor(controller),
            ],
            immutable_features: vec![Feature::metadata(b"immutable".to_vec())],
            ..Default::default()
        }
    }

    #[test]
    fn it_serializes_and_deserializes_alias_outputs() {
        let output = alias();
        let bytes = output.serialize().unwrap();
        assert_eq!(bytes.len(), output.serialized_length());
        assert_eq!(bytes[0], ALIAS_OUTPUT_TYPE);
        // amount, empty native tokens, then the alias id
        assert_eq!(hex::encode(&bytes[1..10]), "40420f000000000000");
        assert_eq!(&bytes[10..42], &[0xaa; 32][..]);
        // state index, then the length-prefixed state metadata
        assert_eq!(hex::encode(&bytes[42..53]), "0200000005007374617465");
        assert_eq!(AliasOutput::deserialize(&bytes).unwrap(), output);
    }

    #[test]
    fn it_exposes_the_alias_address() {
        assert_eq!(alias().alias_address().alias_id(), &AliasId([0xaa; 32]));
    }

    #[test]
    fn it_rejects_truncated_alias_outputs() {
        let bytes = alias().serialize().unwrap();
        for cut in 1..=bytes.len() {
            match AliasOutput::deserialize(&bytes[..bytes.len() - cut]) {
                Err(SerError::TruncatedInput { .. }) => {}
                other => panic!("expected TruncatedInput at cut {}, got {:?}", cut, other),
            }
        }
    }
}
