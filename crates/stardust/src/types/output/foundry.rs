use stardust_core::ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream};

use super::FOUNDRY_OUTPUT_TYPE;
use crate::types::{
    feature::{features_length, read_features, write_features, Feature},
    ids::FoundryId,
    native_token::{native_tokens_length, read_native_tokens, write_native_tokens, NativeToken},
    token_scheme::{TokenScheme, MIN_TOKEN_SCHEME_LENGTH},
    unlock_condition::{read_unlock_conditions, unlock_conditions_length, write_unlock_conditions, UnlockCondition},
};

/// Minimum serialized length of a foundry output.
pub const MIN_FOUNDRY_OUTPUT_LENGTH: usize = 1 // type
    + 8 // amount
    + 1 // native tokens
    + 4 // serial number
    + MIN_TOKEN_SCHEME_LENGTH
    + 1 // unlock conditions
    + 1 // features
    + 1; // immutable features

/// A foundry mints and melts one native token under a token scheme, controlled by an alias.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FoundryOutput {
    /// Base currency held
    pub amount: u64,
    /// Native tokens held
    pub native_tokens: Vec<NativeToken>,
    /// The alias's foundry counter when the foundry was created
    pub serial_number: u32,
    /// Supply tracking for the foundry's token
    pub token_scheme: TokenScheme,
    /// Spending rules
    pub unlock_conditions: Vec<UnlockCondition>,
    /// Attached metadata
    pub features: Vec<Feature>,
    /// Metadata fixed at creation
    pub immutable_features: Vec<Feature>,
}

impl FoundryOutput {
    /// The foundry's id, if it carries an immutable alias address unlock condition.
    pub fn id(&self) -> Option<FoundryId> {
        self.unlock_conditions.iter().find_map(|c| match c {
            UnlockCondition::ImmutableAliasAddress(c) => {
                Some(FoundryId::build(&c.address, self.serial_number, self.token_scheme.kind()))
            }
            _ => None,
        })
    }
}

impl ByteFormat for FoundryOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + 8
            + native_tokens_length(&self.native_tokens)
            + 4
            + self.token_scheme.serialized_length()
            + unlock_conditions_length(&self.unlock_conditions)
            + features_length(&self.features)
            + features_length(&self.immutable_features)
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_FOUNDRY_OUTPUT_LENGTH, "foundryOutput")?;
        stream.read_type_u8("foundryOutput", FOUNDRY_OUTPUT_TYPE)?;
        let amount = stream.read_u64("foundryOutput.amount")?;
        let native_tokens = read_native_tokens(stream)?;
        let serial_number = stream.read_u32("foundryOutput.serialNumber")?;
        let token_scheme = TokenScheme::read_from(stream)?;
        let unlock_conditions = read_unlock_conditions(stream)?;
        let features = read_features(stream, "features")?;
        let immutable_features = read_features(stream, "immutableFeatures")?;
        Ok(Self {
            amount,
            native_tokens,
            serial_number,
            token_scheme,
            unlock_conditions,
            features,
            immutable_features,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("foundryOutput", FOUNDRY_OUTPUT_TYPE)?;
        len += stream.write_u64("foundryOutput.amount", self.amount)?;
        len += write_native_tokens(stream, &self.native_tokens)?;
        len += stream.write_u32("foundryOutput.serialNumber", self.serial_number)?;
        len += self.token_scheme.write_to(stream)?;
        len += write_unlock_conditions(stream, &self.unlock_conditions)?;
        len += write_features(stream, "features", &self.features)?;
        len += write_features(stream, "immutableFeatures", &self.immutable_features)?;
        Ok(len)
    }
}
