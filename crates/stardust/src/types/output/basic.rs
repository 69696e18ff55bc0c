use stardust_core::ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream};

use super::BASIC_OUTPUT_TYPE;
use crate::types::{
    feature::{features_length, read_features, write_features, Feature},
    native_token::{native_tokens_length, read_native_tokens, write_native_tokens, NativeToken},
    unlock_condition::{read_unlock_conditions, unlock_conditions_length, write_unlock_conditions, UnlockCondition},
};

/// Minimum serialized length of a basic output: type, amount and three empty lists.
pub const MIN_BASIC_OUTPUT_LENGTH: usize = 1 + 8 + 1 + 1 + 1;

/// Holds base currency and native tokens, owned by an address.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BasicOutput {
    /// Base currency held
    pub amount: u64,
    /// Native tokens held
    pub native_tokens: Vec<NativeToken>,
    /// Spending rules
    pub unlock_conditions: Vec<UnlockCondition>,
    /// Attached metadata
    pub features: Vec<Feature>,
}

impl BasicOutput {
    /// A basic output holding `amount` with no conditions or features.
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            ..Default::default()
        }
    }

    /// Add an unlock condition.
    pub fn with_unlock_condition(mut self, condition: UnlockCondition) -> Self {
        self.unlock_conditions.push(condition);
        self
    }

    /// Add a feature.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Add a native token.
    pub fn with_native_token(mut self, token: NativeToken) -> Self {
        self.native_tokens.push(token);
        self
    }
}

impl ByteFormat for BasicOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + 8
            + native_tokens_length(&self.native_tokens)
            + unlock_conditions_length(&self.unlock_conditions)
            + features_length(&self.features)
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_BASIC_OUTPUT_LENGTH, "basicOutput")?;
        stream.read_type_u8("basicOutput", BASIC_OUTPUT_TYPE)?;
        let amount = stream.read_u64("basicOutput.amount")?;
        let native_tokens = read_native_tokens(stream)?;
        let unlock_conditions = read_unlock_conditions(stream)?;
        let features = read_features(stream, "features")?;
        Ok(Self {
            amount,
            native_tokens,
            unlock_conditions,
            features,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("basicOutput", BASIC_OUTPUT_TYPE)?;
        len += stream.write_u64("basicOutput.amount", self.amount)?;
        len += write_native_tokens(stream, &self.native_tokens)?;
        len += write_unlock_conditions(stream, &self.unlock_conditions)?;
        len += write_features(stream, "features", &self.features)?;
        Ok(len)
    }
}
