//! Outputs: the ledger's unspent bundles of value.

mod alias;
mod basic;
mod foundry;
mod nft;
mod treasury;

pub use alias::*;
pub use basic::*;
pub use foundry::*;
pub use nft::*;
pub use treasury::*;

use stardust_core::ser::{list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream};

use crate::types::{feature::Feature, min_of, native_token::NativeToken, unlock_condition::UnlockCondition};

/// Discriminant of the treasury output.
pub const TREASURY_OUTPUT_TYPE: u8 = 2;
/// Discriminant of the basic output.
pub const BASIC_OUTPUT_TYPE: u8 = 3;
/// Discriminant of the alias output.
pub const ALIAS_OUTPUT_TYPE: u8 = 4;
/// Discriminant of the foundry output.
pub const FOUNDRY_OUTPUT_TYPE: u8 = 5;
/// Discriminant of the NFT output.
pub const NFT_OUTPUT_TYPE: u8 = 6;

/// Minimum serialized length of any output.
pub const MIN_OUTPUT_LENGTH: usize = min_of(&[
    MIN_TREASURY_OUTPUT_LENGTH,
    MIN_BASIC_OUTPUT_LENGTH,
    MIN_ALIAS_OUTPUT_LENGTH,
    MIN_FOUNDRY_OUTPUT_LENGTH,
    MIN_NFT_OUTPUT_LENGTH,
]);

/// An output of any kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Output {
    /// Treasury
    Treasury(TreasuryOutput),
    /// Basic
    Basic(BasicOutput),
    /// Alias
    Alias(AliasOutput),
    /// Foundry
    Foundry(FoundryOutput),
    /// NFT
    Nft(NftOutput),
}

impl Output {
    /// The discriminant of the output kind.
    pub fn kind(&self) -> u8 {
        match self {
            Output::Treasury(_) => TREASURY_OUTPUT_TYPE,
            Output::Basic(_) => BASIC_OUTPUT_TYPE,
            Output::Alias(_) => ALIAS_OUTPUT_TYPE,
            Output::Foundry(_) => FOUNDRY_OUTPUT_TYPE,
            Output::Nft(_) => NFT_OUTPUT_TYPE,
        }
    }

    /// Human readable name of the output kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Output::Treasury(_) => "Treasury output",
            Output::Basic(_) => "Basic output",
            Output::Alias(_) => "Alias output",
            Output::Foundry(_) => "Foundry output",
            Output::Nft(_) => "NFT output",
        }
    }

    /// Base currency held.
    pub fn amount(&self) -> u64 {
        match self {
            Output::Treasury(o) => o.amount,
            Output::Basic(o) => o.amount,
            Output::Alias(o) => o.amount,
            Output::Foundry(o) => o.amount,
            Output::Nft(o) => o.amount,
        }
    }

    /// Native tokens held. Treasury outputs hold none.
    pub fn native_tokens(&self) -> &[NativeToken] {
        match self {
            Output::Treasury(_) => &[],
            Output::Basic(o) => &o.native_tokens,
            Output::Alias(o) => &o.native_tokens,
            Output::Foundry(o) => &o.native_tokens,
            Output::Nft(o) => &o.native_tokens,
        }
    }

    /// Unlock conditions. Treasury outputs have none.
    pub fn unlock_conditions(&self) -> &[UnlockCondition] {
        match self {
            Output::Treasury(_) => &[],
            Output::Basic(o) => &o.unlock_conditions,
            Output::Alias(o) => &o.unlock_conditions,
            Output::Foundry(o) => &o.unlock_conditions,
            Output::Nft(o) => &o.unlock_conditions,
        }
    }

    /// Features. Treasury outputs have none.
    pub fn features(&self) -> &[Feature] {
        match self {
            Output::Treasury(_) => &[],
            Output::Basic(o) => &o.features,
            Output::Alias(o) => &o.features,
            Output::Foundry(o) => &o.features,
            Output::Nft(o) => &o.features,
        }
    }

    /// Immutable features. Only alias, foundry and NFT outputs have them.
    pub fn immutable_features(&self) -> &[Feature] {
        match self {
            Output::Treasury(_) | Output::Basic(_) => &[],
            Output::Alias(o) => &o.immutable_features,
            Output::Foundry(o) => &o.immutable_features,
            Output::Nft(o) => &o.immutable_features,
        }
    }
}

impl From<TreasuryOutput> for Output {
    fn from(o: TreasuryOutput) -> Self {
        Output::Treasury(o)
    }
}

impl From<BasicOutput> for Output {
    fn from(o: BasicOutput) -> Self {
        Output::Basic(o)
    }
}

impl From<AliasOutput> for Output {
    fn from(o: AliasOutput) -> Self {
        Output::Alias(o)
    }
}

impl From<FoundryOutput> for Output {
    fn from(o: FoundryOutput) -> Self {
        Output::Foundry(o)
    }
}

impl From<NftOutput> for Output {
    fn from(o: NftOutput) -> Self {
        Output::Nft(o)
    }
}

impl ByteFormat for Output {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            Output::Treasury(o) => o.serialized_length(),
            Output::Basic(o) => o.serialized_length(),
            Output::Alias(o) => o.serialized_length(),
            Output::Foundry(o) => o.serialized_length(),
            Output::Nft(o) => o.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_OUTPUT_LENGTH, "output")?;
        match stream.peek_u8("output")? {
            TREASURY_OUTPUT_TYPE => Ok(Output::Treasury(TreasuryOutput::read_from(stream)?)),
            BASIC_OUTPUT_TYPE => Ok(Output::Basic(BasicOutput::read_from(stream)?)),
            ALIAS_OUTPUT_TYPE => Ok(Output::Alias(AliasOutput::read_from(stream)?)),
            FOUNDRY_OUTPUT_TYPE => Ok(Output::Foundry(FoundryOutput::read_from(stream)?)),
            NFT_OUTPUT_TYPE => Ok(Output::Nft(NftOutput::read_from(stream)?)),
            found => {
                tracing::trace!(found, "unrecognized output type");
                Err(SerError::UnrecognizedType {
                    kind: "output",
                    found: found as u32,
                })
            }
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Output::Treasury(o) => o.write_to(stream),
            Output::Basic(o) => o.write_to(stream),
            Output::Alias(o) => o.write_to(stream),
            Output::Foundry(o) => o.write_to(stream),
            Output::Nft(o) => o.write_to(stream),
        }
    }
}

stardust_core::impl_hex_serde!(Output);

/// Read a u16-count-prefixed list of outputs.
pub fn read_outputs(stream: &mut ReadStream<'_>) -> SerResult<Vec<Output>> {
    read_list(stream, "outputs", Prefix::U16)
}

/// Write a u16-count-prefixed list of outputs.
pub fn write_outputs(stream: &mut WriteStream, outputs: &[Output]) -> SerResult<usize> {
    write_list(stream, "outputs", Prefix::U16, outputs)
}

/// Serialized length of a list of outputs.
pub fn outputs_length(outputs: &[Output]) -> usize {
    list_length(Prefix::U16, outputs)
}

#[cfg(test)]
mod test {
    use super::*;

    const BASIC: &str = "0340e20100000000000001000052fdfc072182654f163f5f0f9a621d729566c74d10037c4d7bbb0407d1e2c64900";

    #[test]
    fn it_dispatches_on_the_output_type() {
        let cases = [
            (BASIC, BASIC_OUTPUT_TYPE, 46),
            ("0240e2010000000000", TREASURY_OUTPUT_TYPE, 9),
        ];
        for (expected, kind, len) in cases.iter() {
            let output = Output::deserialize_hex(expected).unwrap();
            assert_eq!(output.kind(), *kind);
            assert_eq!(output.amount(), 123456);
            assert_eq!(output.serialized_length(), *len);
            assert_eq!(output.serialize_hex().unwrap(), format!("0x{}", expected));
        }
    }

    #[test]
    fn it_rejects_unknown_output_types() {
        for unknown in [0u8, 1, 7, 0xff].iter() {
            let hex = format!("{:02x}{}", unknown, &BASIC[2..]);
            match Output::deserialize_hex(&hex) {
                Err(SerError::UnrecognizedType { kind: "output", found }) => assert_eq!(found, *unknown as u32),
                other => panic!("expected UnrecognizedType, got {:?}", other),
            }
        }
    }

    #[test]
    fn it_rejects_the_wrong_leaf_output() {
        match NftOutput::deserialize_hex(BASIC) {
            Err(SerError::TypeMismatch {
                expected: 6,
                found: 3,
                ..
            }) => {}
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_truncated_outputs() {
        let bytes = hex::decode(BASIC).unwrap();
        for cut in 1..=bytes.len() {
            match Output::deserialize(&bytes[..bytes.len() - cut]) {
                Err(SerError::TruncatedInput { .. }) => {}
                other => panic!("expected TruncatedInput at cut {}, got {:?}", cut, other),
            }
        }
    }

    #[test]
    fn it_serializes_outputs_to_json_as_hex() {
        let output = Output::deserialize_hex(BASIC).unwrap();
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, format!("\"0x{}\"", BASIC));
        let back: Output = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
    }

    #[test]
    fn it_exposes_accessors_on_every_kind() {
        let treasury = Output::Treasury(TreasuryOutput { amount: 5 });
        assert!(treasury.native_tokens().is_empty());
        assert!(treasury.unlock_conditions().is_empty());
        assert!(treasury.features().is_empty());
        assert!(treasury.immutable_features().is_empty());
        assert_eq!(treasury.kind_name(), "Treasury output");

        let basic = Output::Basic(BasicOutput::new(5).with_feature(Feature::tag(b"t".to_vec())));
        assert_eq!(basic.features().len(), 1);
        assert!(basic.immutable_features().is_empty());
    }
}
