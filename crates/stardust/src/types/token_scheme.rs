//! Token schemes track the supply of the native token a foundry controls.

use stardust_core::{
    ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream},
    U256,
};

/// Discriminant of the simple token scheme.
pub const SIMPLE_TOKEN_SCHEME_TYPE: u8 = 0;
/// Serialized length of the simple token scheme: type and three 256-bit amounts.
pub const SIMPLE_TOKEN_SCHEME_LENGTH: usize = 1 + 3 * 32;
/// Minimum serialized length of any token scheme.
pub const MIN_TOKEN_SCHEME_LENGTH: usize = SIMPLE_TOKEN_SCHEME_LENGTH;

/// Supply tracking by minted and melted totals under a fixed maximum.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleTokenScheme {
    /// Total ever minted
    pub minted_tokens: U256,
    /// Total ever melted
    pub melted_tokens: U256,
    /// Cap on the circulating supply
    pub maximum_supply: U256,
}

impl SimpleTokenScheme {
    /// Instantiate a simple token scheme.
    pub fn new(minted_tokens: U256, melted_tokens: U256, maximum_supply: U256) -> Self {
        Self {
            minted_tokens,
            melted_tokens,
            maximum_supply,
        }
    }

    /// Minted minus melted. `None` if more was melted than minted.
    pub fn circulating_supply(&self) -> Option<U256> {
        self.minted_tokens.checked_sub(self.melted_tokens)
    }
}

impl ByteFormat for SimpleTokenScheme {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        SIMPLE_TOKEN_SCHEME_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(SIMPLE_TOKEN_SCHEME_LENGTH, "simpleTokenScheme")?;
        stream.read_type_u8("simpleTokenScheme", SIMPLE_TOKEN_SCHEME_TYPE)?;
        Ok(Self {
            minted_tokens: stream.read_u256("mintedTokens")?,
            melted_tokens: stream.read_u256("meltedTokens")?,
            maximum_supply: stream.read_u256("maximumSupply")?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("simpleTokenScheme", SIMPLE_TOKEN_SCHEME_TYPE)?;
        len += stream.write_u256("mintedTokens", &self.minted_tokens)?;
        len += stream.write_u256("meltedTokens", &self.melted_tokens)?;
        len += stream.write_u256("maximumSupply", &self.maximum_supply)?;
        Ok(len)
    }
}

/// A token scheme of any kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenScheme {
    /// The simple token scheme
    Simple(SimpleTokenScheme),
}

impl TokenScheme {
    /// The discriminant of the scheme kind.
    pub fn kind(&self) -> u8 {
        match self {
            TokenScheme::Simple(_) => SIMPLE_TOKEN_SCHEME_TYPE,
        }
    }
}

impl ByteFormat for TokenScheme {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            TokenScheme::Simple(s) => s.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TOKEN_SCHEME_LENGTH, "tokenScheme")?;
        match stream.peek_u8("tokenScheme")? {
            SIMPLE_TOKEN_SCHEME_TYPE => Ok(TokenScheme::Simple(SimpleTokenScheme::read_from(stream)?)),
            found => Err(SerError::UnrecognizedType {
                kind: "token scheme",
                found: found as u32,
            }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            TokenScheme::Simple(s) => s.write_to(stream),
        }
    }
}

stardust_core::impl_hex_serde!(TokenScheme);

#[cfg(test)]
mod test {
    use super::*;

    fn amount(value: u64) -> String {
        let mut bytes = [0u8; 32];
        U256::from(value).to_little_endian(&mut bytes);
        hex::encode(bytes)
    }

    #[test]
    fn it_serializes_and_deserializes_simple_token_schemes() {
        let cases = [
            (0u64, 0u64, 1u64),
            (1000, 10, 1000),
            (u64::MAX, 0, u64::MAX),
        ];
        for (minted, melted, max) in cases.iter() {
            let expected = format!("00{}{}{}", amount(*minted), amount(*melted), amount(*max));
            let scheme = TokenScheme::deserialize_hex(&expected).unwrap();
            let TokenScheme::Simple(simple) = scheme;
            assert_eq!(simple.minted_tokens, U256::from(*minted));
            assert_eq!(simple.melted_tokens, U256::from(*melted));
            assert_eq!(simple.maximum_supply, U256::from(*max));
            assert_eq!(scheme.serialized_length(), 97);
            assert_eq!(scheme.serialize_hex().unwrap(), format!("0x{}", expected));
        }
    }

    #[test]
    fn it_handles_maximum_magnitude_amounts() {
        let scheme = TokenScheme::Simple(SimpleTokenScheme::new(U256::MAX, U256::zero(), U256::MAX));
        let bytes = scheme.serialize().unwrap();
        assert_eq!(&bytes[1..33], &[0xff; 32][..]);
        assert_eq!(TokenScheme::deserialize(&bytes).unwrap(), scheme);
    }

    #[test]
    fn it_rejects_unknown_token_schemes() {
        let hex = format!("01{}", "00".repeat(96));
        match TokenScheme::deserialize_hex(&hex) {
            Err(SerError::UnrecognizedType {
                kind: "token scheme",
                found: 1,
            }) => {}
            other => panic!("expected UnrecognizedType, got {:?}", other),
        }
    }

    #[test]
    fn it_computes_circulating_supply() {
        let scheme = SimpleTokenScheme::new(U256::from(10u64), U256::from(4u64), U256::from(10u64));
        assert_eq!(scheme.circulating_supply(), Some(U256::from(6u64)));
        let overmelted = SimpleTokenScheme::new(U256::from(1u64), U256::from(4u64), U256::from(10u64));
        assert_eq!(overmelted.circulating_supply(), None);
    }
}
