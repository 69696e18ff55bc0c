//! Native tokens carried alongside the base currency in an output.

use stardust_core::{
    ser::{list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream},
    U256,
};

use crate::types::ids::TokenId;

/// Serialized length of a native token: a 38-byte token id and a 32-byte amount.
pub const NATIVE_TOKEN_LENGTH: usize = TokenId::LENGTH + 32;
/// Maximum number of native tokens in an output, or distinct native tokens in a transaction.
pub const MAX_NATIVE_TOKEN_COUNT: usize = 64;

/// An amount of a native token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NativeToken {
    /// The token id, equal to the id of the minting foundry
    pub id: TokenId,
    /// The amount held
    pub amount: U256,
}

impl NativeToken {
    /// Instantiate a native token.
    pub fn new(id: TokenId, amount: U256) -> Self {
        Self { id, amount }
    }
}

impl ByteFormat for NativeToken {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        NATIVE_TOKEN_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(NATIVE_TOKEN_LENGTH, "nativeToken")?;
        let id = TokenId::read_from(stream)?;
        let amount = stream.read_u256("nativeToken.amount")?;
        Ok(Self { id, amount })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = self.id.write_to(stream)?;
        len += stream.write_u256("nativeToken.amount", &self.amount)?;
        Ok(len)
    }
}

/// Read a u8-count-prefixed list of native tokens.
pub fn read_native_tokens(stream: &mut ReadStream<'_>) -> SerResult<Vec<NativeToken>> {
    read_list(stream, "nativeTokens", Prefix::U8)
}

/// Write a u8-count-prefixed list of native tokens.
pub fn write_native_tokens(stream: &mut WriteStream, tokens: &[NativeToken]) -> SerResult<usize> {
    write_list(stream, "nativeTokens", Prefix::U8, tokens)
}

/// Serialized length of a list of native tokens.
pub fn native_tokens_length(tokens: &[NativeToken]) -> usize {
    list_length(Prefix::U8, tokens)
}

#[cfg(test)]
mod test {
    use super::*;

    const TOKEN_ID: &str = "08cf5a6ca8bfdbc6e1f6a3bfdb0d2cb8cb5a1ec06a36c1b6e4d1c61a1ac1bb40c10100000000";

    #[test]
    fn it_serializes_and_deserializes_native_token_lists() {
        let amount = format!("e803{}", "00".repeat(30));
        let max = "ff".repeat(32);
        let cases = [
            ("00".to_owned(), 0usize, 1usize),
            (format!("01{}{}", TOKEN_ID, amount), 1, 71),
            (format!("02{}{}{}{}", TOKEN_ID, amount, TOKEN_ID, max), 2, 141),
        ];

        for (hex, count, len) in cases.iter() {
            let bytes = hex::decode(hex).unwrap();
            let mut r = ReadStream::new(&bytes);
            let tokens = read_native_tokens(&mut r).unwrap();
            r.ensure_consumed().unwrap();
            assert_eq!(tokens.len(), *count);
            assert_eq!(native_tokens_length(&tokens), *len);

            let mut w = WriteStream::new();
            write_native_tokens(&mut w, &tokens).unwrap();
            assert_eq!(&w.final_bytes(), &bytes);
        }
    }

    #[test]
    fn it_reads_amounts_little_endian() {
        let hex = format!("{}e803{}", TOKEN_ID, "00".repeat(30));
        let token = NativeToken::deserialize_hex(&hex).unwrap();
        assert_eq!(token.amount, U256::from(1000u64));
        assert_eq!(token.id.serial_number(), 1);
    }

    #[test]
    fn it_rejects_truncated_native_tokens() {
        let bytes = hex::decode(format!("{}{}", TOKEN_ID, "ff".repeat(32))).unwrap();
        for cut in 1..=bytes.len() {
            match NativeToken::deserialize(&bytes[..bytes.len() - cut]) {
                Err(SerError::TruncatedInput { .. }) => {}
                other => panic!("expected TruncatedInput at cut {}, got {:?}", cut, other),
            }
        }
    }
}
