//! Bech32 encoding of addresses. The payload is the serialized address: its type byte followed by
//! the 32-byte id.

use bech32::{decode as b32_decode, encode as b32_encode, Error as BechError, FromBase32, ToBase32, Variant};
use stardust_core::ser::{ByteFormat, SerError};
use thiserror::Error;

use crate::types::address::Address;

/// Errors that can be returned when encoding or decoding bech32 addresses.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Bech32 HRP does not match the network.
    #[error("Bech32 HRP does not match. \nGot {:?} expected {:?} Hint: Is this address for another network?", got, expected)]
    WrongHrp {
        /// The actual HRP.
        got: String,
        /// The expected HRP.
        expected: String,
    },

    /// Addresses use the original bech32 checksum, never bech32m.
    #[error("Bech32m checksums are not used for addresses")]
    WrongVariant,

    /// Bubbled up error from bech32 library
    #[error("BechError: {:?}", .0)]
    BechError(#[from] BechError),

    /// The payload is not a valid serialized address
    #[error(transparent)]
    SerError(#[from] SerError),
}

/// A simple result type alias
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Encode an address to bech32 under the given HRP.
pub fn encode_bech32(hrp: &str, address: &Address) -> EncodingResult<String> {
    let payload = address.serialize()?;
    Ok(b32_encode(hrp, payload.to_base32(), Variant::Bech32)?)
}

/// Decode an address from a bech32 string. Caller specifies an expected HRP. If a different HRP is
/// found, returns `WrongHrp`.
pub fn decode_bech32(expected_hrp: &str, s: &str) -> EncodingResult<Address> {
    let (hrp, data, variant) = b32_decode(s)?;
    if hrp != expected_hrp {
        return Err(EncodingError::WrongHrp {
            got: hrp,
            expected: expected_hrp.to_owned(),
        });
    }
    if variant != Variant::Bech32 {
        return Err(EncodingError::WrongVariant);
    }
    let payload = Vec::<u8>::from_base32(&data)?;
    Ok(Address::deserialize(&payload)?)
}

impl Address {
    /// Encode the address to bech32 under the given HRP.
    pub fn to_bech32(&self, hrp: &str) -> EncodingResult<String> {
        encode_bech32(hrp, self)
    }

    /// Decode a bech32 address, requiring the given HRP.
    pub fn try_from_bech32(expected_hrp: &str, s: &str) -> EncodingResult<Self> {
        decode_bech32(expected_hrp, s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{
        address::{AliasAddress, Ed25519Address, NftAddress},
        ids::{AliasId, NftId},
    };

    const ID: [u8; 32] = [
        0x52, 0xfd, 0xfc, 0x07, 0x21, 0x82, 0x65, 0x4f, 0x16, 0x3f, 0x5f, 0x0f, 0x9a, 0x62, 0x1d, 0x72, 0x95, 0x66,
        0xc7, 0x4d, 0x10, 0x03, 0x7c, 0x4d, 0x7b, 0xbb, 0x04, 0x07, 0xd1, 0xe2, 0xc6, 0x49,
    ];

    #[test]
    fn it_should_encode_and_decode_bech32() {
        let cases: [(Address, &str); 3] = [
            (
                Ed25519Address::new(ID).into(),
                "rms1qpf0mlq8yxpx2nck8a0slxnzr4ef2ek8f5gqxlzd0wasgp73utryjkxa9q5",
            ),
            (
                AliasAddress::new(AliasId(ID)).into(),
                "rms1ppf0mlq8yxpx2nck8a0slxnzr4ef2ek8f5gqxlzd0wasgp73utryjfddqa2",
            ),
            (
                NftAddress::new(NftId(ID)).into(),
                "rms1zpf0mlq8yxpx2nck8a0slxnzr4ef2ek8f5gqxlzd0wasgp73utryjps50np",
            ),
        ];
        for (address, expected) in cases.iter() {
            assert_eq!(&address.to_bech32("rms").unwrap(), expected);
            assert_eq!(&Address::try_from_bech32("rms", expected).unwrap(), address);
        }
    }

    #[test]
    fn it_should_error_on_wrong_hrp_and_invalid_addrs() {
        match decode_bech32("smr", "rms1qpf0mlq8yxpx2nck8a0slxnzr4ef2ek8f5gqxlzd0wasgp73utryjkxa9q5") {
            Err(EncodingError::WrongHrp { got, expected }) => {
                assert_eq!(got, "rms");
                assert_eq!(expected, "smr");
            }
            other => panic!("expected WrongHrp, got {:?}", other),
        }
        match decode_bech32("rms", "rms1qpf0mlq8yxpx2nck8a0slxnzr4ef2ek8f5gqxlzd0wasgp73utryjkxa9q6") {
            Err(EncodingError::BechError(_)) => {}
            other => panic!("expected BechError, got {:?}", other),
        }
    }

    #[test]
    fn it_should_reject_payloads_that_are_not_addresses() {
        let short = b32_encode("rms", [0u8; 20].to_base32(), Variant::Bech32).unwrap();
        match decode_bech32("rms", &short) {
            Err(EncodingError::SerError(SerError::TruncatedInput { .. })) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }

        let mut unknown = vec![1u8];
        unknown.extend_from_slice(&ID);
        let unknown = b32_encode("rms", unknown.to_base32(), Variant::Bech32).unwrap();
        match decode_bech32("rms", &unknown) {
            Err(EncodingError::SerError(SerError::UnrecognizedType { found: 1, .. })) => {}
            other => panic!("expected UnrecognizedType, got {:?}", other),
        }
    }
}
