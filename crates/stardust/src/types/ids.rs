//! Identifiers. Most are blake2b-256 digests of some serialized object, marked so they can't be
//! confused with one another.

use stardust_core::{
    hashes::{blake2b256, Blake2b256Writer, MarkedDigestWriter},
    impl_fixed_bytes, mark_32_byte_hash,
    ser::{decode_hex, ByteFormat, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::{address::AliasAddress, token_scheme::SIMPLE_TOKEN_SCHEME_TYPE};

mark_32_byte_hash!(
    /// The blake2b-256 digest of a serialized block.
    BlockId
);

mark_32_byte_hash!(
    /// The blake2b-256 digest of a serialized transaction payload.
    TransactionId
);

mark_32_byte_hash!(
    /// The blake2b-256 digest of a milestone's essence: every field but the signatures.
    MilestoneId
);

mark_32_byte_hash!(
    /// Identifies an alias. Zero in the output that creates the alias, afterwards the blake2b-256
    /// digest of that output's id.
    AliasId
);

mark_32_byte_hash!(
    /// Identifies an NFT. Zero in the output that mints the NFT, afterwards the blake2b-256 digest
    /// of that output's id.
    NftId
);

mark_32_byte_hash!(
    /// The blake2b-256 digest of the outputs consumed by a transaction.
    InputsCommitment
);

impl_fixed_bytes!(
    /// Identifies a foundry, and the native token the foundry controls.
    ///
    /// Laid out as the controlling alias address (type byte and alias id), the foundry serial
    /// number (LE u32) and the token scheme type.
    FoundryId,
    38
);

/// Native tokens are identified by the id of the foundry that mints them.
pub use self::FoundryId as TokenId;

impl FoundryId {
    /// Build a foundry id from its components.
    pub fn build(alias_address: &AliasAddress, serial_number: u32, token_scheme_kind: u8) -> Self {
        let mut bytes = [0u8; 38];
        bytes[0] = crate::types::address::ALIAS_ADDRESS_TYPE;
        bytes[1..33].copy_from_slice(alias_address.alias_id().as_bytes());
        bytes[33..37].copy_from_slice(&serial_number.to_le_bytes());
        bytes[37] = token_scheme_kind;
        Self(bytes)
    }

    /// Build the id of a foundry using the simple token scheme.
    pub fn simple(alias_address: &AliasAddress, serial_number: u32) -> Self {
        Self::build(alias_address, serial_number, SIMPLE_TOKEN_SCHEME_TYPE)
    }

    /// The alias id embedded in the foundry id.
    pub fn alias_id(&self) -> AliasId {
        let mut id = [0u8; 32];
        id.copy_from_slice(&self.0[1..33]);
        AliasId(id)
    }

    /// The serial number embedded in the foundry id.
    pub fn serial_number(&self) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.0[33..37]);
        u32::from_le_bytes(buf)
    }

    /// The token scheme type embedded in the foundry id.
    pub fn token_scheme_kind(&self) -> u8 {
        self.0[37]
    }
}

/// The byte length of an output id.
pub const OUTPUT_ID_LENGTH: usize = 34;

/// Identifies an output: the id of the transaction that created it and its index in that
/// transaction's outputs.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct OutputId {
    /// The creating transaction
    pub transaction_id: TransactionId,
    /// The position in the creating transaction's outputs
    pub index: u16,
}

impl OutputId {
    /// Instantiate a new output id.
    pub fn new(transaction_id: TransactionId, index: u16) -> Self {
        Self { transaction_id, index }
    }

    /// `0x`-prefixed lowercase hex of the 34 serialized bytes.
    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; OUTPUT_ID_LENGTH];
        bytes[..32].copy_from_slice(self.transaction_id.as_bytes());
        bytes[32..].copy_from_slice(&self.index.to_le_bytes());
        hex::encode_prefixed(bytes)
    }

    fn hash(&self) -> stardust_core::hashes::Blake2b256Digest {
        let mut w = Blake2b256Writer::default();
        w.update(self.transaction_id.as_bytes());
        w.update(&self.index.to_le_bytes());
        w.finish()
    }
}

impl ByteFormat for OutputId {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        OUTPUT_ID_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        let transaction_id = TransactionId::read_from(stream)?;
        let index = stream.read_u16("transactionOutputIndex")?;
        Ok(Self { transaction_id, index })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = self.transaction_id.write_to(stream)?;
        len += stream.write_u16("transactionOutputIndex", self.index)?;
        Ok(len)
    }
}

impl std::str::FromStr for OutputId {
    type Err = SerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        if bytes.len() != OUTPUT_ID_LENGTH {
            return Err(SerError::InvalidHexLength {
                expected: OUTPUT_ID_LENGTH,
                found: bytes.len(),
            });
        }
        Self::deserialize(&bytes)
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl serde::Serialize for OutputId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for OutputId {
    fn deserialize<D>(deserializer: D) -> Result<OutputId, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(|e: SerError| serde::de::Error::custom(e.to_string()))
    }
}

impl AliasId {
    /// The id of an alias created by the output with this id.
    pub fn from_output_id(output_id: &OutputId) -> Self {
        output_id.hash().into()
    }

    /// Resolve a zero alias id to the id derived from the output that holds it.
    pub fn or_from_output_id(self, output_id: &OutputId) -> Self {
        if self.is_null() {
            Self::from_output_id(output_id)
        } else {
            self
        }
    }
}

impl NftId {
    /// The id of an NFT minted by the output with this id.
    pub fn from_output_id(output_id: &OutputId) -> Self {
        output_id.hash().into()
    }

    /// Resolve a zero NFT id to the id derived from the output that holds it.
    pub fn or_from_output_id(self, output_id: &OutputId) -> Self {
        if self.is_null() {
            Self::from_output_id(output_id)
        } else {
            self
        }
    }
}

/// Derive the numeric network id from the network name: the first 8 bytes of the name's
/// blake2b-256 digest, read as a LE u64.
pub fn network_id_from_name(network_name: &str) -> u64 {
    let digest = blake2b256(network_name.as_bytes());
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest.0[..8]);
    u64::from_le_bytes(buf)
}
