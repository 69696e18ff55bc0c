//! Addresses: the owners named by unlock conditions and features.

use stardust_core::{
    hashes::{blake2b256, Blake2b256Digest},
    ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::{
    ids::{AliasId, NftId},
    unlock::Ed25519PublicKey,
};

/// Discriminant of an Ed25519 address.
pub const ED25519_ADDRESS_TYPE: u8 = 0;
/// Discriminant of an alias address.
pub const ALIAS_ADDRESS_TYPE: u8 = 8;
/// Discriminant of an NFT address.
pub const NFT_ADDRESS_TYPE: u8 = 16;

/// Serialized length of every address kind: a type byte and 32 bytes of id.
pub const ADDRESS_LENGTH: usize = 33;
/// Every address is the same length.
pub const MIN_ADDRESS_LENGTH: usize = ADDRESS_LENGTH;

/// The blake2b-256 digest of an Ed25519 public key.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Ed25519Address(pub Blake2b256Digest);

/// The id of the alias that controls the address.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct AliasAddress(pub AliasId);

/// The id of the NFT that controls the address.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NftAddress(pub NftId);

impl Ed25519Address {
    /// Instantiate from the public key hash.
    pub fn new(hash: [u8; 32]) -> Self {
        Self(Blake2b256Digest(hash))
    }

    /// Derive the address controlled by a public key.
    pub fn from_public_key(public_key: &Ed25519PublicKey) -> Self {
        Self(blake2b256(public_key.as_bytes()))
    }

    /// The public key hash.
    pub fn hash(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl AliasAddress {
    /// Instantiate from an alias id.
    pub fn new(alias_id: AliasId) -> Self {
        Self(alias_id)
    }

    /// The alias id.
    pub fn alias_id(&self) -> &AliasId {
        &self.0
    }
}

impl NftAddress {
    /// Instantiate from an NFT id.
    pub fn new(nft_id: NftId) -> Self {
        Self(nft_id)
    }

    /// The NFT id.
    pub fn nft_id(&self) -> &NftId {
        &self.0
    }
}

macro_rules! impl_address_leaf {
    ($name:ident, $inner:ty, $kind:expr, $field:literal) => {
        impl ByteFormat for $name {
            type Error = SerError;

            fn serialized_length(&self) -> usize {
                ADDRESS_LENGTH
            }

            fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
                stream.ensure_remaining(ADDRESS_LENGTH, $field)?;
                stream.read_type_u8($field, $kind)?;
                Ok(Self(<$inner>::read_from(stream)?))
            }

            fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
                let mut len = stream.write_u8($field, $kind)?;
                len += self.0.write_to(stream)?;
                Ok(len)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }
    };
}

impl_address_leaf!(Ed25519Address, Blake2b256Digest, ED25519_ADDRESS_TYPE, "ed25519Address");
impl_address_leaf!(AliasAddress, AliasId, ALIAS_ADDRESS_TYPE, "aliasAddress");
impl_address_leaf!(NftAddress, NftId, NFT_ADDRESS_TYPE, "nftAddress");

/// An address of any kind.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Address {
    /// Owned by an Ed25519 key pair
    Ed25519(Ed25519Address),
    /// Owned by an alias
    Alias(AliasAddress),
    /// Owned by an NFT
    Nft(NftAddress),
}

impl Address {
    /// The discriminant of the address kind.
    pub fn kind(&self) -> u8 {
        match self {
            Address::Ed25519(_) => ED25519_ADDRESS_TYPE,
            Address::Alias(_) => ALIAS_ADDRESS_TYPE,
            Address::Nft(_) => NFT_ADDRESS_TYPE,
        }
    }

    /// The 32 bytes following the discriminant.
    pub fn id_bytes(&self) -> &[u8] {
        match self {
            Address::Ed25519(a) => a.0.as_bytes(),
            Address::Alias(a) => a.0.as_bytes(),
            Address::Nft(a) => a.0.as_bytes(),
        }
    }

    /// True for alias addresses.
    pub fn is_alias(&self) -> bool {
        matches!(self, Address::Alias(_))
    }

    /// `0x`-prefixed hex of the full serialized address.
    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = self.kind();
        bytes[1..].copy_from_slice(self.id_bytes());
        hex::encode_prefixed(bytes)
    }
}

impl From<Ed25519Address> for Address {
    fn from(a: Ed25519Address) -> Self {
        Address::Ed25519(a)
    }
}

impl From<AliasAddress> for Address {
    fn from(a: AliasAddress) -> Self {
        Address::Alias(a)
    }
}

impl From<NftAddress> for Address {
    fn from(a: NftAddress) -> Self {
        Address::Nft(a)
    }
}

impl ByteFormat for Address {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        ADDRESS_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_ADDRESS_LENGTH, "address")?;
        match stream.peek_u8("address")? {
            ED25519_ADDRESS_TYPE => Ok(Address::Ed25519(Ed25519Address::read_from(stream)?)),
            ALIAS_ADDRESS_TYPE => Ok(Address::Alias(AliasAddress::read_from(stream)?)),
            NFT_ADDRESS_TYPE => Ok(Address::Nft(NftAddress::read_from(stream)?)),
            found => Err(SerError::UnrecognizedType {
                kind: "address",
                found: found as u32,
            }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Address::Ed25519(a) => a.write_to(stream),
            Address::Alias(a) => a.write_to(stream),
            Address::Nft(a) => a.write_to(stream),
        }
    }
}

stardust_core::impl_hex_serde!(Address);
