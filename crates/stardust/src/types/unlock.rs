//! Signatures and the unlocks that prove a transaction may consume its inputs.

use stardust_core::{
    impl_fixed_bytes,
    ser::{list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::min_of;

impl_fixed_bytes!(
    /// An Ed25519 public key.
    Ed25519PublicKey,
    32
);

impl_fixed_bytes!(
    /// An Ed25519 signature.
    Ed25519SignatureBytes,
    64
);

/// Discriminant of an Ed25519 signature.
pub const ED25519_SIGNATURE_TYPE: u8 = 0;
/// Serialized length of an Ed25519 signature: type, public key and signature.
pub const ED25519_SIGNATURE_LENGTH: usize = 1 + 32 + 64;
/// Minimum serialized length of any signature.
pub const MIN_SIGNATURE_LENGTH: usize = ED25519_SIGNATURE_LENGTH;

/// Discriminant of a signature unlock.
pub const SIGNATURE_UNLOCK_TYPE: u8 = 0;
/// Discriminant of a reference unlock.
pub const REFERENCE_UNLOCK_TYPE: u8 = 1;
/// Discriminant of an alias unlock.
pub const ALIAS_UNLOCK_TYPE: u8 = 2;
/// Discriminant of an NFT unlock.
pub const NFT_UNLOCK_TYPE: u8 = 3;

/// Minimum serialized length of a signature unlock.
pub const MIN_SIGNATURE_UNLOCK_LENGTH: usize = 1 + MIN_SIGNATURE_LENGTH;
/// Serialized length of the unlocks that point at another unlock.
pub const REFERENCE_UNLOCK_LENGTH: usize = 1 + 2;
/// Minimum serialized length of any unlock.
pub const MIN_UNLOCK_LENGTH: usize = min_of(&[MIN_SIGNATURE_UNLOCK_LENGTH, REFERENCE_UNLOCK_LENGTH]);

/// An Ed25519 signature over the transaction essence hash.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ed25519Signature {
    /// The signing key
    pub public_key: Ed25519PublicKey,
    /// The signature bytes
    pub signature: Ed25519SignatureBytes,
}

impl ByteFormat for Ed25519Signature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        ED25519_SIGNATURE_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(ED25519_SIGNATURE_LENGTH, "ed25519Signature")?;
        stream.read_type_u8("ed25519Signature", ED25519_SIGNATURE_TYPE)?;
        let public_key = Ed25519PublicKey::read_from(stream)?;
        let signature = Ed25519SignatureBytes::read_from(stream)?;
        Ok(Self { public_key, signature })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("ed25519Signature", ED25519_SIGNATURE_TYPE)?;
        len += self.public_key.write_to(stream)?;
        len += self.signature.write_to(stream)?;
        Ok(len)
    }
}

/// A signature of any supported scheme.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Signature {
    /// Ed25519
    Ed25519(Ed25519Signature),
}

impl Signature {
    /// The public key that produced the signature.
    pub fn public_key(&self) -> &Ed25519PublicKey {
        match self {
            Signature::Ed25519(s) => &s.public_key,
        }
    }
}

impl ByteFormat for Signature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            Signature::Ed25519(s) => s.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_SIGNATURE_LENGTH, "signature")?;
        match stream.peek_u8("signature")? {
            ED25519_SIGNATURE_TYPE => Ok(Signature::Ed25519(Ed25519Signature::read_from(stream)?)),
            found => Err(SerError::UnrecognizedType {
                kind: "signature",
                found: found as u32,
            }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Signature::Ed25519(s) => s.write_to(stream),
        }
    }
}

/// Unlocks an input with a signature.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SignatureUnlock {
    /// The signature
    pub signature: Signature,
}

impl ByteFormat for SignatureUnlock {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + self.signature.serialized_length()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_SIGNATURE_UNLOCK_LENGTH, "signatureUnlock")?;
        stream.read_type_u8("signatureUnlock", SIGNATURE_UNLOCK_TYPE)?;
        Ok(Self {
            signature: Signature::read_from(stream)?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("signatureUnlock", SIGNATURE_UNLOCK_TYPE)?;
        len += self.signature.write_to(stream)?;
        Ok(len)
    }
}

macro_rules! index_unlock {
    (
        $(#[$outer:meta])*
        $name:ident, $kind:expr, $field:literal
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub struct $name {
            /// Index of the unlock this one points at
            pub reference: u16,
        }

        impl $name {
            /// Instantiate an unlock pointing at `reference`.
            pub fn new(reference: u16) -> Self {
                Self { reference }
            }
        }

        impl ByteFormat for $name {
            type Error = SerError;

            fn serialized_length(&self) -> usize {
                REFERENCE_UNLOCK_LENGTH
            }

            fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
                stream.ensure_remaining(REFERENCE_UNLOCK_LENGTH, $field)?;
                stream.read_type_u8($field, $kind)?;
                Ok(Self {
                    reference: stream.read_u16("reference")?,
                })
            }

            fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
                let mut len = stream.write_u8($field, $kind)?;
                len += stream.write_u16("reference", self.reference)?;
                Ok(len)
            }
        }
    };
}

index_unlock!(
    /// Reuses the signature unlock at an earlier index.
    ReferenceUnlock,
    REFERENCE_UNLOCK_TYPE,
    "referenceUnlock"
);

index_unlock!(
    /// Unlocks an input owned by an alias, whose own input is unlocked at an earlier index.
    AliasUnlock,
    ALIAS_UNLOCK_TYPE,
    "aliasUnlock"
);

index_unlock!(
    /// Unlocks an input owned by an NFT, whose own input is unlocked at an earlier index.
    NftUnlock,
    NFT_UNLOCK_TYPE,
    "nftUnlock"
);

/// Any unlock.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Unlock {
    /// A signature
    Signature(SignatureUnlock),
    /// A reference to an earlier signature unlock
    Reference(ReferenceUnlock),
    /// Unlocked through an alias
    Alias(AliasUnlock),
    /// Unlocked through an NFT
    Nft(NftUnlock),
}

impl Unlock {
    /// The discriminant of the unlock kind.
    pub fn kind(&self) -> u8 {
        match self {
            Unlock::Signature(_) => SIGNATURE_UNLOCK_TYPE,
            Unlock::Reference(_) => REFERENCE_UNLOCK_TYPE,
            Unlock::Alias(_) => ALIAS_UNLOCK_TYPE,
            Unlock::Nft(_) => NFT_UNLOCK_TYPE,
        }
    }

    /// Build a signature unlock.
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519SignatureBytes) -> Self {
        Unlock::Signature(SignatureUnlock {
            signature: Signature::Ed25519(Ed25519Signature { public_key, signature }),
        })
    }
}

impl ByteFormat for Unlock {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            Unlock::Signature(u) => u.serialized_length(),
            Unlock::Reference(u) => u.serialized_length(),
            Unlock::Alias(u) => u.serialized_length(),
            Unlock::Nft(u) => u.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_UNLOCK_LENGTH, "unlock")?;
        match stream.peek_u8("unlock")? {
            SIGNATURE_UNLOCK_TYPE => Ok(Unlock::Signature(SignatureUnlock::read_from(stream)?)),
            REFERENCE_UNLOCK_TYPE => Ok(Unlock::Reference(ReferenceUnlock::read_from(stream)?)),
            ALIAS_UNLOCK_TYPE => Ok(Unlock::Alias(AliasUnlock::read_from(stream)?)),
            NFT_UNLOCK_TYPE => Ok(Unlock::Nft(NftUnlock::read_from(stream)?)),
            found => Err(SerError::UnrecognizedType {
                kind: "unlock",
                found: found as u32,
            }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Unlock::Signature(u) => u.write_to(stream),
            Unlock::Reference(u) => u.write_to(stream),
            Unlock::Alias(u) => u.write_to(stream),
            Unlock::Nft(u) => u.write_to(stream),
        }
    }
}

/// Read a u16-count-prefixed list of unlocks.
pub fn read_unlocks(stream: &mut ReadStream<'_>) -> SerResult<Vec<Unlock>> {
    read_list(stream, "unlocks", Prefix::U16)
}

/// Write a u16-count-prefixed list of unlocks.
pub fn write_unlocks(stream: &mut WriteStream, unlocks: &[Unlock]) -> SerResult<usize> {
    write_list(stream, "unlocks", Prefix::U16, unlocks)
}

/// Serialized length of a list of unlocks.
pub fn unlocks_length(unlocks: &[Unlock]) -> usize {
    list_length(Prefix::U16, unlocks)
}

#[cfg(test)]
mod test {
    use super::*;

    fn signature_unlock_hex() -> String {
        format!("0000{}{}", "11".repeat(32), "22".repeat(64))
    }

    #[test]
    fn it_serializes_and_deserializes_unlocks() {
        let cases = [
            (signature_unlock_hex(), SIGNATURE_UNLOCK_TYPE, 98),
            ("010500".to_owned(), REFERENCE_UNLOCK_TYPE, 3),
            ("020100".to_owned(), ALIAS_UNLOCK_TYPE, 3),
            ("03ff00".to_owned(), NFT_UNLOCK_TYPE, 3),
        ];
        for (expected, kind, len) in cases.iter() {
            let unlock = Unlock::deserialize_hex(expected).unwrap();
            assert_eq!(unlock.kind(), *kind);
            assert_eq!(unlock.serialized_length(), *len);
            assert_eq!(unlock.serialize_hex().unwrap(), format!("0x{}", expected));
        }

        match Unlock::deserialize_hex("03ff00").unwrap() {
            Unlock::Nft(u) => assert_eq!(u.reference, 255),
            other => panic!("expected an NFT unlock, got {:?}", other),
        }
    }

    #[test]
    fn it_builds_ed25519_signature_unlocks() {
        let unlock = Unlock::ed25519(Ed25519PublicKey([0x11; 32]), Ed25519SignatureBytes([0x22; 64]));
        assert_eq!(unlock.serialize_hex().unwrap(), format!("0x{}", signature_unlock_hex()));
        match &unlock {
            Unlock::Signature(s) => assert_eq!(s.signature.public_key(), &Ed25519PublicKey([0x11; 32])),
            _ => unreachable!(),
        }
    }

    #[test]
    fn it_rejects_unknown_unlocks_and_signatures() {
        match Unlock::deserialize_hex("040000") {
            Err(SerError::UnrecognizedType { kind: "unlock", found: 4 }) => {}
            other => panic!("expected UnrecognizedType, got {:?}", other),
        }
        let bad_signature = format!("0001{}{}", "11".repeat(32), "22".repeat(64));
        match Unlock::deserialize_hex(&bad_signature) {
            Err(SerError::UnrecognizedType { kind: "signature", found: 1 }) => {}
            other => panic!("expected UnrecognizedType, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_the_wrong_leaf_unlock() {
        match AliasUnlock::deserialize_hex("030100") {
            Err(SerError::TypeMismatch {
                expected: 2,
                found: 3,
                ..
            }) => {}
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_truncated_signature_unlocks() {
        let bytes = hex::decode(signature_unlock_hex()).unwrap();
        for cut in 1..bytes.len() {
            match Unlock::deserialize(&bytes[..bytes.len() - cut]) {
                Err(SerError::TruncatedInput { .. }) => {}
                other => panic!("expected TruncatedInput at cut {}, got {:?}", cut, other),
            }
        }
    }

    #[test]
    fn it_counts_unlock_lists() {
        let unlocks = vec![Unlock::Reference(ReferenceUnlock::new(0)), Unlock::Alias(AliasUnlock::new(1))];
        let mut w = WriteStream::new();
        assert_eq!(write_unlocks(&mut w, &unlocks).unwrap(), unlocks_length(&unlocks));
        assert_eq!(w.final_hex(), "0x0200010000020100");
    }
}
