//! Useful macros for implementing ledger object types

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to the hex of the
/// binary form.
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self)
                    .map_err(|e| <S::Error as serde::ser::Error>::custom(e.to_string()))?;
                serializer.serialize_str(&s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(&s)
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Wrap a fixed-length byte array in a newtype. The newtype is written positionally, displays as
/// `0x`-prefixed lowercase hex, and parses from hex with or without the prefix.
macro_rules! impl_fixed_bytes {
    (
        $(#[$outer:meta])*
        $name:ident, $len:expr
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// The byte length of the type.
            pub const LENGTH: usize = $len;

            /// Instantiate from a byte array.
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// The all-zero value.
            pub const fn null() -> Self {
                Self([0u8; $len])
            }

            /// True if every byte is zero.
            pub fn is_null(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Copy from a slice of exactly `LENGTH` bytes.
            pub fn from_slice(bytes: &[u8]) -> $crate::ser::SerResult<Self> {
                if bytes.len() != $len {
                    return Err($crate::ser::SerError::InvalidHexLength {
                        expected: $len,
                        found: bytes.len(),
                    });
                }
                let mut buf = [0u8; $len];
                buf.copy_from_slice(bytes);
                Ok(Self(buf))
            }

            /// Return a reference to the underlying bytes
            pub fn as_bytes(&self) -> &[u8] {
                &self.0[..]
            }

            /// `0x`-prefixed lowercase hex.
            pub fn to_hex(&self) -> String {
                hex::encode_prefixed(self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl $crate::ser::ByteFormat for $name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                $len
            }

            fn read_from(stream: &mut $crate::ser::ReadStream<'_>) -> $crate::ser::SerResult<Self> {
                Ok(Self(stream.read_fixed::<$len>(stringify!($name))?))
            }

            fn write_to(&self, stream: &mut $crate::ser::WriteStream) -> $crate::ser::SerResult<usize> {
                stream.write_bytes(stringify!($name), &self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ser::SerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_slice(&$crate::ser::decode_hex(s)?)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<$name, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                s.parse().map_err(|e: $crate::ser::SerError| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Make a new marked 32-byte digest. Marked digests are the output of a blake2b-256 hash and are
/// kept distinct so a transaction id can't be passed where a block id is expected.
macro_rules! mark_32_byte_hash {
    (
        $(#[$outer:meta])*
        $hash_name:ident
    ) => {
        $crate::impl_fixed_bytes!(
            $(#[$outer])*
            $hash_name, 32
        );

        impl $crate::hashes::MarkedDigest for $hash_name {
            type Digest = $crate::hashes::Blake2b256Digest;

            fn new(hash: $crate::hashes::Blake2b256Digest) -> Self {
                Self(hash.0)
            }

            fn internal(&self) -> $crate::hashes::Blake2b256Digest {
                $crate::hashes::Blake2b256Digest(self.0)
            }

            fn bytes(&self) -> Vec<u8> {
                self.0.to_vec()
            }
        }

        impl From<$crate::hashes::Blake2b256Digest> for $hash_name {
            fn from(h: $crate::hashes::Blake2b256Digest) -> Self {
                <Self as $crate::hashes::MarkedDigest>::new(h)
            }
        }
    };
}
