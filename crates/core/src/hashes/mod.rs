//! Holds utilites for working with cryptographic digests, and disambiguating digests via marker
//! traits.
//!
//! We want to wrap hashes in marked newtypes in order to prevent type-confusion between block
//! ids, transaction ids, alias ids and other digests with the same length.

/// Tooling for blake2b256
pub mod blake2b256;

pub use blake2b256::*;

use std::io::Write;

/// A marked digest wraps the raw output of a hasher in a purpose-specific newtype.
pub trait MarkedDigest {
    /// The underlying digest type.
    type Digest;

    /// Wrap a digest.
    fn new(hash: Self::Digest) -> Self;

    /// Return a copy of the underlying digest.
    fn internal(&self) -> Self::Digest;

    /// Return the digest bytes as a vector.
    fn bytes(&self) -> Vec<u8>;
}

/// A hasher exposed through `std::io::Write`, so any `ByteFormat` object can be hashed by writing
/// its serialization into it.
pub trait MarkedDigestWriter<T>: Default + Write {
    /// Consume the writer, producing the digest.
    fn finish(self) -> T;

    /// Consume the writer, producing a marked digest.
    fn finish_marked<M: MarkedDigest<Digest = T>>(self) -> M {
        MarkedDigest::new(self.finish())
    }
}
