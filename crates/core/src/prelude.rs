//! Re-exports of common traits and cursor types.
pub use crate::{
    hashes::{MarkedDigest, MarkedDigestWriter},
    ser::{ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream},
};
pub use primitive_types::U256;
