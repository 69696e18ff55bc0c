use blake2::Blake2b;
use digest::{consts::U32, Digest};
use std::io::{Result as IOResult, Write};

use crate::{hashes::MarkedDigestWriter, impl_fixed_bytes};

type Blake2b256 = Blake2b<U32>;

impl_fixed_bytes!(
    /// A raw blake2b256 digest.
    Blake2b256Digest,
    32
);

/// A struct that exposes a Blake2b256 `Write` interface.
///
/// ```
/// # use std::io::{Result};
/// use std::io::Write;
/// use stardust_core::hashes::{Blake2b256Writer, MarkedDigestWriter};
///
/// # fn main() -> Result<()> {
/// let mut w = Blake2b256Writer::default();
/// # let data = [0u8; 32];
///
/// // Writing more than once will update the hasher.
/// w.write_all(&data)?;
///
/// // Call finish to consume the hasher and produce the digest.
/// let digest = w.finish();
/// # Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct Blake2b256Writer {
    internal: Blake2b256,
}

impl Blake2b256Writer {
    /// Feed bytes to the hasher. Unlike `write`, this cannot fail.
    pub fn update(&mut self, data: &[u8]) {
        self.internal.update(data);
    }
}

impl Write for Blake2b256Writer {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        self.internal.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

impl MarkedDigestWriter<Blake2b256Digest> for Blake2b256Writer {
    fn finish(self) -> Blake2b256Digest {
        let mut digest = Blake2b256Digest::default();
        digest.0.copy_from_slice(&self.internal.finalize()[..]);
        digest
    }
}

/// Hash a single buffer.
pub fn blake2b256(data: &[u8]) -> Blake2b256Digest {
    let mut w = Blake2b256Writer::default();
    w.update(data);
    w.finish()
}
