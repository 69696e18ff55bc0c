//! Blocks: the unit of the tangle.

use stardust_core::{
    hashes::blake2b256,
    ser::{list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::{ids::BlockId, optional_payload_length, payload::Payload, read_optional_payload, write_optional_payload};

/// The maximum serialized length of a block.
pub const MAX_BLOCK_LENGTH: usize = 32768;
/// The minimum number of parents a block references.
pub const MIN_PARENTS: usize = 1;
/// The maximum number of parents a block references.
pub const MAX_PARENTS: usize = 8;
/// Minimum serialized length of a block: version, parent count, payload length and nonce.
pub const MIN_BLOCK_LENGTH: usize = 1 + 1 + 4 + 8;

/// A block references between 1 and 8 parent blocks and optionally carries a payload.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Block {
    /// The protocol version the block was issued under
    pub protocol_version: u8,
    /// The blocks this block approves
    pub parents: Vec<BlockId>,
    /// The carried payload, if any
    pub payload: Option<Payload>,
    /// The proof-of-work nonce
    pub nonce: u64,
}

impl Block {
    /// The block id: the blake2b-256 digest of the serialized block.
    pub fn id(&self) -> SerResult<BlockId> {
        Ok(blake2b256(&self.serialize()?).into())
    }
}

impl ByteFormat for Block {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + list_length(Prefix::U8, &self.parents) + optional_payload_length(self.payload.as_ref()) + 8
    }

    #[tracing::instrument(skip_all, err)]
    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_BLOCK_LENGTH, "block")?;
        let protocol_version = stream.read_u8("block.protocolVersion")?;
        let parents = read_list(stream, "block.parents", Prefix::U8)?;
        let payload = read_optional_payload(stream, "block.payload")?;
        let nonce = stream.read_u64("block.nonce")?;
        Ok(Self {
            protocol_version,
            parents,
            payload,
            nonce,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("block.protocolVersion", self.protocol_version)?;
        len += write_list(stream, "block.parents", Prefix::U8, &self.parents)?;
        len += write_optional_payload(stream, "block.payload", self.payload.as_ref())?;
        len += stream.write_u64("block.nonce", self.nonce)?;
        Ok(len)
    }
}

stardust_core::impl_hex_serde!(Block);
