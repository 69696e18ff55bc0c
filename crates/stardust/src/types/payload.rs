//! Payloads: the content a block carries.

use stardust_core::{
    hashes::blake2b256,
    ser::{ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::{
    essence::{TransactionEssence, MIN_TRANSACTION_ESSENCE_LENGTH},
    ids::TransactionId,
    milestone::{
        MilestonePayload, TreasuryTransactionPayload, MILESTONE_PAYLOAD_TYPE, MIN_MILESTONE_PAYLOAD_LENGTH,
        TREASURY_TRANSACTION_PAYLOAD_LENGTH, TREASURY_TRANSACTION_PAYLOAD_TYPE,
    },
    min_of,
    unlock::{read_unlocks, unlocks_length, write_unlocks, Unlock},
};

/// Discriminant of the tagged data payload.
pub const TAGGED_DATA_PAYLOAD_TYPE: u32 = 5;
/// Discriminant of the transaction payload.
pub const TRANSACTION_PAYLOAD_TYPE: u32 = 6;

/// Minimum serialized length of a tagged data payload: type, tag length and data length.
pub const MIN_TAGGED_DATA_PAYLOAD_LENGTH: usize = 4 + 1 + 4;
/// Minimum serialized length of a transaction payload: type, essence and unlock count.
pub const MIN_TRANSACTION_PAYLOAD_LENGTH: usize = 4 + MIN_TRANSACTION_ESSENCE_LENGTH + 2;
/// Minimum serialized length of any payload.
pub const MIN_PAYLOAD_LENGTH: usize = min_of(&[
    MIN_TAGGED_DATA_PAYLOAD_LENGTH,
    MIN_TRANSACTION_PAYLOAD_LENGTH,
    MIN_MILESTONE_PAYLOAD_LENGTH,
    TREASURY_TRANSACTION_PAYLOAD_LENGTH,
]);

/// Arbitrary data indexed by a tag.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TaggedDataPayload {
    /// Up to 64 bytes
    pub tag: Vec<u8>,
    /// The data
    pub data: Vec<u8>,
}

impl TaggedDataPayload {
    /// Instantiate a tagged data payload.
    pub fn new(tag: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.into(),
            data: data.into(),
        }
    }
}

impl ByteFormat for TaggedDataPayload {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        MIN_TAGGED_DATA_PAYLOAD_LENGTH + self.tag.len() + self.data.len()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TAGGED_DATA_PAYLOAD_LENGTH, "taggedDataPayload")?;
        stream.read_type_u32("taggedDataPayload", TAGGED_DATA_PAYLOAD_TYPE)?;
        let tag = stream.read_prefixed_bytes("taggedDataPayload.tag", Prefix::U8)?;
        let data = stream.read_prefixed_bytes("taggedDataPayload.data", Prefix::U32)?;
        Ok(Self { tag, data })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u32("taggedDataPayload", TAGGED_DATA_PAYLOAD_TYPE)?;
        len += stream.write_prefixed_bytes("taggedDataPayload.tag", Prefix::U8, &self.tag)?;
        len += stream.write_prefixed_bytes("taggedDataPayload.data", Prefix::U32, &self.data)?;
        Ok(len)
    }
}

/// A signed transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TransactionPayload {
    /// The signed part
    pub essence: TransactionEssence,
    /// One unlock per input
    pub unlocks: Vec<Unlock>,
}

impl TransactionPayload {
    /// The transaction id: the blake2b-256 digest of the serialized payload.
    pub fn id(&self) -> SerResult<TransactionId> {
        Ok(blake2b256(&self.serialize()?).into())
    }
}

impl ByteFormat for TransactionPayload {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + self.essence.serialized_length() + unlocks_length(&self.unlocks)
    }

    #[tracing::instrument(skip_all, err)]
    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TRANSACTION_PAYLOAD_LENGTH, "transactionPayload")?;
        stream.read_type_u32("transactionPayload", TRANSACTION_PAYLOAD_TYPE)?;
        let essence = TransactionEssence::read_from(stream)?;
        let unlocks = read_unlocks(stream)?;
        Ok(Self { essence, unlocks })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u32("transactionPayload", TRANSACTION_PAYLOAD_TYPE)?;
        len += self.essence.write_to(stream)?;
        len += write_unlocks(stream, &self.unlocks)?;
        Ok(len)
    }
}

/// A payload of any kind a block may carry.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Payload {
    /// A signed transaction
    Transaction(Box<TransactionPayload>),
    /// Tagged data
    TaggedData(Box<TaggedDataPayload>),
    /// A coordinator milestone
    Milestone(Box<MilestonePayload>),
    /// A treasury transaction
    TreasuryTransaction(Box<TreasuryTransactionPayload>),
}

impl Payload {
    /// The discriminant of the payload kind.
    pub fn kind(&self) -> u32 {
        match self {
            Payload::Transaction(_) => TRANSACTION_PAYLOAD_TYPE,
            Payload::TaggedData(_) => TAGGED_DATA_PAYLOAD_TYPE,
            Payload::Milestone(_) => MILESTONE_PAYLOAD_TYPE,
            Payload::TreasuryTransaction(_) => TREASURY_TRANSACTION_PAYLOAD_TYPE,
        }
    }
}

impl From<TransactionPayload> for Payload {
    fn from(p: TransactionPayload) -> Self {
        Payload::Transaction(Box::new(p))
    }
}

impl From<TaggedDataPayload> for Payload {
    fn from(p: TaggedDataPayload) -> Self {
        Payload::TaggedData(Box::new(p))
    }
}

impl From<MilestonePayload> for Payload {
    fn from(p: MilestonePayload) -> Self {
        Payload::Milestone(Box::new(p))
    }
}

impl From<TreasuryTransactionPayload> for Payload {
    fn from(p: TreasuryTransactionPayload) -> Self {
        Payload::TreasuryTransaction(Box::new(p))
    }
}

impl ByteFormat for Payload {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            Payload::Transaction(p) => p.serialized_length(),
            Payload::TaggedData(p) => p.serialized_length(),
            Payload::Milestone(p) => p.serialized_length(),
            Payload::TreasuryTransaction(p) => p.serialized_length(),
        }
    }

    #[tracing::instrument(skip_all, err)]
    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_PAYLOAD_LENGTH, "payload")?;
        match stream.peek_u32("payload")? {
            TRANSACTION_PAYLOAD_TYPE => Ok(TransactionPayload::read_from(stream)?.into()),
            TAGGED_DATA_PAYLOAD_TYPE => Ok(TaggedDataPayload::read_from(stream)?.into()),
            MILESTONE_PAYLOAD_TYPE => Ok(MilestonePayload::read_from(stream)?.into()),
            TREASURY_TRANSACTION_PAYLOAD_TYPE => Ok(TreasuryTransactionPayload::read_from(stream)?.into()),
            found => Err(SerError::UnrecognizedType { kind: "payload", found }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Payload::Transaction(p) => p.write_to(stream),
            Payload::TaggedData(p) => p.write_to(stream),
            Payload::Milestone(p) => p.write_to(stream),
            Payload::TreasuryTransaction(p) => p.write_to(stream),
        }
    }
}

stardust_core::impl_hex_serde!(TaggedDataPayload);
stardust_core::impl_hex_serde!(TransactionPayload);
stardust_core::impl_hex_serde!(Payload);
