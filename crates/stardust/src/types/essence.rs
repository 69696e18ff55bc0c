//! The transaction essence: the signed part of a transaction.

use stardust_core::{
    hashes::{blake2b256, Blake2b256Digest},
    ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::{
    ids::InputsCommitment,
    input::{inputs_length, read_inputs, write_inputs, Input},
    optional_payload_length,
    output::{outputs_length, read_outputs, write_outputs, Output},
    payload::TaggedDataPayload,
    read_optional_payload, write_optional_payload,
};

/// Discriminant of the transaction essence.
pub const TRANSACTION_ESSENCE_TYPE: u8 = 1;
/// Fewest inputs a transaction may consume.
pub const MIN_INPUT_COUNT: usize = 1;
/// Most inputs a transaction may consume.
pub const MAX_INPUT_COUNT: usize = 128;
/// Fewest outputs a transaction may create.
pub const MIN_OUTPUT_COUNT: usize = 1;
/// Most outputs a transaction may create.
pub const MAX_OUTPUT_COUNT: usize = 127;
/// Highest output index an input may reference.
pub const MAX_OUTPUT_INDEX: u16 = 127;
/// Most distinct native tokens the outputs of one transaction may hold between them.
pub const MAX_NATIVE_TOKENS_PER_TRANSACTION: usize = 64;
/// Minimum serialized length of a transaction essence.
pub const MIN_TRANSACTION_ESSENCE_LENGTH: usize = 1 // type
    + 8 // network id
    + 2 // inputs count
    + InputsCommitment::LENGTH
    + 2 // outputs count
    + 4; // payload length

/// The inputs consumed, the outputs created, and an optional tagged data payload.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TransactionEssence {
    /// Identifies the network the transaction is valid on
    pub network_id: u64,
    /// The outputs consumed
    pub inputs: Vec<Input>,
    /// Commits to the serialized consumed outputs
    pub inputs_commitment: InputsCommitment,
    /// The outputs created
    pub outputs: Vec<Output>,
    /// Optional data carried by the transaction
    pub payload: Option<TaggedDataPayload>,
}

impl TransactionEssence {
    /// The digest that signature unlocks sign.
    pub fn signing_hash(&self) -> SerResult<Blake2b256Digest> {
        Ok(blake2b256(&self.serialize()?))
    }
}

impl ByteFormat for TransactionEssence {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + 8
            + inputs_length(&self.inputs)
            + InputsCommitment::LENGTH
            + outputs_length(&self.outputs)
            + optional_payload_length(self.payload.as_ref())
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TRANSACTION_ESSENCE_LENGTH, "transactionEssence")?;
        stream.read_type_u8("transactionEssence", TRANSACTION_ESSENCE_TYPE)?;
        let network_id = stream.read_u64("transactionEssence.networkId")?;
        let inputs = read_inputs(stream)?;
        let inputs_commitment = InputsCommitment::read_from(stream)?;
        let outputs = read_outputs(stream)?;
        let payload = read_optional_payload(stream, "transactionEssence.payload")?;
        Ok(Self {
            network_id,
            inputs,
            inputs_commitment,
            outputs,
            payload,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("transactionEssence", TRANSACTION_ESSENCE_TYPE)?;
        len += stream.write_u64("transactionEssence.networkId", self.network_id)?;
        len += write_inputs(stream, &self.inputs)?;
        len += self.inputs_commitment.write_to(stream)?;
        len += write_outputs(stream, &self.outputs)?;
        len += write_optional_payload(stream, "transactionEssence.payload", self.payload.as_ref())?;
        Ok(len)
    }
}

stardust_core::impl_hex_serde!(TransactionEssence);
