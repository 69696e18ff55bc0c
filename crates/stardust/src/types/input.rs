//! Inputs: references to the outputs a transaction consumes.

use stardust_core::ser::{list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream};

use crate::types::ids::{OutputId, TransactionId};

/// Discriminant of a UTXO input.
pub const UTXO_INPUT_TYPE: u8 = 0;
/// Serialized length of a UTXO input: type, transaction id and output index.
pub const UTXO_INPUT_LENGTH: usize = 1 + TransactionId::LENGTH + 2;
/// Minimum serialized length of any input.
pub const MIN_INPUT_LENGTH: usize = UTXO_INPUT_LENGTH;

/// Consumes one output of an earlier transaction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UtxoInput {
    /// The transaction that created the output
    pub transaction_id: TransactionId,
    /// The output's index in that transaction
    pub transaction_output_index: u16,
}

impl UtxoInput {
    /// Instantiate a new input.
    pub fn new(transaction_id: TransactionId, transaction_output_index: u16) -> Self {
        Self {
            transaction_id,
            transaction_output_index,
        }
    }

    /// The id of the consumed output.
    pub fn output_id(&self) -> OutputId {
        OutputId::new(self.transaction_id, self.transaction_output_index)
    }
}

impl From<OutputId> for UtxoInput {
    fn from(id: OutputId) -> Self {
        Self::new(id.transaction_id, id.index)
    }
}

impl ByteFormat for UtxoInput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        UTXO_INPUT_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(UTXO_INPUT_LENGTH, "utxoInput")?;
        stream.read_type_u8("utxoInput", UTXO_INPUT_TYPE)?;
        let transaction_id = TransactionId::read_from(stream)?;
        let transaction_output_index = stream.read_u16("utxoInput.transactionOutputIndex")?;
        Ok(Self {
            transaction_id,
            transaction_output_index,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("utxoInput", UTXO_INPUT_TYPE)?;
        len += self.transaction_id.write_to(stream)?;
        len += stream.write_u16("utxoInput.transactionOutputIndex", self.transaction_output_index)?;
        Ok(len)
    }
}

/// An input of any kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Input {
    /// UTXO
    Utxo(UtxoInput),
}

impl Input {
    /// The discriminant of the input kind.
    pub fn kind(&self) -> u8 {
        match self {
            Input::Utxo(_) => UTXO_INPUT_TYPE,
        }
    }
}

impl From<UtxoInput> for Input {
    fn from(i: UtxoInput) -> Self {
        Input::Utxo(i)
    }
}

impl From<OutputId> for Input {
    fn from(id: OutputId) -> Self {
        Input::Utxo(id.into())
    }
}

impl ByteFormat for Input {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            Input::Utxo(i) => i.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_INPUT_LENGTH, "input")?;
        match stream.peek_u8("input")? {
            UTXO_INPUT_TYPE => Ok(Input::Utxo(UtxoInput::read_from(stream)?)),
            found => Err(SerError::UnrecognizedType {
                kind: "input",
                found: found as u32,
            }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Input::Utxo(i) => i.write_to(stream),
        }
    }
}

/// Read a u16-count-prefixed list of inputs.
pub fn read_inputs(stream: &mut ReadStream<'_>) -> SerResult<Vec<Input>> {
    read_list(stream, "inputs", Prefix::U16)
}

/// Write a u16-count-prefixed list of inputs.
pub fn write_inputs(stream: &mut WriteStream, inputs: &[Input]) -> SerResult<usize> {
    write_list(stream, "inputs", Prefix::U16, inputs)
}

/// Serialized length of a list of inputs.
pub fn inputs_length(inputs: &[Input]) -> usize {
    list_length(Prefix::U16, inputs)
}
