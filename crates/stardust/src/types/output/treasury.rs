use stardust_core::ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream};

use super::TREASURY_OUTPUT_TYPE;

/// Serialized length of a treasury output: type and amount.
pub const MIN_TREASURY_OUTPUT_LENGTH: usize = 1 + 8;

/// Holds the treasury's funds. Only milestones may create one, so it never appears in a
/// transaction essence.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TreasuryOutput {
    /// The treasury balance
    pub amount: u64,
}

impl ByteFormat for TreasuryOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        MIN_TREASURY_OUTPUT_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TREASURY_OUTPUT_LENGTH, "treasuryOutput")?;
        stream.read_type_u8("treasuryOutput", TREASURY_OUTPUT_TYPE)?;
        Ok(Self {
            amount: stream.read_u64("treasuryOutput.amount")?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("treasuryOutput", TREASURY_OUTPUT_TYPE)?;
        len += stream.write_u64("treasuryOutput.amount", self.amount)?;
        Ok(len)
    }
}
