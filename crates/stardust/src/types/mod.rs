//! Ledger object types and their binary codecs.
//!
//! Every closed set of variants (addresses, features, unlock conditions, token schemes, outputs,
//! inputs, signatures, unlocks and payloads) decodes the same way: check that at least the
//! smallest variant fits, peek the discriminant, then hand off to the leaf decoder, which consumes
//! the discriminant again and refuses any value but its own.

pub mod address;
pub mod block;
pub mod essence;
pub mod feature;
pub mod ids;
pub mod input;
pub mod milestone;
pub mod native_token;
pub mod output;
pub mod payload;
pub mod token_scheme;
pub mod unlock;
pub mod unlock_condition;

pub use address::*;
pub use block::*;
pub use essence::*;
pub use feature::*;
pub use ids::*;
pub use input::*;
pub use milestone::*;
pub use native_token::*;
pub use output::*;
pub use payload::*;
pub use token_scheme::*;
pub use unlock::*;
pub use unlock_condition::*;

use stardust_core::ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream};

/// The smallest of a set of minimum lengths.
pub(crate) const fn min_of(lengths: &[usize]) -> usize {
    let mut min = usize::MAX;
    let mut i = 0;
    while i < lengths.len() {
        if lengths[i] < min {
            min = lengths[i];
        }
        i += 1;
    }
    min
}

/// Read a u32 length-prefixed optional object. A zero length means no object. The object must
/// consume exactly the declared length.
pub(crate) fn read_optional_payload<T>(stream: &mut ReadStream<'_>, field: &'static str) -> SerResult<Option<T>>
where
    T: ByteFormat<Error = SerError>,
{
    let length = stream.read_u32(field)? as usize;
    if length == 0 {
        return Ok(None);
    }
    read_exactly(stream, field, length).map(Some)
}

/// Read a u32 length-prefixed object that must be present.
pub(crate) fn read_sized_payload<T>(stream: &mut ReadStream<'_>, field: &'static str) -> SerResult<T>
where
    T: ByteFormat<Error = SerError>,
{
    let length = stream.read_u32(field)? as usize;
    read_exactly(stream, field, length)
}

fn read_exactly<T>(stream: &mut ReadStream<'_>, field: &'static str, length: usize) -> SerResult<T>
where
    T: ByteFormat<Error = SerError>,
{
    let mut inner = ReadStream::new(stream.read_slice(field, length)?);
    let payload = T::read_from(&mut inner)?;
    inner.ensure_consumed()?;
    Ok(payload)
}

/// Write a u32 length prefix followed by the object, back-filling the prefix once the object's
/// length is known.
pub(crate) fn write_optional_payload<T>(
    stream: &mut WriteStream,
    field: &'static str,
    payload: Option<&T>,
) -> SerResult<usize>
where
    T: ByteFormat<Error = SerError>,
{
    let payload = match payload {
        Some(payload) => payload,
        None => return stream.write_u32(field, 0),
    };

    let length_position = stream.position();
    stream.write_u32(field, 0)?;
    let written = payload.write_to(stream)?;
    let end = stream.position();

    stream.set_position(length_position)?;
    stream.write_u32(field, written as u32)?;
    stream.set_position(end)?;
    Ok(4 + written)
}

/// The serialized length of a u32 length-prefixed optional object.
pub(crate) fn optional_payload_length<T: ByteFormat>(payload: Option<&T>) -> usize {
    4 + payload.map(ByteFormat::serialized_length).unwrap_or(0)
}
