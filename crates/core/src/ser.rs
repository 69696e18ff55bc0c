//! A simple trait for binary (de)Serialization over a bounds-checked byte cursor.
//!
//! All wire objects read from a [`ReadStream`] and write to a [`WriteStream`]. Every read names
//! the field it is reading, so a truncated buffer reports exactly which field ran out of bytes.

use byteorder::{ByteOrder, LittleEndian};
use hex::FromHexError;
use primitive_types::U256;
use thiserror::Error;

/// Errors related to serialization of types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SerError {
    /// A read asked for more bytes than the buffer holds.
    #[error("Truncated input reading {field}. Requested {requested} bytes, {remaining} remaining.")]
    TruncatedInput {
        /// The field being read
        field: &'static str,
        /// The number of bytes the field needs
        requested: usize,
        /// The number of bytes left in the buffer
        remaining: usize,
    },

    /// A leaf decoder found a discriminant other than its own.
    #[error("Type mismatch reading {field}. Expected {expected}, got {found}.")]
    TypeMismatch {
        /// The object being decoded
        field: &'static str,
        /// The discriminant the decoder handles
        expected: u32,
        /// The discriminant found in the buffer
        found: u32,
    },

    /// A discriminant that no variant of a closed set uses.
    #[error("Unrecognized {kind} type {found}.")]
    UnrecognizedType {
        /// The union being decoded
        kind: &'static str,
        /// The discriminant found in the buffer
        found: u32,
    },

    /// A length or count does not fit its prefix.
    #[error("Length {length} of {field} exceeds the prefix maximum of {max}.")]
    LengthOverflow {
        /// The field being written
        field: &'static str,
        /// The actual length
        length: usize,
        /// The largest length the prefix can express
        max: usize,
    },

    /// Bytes were left over after an object was fully decoded.
    #[error("{remaining} unused bytes after deserializing.")]
    UnusedData {
        /// The number of trailing bytes
        remaining: usize,
    },

    /// A hex string decoded to the wrong number of bytes for a fixed-length type.
    #[error("Invalid hex length. Expected {expected} bytes, got {found}.")]
    InvalidHexLength {
        /// The byte length of the type
        expected: usize,
        /// The byte length of the decoded hex
        found: usize,
    },

    /// `deserialize_hex` encountered an error on its input.
    #[error(transparent)]
    FromHexError(#[from] FromHexError),
}

/// Type alias for serialization errors
pub type SerResult<T> = Result<T, SerError>;

/// Strip an optional `0x` prefix and decode the remaining hex.
pub fn decode_hex(s: &str) -> SerResult<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

/// Width of a length or count prefix.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Prefix {
    /// 1-byte prefix
    U8,
    /// 2-byte prefix
    U16,
    /// 4-byte prefix
    U32,
}

impl Prefix {
    /// The byte length of the prefix itself.
    pub const fn len(self) -> usize {
        match self {
            Prefix::U8 => 1,
            Prefix::U16 => 2,
            Prefix::U32 => 4,
        }
    }

    /// The largest value the prefix can express.
    pub const fn max(self) -> usize {
        match self {
            Prefix::U8 => u8::MAX as usize,
            Prefix::U16 => u16::MAX as usize,
            Prefix::U32 => u32::MAX as usize,
        }
    }
}

/// A read cursor over a borrowed, fixed-size buffer.
#[derive(Clone, Debug)]
pub struct ReadStream<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ReadStream<'a> {
    /// Instantiate a cursor at position 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The total length of the underlying buffer.
    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    /// The current absolute position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute position. Positions past the end fail.
    pub fn set_position(&mut self, position: usize) -> SerResult<()> {
        if position > self.bytes.len() {
            return Err(SerError::TruncatedInput {
                field: "position",
                requested: position,
                remaining: self.bytes.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// True if at least `n` unread bytes remain.
    pub fn has_remaining(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    /// Fail with `TruncatedInput` unless at least `n` unread bytes remain.
    pub fn ensure_remaining(&self, n: usize, field: &'static str) -> SerResult<()> {
        if self.has_remaining(n) {
            Ok(())
        } else {
            Err(SerError::TruncatedInput {
                field,
                requested: n,
                remaining: self.remaining(),
            })
        }
    }

    /// Fail with `UnusedData` if any bytes are left unread.
    pub fn ensure_consumed(&self) -> SerResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(SerError::UnusedData { remaining }),
        }
    }

    /// Borrow the next `n` bytes without consuming them.
    fn peek(&self, field: &'static str, n: usize) -> SerResult<&'a [u8]> {
        self.ensure_remaining(n, field)?;
        Ok(&self.bytes[self.position..self.position + n])
    }

    /// Consume and borrow the next `n` bytes.
    pub fn read_slice(&mut self, field: &'static str, n: usize) -> SerResult<&'a [u8]> {
        let slice = self.peek(field, n)?;
        self.position += n;
        Ok(slice)
    }

    /// Consume the next `n` bytes into an owned vector.
    pub fn read_bytes(&mut self, field: &'static str, n: usize) -> SerResult<Vec<u8>> {
        Ok(self.read_slice(field, n)?.to_vec())
    }

    /// Consume a fixed-length array.
    pub fn read_fixed<const N: usize>(&mut self, field: &'static str) -> SerResult<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(field, N)?);
        Ok(buf)
    }

    /// Read a byte without advancing.
    pub fn peek_u8(&self, field: &'static str) -> SerResult<u8> {
        Ok(self.peek(field, 1)?[0])
    }

    /// Read a LE u32 without advancing.
    pub fn peek_u32(&self, field: &'static str) -> SerResult<u32> {
        Ok(LittleEndian::read_u32(self.peek(field, 4)?))
    }

    /// Consume a byte.
    pub fn read_u8(&mut self, field: &'static str) -> SerResult<u8> {
        Ok(self.read_slice(field, 1)?[0])
    }

    /// Consume a LE u16.
    pub fn read_u16(&mut self, field: &'static str) -> SerResult<u16> {
        Ok(LittleEndian::read_u16(self.read_slice(field, 2)?))
    }

    /// Consume a LE u32.
    pub fn read_u32(&mut self, field: &'static str) -> SerResult<u32> {
        Ok(LittleEndian::read_u32(self.read_slice(field, 4)?))
    }

    /// Consume a LE u64.
    pub fn read_u64(&mut self, field: &'static str) -> SerResult<u64> {
        Ok(LittleEndian::read_u64(self.read_slice(field, 8)?))
    }

    /// Consume a LE 256-bit unsigned integer.
    pub fn read_u256(&mut self, field: &'static str) -> SerResult<U256> {
        Ok(U256::from_little_endian(self.read_slice(field, 32)?))
    }

    /// Consume a boolean byte. Any non-zero value is `true`.
    pub fn read_bool(&mut self, field: &'static str) -> SerResult<bool> {
        Ok(self.read_u8(field)? != 0)
    }

    /// Consume a length or count prefix.
    pub fn read_length(&mut self, field: &'static str, prefix: Prefix) -> SerResult<usize> {
        Ok(match prefix {
            Prefix::U8 => self.read_u8(field)? as usize,
            Prefix::U16 => self.read_u16(field)? as usize,
            Prefix::U32 => self.read_u32(field)? as usize,
        })
    }

    /// Consume a length prefix and that many bytes.
    pub fn read_prefixed_bytes(&mut self, field: &'static str, prefix: Prefix) -> SerResult<Vec<u8>> {
        let length = self.read_length(field, prefix)?;
        self.read_bytes(field, length)
    }

    /// Consume a discriminant byte and check it against the expected value.
    pub fn read_type_u8(&mut self, field: &'static str, expected: u8) -> SerResult<()> {
        let found = self.read_u8(field)?;
        if found != expected {
            return Err(SerError::TypeMismatch {
                field,
                expected: expected as u32,
                found: found as u32,
            });
        }
        Ok(())
    }

    /// Consume a 4-byte discriminant and check it against the expected value.
    pub fn read_type_u32(&mut self, field: &'static str, expected: u32) -> SerResult<()> {
        let found = self.read_u32(field)?;
        if found != expected {
            return Err(SerError::TypeMismatch {
                field,
                expected,
                found,
            });
        }
        Ok(())
    }
}

/// A write cursor over an owned, growable buffer.
///
/// Writes at a position before the end overwrite existing bytes, which allows length prefixes to
/// be back-filled once the nested object is written.
#[derive(Clone, Debug, Default)]
pub struct WriteStream {
    bytes: Vec<u8>,
    position: usize,
}

impl WriteStream {
    /// Instantiate an empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate an empty cursor with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            position: 0,
        }
    }

    /// The number of bytes written so far.
    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    /// The current absolute position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor. Positions past the end fail.
    pub fn set_position(&mut self, position: usize) -> SerResult<()> {
        if position > self.bytes.len() {
            return Err(SerError::TruncatedInput {
                field: "position",
                requested: position,
                remaining: self.bytes.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Write raw bytes at the cursor.
    pub fn write_bytes(&mut self, _field: &'static str, data: &[u8]) -> SerResult<usize> {
        let end = self.position + data.len();
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[self.position..end].copy_from_slice(data);
        self.position = end;
        Ok(data.len())
    }

    /// Write a byte.
    pub fn write_u8(&mut self, field: &'static str, value: u8) -> SerResult<usize> {
        self.write_bytes(field, &[value])
    }

    /// Write a LE u16.
    pub fn write_u16(&mut self, field: &'static str, value: u16) -> SerResult<usize> {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.write_bytes(field, &buf)
    }

    /// Write a LE u32.
    pub fn write_u32(&mut self, field: &'static str, value: u32) -> SerResult<usize> {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.write_bytes(field, &buf)
    }

    /// Write a LE u64.
    pub fn write_u64(&mut self, field: &'static str, value: u64) -> SerResult<usize> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        self.write_bytes(field, &buf)
    }

    /// Write a LE 256-bit unsigned integer.
    pub fn write_u256(&mut self, field: &'static str, value: &U256) -> SerResult<usize> {
        let mut buf = [0u8; 32];
        value.to_little_endian(&mut buf);
        self.write_bytes(field, &buf)
    }

    /// Write a boolean as a single byte.
    pub fn write_bool(&mut self, field: &'static str, value: bool) -> SerResult<usize> {
        self.write_u8(field, value as u8)
    }

    /// Write a length or count prefix, failing if it does not fit.
    pub fn write_length(&mut self, field: &'static str, prefix: Prefix, length: usize) -> SerResult<usize> {
        if length > prefix.max() {
            return Err(SerError::LengthOverflow {
                field,
                length,
                max: prefix.max(),
            });
        }
        match prefix {
            Prefix::U8 => self.write_u8(field, length as u8),
            Prefix::U16 => self.write_u16(field, length as u16),
            Prefix::U32 => self.write_u32(field, length as u32),
        }
    }

    /// Write a length prefix followed by the bytes.
    pub fn write_prefixed_bytes(&mut self, field: &'static str, prefix: Prefix, data: &[u8]) -> SerResult<usize> {
        let mut len = self.write_length(field, prefix, data.len())?;
        len += self.write_bytes(field, data)?;
        Ok(len)
    }

    /// Borrow the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the cursor, returning the written bytes.
    pub fn final_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Consume the cursor, returning the written bytes as `0x`-prefixed hex.
    pub fn final_hex(self) -> String {
        hex::encode_prefixed(self.bytes)
    }
}

/// A simple trait for deserializing from a [`ReadStream`] and serializing to a [`WriteStream`].
///
/// `ByteFormat` is implemented by every wire object, and is used for id derivation, storage
/// deposit calculation, and hex/serde surfaces.
pub trait ByteFormat {
    /// An associated error type
    type Error: From<SerError> + From<FromHexError> + std::error::Error;

    /// Returns the byte-length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Deserializes an instance of `Self` from a cursor, leaving the cursor after the object.
    fn read_from(stream: &mut ReadStream<'_>) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized;

    /// Serializes `Self` to a cursor. Returns the number of bytes written.
    fn write_to(&self, stream: &mut WriteStream) -> Result<usize, Self::Error>;

    /// Deserializes an instance of `Self` from a buffer. The whole buffer must be consumed.
    fn deserialize(bytes: &[u8]) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized,
    {
        let mut stream = ReadStream::new(bytes);
        let result = Self::read_from(&mut stream)?;
        stream.ensure_consumed()?;
        Ok(result)
    }

    /// Decodes a hex string, with or without `0x`, and deserializes an instance of `Self`.
    fn deserialize_hex(s: &str) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized,
    {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let v: Vec<u8> = hex::decode(s)?;
        Self::deserialize(&v)
    }

    /// Serializes `self` to a new byte vector.
    fn serialize(&self) -> Result<Vec<u8>, Self::Error> {
        let mut stream = WriteStream::with_capacity(self.serialized_length());
        self.write_to(&mut stream)?;
        Ok(stream.final_bytes())
    }

    /// Serializes `self` to a vector, returns the `0x`-prefixed hex-encoded vector.
    fn serialize_hex(&self) -> Result<String, Self::Error> {
        Ok(hex::encode_prefixed(self.serialize()?))
    }
}

/// Read a count-prefixed list of objects.
pub fn read_list<T>(stream: &mut ReadStream<'_>, field: &'static str, prefix: Prefix) -> Result<Vec<T>, T::Error>
where
    T: ByteFormat,
{
    let count = stream.read_length(field, prefix)?;
    let mut items = Vec::with_capacity(count.min(stream.remaining()));
    for _ in 0..count {
        items.push(T::read_from(stream)?);
    }
    Ok(items)
}

/// Write a count prefix followed by each object.
pub fn write_list<T>(stream: &mut WriteStream, field: &'static str, prefix: Prefix, items: &[T]) -> Result<usize, T::Error>
where
    T: ByteFormat,
{
    let mut len = stream.write_length(field, prefix, items.len())?;
    for item in items {
        len += item.write_to(stream)?;
    }
    Ok(len)
}

/// The serialized length of a count-prefixed list.
pub fn list_length<T: ByteFormat>(prefix: Prefix, items: &[T]) -> usize {
    prefix.len() + items.iter().map(ByteFormat::serialized_length).sum::<usize>()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_reads_little_endian_integers() {
        let bytes = hex::decode("0140e20100000000000102030400").unwrap();
        let mut stream = ReadStream::new(&bytes);
        assert_eq!(stream.read_u8("a").unwrap(), 1);
        assert_eq!(stream.read_u64("b").unwrap(), 123456);
        assert_eq!(stream.read_u16("c").unwrap(), 0x0201);
        assert_eq!(stream.peek_u8("d").unwrap(), 3);
        assert_eq!(stream.read_u16("d").unwrap(), 0x0403);
        assert!(!stream.read_bool("e").unwrap());
        assert!(stream.ensure_consumed().is_ok());
    }

    #[test]
    fn it_rejects_truncated_reads_without_consuming() {
        let bytes = [1u8, 2, 3];
        let mut stream = ReadStream::new(&bytes);
        stream.read_u8("first").unwrap();
        match stream.read_u32("amount") {
            Err(SerError::TruncatedInput {
                field: "amount",
                requested: 4,
                remaining: 2,
            }) => {}
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.read_u16("rest").unwrap(), 0x0302);
    }

    #[test]
    fn it_checks_discriminants() {
        let bytes = [6u8, 0, 0, 0];
        let mut stream = ReadStream::new(&bytes);
        assert_eq!(stream.peek_u32("payload").unwrap(), 6);
        match stream.read_type_u32("payload", 5) {
            Err(SerError::TypeMismatch {
                expected: 5,
                found: 6,
                ..
            }) => {}
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn it_round_trips_u256() {
        let cases = [
            U256::zero(),
            U256::from(1000u64),
            U256::MAX,
        ];
        for value in cases.iter() {
            let mut w = WriteStream::new();
            assert_eq!(w.write_u256("amount", value).unwrap(), 32);
            let bytes = w.final_bytes();
            let mut r = ReadStream::new(&bytes);
            assert_eq!(&r.read_u256("amount").unwrap(), value);
        }
        let mut w = WriteStream::new();
        w.write_u256("amount", &U256::from(0x0102u64)).unwrap();
        assert_eq!(
            w.final_hex(),
            "0x0201000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn it_backfills_length_prefixes() {
        let mut w = WriteStream::new();
        w.write_u8("version", 2).unwrap();
        let length_position = w.position();
        w.write_u32("length", 0).unwrap();
        let start = w.position();
        w.write_bytes("body", b"bar").unwrap();
        let end = w.position();
        w.set_position(length_position).unwrap();
        w.write_u32("length", (end - start) as u32).unwrap();
        w.set_position(end).unwrap();
        w.write_u8("tail", 0xff).unwrap();
        assert_eq!(w.final_hex(), "0x0203000000626172ff");
    }

    #[test]
    fn it_refuses_overflowing_prefixes() {
        let mut w = WriteStream::new();
        let data = vec![0u8; 256];
        match w.write_prefixed_bytes("tag", Prefix::U8, &data) {
            Err(SerError::LengthOverflow {
                field: "tag",
                length: 256,
                max: 255,
            }) => {}
            other => panic!("expected LengthOverflow, got {:?}", other),
        }
    }

    #[test]
    fn it_decodes_hex_with_and_without_prefix() {
        assert_eq!(decode_hex("0x0a0b").unwrap(), vec![10, 11]);
        assert_eq!(decode_hex("0a0b").unwrap(), vec![10, 11]);
        assert!(decode_hex("0x0g").is_err());
    }
}
