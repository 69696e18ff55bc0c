//! # Stardust Core
//!
//! `stardust-core` contains the binary codec machinery used by the `stardust` crate.
//!
//! ## Crate Layout
//!
//! ### Ser
//!
//! The `ser` module provides a bounds-checked byte cursor (`ReadStream` / `WriteStream`) and the
//! `ByteFormat` trait. Implementers define the binary serialization format of the type by reading
//! from and writing to the cursor. Every read names its field, so a truncated buffer fails with a
//! `TruncatedInput` error identifying the field, the requested length and the bytes remaining.
//!
//! ### Hashes
//!
//! The hashes module provides a blake2b-256 writer and utilities for newtyping its output. These
//! newtypes are called marked digests and are intended to be used for a specific purpose. E.g. a
//! `TransactionId` is a marked digest of a serialized transaction payload.
//!
//! ### Macros
//!
//! `impl_fixed_bytes!`, `mark_32_byte_hash!` and `impl_hex_serde!` give ledger types their hex
//! surface: `0x`-prefixed lowercase hex out, hex with or without the prefix in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
pub mod macros;

pub mod hashes;
pub mod prelude;
pub mod ser;

pub use primitive_types::U256;
