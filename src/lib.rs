//! # nulfield
//!
//! Flattens nested values into a single byte buffer of NUL-separated fields,
//! and reads such buffers back as a sequence of key/value entries.
//!
//! ## What is it?
//!
//! The encoder walks text, numbers, raw bytes, arrays and maps depth-first
//! and writes every leaf as one field terminated by a `0x00` byte. The
//! decoder splits a buffer on that byte and pairs the fields up: first a
//! key, then its value, then the next key, and so on.
//!
//! ## Key Features
//!
//! - **Closed value model**: [`Value`] lists every encodable shape up front
//! - **Canonical numbers**: `42` and `42.0` stay distinct on the wire
//! - **Serde front-end**: any `T: Serialize` can be encoded through [`to_bytes`]
//! - **Single-pass decoding**: one scan, no backtracking, no partial results
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use nulfield::{decode, encode, value, Entry};
//!
//! let bytes = encode(&[value!({
//!     "name": "Alice",
//!     "age": 30
//! })])
//! .unwrap();
//! assert_eq!(bytes, b"name\0Alice\0age\x0030\0");
//!
//! let entries = decode(&bytes).unwrap();
//! assert_eq!(entries[0], Entry::Pair("name".into(), "Alice".into()));
//! assert_eq!(entries[1], Entry::Pair("age".into(), "30".into()));
//! ```
//!
//! ### From Rust types
//!
//! ```rust
//! use serde::Serialize;
//! use nulfield::{decode, to_bytes};
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let user = User { id: 7, name: "Bob".to_string() };
//! let bytes = to_bytes(&user).unwrap();
//!
//! let pairs: Vec<_> = decode(&bytes)
//!     .unwrap()
//!     .into_iter()
//!     .filter_map(|e| e.into_pair())
//!     .collect();
//! assert_eq!(pairs, vec![
//!     ("id".to_string(), "7".to_string()),
//!     ("name".to_string(), "Bob".to_string()),
//! ]);
//! ```
//!
//! ## Round Trips
//!
//! Only flat sequences of text pairs survive `decode(encode(x))` unchanged.
//! Container boundaries are not recorded, and a raw-bytes leaf that contains
//! `0x00` splits into extra fields. See [`format`] for the full layout.
//!
//! ## Logging
//!
//! Encoding and decoding emit [`tracing`] events (`trace` per leaf, `debug`
//! summaries, `warn` on rejected input). No subscriber is installed by this
//! crate.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{Decoder, Entry};
pub use error::{Error, Result};
pub use format::SEPARATOR;
pub use map::ValueMap;
pub use options::{DecodeOptions, EncodeOptions, FieldMode};
pub use ser::{Encoder, ValueSerializer};
pub use value::{Number, Value};

use serde::Serialize;
use std::io;
use tracing::debug;

/// Encode values into a buffer of NUL-terminated fields.
///
/// Every top-level value is flattened in order; see [`format`] for the
/// layout. An empty slice yields an empty buffer.
///
/// # Examples
///
/// ```rust
/// use nulfield::{encode, value};
///
/// let bytes = encode(&[value!("a"), value!(1), value!([2, 3])]).unwrap();
/// assert_eq!(bytes, b"a\x001\x002\x003\x00");
/// assert!(encode(&[]).unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if any value contains `Null` or `Bool`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(values: &[Value]) -> Result<Vec<u8>> {
    encode_with_options(values, EncodeOptions::default())
}

/// Encode values with custom options.
///
/// # Examples
///
/// ```rust
/// use nulfield::{encode_with_options, value, EncodeOptions};
///
/// let bytes = encode_with_options(&[value!(42), value!(42.0)], EncodeOptions::concatenated()).unwrap();
/// assert_eq!(bytes, b"4242.0");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for `Null` or `Bool`, and
/// [`Error::SeparatorInField`] when strict fields are enabled and a leaf
/// contains the separator.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(values: &[Value], options: EncodeOptions) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(options);
    for value in values {
        encoder.encode_value(value)?;
    }
    debug!(
        values = values.len(),
        leaves = encoder.leaf_count(),
        "encoded values"
    );
    encoder.into_inner()
}

/// Decode a buffer into key/value entries.
///
/// # Examples
///
/// ```rust
/// use nulfield::{decode, Entry};
///
/// let entries = decode(b"k\0v\0tail").unwrap();
/// assert_eq!(entries, vec![
///     Entry::Pair("k".into(), "v".into()),
///     Entry::Key("tail".into()),
/// ]);
/// assert!(decode(b"").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if a field is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(buffer: &[u8]) -> Result<Vec<Entry>> {
    decode_with_options(buffer, DecodeOptions::default())
}

/// Decode a buffer with custom options.
///
/// # Errors
///
/// Returns [`Error::InputTooLarge`] if the buffer exceeds
/// [`DecodeOptions::max_input_len`], and [`Error::InvalidEncoding`] if a
/// field is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(buffer: &[u8], options: DecodeOptions) -> Result<Vec<Entry>> {
    let entries = Decoder::new(buffer).with_options(options).decode()?;
    debug!(len = buffer.len(), entries = entries.len(), "decoded buffer");
    Ok(entries)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use nulfield::{to_value, Value};
///
/// let value = to_value(&vec![1, 2]).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::from(1), Value::from(2)]));
/// ```
///
/// # Errors
///
/// Returns an error if the value's `Serialize` impl reports one.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` into delimited fields.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` contains booleans, units or
/// `None`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_bytes_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` into fields with custom options.
///
/// # Errors
///
/// See [`encode_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes_with_options<T>(value: &T, options: EncodeOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    encode_with_options(std::slice::from_ref(&value), options)
}

/// Serialize any `T: Serialize` into delimited fields and write them out.
///
/// Nothing is written if encoding fails.
///
/// # Examples
///
/// ```rust
/// use nulfield::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("k", "v")).unwrap();
/// assert_eq!(buffer, b"k\0v\0");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let bytes = to_bytes(value)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Read a whole stream into memory and decode it.
///
/// # Examples
///
/// ```rust
/// use nulfield::{from_reader, Entry};
/// use std::io::Cursor;
///
/// let entries = from_reader(Cursor::new(b"k\0v")).unwrap();
/// assert_eq!(entries, vec![Entry::Pair("k".into(), "v".into())]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the bytes do not decode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Vec<Entry>>
where
    R: io::Read,
{
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| Error::io(&e.to_string()))?;
    decode(&buffer)
}
