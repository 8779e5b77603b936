//! Error types for field encoding and decoding.
//!
//! Every error aborts the call that produced it; neither the encoder nor the
//! decoder returns partial output.
//!
//! ## Error Categories
//!
//! - **Unsupported types**: the encoder met a value kind with no field form
//! - **Invalid encoding**: a decoded field is not valid UTF-8
//! - **Separator collisions**: a strict encoder met a leaf containing `0x00`
//! - **Oversized input**: a bounded decoder was handed too many bytes
//! - **I/O Errors**: reading or writing through `std::io` failed
//!
//! ## Examples
//!
//! ```rust
//! use nulfield::{decode, Error};
//!
//! let result = decode(b"key\0\xff\xfe");
//! assert!(matches!(result, Err(Error::InvalidEncoding { start: 4, end: 6, .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The encoder cannot turn this kind of value into a field.
    #[error("Unsupported type: {kind}")]
    UnsupportedType { kind: String },

    /// A field's bytes are not valid UTF-8.
    #[error("Invalid encoding in field at bytes {start}..{end}: {msg}")]
    InvalidEncoding {
        start: usize,
        end: usize,
        msg: String,
    },

    /// A leaf contains the separator byte and strict fields were requested.
    #[error("Leaf {index} contains the field separator")]
    SeparatorInField { index: usize },

    /// The input buffer exceeds the configured decode limit.
    #[error("Input of {len} bytes exceeds the limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error naming the offending value kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nulfield::Error;
    ///
    /// let err = Error::unsupported_type("null");
    /// assert_eq!(err.to_string(), "Unsupported type: null");
    /// ```
    pub fn unsupported_type(kind: &str) -> Self {
        Error::UnsupportedType {
            kind: kind.to_string(),
        }
    }

    /// Creates an invalid encoding error for the field spanning `start..end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nulfield::Error;
    ///
    /// let err = Error::invalid_encoding(3, 5, "invalid utf-8 sequence");
    /// assert!(err.to_string().contains("bytes 3..5"));
    /// ```
    pub fn invalid_encoding<T: fmt::Display>(start: usize, end: usize, msg: T) -> Self {
        Error::InvalidEncoding {
            start,
            end,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::unsupported_type("bool").to_string(),
            "Unsupported type: bool"
        );
        assert_eq!(
            Error::SeparatorInField { index: 2 }.to_string(),
            "Leaf 2 contains the field separator"
        );
        assert_eq!(
            Error::InputTooLarge { len: 10, max: 4 }.to_string(),
            "Input of 10 bytes exceeds the limit of 4 bytes"
        );
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::ser::Error>::custom("boom");
        assert_eq!(err, Error::Custom("boom".to_string()));
    }
}
