//! Configuration options for encoding and decoding.
//!
//! - [`EncodeOptions`]: how leaves are laid out in the buffer
//! - [`FieldMode`]: whether a separator follows each leaf
//! - [`DecodeOptions`]: limits applied before decoding
//!
//! ## Examples
//!
//! ```rust
//! use nulfield::{encode_with_options, EncodeOptions, FieldMode, Value};
//!
//! let values = [Value::from("a"), Value::from(1)];
//!
//! let delimited = encode_with_options(&values, EncodeOptions::new()).unwrap();
//! assert_eq!(delimited, b"a\x001\x00");
//!
//! let raw = encode_with_options(&values, EncodeOptions::concatenated()).unwrap();
//! assert_eq!(raw, b"a1");
//! ```

/// Layout of leaves in an encoded buffer.
///
/// # Examples
///
/// ```rust
/// use nulfield::FieldMode;
///
/// assert_eq!(FieldMode::default(), FieldMode::Delimited);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// Every leaf is followed by one separator byte. Buffers in this mode
    /// can be split back into fields by the decoder.
    #[default]
    Delimited,
    /// Leaves are appended back to back with nothing between them.
    Concatenated,
}

/// Configuration options for the encoder.
///
/// # Examples
///
/// ```rust
/// use nulfield::{EncodeOptions, FieldMode};
///
/// let options = EncodeOptions::new()
///     .with_field_mode(FieldMode::Delimited)
///     .with_strict_fields(true);
/// assert!(options.strict_fields);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    pub field_mode: FieldMode,
    /// Reject leaves whose bytes contain the separator instead of letting
    /// them corrupt the field boundaries that follow.
    pub strict_fields: bool,
}

impl EncodeOptions {
    /// Creates default options (delimited fields, no separator check).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that append leaves without separators.
    #[must_use]
    pub fn concatenated() -> Self {
        EncodeOptions {
            field_mode: FieldMode::Concatenated,
            ..Default::default()
        }
    }

    /// Sets the field layout.
    #[must_use]
    pub fn with_field_mode(mut self, field_mode: FieldMode) -> Self {
        self.field_mode = field_mode;
        self
    }

    /// Enables or disables the separator check on leaves.
    #[must_use]
    pub fn with_strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }
}

/// Configuration options for the decoder.
///
/// The decoder does not cap how large a single field may grow, so buffers
/// from untrusted sources should be bounded with
/// [`with_max_input_len`](DecodeOptions::with_max_input_len).
///
/// # Examples
///
/// ```rust
/// use nulfield::{decode_with_options, DecodeOptions, Error};
///
/// let options = DecodeOptions::new().with_max_input_len(4);
/// let err = decode_with_options(b"key\0value", options).unwrap_err();
/// assert_eq!(err, Error::InputTooLarge { len: 9, max: 4 });
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    pub max_input_len: Option<usize>,
}

impl DecodeOptions {
    /// Creates default options (no input limit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects buffers longer than `max` bytes before decoding starts.
    #[must_use]
    pub fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }
}
