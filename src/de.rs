//! Field decoding.
//!
//! This module provides the [`Decoder`], a single-pass state machine that
//! splits a buffer on the separator byte and reads the resulting fields as
//! alternating keys and values, and [`Entry`], the unit it produces.
//!
//! ## Grammar
//!
//! ```text
//! buffer  := (key SEP value SEP)* tail?
//! tail    := key                      -> Entry::Key
//!          | key SEP value            -> Entry::Pair
//!          | key SEP                  -> (nothing)
//! ```
//!
//! Fields may be empty. The decoder knows nothing about how the buffer was
//! produced: a flattened `[["a", "b"], "c"]` decodes as the pair `("a", "b")`
//! followed by the bare key `"c"`.
//!
//! ## Usage
//!
//! ```rust
//! use nulfield::{decode, Entry};
//!
//! let entries = decode(b"name\0Alice\0role").unwrap();
//! assert_eq!(
//!     entries,
//!     vec![
//!         Entry::Pair("name".to_string(), "Alice".to_string()),
//!         Entry::Key("role".to_string()),
//!     ]
//! );
//! ```

use crate::format::SEPARATOR;
use crate::{DecodeOptions, Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// A decoded unit: a bare trailing key or a key with its value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Entry {
    /// A key at the end of the buffer with no value after it.
    Key(String),
    Pair(String, String),
}

impl Entry {
    /// Returns the key of this entry.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Entry::Key(key) | Entry::Pair(key, _) => key,
        }
    }

    /// Returns the value for a pair, `None` for a bare key.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Entry::Key(_) => None,
            Entry::Pair(_, value) => Some(value),
        }
    }

    #[must_use]
    pub const fn is_pair(&self) -> bool {
        matches!(self, Entry::Pair(..))
    }

    /// Converts a pair into a `(key, value)` tuple.
    ///
    /// ```rust
    /// use nulfield::Entry;
    ///
    /// let pair = Entry::Pair("k".into(), "v".into());
    /// assert_eq!(pair.into_pair(), Some(("k".to_string(), "v".to_string())));
    /// assert_eq!(Entry::Key("k".into()).into_pair(), None);
    /// ```
    #[must_use]
    pub fn into_pair(self) -> Option<(String, String)> {
        match self {
            Entry::Key(_) => None,
            Entry::Pair(key, value) => Some((key, value)),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Key(key) => write!(f, "{}", key),
            Entry::Pair(key, value) => write!(f, "{}: {}", key, value),
        }
    }
}

impl From<(String, String)> for Entry {
    fn from((key, value): (String, String)) -> Self {
        Entry::Pair(key, value)
    }
}

impl Serialize for Entry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Entry::Key(key) => serializer.serialize_str(key),
            Entry::Pair(key, value) => (key, value).serialize(serializer),
        }
    }
}

/// Which role the field being accumulated will play.
enum State {
    AccumulatingKey,
    /// Carries the pending key.
    AccumulatingValue(String),
}

/// The field decoder.
///
/// Borrows the input buffer; every call to [`decode`](Decoder::decode) runs
/// the state machine from the start.
pub struct Decoder<'a> {
    input: &'a [u8],
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Decoder {
            input,
            options: DecodeOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the key/value state machine over the whole buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] when the buffer exceeds the
    /// configured limit and [`Error::InvalidEncoding`] for the first field
    /// that is not valid UTF-8. No entries are returned on error.
    pub fn decode(&self) -> Result<Vec<Entry>> {
        if let Some(max) = self.options.max_input_len {
            if self.input.len() > max {
                warn!(len = self.input.len(), max, "rejecting oversized buffer");
                return Err(Error::InputTooLarge {
                    len: self.input.len(),
                    max,
                });
            }
        }

        let mut entries = Vec::new();
        let mut state = State::AccumulatingKey;
        let mut field_start = 0;

        for (pos, &byte) in self.input.iter().enumerate() {
            if byte != SEPARATOR {
                continue;
            }
            let field = self.field_text(field_start, pos)?;
            state = match state {
                State::AccumulatingKey => State::AccumulatingValue(field),
                State::AccumulatingValue(key) => {
                    entries.push(Entry::Pair(key, field));
                    State::AccumulatingKey
                }
            };
            field_start = pos + 1;
        }

        // A trailing field is only flushed when it holds at least one byte.
        if field_start < self.input.len() {
            let field = self.field_text(field_start, self.input.len())?;
            entries.push(match state {
                State::AccumulatingKey => Entry::Key(field),
                State::AccumulatingValue(key) => Entry::Pair(key, field),
            });
        }

        Ok(entries)
    }

    fn field_text(&self, start: usize, end: usize) -> Result<String> {
        match std::str::from_utf8(&self.input[start..end]) {
            Ok(text) => Ok(text.to_owned()),
            Err(e) => {
                warn!(start, end, "field is not valid UTF-8");
                Err(Error::invalid_encoding(start, end, e))
            }
        }
    }
}
