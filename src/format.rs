//! Byte format
//!
//! This module documents the buffer layout produced by the encoder and
//! consumed by the decoder.
//!
//! # Fields
//!
//! A buffer is a flat sequence of bytes cut into *fields* by the separator
//! byte [`SEPARATOR`] (`0x00`). A field is the byte form of one leaf:
//!
//! | Leaf | Field bytes | Example |
//! |------|-------------|---------|
//! | Text | UTF-8 | `"héllo"` → `68 C3 A9 6C 6C 6F` |
//! | Integer | decimal digits, optional `-` | `-42` → `"-42"` |
//! | Float | shortest round-trip decimal | `42.0` → `"42.0"`, `1e16` → `"1e+16"` |
//! | Bytes | verbatim | `[0x01, 0x02]` → `01 02` |
//!
//! With [`FieldMode::Delimited`](crate::FieldMode::Delimited) (the default)
//! every field is followed by exactly one separator:
//!
//! ```text
//! encode(["k1", "v1", 7])  =  6B 31 00 76 31 00 37 00
//!                             k  1  ␀  v  1  ␀  7  ␀
//! ```
//!
//! With [`FieldMode::Concatenated`](crate::FieldMode::Concatenated) fields
//! are written back to back and the buffer cannot be split again.
//!
//! # Containers
//!
//! Arrays and maps contribute no bytes of their own. Arrays expand to their
//! elements in order; maps expand to `key, value, key, value, ...` in
//! insertion order. Nesting is therefore invisible on the wire:
//!
//! ```text
//! [["a", "b"], "c"]      ->  a ␀ b ␀ c ␀
//! {"k1": "v1", "k2": 2}  ->  k1 ␀ v1 ␀ k2 ␀ 2 ␀
//! ```
//!
//! # Decoding
//!
//! The decoder reads fields in order and assigns them alternately the key
//! and value roles, starting with key:
//!
//! | State | Byte | Action | Next state |
//! |-------|------|--------|------------|
//! | key | `0x00` | field becomes the pending key | value |
//! | key | other | extend field | key |
//! | value | `0x00` | emit `(pending key, field)` | key |
//! | value | other | extend field | value |
//!
//! At end of input a non-empty field is flushed: as a bare key in the key
//! state, as a pair in the value state. An empty final field emits nothing.
//!
//! Because roles alternate blindly, only a flat sequence of text pairs
//! survives a round trip unchanged. `encode("a", 1, [2, 3])` decodes to
//! `("a", "1")`, `("2", "3")`.
//!
//! # Limitations
//!
//! - A raw-bytes leaf containing `0x00` splits into several fields and
//!   shifts the key/value roles of every field after it. Enable
//!   [`EncodeOptions::with_strict_fields`](crate::EncodeOptions::with_strict_fields)
//!   to reject such leaves at encode time.
//! - Fields that are not valid UTF-8 cannot be decoded.
//! - There is no header, version, length prefix or checksum.

/// The reserved byte that terminates every field.
pub const SEPARATOR: u8 = 0x00;
