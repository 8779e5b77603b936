//! Field encoding.
//!
//! This module provides the [`Encoder`], which flattens [`Value`]s depth-first
//! into a byte buffer, and the [`ValueSerializer`], which turns any
//! `T: Serialize` into a [`Value`] first.
//!
//! ## Flattening Rules
//!
//! - **Text**: UTF-8 bytes
//! - **Number**: canonical decimal text (`42`, `42.0`, `1e+16`)
//! - **Bytes**: copied verbatim
//! - **Array**: each element in order
//! - **Map**: each key, then its value, in insertion order
//! - **Null / Bool**: rejected with [`Error::UnsupportedType`]
//!
//! Container boundaries leave no trace in the output: `[["a", "b"], "c"]`
//! and `["a", "b", "c"]` encode identically.
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use nulfield::{EncodeOptions, Encoder, Value};
//!
//! let mut encoder = Encoder::new(EncodeOptions::new());
//! encoder.encode_value(&Value::from("k")).unwrap();
//! encoder.encode_value(&Value::from(1.5)).unwrap();
//!
//! assert_eq!(encoder.leaf_count(), 2);
//! assert_eq!(encoder.into_inner().unwrap(), b"k\x001.5\x00");
//! ```

use crate::format::SEPARATOR;
use crate::{EncodeOptions, Error, FieldMode, Number, Result, Value, ValueMap};
use serde::{ser, Serialize};
use tracing::trace;

/// The field encoder.
///
/// Accumulates leaves into an owned buffer. Created via [`Encoder::new`].
///
/// The first failed [`encode_value`](Encoder::encode_value) poisons the
/// encoder: the partial buffer is discarded and every later call, including
/// [`into_inner`](Encoder::into_inner), returns that same error.
pub struct Encoder {
    output: Vec<u8>,
    options: EncodeOptions,
    leaves: usize,
    failed: Option<Error>,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Encoder {
            output: Vec::with_capacity(256),
            options,
            leaves: 0,
            failed: None,
        }
    }

    /// Number of leaves written so far.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Returns the encoded buffer.
    ///
    /// # Errors
    ///
    /// Returns the error that poisoned the encoder, if any.
    pub fn into_inner(self) -> Result<Vec<u8>> {
        match self.failed {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }

    /// Appends `value` to the buffer, expanding containers depth-first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for `Null` and `Bool` anywhere in
    /// the value, and [`Error::SeparatorInField`] for a leaf containing the
    /// separator when strict fields are enabled. Once an error has been
    /// returned the encoder is poisoned and keeps returning it.
    pub fn encode_value(&mut self, value: &Value) -> Result<()> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        let result = self.flatten(value);
        if let Err(err) = &result {
            self.output.clear();
            self.failed = Some(err.clone());
        }
        result
    }

    fn flatten(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Text(s) => self.write_leaf(s.as_bytes()),
            Value::Number(n) => self.write_number(n),
            Value::Bytes(b) => self.write_leaf(b),
            Value::Array(elements) => {
                for element in elements {
                    self.flatten(element)?;
                }
                Ok(())
            }
            Value::Map(map) => {
                for (key, value) in map {
                    self.flatten(key)?;
                    self.flatten(value)?;
                }
                Ok(())
            }
            Value::Null | Value::Bool(_) => Err(Error::unsupported_type(value.kind())),
        }
    }

    fn write_number(&mut self, n: &Number) -> Result<()> {
        let text = n.to_string();
        self.write_leaf(text.as_bytes())
    }

    fn write_leaf(&mut self, bytes: &[u8]) -> Result<()> {
        if self.options.strict_fields && bytes.contains(&SEPARATOR) {
            return Err(Error::SeparatorInField { index: self.leaves });
        }
        trace!(index = self.leaves, len = bytes.len(), "writing leaf");
        self.output.extend_from_slice(bytes);
        if self.options.field_mode == FieldMode::Delimited {
            self.output.push(SEPARATOR);
        }
        self.leaves += 1;
        Ok(())
    }
}

/// Serializer that builds a [`Value`] from any `T: Serialize`.
///
/// Byte slices become [`Value::Bytes`], sequences, tuples and sets become
/// [`Value::Array`], maps and structs become [`Value::Map`], and enum
/// variants carrying data become a single-entry map keyed by the variant
/// name.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: ValueMap,
    current_key: Option<Value>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let array = Value::Array(self.vec);
        match self.variant {
            Some(variant) => wrap_variant(variant, array),
            None => array,
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: ValueMap::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Value {
        let map = Value::Map(self.map);
        match self.variant {
            Some(variant) => wrap_variant(variant, map),
            None => map,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(Value::from(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(Value::from(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

fn wrap_variant(variant: &'static str, inner: Value) -> Value {
    let mut map = ValueMap::with_capacity(1);
    map.insert(Value::from(variant), inner);
    Value::Map(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;
    use serde::Serialize;
    use std::collections::BTreeSet;

    fn encode_all(values: &[Value], options: EncodeOptions) -> Result<Vec<u8>> {
        let mut encoder = Encoder::new(options);
        for value in values {
            encoder.encode_value(value)?;
        }
        encoder.into_inner()
    }

    #[test]
    fn test_leaves_are_delimited() {
        let out = encode_all(
            &[Value::from("a"), Value::from(1), Value::from(&b"\x01"[..])],
            EncodeOptions::new(),
        )
        .unwrap();
        assert_eq!(out, b"a\x001\x00\x01\x00");
    }

    #[test]
    fn test_concatenated_mode() {
        let out = encode_all(
            &[Value::from("a"), Value::from(1), value!([2, 3])],
            EncodeOptions::concatenated(),
        )
        .unwrap();
        assert_eq!(out, b"a123");
    }

    #[test]
    fn test_nesting_does_not_change_leaf_order() {
        let nested = encode_all(&[value!([["a", "b"], "c"])], EncodeOptions::new()).unwrap();
        let flat = encode_all(&[value!(["a", "b", "c"])], EncodeOptions::new()).unwrap();
        assert_eq!(nested, flat);
        assert_eq!(nested, b"a\0b\0c\0");
    }

    #[test]
    fn test_map_expands_key_then_value() {
        let out = encode_all(&[value!({"k1": "v1", "k2": [1, 2.0]})], EncodeOptions::new()).unwrap();
        assert_eq!(out, b"k1\0v1\0k2\x001\x002.0\0");
    }

    #[test]
    fn test_null_and_bool_are_rejected() {
        let err = encode_all(&[value!(["ok", null])], EncodeOptions::new()).unwrap_err();
        assert_eq!(err, Error::unsupported_type("null"));

        let err = encode_all(&[value!({"flag": true})], EncodeOptions::new()).unwrap_err();
        assert_eq!(err, Error::unsupported_type("bool"));
    }

    #[test]
    fn test_failed_encode_poisons_encoder() {
        let mut encoder = Encoder::new(EncodeOptions::new());
        encoder.encode_value(&Value::from("kept")).unwrap();
        let err = encoder.encode_value(&value!(["a", null])).unwrap_err();
        assert_eq!(err, Error::unsupported_type("null"));

        assert_eq!(encoder.encode_value(&Value::from("later")), Err(err.clone()));
        assert_eq!(encoder.into_inner(), Err(err));
    }

    #[test]
    fn test_strict_fields_reports_leaf_index() {
        let options = EncodeOptions::new().with_strict_fields(true);
        let err = encode_all(
            &[Value::from("a"), Value::from("b"), Value::from(&b"x\0y"[..])],
            options,
        )
        .unwrap_err();
        assert_eq!(err, Error::SeparatorInField { index: 2 });
    }

    #[test]
    fn test_lenient_fields_pass_separator_through() {
        let out = encode_all(&[Value::from(&b"x\0y"[..])], EncodeOptions::new()).unwrap();
        assert_eq!(out, b"x\0y\0");
    }

    #[test]
    fn test_empty_containers_produce_nothing() {
        let out = encode_all(&[value!([]), value!({})], EncodeOptions::new()).unwrap();
        assert!(out.is_empty());
    }

    #[derive(Serialize)]
    struct Record {
        id: u64,
        name: &'static str,
        #[serde(with = "serde_bytes_like")]
        blob: Vec<u8>,
    }

    mod serde_bytes_like {
        pub fn serialize<S: serde::Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
            s.serialize_bytes(v)
        }
    }

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Rect { w: u32, h: u32 },
        Pair(i8, i8),
    }

    #[test]
    fn test_value_serializer_struct() {
        let record = Record {
            id: u64::MAX,
            name: "n",
            blob: vec![0xff, 0x00],
        };
        let value = record.serialize(ValueSerializer).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(
            map.get(&Value::from("id")),
            Some(&Value::Number(Number::from(u64::MAX)))
        );
        assert_eq!(map.get(&Value::from("name")), Some(&Value::from("n")));
        assert_eq!(
            map.get(&Value::from("blob")),
            Some(&Value::Bytes(vec![0xff, 0x00]))
        );
    }

    #[test]
    fn test_value_serializer_enums() {
        assert_eq!(
            Shape::Point.serialize(ValueSerializer).unwrap(),
            Value::from("Point")
        );
        assert_eq!(
            Shape::Circle(1.5).serialize(ValueSerializer).unwrap(),
            value!({"Circle": 1.5})
        );
        assert_eq!(
            Shape::Rect { w: 2, h: 3 }.serialize(ValueSerializer).unwrap(),
            value!({"Rect": {"w": 2, "h": 3}})
        );
        assert_eq!(
            Shape::Pair(1, 2).serialize(ValueSerializer).unwrap(),
            value!({"Pair": [1, 2]})
        );
    }

    #[test]
    fn test_value_serializer_sets_and_options() {
        let set: BTreeSet<&str> = ["b", "a"].into_iter().collect();
        assert_eq!(set.serialize(ValueSerializer).unwrap(), value!(["a", "b"]));
        assert_eq!(None::<u8>.serialize(ValueSerializer).unwrap(), Value::Null);
        assert_eq!(Some(3u8).serialize(ValueSerializer).unwrap(), Value::from(3));
    }
}
