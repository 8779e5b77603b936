//! Dynamic value representation for encodable data.
//!
//! This module provides the [`Value`] enum, the closed set of shapes the
//! encoder knows how to flatten, and [`Number`], its numeric leaf.
//!
//! ## Core Types
//!
//! - [`Value`]: text, numbers, raw bytes, arrays and maps (plus `Null` and
//!   `Bool`, which can be represented but not encoded)
//! - [`Number`]: integers, big integers and floats, rendered in canonical
//!   decimal form
//!
//! ## Creating Values
//!
//! ```rust
//! use nulfield::{value, Value};
//!
//! let text = Value::from("hello");
//! let number = Value::from(42);
//! let raw = Value::from(&b"\x01\x02"[..]);
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_map());
//! ```
//!
//! ## Canonical Numbers
//!
//! Integers and floats stay distinct all the way to the wire:
//!
//! ```rust
//! use nulfield::Number;
//!
//! assert_eq!(Number::from(42).to_string(), "42");
//! assert_eq!(Number::from(42.0).to_string(), "42.0");
//! assert_eq!(Number::from(1e16).to_string(), "1e+16");
//! ```

use crate::ValueMap;
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed value that can be handed to the encoder.
///
/// `Text`, `Number` and `Bytes` are leaves; `Array` and `Map` are expanded
/// depth-first. `Null` and `Bool` have no field form and are rejected by the
/// encoder with [`Error::UnsupportedType`](crate::Error::UnsupportedType).
///
/// Sets and tuples are represented as `Array` in their iteration order.
///
/// # Examples
///
/// ```rust
/// use nulfield::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::Text("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_text());
/// assert!(Value::Null.is_null());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(ValueMap),
}

/// A numeric leaf.
///
/// Integers that do not fit in `i64` are kept as [`BigInt`] so that their
/// exact decimal form survives encoding.
///
/// Equality is structural: `Integer(1)` and `Float(1.0)` are different
/// values, and floats compare by bit pattern so that `Number` can be a map
/// key.
///
/// # Examples
///
/// ```rust
/// use nulfield::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Float(3.5).as_f64(), 3.5);
/// assert_ne!(Number::Integer(1), Number::Float(1.0));
/// ```
#[derive(Clone, Debug)]
pub enum Number {
    Integer(i64),
    BigInt(BigInt),
    Float(f64),
}

impl Number {
    /// Returns `true` for `Integer` and `BigInt`.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::BigInt(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns the value as `i64` when it is an integer in range.
    ///
    /// Floats are never converted, even whole ones.
    ///
    /// ```rust
    /// use nulfield::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::BigInt(bi) => i64::try_from(bi).ok(),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64`, possibly losing precision.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::BigInt(bi) => bi.to_f64().unwrap_or(match bi.sign() {
                Sign::Minus => f64::NEG_INFINITY,
                _ => f64::INFINITY,
            }),
            Number::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::BigInt(a), Number::BigInt(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Number::Integer(i) => i.hash(state),
            Number::BigInt(bi) => bi.hash(state),
            Number::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::BigInt(bi) => write!(f, "{}", bi),
            Number::Float(fl) => write_float(f, *fl),
        }
    }
}

/// Writes the shortest round-trip form of `v`.
///
/// Positional notation is used for decimal exponents in `-4..16` and always
/// carries a fractional part; anything else uses a signed two-digit-minimum
/// exponent.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }
    if v == 0.0 {
        return f.write_str(if v.is_sign_negative() { "-0.0" } else { "0.0" });
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "-1.25e-7".
    let sci = format!("{:e}", v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return Err(fmt::Error);
    };
    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    f.write_str(sign)?;
    if (-4..16).contains(&exp) {
        if exp < 0 {
            f.write_str("0.")?;
            for _ in 0..(-exp - 1) {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        } else {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                f.write_str(&digits)?;
                for _ in digits.len()..int_len {
                    f.write_str("0")?;
                }
                f.write_str(".0")
            } else {
                write!(f, "{}.{}", &digits[..int_len], &digits[int_len..])
            }
        }
    } else {
        f.write_str(&digits[..1])?;
        if digits.len() > 1 {
            write!(f, ".{}", &digits[1..])?;
        }
        let exp_sign = if exp < 0 { '-' } else { '+' };
        write!(f, "e{}{:02}", exp_sign, exp.unsigned_abs())
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<u128> for Number {
    fn from(value: u128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(BigInt::from(value)),
        }
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInt(value),
        }
    }
}

impl From<f32> for Number {
    /// Keeps the `f32`'s own shortest digits, so `0.1f32` renders as `0.1`
    /// rather than the digits of its exact binary value.
    fn from(value: f32) -> Self {
        if !value.is_finite() {
            return Number::Float(f64::from(value));
        }
        Number::Float(value.to_string().parse().unwrap_or(f64::from(value)))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns the lowercase name of this value's kind, as used in error messages.
    ///
    /// ```rust
    /// use nulfield::Value;
    ///
    /// assert_eq!(Value::Null.kind(), "null");
    /// assert_eq!(Value::from("x").kind(), "text");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Returns `true` for the leaf kinds: text, number and bytes.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Value::Text(_) | Value::Number(_) | Value::Bytes(_))
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is text.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if the value is a raw byte string.
    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is text, returns a reference to it. Otherwise returns `None`.
    ///
    /// ```rust
    /// use nulfield::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer in `i64` range, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a raw byte string, returns it.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a map, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Map(map) => {
                write!(
                    f,
                    "{{{}}}",
                    map.iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::BigInt(bi)) => serializer.collect_str(bi),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

// TryFrom implementations for extracting leaves from a Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value.as_i64() {
            Some(i) => Ok(i),
            None => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected text, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bytes, found {}",
                value.kind()
            ))),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64, BigInt);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(value: &[u8; N]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Map(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_integer_rendering() {
        assert_eq!(Number::from(0).to_string(), "0");
        assert_eq!(Number::from(42).to_string(), "42");
        assert_eq!(Number::from(-7i64).to_string(), "-7");
        assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(
            Number::from(i128::MIN).to_string(),
            "-170141183460469231731687303715884105728"
        );
    }

    #[test]
    fn test_float_rendering_positional() {
        assert_eq!(Number::from(3.0).to_string(), "3.0");
        assert_eq!(Number::from(42.0).to_string(), "42.0");
        assert_eq!(Number::from(3.5).to_string(), "3.5");
        assert_eq!(Number::from(-2.25).to_string(), "-2.25");
        assert_eq!(Number::from(0.1).to_string(), "0.1");
        assert_eq!(Number::from(0.0001).to_string(), "0.0001");
        assert_eq!(Number::from(123.456).to_string(), "123.456");
        assert_eq!(Number::from(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Number::from(0.0).to_string(), "0.0");
        assert_eq!(Number::from(-0.0).to_string(), "-0.0");
    }

    #[test]
    fn test_float_rendering_scientific() {
        assert_eq!(Number::from(1e16).to_string(), "1e+16");
        assert_eq!(Number::from(0.00001).to_string(), "1e-05");
        assert_eq!(Number::from(1.5e-7).to_string(), "1.5e-07");
        assert_eq!(Number::from(-2.5e20).to_string(), "-2.5e+20");
        assert_eq!(Number::from(1.5e300).to_string(), "1.5e+300");
        assert_eq!(
            Number::from(123456789012345678.0).to_string(),
            "1.2345678901234568e+17"
        );
    }

    #[test]
    fn test_float_rendering_special() {
        assert_eq!(Number::from(f64::INFINITY).to_string(), "inf");
        assert_eq!(Number::from(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Number::from(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn test_f32_keeps_its_own_digits() {
        assert_eq!(Number::from(0.5f32).to_string(), "0.5");
        assert_eq!(Number::from(0.1f32).to_string(), "0.1");
        assert_eq!(Number::from(-3.3f32).to_string(), "-3.3");
        assert_eq!(Number::from(16777216.0f32).to_string(), "16777216.0");
        assert_eq!(Number::from(1e30f32).to_string(), "1e+30");
        assert_eq!(Value::from(0.1f32), Value::from(0.1f64));
        assert_eq!(Number::from(f32::NEG_INFINITY).to_string(), "-inf");
        assert!(Number::from(f32::NAN).as_f64().is_nan());
    }

    #[test]
    fn test_bigint_as_f64() {
        let big = Number::from(BigInt::from(u64::MAX) * 4u32);
        assert_eq!(big.as_f64(), 2f64.powi(66));
        let negative = Number::from(-BigInt::from(u64::MAX) * 2u32);
        assert_eq!(negative.as_f64(), -2f64.powi(65));
    }

    #[test]
    fn test_integer_and_float_are_distinct() {
        assert_ne!(Number::Integer(42), Number::Float(42.0));
        assert_ne!(Value::from(42), Value::from(42.0));
    }

    #[test]
    fn test_float_equality_by_bits() {
        assert_eq!(Number::Float(f64::NAN), Number::Float(f64::NAN));
        assert_ne!(Number::Float(0.0), Number::Float(-0.0));
        assert_eq!(
            hash_of(&Number::Float(1.5)),
            hash_of(&Number::Float(1.5))
        );
    }

    #[test]
    fn test_bigint_normalizes_small_values() {
        assert_eq!(Number::from(BigInt::from(5)), Number::Integer(5));
        assert!(matches!(Number::from(u64::MAX), Number::BigInt(_)));
        assert_eq!(Number::from(u64::MAX).as_i64(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Bool(true).kind(), "bool");
        assert_eq!(Value::from(1).kind(), "number");
        assert_eq!(Value::from("a").kind(), "text");
        assert_eq!(Value::from(vec![1u8, 2]).kind(), "bytes");
        assert_eq!(Value::Array(vec![]).kind(), "array");
        assert_eq!(Value::Map(ValueMap::new()).kind(), "map");
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert!(i64::try_from(Value::from(42.0)).is_err());
        assert_eq!(f64::try_from(Value::from(42)).unwrap(), 42.0);
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(String::try_from(Value::from(1)).is_err());
        assert_eq!(Vec::<u8>::try_from(Value::from(b"ab")).unwrap(), b"ab");
    }

    #[test]
    fn test_display() {
        let mut map = ValueMap::new();
        map.insert(Value::from("k"), Value::from(vec![Value::from(1), Value::from(2.0)]));
        assert_eq!(Value::Map(map).to_string(), "{k: [1, 2.0]}");
        assert_eq!(Value::from(b"a\0").to_string(), "b\"a\\x00\"");
    }

    #[test]
    fn test_serialize_to_json() {
        let mut map = ValueMap::new();
        map.insert(Value::from("id"), Value::from(7));
        map.insert(Value::from("tags"), Value::from(vec![Value::from("x")]));
        let json = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(json, r#"{"id":7,"tags":["x"]}"#);
    }
}
