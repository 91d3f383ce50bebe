//! The parsed JSON document tree.
//!
//! [`Value`] is the read-only tree the mapper consults. It is produced by
//! [`Document::parse`](crate::Document::parse) (through `serde_json`) or built
//! by hand with the [`value!`](crate::value) macro.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, number, string, array or object
//! - [`Number`]: a JSON number, kept as `i64`, `u64` or `f64`
//! - [`Kind`]: the JSON type of a value, as reported by
//!   [`Accessor::kind_of`](crate::Accessor::kind_of)
//!
//! ## Navigating
//!
//! ```rust
//! use tagmap::{value, Path, Value};
//!
//! let doc = value!({
//!     "user": { "tags": ["admin", "ops"] }
//! });
//!
//! let tag = doc.pointer(&Path::split("user.tags.1"));
//! assert_eq!(tag.and_then(Value::as_str), Some("ops"));
//! ```

use crate::{Map, Path};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A parsed JSON value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// A JSON number.
///
/// Integers are stored as [`Number::Int`] whenever they fit in an `i64`;
/// [`Number::Uint`] only holds values above `i64::MAX`. Anything written with a
/// fraction or exponent is a [`Number::Float`].
///
/// # Examples
///
/// ```rust
/// use tagmap::Number;
///
/// assert_eq!(Number::from(7u64), Number::Int(7));
/// assert_eq!(Number::from(u64::MAX), Number::Uint(u64::MAX));
/// assert_eq!(Number::Float(2.5).as_i64(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

/// The JSON type of a document value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    String,
    Number,
    Bool,
    Object,
    Array,
}

impl Kind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "bool",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Number {
    /// Returns the value as `i64` if it is an integer in range.
    ///
    /// Floats never convert, even when they have no fractional part.
    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Number::Int(i) if *i >= 0 => Some(*i as u64),
            Number::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// Converts any number to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Uint(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Number::Float(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Uint(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

macro_rules! number_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Int(value as i64)
                }
            }
        )*
    };
}

number_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Number::Uint(value), Number::Int)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// The JSON type of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Follows `path` from this value.
    ///
    /// Object segments are keys. Inside an array a segment that parses as an
    /// index selects that element. An empty path returns `self`.
    #[must_use]
    pub fn pointer(&self, path: &Path) -> Option<&Value> {
        path.iter().try_fold(self, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        })
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(Number::as_u64)
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Renders the value as compact JSON text.
///
/// ```rust
/// use tagmap::value;
///
/// let doc = value!({ "at": [20030102, "x", null] });
/// assert_eq!(doc.to_string(), r#"{"at":[20030102,"x",null]}"#);
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{}", value)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quoted = serde_json::to_string(text).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Int(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_number {
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

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_numbers_keep_their_shape() {
        let doc = parse(r#"{"a": 1, "b": -1, "c": 18446744073709551615, "d": 1.0}"#);
        let obj = doc.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Number(Number::Int(1))));
        assert_eq!(obj.get("b"), Some(&Value::Number(Number::Int(-1))));
        assert_eq!(
            obj.get("c"),
            Some(&Value::Number(Number::Uint(u64::MAX)))
        );
        assert_eq!(obj.get("d"), Some(&Value::Number(Number::Float(1.0))));
    }

    #[test]
    fn test_number_coercions() {
        assert_eq!(Number::Int(-3).as_u64(), None);
        assert_eq!(Number::Int(3).as_u64(), Some(3));
        assert_eq!(Number::Uint(u64::MAX).as_i64(), None);
        assert_eq!(Number::Float(3.0).as_i64(), None);
        assert_eq!(Number::Int(3).as_f64(), 3.0);
    }

    #[test]
    fn test_pointer_through_objects_and_arrays() {
        let doc = parse(r#"{"a": {"b": [10, {"c": true}]}, "": "blank"}"#);
        assert_eq!(
            doc.pointer(&Path::split("a.b.0")),
            Some(&Value::Number(Number::Int(10)))
        );
        assert_eq!(
            doc.pointer(&Path::split("a.b.1.c")),
            Some(&Value::Bool(true))
        );
        assert_eq!(doc.pointer(&Path::split("a.b.2")), None);
        assert_eq!(doc.pointer(&Path::split("a.b.x")), None);
        assert_eq!(doc.pointer(&Path::split("a.b.-1")), None);
        assert_eq!(doc.pointer(&Path::split("")).and_then(Value::as_str), Some("blank"));
        assert_eq!(doc.pointer(&Path::root()), Some(&doc));
    }

    #[test]
    fn test_scalar_does_not_descend() {
        let doc = parse(r#"{"a": "text"}"#);
        assert_eq!(doc.pointer(&Path::split("a.b")), None);
    }

    #[test]
    fn test_display_matches_serde_json() {
        let text = r#"{"b":true,"n":[1,-2,2.5,1.0,18446744073709551615],"o":{},"s":"a \"q\"","z":null}"#;
        let ours = parse(text);
        let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(ours.to_string(), theirs.to_string());
        assert_eq!(ours.to_string(), text);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::from(1).kind(), Kind::Number);
        assert_eq!(Value::from(false).kind(), Kind::Bool);
        assert_eq!(Value::Array(vec![]).kind(), Kind::Array);
        assert_eq!(Value::Object(Map::new()).kind(), Kind::Object);
    }
}
