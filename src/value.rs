//! Dynamic value representation for graph value trees.
//!
//! This module provides the [`Value`] enum, a superset of the JSON data
//! model extended with graph-domain types: arbitrary-precision numerics
//! and first-class vertex, edge and path values layered on top of plain
//! objects and arrays.
//!
//! ## Core Types
//!
//! - [`Value`]: any graph value (null, bool, integer, float, numeric,
//!   string, array, object, vertex, edge, path)
//! - [`Array`]: an ordered element sequence, with a flag marking the
//!   raw-scalar wrapper used for standalone scalars
//!
//! ## Usage Patterns
//!
//! ```rust
//! use graphval::Value;
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! assert!(number.is_integer());
//! assert_eq!(number.as_i64(), Some(42));
//! assert_eq!(text.as_str(), Some("hello"));
//! ```
//!
//! A `Vertex`, `Edge` or `Path` is not a separate container shape: it is
//! an object or array whose kind has been re-tagged after structural
//! validation, either by a `::vertex`-style annotation in input text or by
//! one of the constructors in [`crate::construct`].

use crate::Map;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered sequence of values.
///
/// Every standalone scalar is represented internally as a single-element
/// `Array` flagged `raw_scalar`, which keeps the container format uniform
/// (always array-or-object at the root) while the logical type stays
/// scalar. The flag is a representation detail, not a one-element list:
/// query operators reduce through it transparently and the serializer
/// emits no brackets for it.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Array {
    elems: Vec<Value>,
    raw_scalar: bool,
}

impl Array {
    /// Creates a plain (non-wrapper) array from the given elements.
    #[must_use]
    pub fn new(elems: Vec<Value>) -> Self {
        Array {
            elems,
            raw_scalar: false,
        }
    }

    /// Creates the raw-scalar wrapper around a single scalar value.
    #[must_use]
    pub fn raw_scalar(value: Value) -> Self {
        Array {
            elems: vec![value],
            raw_scalar: true,
        }
    }

    /// Returns `true` if this array is the raw-scalar wrapper.
    #[inline]
    #[must_use]
    pub const fn is_raw_scalar(&self) -> bool {
        self.raw_scalar
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns `true` if the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.elems
    }

    /// Returns the element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elems.get(index)
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elems.iter()
    }

    /// Consumes the array, returning its elements.
    #[must_use]
    pub fn into_elems(self) -> Vec<Value> {
        self.elems
    }
}

impl From<Vec<Value>> for Array {
    fn from(elems: Vec<Value>) -> Self {
        Array::new(elems)
    }
}

/// A dynamically-typed representation of any graph value.
///
/// `Vertex` and `Edge` reuse the object payload shape ([`Map`]), `Path`
/// reuses the array payload shape; they are distinguished only by their
/// tag, stamped by the typecast annotator after shape validation.
///
/// # Examples
///
/// ```rust
/// use graphval::Value;
///
/// let v: Value = graphval::from_str(
///     "{\"id\": 5, \"label\": \"Person\", \"properties\": {}}::vertex",
/// ).unwrap();
/// assert!(v.as_scalar().unwrap().is_vertex());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Numeric(BigDecimal),
    String(String),
    Array(Array),
    Object(Map),
    Vertex(Map),
    Edge(Map),
    Path(Vec<Value>),
}

impl Value {
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

    /// Returns `true` if the value is a 64-bit integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is an arbitrary-precision numeric.
    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Value::Numeric(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array (plain or raw-scalar
    /// wrapper).
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if the value is a vertex.
    #[inline]
    #[must_use]
    pub const fn is_vertex(&self) -> bool {
        matches!(self, Value::Vertex(_))
    }

    /// Returns `true` if the value is an edge.
    #[inline]
    #[must_use]
    pub const fn is_edge(&self) -> bool {
        matches!(self, Value::Edge(_))
    }

    /// Returns `true` if the value is a path.
    #[inline]
    #[must_use]
    pub const fn is_path(&self) -> bool {
        matches!(self, Value::Path(_))
    }

    /// Returns `true` if the value is a scalar.
    ///
    /// Everything except a plain object and a non-wrapper array counts as
    /// a scalar; in particular vertices, edges and paths are scalars, which
    /// is why a standalone entity is stored raw-scalar wrapped.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        match self {
            Value::Object(_) => false,
            Value::Array(a) => a.is_raw_scalar(),
            _ => true,
        }
    }

    /// Reduces a value to its scalar form.
    ///
    /// Unwraps a raw-scalar array to its single element and returns plain
    /// scalars as-is. Plain objects and arrays yield `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graphval::{Array, Value};
    ///
    /// let wrapped = Value::Array(Array::raw_scalar(Value::from(7)));
    /// assert_eq!(wrapped.as_scalar(), Some(&Value::Integer(7)));
    /// assert_eq!(Value::from(vec![Value::Null]).as_scalar(), None);
    /// ```
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Value::Object(_) => None,
            Value::Array(a) if a.is_raw_scalar() => a.get(0),
            Value::Array(_) => None,
            other => Some(other),
        }
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

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a numeric, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_numeric(&self) -> Option<&BigDecimal> {
        match self {
            Value::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to its pairs.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// If the value is a vertex or an edge, returns its underlying pairs.
    #[inline]
    #[must_use]
    pub fn as_entity(&self) -> Option<&Map> {
        match self {
            Value::Vertex(m) | Value::Edge(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the name of this value's kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Numeric(_) => "numeric",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Vertex(_) => "vertex",
            Value::Edge(_) => "edge",
            Value::Path(_) => "path",
        }
    }
}

impl fmt::Display for Value {
    /// Renders the canonical text form, identical to [`crate::to_string`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = crate::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

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

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Numeric(value)
    }
}

/// Integers wider than 64 bits map to the arbitrary-precision numeric
/// variant, the same promotion the `::numeric` annotation performs for
/// oversized integer literals.
impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Numeric(BigDecimal::from(value))
    }
}

/// Temporal host values carry no dedicated variant; they are stringified
/// to RFC 3339, the host "categorize and stringify" mapping for date/time.
impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::String(value.to_rfc3339())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::new(value))
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Numeric(n) => serializer.serialize_str(&n.to_string()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                // The raw-scalar wrapper is a representation detail, so it
                // surfaces in the serde data model as its single element.
                if arr.is_raw_scalar() {
                    return arr.as_slice()[0].serialize(serializer);
                }
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Path(elems) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(elems.len()))?;
                for element in elems {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) | Value::Vertex(obj) | Value::Edge(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid graph value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Integer(value as i64))
                } else {
                    Ok(Value::Numeric(BigDecimal::from(value)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(Array::new(vec)))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Integer(42));
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from(3.5f64), Value::Float(3.5));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
    }

    #[test]
    fn from_bigint_promotes_to_numeric() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let value = Value::from(big);
        assert!(value.is_numeric());
        assert_eq!(
            value.as_numeric().unwrap().to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn from_datetime_stringifies() {
        use chrono::TimeZone;
        let dt = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let value = Value::from(dt);
        assert_eq!(value.as_str(), Some("2020-01-02T03:04:05+00:00"));
    }

    #[test]
    fn scalar_reduction() {
        let wrapped = Value::Array(Array::raw_scalar(Value::from("x")));
        assert!(wrapped.is_scalar());
        assert_eq!(wrapped.as_scalar().and_then(|v| v.as_str()), Some("x"));

        let list = Value::from(vec![Value::from(1)]);
        assert!(!list.is_scalar());
        assert!(list.as_scalar().is_none());
    }

    #[test]
    fn entities_are_scalars() {
        let vertex = crate::construct::build_vertex(1, "Person", None).unwrap();
        assert!(vertex.as_scalar().unwrap().is_vertex());
    }

    #[test]
    fn serde_roundtrip_through_json() {
        let json = serde_json::json!({"a": [1, 2.5, "x", null, true]});
        let value = Value::deserialize(json).unwrap();
        let obj = value.as_object().unwrap();
        let arr = obj.get("a").unwrap().as_array().unwrap();
        assert_eq!(arr.get(0), Some(&Value::Integer(1)));
        assert_eq!(arr.get(1), Some(&Value::Float(2.5)));
        assert_eq!(arr.get(2), Some(&Value::String("x".to_string())));
        assert_eq!(arr.get(3), Some(&Value::Null));
        assert_eq!(arr.get(4), Some(&Value::Bool(true)));
    }
}
