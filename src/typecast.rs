//! Typecast annotations and finalized-value casts.
//!
//! Graph entities reuse the object and array payloads: a `::vertex` or
//! `::edge` annotation re-tags an object in place after validating its
//! shape, and `::path` does the same for an array of alternating
//! entities. Validation never copies the payload; only the tag changes.
//!
//! The `cast_*` functions are the runtime counterparts: they convert
//! *finalized* values (numeric coercions, object-to-entity casts) and
//! propagate null operands as null results. Every cast returns a
//! finalized value in turn, raw-scalar wrapped the way [`crate::from_str`]
//! returns a bare scalar, so cast outputs compose with the operators and
//! the builder's `push_value` without special cases.

use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use std::str::FromStr;

use crate::builder::finalize_root;
use crate::error::{Error, Result};
use crate::{construct, Map, Value};

/// A `::numeric`, `::integer` or `::float` annotation on a scalar
/// literal. The parser applies these to the pending token text before
/// the scalar is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarAnnotation {
    Numeric,
    Integer,
    Float,
}

impl ScalarAnnotation {
    pub(crate) fn from_label(label: &str) -> Result<Self> {
        if label.eq_ignore_ascii_case("numeric") {
            Ok(ScalarAnnotation::Numeric)
        } else if label.eq_ignore_ascii_case("integer") {
            Ok(ScalarAnnotation::Integer)
        } else if label.eq_ignore_ascii_case("float") {
            Ok(ScalarAnnotation::Float)
        } else {
            Err(Error::structural("invalid annotation value for scalar"))
        }
    }
}

/// Validates and re-tags a completed container in place.
///
/// Objects accept `vertex` and `edge`; arrays accept `path`. Anything
/// else is a structural error with the offending shape named.
pub(crate) fn retag_container(value: &mut Value, label: &str) -> Result<()> {
    match value {
        Value::Object(map) => {
            if label.eq_ignore_ascii_case("vertex") {
                if !is_object_vertex(map) {
                    return Err(Error::structural("object is not a vertex"));
                }
                let map = std::mem::take(map);
                *value = Value::Vertex(map);
                Ok(())
            } else if label.eq_ignore_ascii_case("edge") {
                if !is_object_edge(map) {
                    return Err(Error::structural("object is not an edge"));
                }
                let map = std::mem::take(map);
                *value = Value::Edge(map);
                Ok(())
            } else {
                Err(Error::structural("invalid annotation value for object"))
            }
        }
        Value::Array(arr) if !arr.is_raw_scalar() => {
            if label.eq_ignore_ascii_case("path") {
                if !is_slice_path(arr.as_slice()) {
                    return Err(Error::structural("array is not a valid path"));
                }
                let elems = std::mem::take(arr).into_elems();
                *value = Value::Path(elems);
                Ok(())
            } else {
                Err(Error::structural("invalid annotation value for array"))
            }
        }
        _ => Err(Error::structural("unsupported type to annotate")),
    }
}

/// Three pairs, any order, keys matched ASCII case-insensitively:
/// integer id, string label, object properties.
fn is_object_vertex(map: &Map) -> bool {
    if map.len() != 3 {
        return false;
    }
    let mut id = false;
    let mut label = false;
    let mut properties = false;
    for (key, value) in map.iter() {
        if key.eq_ignore_ascii_case("id") {
            id = value.is_integer();
        } else if key.eq_ignore_ascii_case("label") {
            label = value.is_string();
        } else if key.eq_ignore_ascii_case("properties") {
            properties = value.is_object();
        } else {
            return false;
        }
    }
    id && label && properties
}

/// Five pairs: the vertex trio plus integer start_id and end_id.
fn is_object_edge(map: &Map) -> bool {
    if map.len() != 5 {
        return false;
    }
    let mut id = false;
    let mut start_id = false;
    let mut end_id = false;
    let mut label = false;
    let mut properties = false;
    for (key, value) in map.iter() {
        if key.eq_ignore_ascii_case("id") {
            id = value.is_integer();
        } else if key.eq_ignore_ascii_case("start_id") {
            start_id = value.is_integer();
        } else if key.eq_ignore_ascii_case("end_id") {
            end_id = value.is_integer();
        } else if key.eq_ignore_ascii_case("label") {
            label = value.is_string();
        } else if key.eq_ignore_ascii_case("properties") {
            properties = value.is_object();
        } else {
            return false;
        }
    }
    id && start_id && end_id && label && properties
}

/// Odd length of at least three, strictly alternating vertex, edge, ...,
/// vertex.
fn is_slice_path(elems: &[Value]) -> bool {
    if elems.len() < 3 || elems.len() % 2 == 0 {
        return false;
    }
    elems.iter().enumerate().all(|(i, elem)| {
        if i % 2 == 0 {
            elem.is_vertex()
        } else {
            elem.is_edge()
        }
    })
}

/// Reduces a cast operand to its scalar, or fails with the given message.
fn reduce_scalar<'a>(value: &'a Value, msg: &str) -> Result<&'a Value> {
    value
        .as_scalar()
        .ok_or_else(|| Error::type_mismatch(msg.to_string()))
}

/// Casts a finalized value to a numeric scalar.
///
/// Integers, floats and numerics convert exactly; strings are parsed.
/// Null propagates as null. The result is finalized.
///
/// # Examples
///
/// ```rust
/// use graphval::{cast_numeric, Value};
///
/// let n = cast_numeric(&Value::from(3)).unwrap();
/// assert!(n.as_scalar().unwrap().is_numeric());
/// ```
pub fn cast_numeric(value: &Value) -> Result<Value> {
    let scalar = reduce_scalar(value, "typecast argument must resolve to a scalar value")?;
    let bare = match scalar {
        Value::Null => Value::Null,
        Value::Integer(i) => Value::Numeric(BigDecimal::from(*i)),
        Value::Float(f) => BigDecimal::from_f64(*f)
            .map(Value::Numeric)
            .ok_or_else(|| Error::type_mismatch("cannot cast non-finite float to numeric"))?,
        Value::Numeric(n) => Value::Numeric(n.clone()),
        Value::String(s) => BigDecimal::from_str(s.trim())
            .map(Value::Numeric)
            .map_err(|_| Error::type_mismatch(format!("invalid input syntax for numeric: \"{s}\"")))?,
        other => {
            return Err(Error::type_mismatch(format!(
                "cannot cast {} to numeric",
                other.kind()
            )))
        }
    };
    Ok(finalize_root(bare))
}

/// Casts a finalized value to a float scalar.
///
/// Strings accept the usual decimal forms plus `NaN`, `Infinity` and
/// `-Infinity`. Null propagates as null. The result is finalized.
pub fn cast_float(value: &Value) -> Result<Value> {
    let scalar = reduce_scalar(value, "typecast argument must resolve to a scalar value")?;
    let bare = match scalar {
        Value::Null => Value::Null,
        Value::Integer(i) => Value::Float(*i as f64),
        Value::Float(f) => Value::Float(*f),
        Value::Numeric(n) => n
            .to_f64()
            .map(Value::Float)
            .ok_or_else(|| Error::type_mismatch("numeric value out of range for float"))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Error::type_mismatch(format!("invalid input syntax for float: \"{s}\"")))?,
        other => {
            return Err(Error::type_mismatch(format!(
                "cannot cast {} to float",
                other.kind()
            )))
        }
    };
    Ok(finalize_root(bare))
}

/// Casts a finalized object to a vertex.
///
/// The object must carry exactly an integer `id`, a string `label` and
/// an object `properties`, in any pair order. The result is rebuilt
/// through [`construct::build_vertex`] so it carries the canonical pair
/// order. Null propagates as null.
pub fn cast_vertex(value: &Value) -> Result<Value> {
    if matches!(value.as_scalar(), Some(Value::Null)) {
        return Ok(finalize_root(Value::Null));
    }
    let map = match value {
        Value::Object(map) => map,
        _ => {
            return Err(Error::type_mismatch(
                "vertex typecast argument must resolve to an object",
            ))
        }
    };
    if !is_object_vertex(map) {
        return Err(Error::structural("object is not a vertex"));
    }
    let id = entity_integer(map, "id");
    let label = entity_string(map, "label");
    let properties = entity_object(map, "properties");
    construct::build_vertex(id, &label, Some(properties))
}

/// Casts a finalized object to an edge. Same shape discipline as
/// [`cast_vertex`] with the two endpoint ids added.
pub fn cast_edge(value: &Value) -> Result<Value> {
    if matches!(value.as_scalar(), Some(Value::Null)) {
        return Ok(finalize_root(Value::Null));
    }
    let map = match value {
        Value::Object(map) => map,
        _ => {
            return Err(Error::type_mismatch(
                "edge typecast argument must resolve to an object",
            ))
        }
    };
    if !is_object_edge(map) {
        return Err(Error::structural("object is not an edge"));
    }
    let id = entity_integer(map, "id");
    let start_id = entity_integer(map, "start_id");
    let end_id = entity_integer(map, "end_id");
    let label = entity_string(map, "label");
    let properties = entity_object(map, "properties");
    construct::build_edge(id, start_id, end_id, &label, Some(properties))
}

/// Casts a finalized array to a path. Elements must already be vertices
/// and edges in strict alternation. Null propagates as null.
pub fn cast_path(value: &Value) -> Result<Value> {
    if matches!(value.as_scalar(), Some(Value::Null)) {
        return Ok(finalize_root(Value::Null));
    }
    let arr = match value {
        Value::Array(arr) if !arr.is_raw_scalar() => arr,
        _ => {
            return Err(Error::type_mismatch(
                "path typecast argument must resolve to a list",
            ))
        }
    };
    if !is_slice_path(arr.as_slice()) {
        return Err(Error::structural("array is not a valid path"));
    }
    Ok(crate::builder::finalize_root(Value::Path(
        arr.as_slice().to_vec(),
    )))
}

// Shape validation above guarantees these lookups; the fallbacks never
// fire on a validated map.

fn entity_integer(map: &Map, key: &str) -> i64 {
    match map.get_ignore_case(key) {
        Some(Value::Integer(i)) => *i,
        _ => 0,
    }
}

fn entity_string(map: &Map, key: &str) -> String {
    match map.get_ignore_case(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn entity_object(map: &Map, key: &str) -> Map {
    match map.get_ignore_case(key) {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    }
}
