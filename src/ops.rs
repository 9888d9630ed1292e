//! Container query operators.
//!
//! These follow the null-versus-error discipline of the data model:
//! lookup *misses* (absent key, out-of-range index) produce null, while
//! operand *kind* violations (indexing with a string, membership against
//! a non-list) are hard errors. Null operands propagate as null results
//! wherever the operator tolerates them.

use crate::cmp;
use crate::error::{Error, Result};
use crate::Value;

/// Chained property and index access.
///
/// The container is unwrapped first if it is a standalone vertex or
/// edge: access applies to the entity's `properties` bag, not to the
/// entity envelope. Each key then steps one level: string keys index
/// objects (case-sensitively), integer keys index arrays with negative
/// wraparound. A null key or a miss at any step yields null; a
/// wrongly-typed key is an error.
///
/// # Examples
///
/// ```rust
/// use graphval::{access, from_str, Value};
///
/// let v = from_str("{\"a\": [10, 20, 30]}").unwrap();
/// assert_eq!(
///     access(&v, &[Value::from("a"), Value::from(-1)]).unwrap(),
///     Value::Integer(30),
/// );
/// assert_eq!(access(&v, &[Value::from("missing")]).unwrap(), Value::Null);
/// ```
pub fn access(container: &Value, keys: &[Value]) -> Result<Value> {
    let mut current = entity_properties(container)?;
    for key in keys {
        let key = match key.as_scalar() {
            Some(Value::Null) => return Ok(Value::Null),
            Some(scalar) => scalar,
            None => {
                return Err(Error::type_mismatch(
                    "key must resolve to a scalar value",
                ))
            }
        };
        match current {
            Value::Object(map) => {
                let name = match key {
                    Value::String(s) => s,
                    other => {
                        return Err(Error::type_mismatch(format!(
                            "{} is not a valid key type",
                            other.kind()
                        )))
                    }
                };
                match map.get(name) {
                    Some(next) => current = next,
                    None => return Ok(Value::Null),
                }
            }
            Value::Array(arr) if !arr.is_raw_scalar() => {
                let index = match key {
                    Value::Integer(i) => *i,
                    _ => {
                        return Err(Error::type_mismatch(
                            "array index must resolve to an integer value",
                        ))
                    }
                };
                match resolve_index(index, arr.len()) {
                    Some(i) => current = &arr.as_slice()[i],
                    None => return Ok(Value::Null),
                }
            }
            _ => {
                return Err(Error::type_mismatch(
                    "container must be an array or object",
                ))
            }
        }
    }
    Ok(current.clone())
}

/// Steps into a standalone entity's property bag; plain containers pass
/// through untouched.
fn entity_properties(container: &Value) -> Result<&Value> {
    match container.as_scalar() {
        Some(Value::Vertex(map)) | Some(Value::Edge(map)) => map
            .get_ignore_case("properties")
            .ok_or_else(|| Error::structural("entity is missing its properties pair")),
        Some(_) => Err(Error::type_mismatch(
            "container must be an array or object",
        )),
        None => Ok(container),
    }
}

/// Negative indices wrap from the end; anything still out of range is a
/// miss.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let wrapped = if index < 0 { index + len } else { index };
    if wrapped < 0 || wrapped >= len {
        None
    } else {
        Some(wrapped as usize)
    }
}

/// Extracts a sub-list by half-open `[lower, upper)` bounds.
///
/// Bounds clamp to the list instead of erroring: out-of-range and
/// inverted ranges produce short or empty lists. A null bound means
/// "from the start" or "to the end"; both bounds null (or absent) is an
/// error. Negative bounds wrap from the end.
///
/// # Examples
///
/// ```rust
/// use graphval::{from_str, slice, Value};
///
/// let list = from_str("[0, 1, 2, 3]").unwrap();
/// let out = slice(&list, Some(&Value::from(1)), Some(&Value::from(99))).unwrap();
/// assert_eq!(graphval::to_string(&out).unwrap(), "[1, 2, 3]");
/// ```
pub fn slice(list: &Value, lower: Option<&Value>, upper: Option<&Value>) -> Result<Value> {
    let arr = match list {
        Value::Array(arr) if !arr.is_raw_scalar() => arr,
        _ => return Err(Error::type_mismatch("slice must access a list")),
    };
    let lower = slice_bound(lower)?;
    let upper = slice_bound(upper)?;
    if lower.is_none() && upper.is_none() {
        return Err(Error::type_mismatch("slice start and/or end is required"));
    }
    let len = arr.len() as i64;
    let start = clamp_bound(lower.unwrap_or(0), len);
    let end = clamp_bound(upper.unwrap_or(len), len);
    let elems = if start < end {
        arr.as_slice()[start as usize..end as usize].to_vec()
    } else {
        Vec::new()
    };
    Ok(Value::from(elems))
}

/// A missing or null bound defaults; any other non-integer is an error.
fn slice_bound(bound: Option<&Value>) -> Result<Option<i64>> {
    match bound {
        None => Ok(None),
        Some(value) => match value.as_scalar() {
            Some(Value::Null) => Ok(None),
            Some(Value::Integer(i)) => Ok(Some(*i)),
            _ => Err(Error::type_mismatch(
                "array slices must resolve to an integer value",
            )),
        },
    }
}

fn clamp_bound(bound: i64, len: i64) -> i64 {
    let wrapped = if bound < 0 { bound + len } else { bound };
    wrapped.clamp(0, len)
}

/// List membership with three-valued null semantics.
///
/// A null probe or a null list yields null; a non-list right-hand side
/// is an error. Scalars only match elements carrying the same tag, so
/// `2` is not in `[2.0]`; containers match by structural equality.
///
/// # Examples
///
/// ```rust
/// use graphval::{from_str, in_list, Value};
///
/// let list = from_str("[1, 2, 3]").unwrap();
/// assert_eq!(in_list(&Value::from(2), &list).unwrap(), Value::Bool(true));
/// assert_eq!(in_list(&Value::from(2.0), &list).unwrap(), Value::Bool(false));
/// assert_eq!(in_list(&Value::Null, &list).unwrap(), Value::Null);
/// ```
pub fn in_list(probe: &Value, list: &Value) -> Result<Value> {
    if matches!(probe.as_scalar(), Some(Value::Null)) {
        return Ok(Value::Null);
    }
    let arr = match list {
        Value::Array(arr) if !arr.is_raw_scalar() => arr,
        other => {
            if matches!(other.as_scalar(), Some(Value::Null)) {
                return Ok(Value::Null);
            }
            return Err(Error::type_mismatch("object of IN must be a list"));
        }
    };
    let probe = probe.as_scalar().unwrap_or(probe);
    for elem in arr.iter() {
        let matched = match (probe.is_scalar(), elem.is_scalar()) {
            (true, true) => {
                same_scalar_tag(probe, elem) && cmp::equal(probe, elem)
            }
            (false, false) => cmp::equal(probe, elem),
            _ => false,
        };
        if matched {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn same_scalar_tag(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

/// `true` when the left string begins with the right string. Both
/// operands must be strings.
pub fn starts_with(value: &Value, prefix: &Value) -> Result<Value> {
    let (v, p) = string_pair(value, prefix)?;
    if v.len() < p.len() {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(v.as_bytes().starts_with(p.as_bytes())))
}

/// `true` when the left string ends with the right string.
pub fn ends_with(value: &Value, suffix: &Value) -> Result<Value> {
    let (v, s) = string_pair(value, suffix)?;
    if v.len() < s.len() {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(v.as_bytes().ends_with(s.as_bytes())))
}

/// `true` when the left string contains the right string anywhere.
pub fn contains(value: &Value, needle: &Value) -> Result<Value> {
    let (v, n) = string_pair(value, needle)?;
    if v.len() < n.len() {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(v.contains(n)))
}

fn string_pair<'a>(a: &'a Value, b: &'a Value) -> Result<(&'a str, &'a str)> {
    let a = a.as_scalar().and_then(Value::as_str);
    let b = b.as_scalar().and_then(Value::as_str);
    match (a, b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(Error::type_mismatch(
            "string match operands must resolve to string values",
        )),
    }
}

/// The first element of a list; null when the list is empty.
pub fn head(list: &Value) -> Result<Value> {
    match list {
        Value::Array(arr) if !arr.is_raw_scalar() => {
            Ok(arr.get(0).cloned().unwrap_or(Value::Null))
        }
        other if matches!(other.as_scalar(), Some(Value::Null)) => Ok(Value::Null),
        _ => Err(Error::type_mismatch(
            "head() argument must resolve to a list or null",
        )),
    }
}

/// The last element of a list; null when the list is empty.
pub fn last(list: &Value) -> Result<Value> {
    match list {
        Value::Array(arr) if !arr.is_raw_scalar() => Ok(arr
            .len()
            .checked_sub(1)
            .and_then(|i| arr.get(i))
            .cloned()
            .unwrap_or(Value::Null)),
        other if matches!(other.as_scalar(), Some(Value::Null)) => Ok(Value::Null),
        _ => Err(Error::type_mismatch(
            "last() argument must resolve to a list or null",
        )),
    }
}

/// Element count of a list, or byte length of a string.
pub fn size(value: &Value) -> Result<Value> {
    match value {
        Value::Array(arr) if !arr.is_raw_scalar() => Ok(Value::Integer(arr.len() as i64)),
        other => match other.as_scalar() {
            Some(Value::Null) => Ok(Value::Null),
            Some(Value::String(s)) => Ok(Value::Integer(s.len() as i64)),
            _ => Err(Error::type_mismatch(
                "size() unsupported argument, must be a string or list",
            )),
        },
    }
}
