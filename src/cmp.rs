//! Total ordering over graph values.
//!
//! [`compare`] never fails and never panics: every pair of values has a
//! defined order, which is what sorting and membership need. Within the
//! numeric class (integer, float, numeric) values compare by magnitude
//! after canonicalizing to [`BigDecimal`], so `2`, `2.0` and
//! `2::numeric` are all equal here even though membership matching
//! keeps their tags distinct.
//!
//! Mixed kinds order by a fixed rank, ascending: null, then the numeric
//! class, booleans, strings, arrays, objects, with the entity kinds
//! above plain containers.

use bigdecimal::{BigDecimal, FromPrimitive};
use std::cmp::Ordering;

use crate::{Map, Value};

/// Compares two values under the total order.
///
/// # Examples
///
/// ```rust
/// use graphval::{compare, Value};
/// use std::cmp::Ordering;
///
/// assert_eq!(compare(&Value::from(2), &Value::from(2.0)), Ordering::Equal);
/// assert_eq!(compare(&Value::from(false), &Value::from(true)), Ordering::Less);
/// // Strings sort above booleans, regardless of content.
/// assert_eq!(compare(&Value::from("z"), &Value::from(true)), Ordering::Greater);
/// ```
#[must_use]
pub fn compare(a: &Value, b: &Value) -> Ordering {
    // Raw-scalar wrappers are representation, not order.
    let a = a.as_scalar().unwrap_or(a);
    let b = b.as_scalar().unwrap_or(b);

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        (x, y) if is_numeric_class(x) && is_numeric_class(y) => compare_numbers(x, y),
        (Value::Array(x), Value::Array(y)) => compare_slices(x.as_slice(), y.as_slice()),
        (Value::Path(x), Value::Path(y)) => compare_slices(x, y),
        (Value::Object(x), Value::Object(y))
        | (Value::Vertex(x), Value::Vertex(y))
        | (Value::Edge(x), Value::Edge(y)) => compare_maps(x, y),
        (x, y) => rank(x).cmp(&rank(y)),
    }
}

/// `true` when the two values compare equal.
#[must_use]
pub fn equal(a: &Value, b: &Value) -> bool {
    compare(a, b) == Ordering::Equal
}

fn is_numeric_class(value: &Value) -> bool {
    matches!(
        value,
        Value::Integer(_) | Value::Float(_) | Value::Numeric(_)
    )
}

/// Rank for cross-kind ordering, ascending. Equal ranks are only reached
/// for same-kind pairs that fell through the dedicated arms above.
fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Integer(_) | Value::Float(_) | Value::Numeric(_) => 1,
        Value::Bool(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
        Value::Path(_) => 6,
        Value::Edge(_) => 7,
        Value::Vertex(_) => 8,
    }
}

/// Canonical magnitude of a numeric-class value. NaN sorts above every
/// other number (and equal to itself) to keep the order total.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Magnitude {
    NegInfinity,
    Finite(BigDecimal),
    PosInfinity,
    Nan,
}

fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    magnitude(a).cmp(&magnitude(b))
}

fn magnitude(value: &Value) -> Magnitude {
    match value {
        Value::Integer(i) => Magnitude::Finite(BigDecimal::from(*i)),
        Value::Numeric(n) => Magnitude::Finite(n.clone()),
        Value::Float(f) if f.is_nan() => Magnitude::Nan,
        Value::Float(f) if *f == f64::INFINITY => Magnitude::PosInfinity,
        Value::Float(f) if *f == f64::NEG_INFINITY => Magnitude::NegInfinity,
        Value::Float(f) => BigDecimal::from_f64(*f)
            .map(Magnitude::Finite)
            .unwrap_or(Magnitude::Nan),
        _ => Magnitude::Nan,
    }
}

/// Containers order length-first, then element by element.
fn compare_slices(a: &[Value], b: &[Value]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        for (x, y) in a.iter().zip(b.iter()) {
            let ord = compare(x, y);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    })
}

/// Objects order as sorted-by-key pair sets: length first, then keys,
/// then values, so insertion order does not affect the result.
fn compare_maps(a: &Map, b: &Map) -> Ordering {
    let ord = a.len().cmp(&b.len());
    if ord != Ordering::Equal {
        return ord;
    }
    let mut left: Vec<_> = a.iter().collect();
    let mut right: Vec<_> = b.iter().collect();
    left.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
    right.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
    for ((k1, v1), (k2, v2)) in left.iter().zip(right.iter()) {
        let key_ord = k1.cmp(k2);
        if key_ord != Ordering::Equal {
            return key_ord;
        }
        let val_ord = compare(v1, v2);
        if val_ord != Ordering::Equal {
            return val_ord;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_str;

    fn v(text: &str) -> Value {
        from_str(text).unwrap()
    }

    #[test]
    fn numeric_class_compares_by_magnitude() {
        assert!(equal(&v("2"), &v("2.0")));
        assert!(equal(&v("2"), &v("2.00::numeric")));
        assert_eq!(compare(&v("2"), &v("2.5")), Ordering::Less);
        assert_eq!(compare(&v("3.14::numeric"), &v("3")), Ordering::Greater);
    }

    #[test]
    fn nan_sorts_above_numbers_and_equals_itself() {
        let nan = Value::from(f64::NAN);
        assert_eq!(compare(&nan, &Value::from(f64::INFINITY)), Ordering::Greater);
        assert_eq!(compare(&nan, &nan), Ordering::Equal);
        assert_eq!(compare(&Value::from(1e300), &nan), Ordering::Less);
    }

    #[test]
    fn cross_kind_rank() {
        assert_eq!(compare(&v("\"z\""), &v("true")), Ordering::Greater);
        assert_eq!(compare(&v("{}"), &v("[1, 2, 3]")), Ordering::Greater);
        assert_eq!(compare(&v("1"), &v("null")), Ordering::Greater);
        assert_eq!(compare(&v("false"), &v("\"\"")), Ordering::Less);
    }

    #[test]
    fn containers_compare_length_first() {
        assert_eq!(compare(&v("[9]"), &v("[1, 2]")), Ordering::Less);
        assert_eq!(compare(&v("[1, 2]"), &v("[1, 3]")), Ordering::Less);
        assert!(equal(&v("[1, [2]]"), &v("[1, [2]]")));
    }

    #[test]
    fn objects_compare_as_sorted_pair_sets() {
        assert!(equal(&v("{\"a\": 1, \"b\": 2}"), &v("{\"b\": 2, \"a\": 1}")));
        assert_eq!(
            compare(&v("{\"a\": 1}"), &v("{\"a\": 2}")),
            Ordering::Less
        );
        assert_eq!(
            compare(&v("{\"a\": 1}"), &v("{\"b\": 1}")),
            Ordering::Less
        );
    }

    #[test]
    fn wrappers_are_transparent() {
        // A finalized scalar and a bare scalar compare equal.
        assert!(equal(&v("7"), &Value::from(7)));
    }
}
