//! Programmatic construction of finalized values.
//!
//! These are the host-facing counterparts of the text parser: maps and
//! lists from host data, plus the entity constructors. Everything routes
//! through the [`Builder`](crate::Builder) and the same annotation
//! validation as parsed input, so a constructed entity is
//! indistinguishable from a parsed one.

use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::{Map, Value};

/// Builds a finalized object from key/value pairs.
///
/// Duplicate keys collapse last-wins, as in parsed input.
///
/// # Examples
///
/// ```rust
/// use graphval::{construct, Value};
///
/// let map = construct::build_map(vec![
///     ("a".to_string(), Value::from(1)),
///     ("b".to_string(), Value::from("two")),
/// ]).unwrap();
/// assert_eq!(graphval::to_string(&map).unwrap(), "{\"a\": 1, \"b\": \"two\"}");
/// ```
pub fn build_map(pairs: Vec<(String, Value)>) -> Result<Value> {
    let mut builder = Builder::new();
    builder.begin_object()?;
    for (key, value) in pairs {
        builder.push_key(&key)?;
        builder.push_value(value)?;
    }
    builder.end_object()?;
    builder.finish()
}

/// Builds a finalized list from elements. Finalized scalars embed as
/// their bare scalar form.
pub fn build_list(items: Vec<Value>) -> Result<Value> {
    let mut builder = Builder::new();
    builder.begin_array()?;
    for item in items {
        builder.push_value(item)?;
    }
    builder.end_array()?;
    builder.finish()
}

/// Builds a finalized vertex.
///
/// `None` properties become an empty object. The result is validated and
/// tagged through the same path as a `::vertex` annotation.
///
/// # Examples
///
/// ```rust
/// use graphval::construct;
///
/// let vertex = construct::build_vertex(1, "Person", None).unwrap();
/// assert_eq!(
///     graphval::to_string(&vertex).unwrap(),
///     "{\"id\": 1, \"label\": \"Person\", \"properties\": {}}::vertex",
/// );
/// ```
pub fn build_vertex(id: i64, label: &str, properties: Option<Map>) -> Result<Value> {
    let mut builder = Builder::new();
    builder.begin_object()?;
    builder.push_key("id")?;
    builder.push_value(Value::Integer(id))?;
    builder.push_key("label")?;
    builder.push_value(Value::from(label))?;
    builder.push_key("properties")?;
    builder.push_value(Value::Object(properties.unwrap_or_default()))?;
    builder.end_object()?;
    builder.annotate("vertex")?;
    builder.finish()
}

/// Builds a finalized edge connecting `start_id` to `end_id`.
pub fn build_edge(
    id: i64,
    start_id: i64,
    end_id: i64,
    label: &str,
    properties: Option<Map>,
) -> Result<Value> {
    let mut builder = Builder::new();
    builder.begin_object()?;
    builder.push_key("id")?;
    builder.push_value(Value::Integer(id))?;
    builder.push_key("start_id")?;
    builder.push_value(Value::Integer(start_id))?;
    builder.push_key("end_id")?;
    builder.push_value(Value::Integer(end_id))?;
    builder.push_key("label")?;
    builder.push_value(Value::from(label))?;
    builder.push_key("properties")?;
    builder.push_value(Value::Object(properties.unwrap_or_default()))?;
    builder.end_object()?;
    builder.annotate("edge")?;
    builder.finish()
}

/// Builds a finalized path from alternating vertices and edges.
///
/// Elements may be finalized (wrapped) or bare entities. The arity and
/// alternation rules are checked per element so errors name the
/// offending position.
///
/// # Examples
///
/// ```rust
/// use graphval::construct;
///
/// let v1 = construct::build_vertex(1, "a", None).unwrap();
/// let err = construct::build_path(vec![v1]).unwrap_err();
/// assert!(err.to_string().contains("3 or more elements"));
/// ```
pub fn build_path(elements: Vec<Value>) -> Result<Value> {
    if elements.len() < 3 {
        return Err(Error::structural(
            "paths require 3 or more elements: alternating vertices and edges",
        ));
    }
    if elements.len() % 2 == 0 {
        return Err(Error::structural(
            "paths require an odd number of elements",
        ));
    }
    let mut builder = Builder::new();
    builder.begin_array()?;
    for (i, element) in elements.into_iter().enumerate() {
        let expects_vertex = i % 2 == 0;
        let ok = match element.as_scalar() {
            Some(scalar) if expects_vertex => scalar.is_vertex(),
            Some(scalar) => scalar.is_edge(),
            None => false,
        };
        if !ok {
            return Err(Error::structural(if expects_vertex {
                format!("paths require a vertex at element {i}")
            } else {
                format!("paths require an edge at element {i}")
            }));
        }
        builder.push_value(element)?;
    }
    builder.end_array()?;
    builder.annotate("path")?;
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_str, to_string};

    #[test]
    fn build_map_matches_parsed_form() {
        let built = build_map(vec![
            ("x".to_string(), Value::from(1)),
            ("y".to_string(), Value::from(vec![Value::from(2)])),
        ])
        .unwrap();
        assert_eq!(built, from_str("{\"x\": 1, \"y\": [2]}").unwrap());
    }

    #[test]
    fn build_list_unwraps_finalized_elements() {
        let finalized = from_str("7").unwrap();
        let list = build_list(vec![finalized, Value::from(8)]).unwrap();
        assert_eq!(to_string(&list).unwrap(), "[7, 8]");
    }

    #[test]
    fn build_vertex_round_trips_through_text() {
        let vertex = build_vertex(42, "Person", None).unwrap();
        let text = to_string(&vertex).unwrap();
        assert_eq!(from_str(&text).unwrap(), vertex);
    }

    #[test]
    fn build_edge_carries_endpoints() {
        let edge = build_edge(1, 2, 3, "KNOWS", None).unwrap();
        assert_eq!(
            to_string(&edge).unwrap(),
            "{\"id\": 1, \"start_id\": 2, \"end_id\": 3, \"label\": \"KNOWS\", \
             \"properties\": {}}::edge",
        );
    }

    #[test]
    fn build_path_rejects_bad_alternation() {
        let v1 = build_vertex(1, "a", None).unwrap();
        let v2 = build_vertex(2, "b", None).unwrap();
        let v3 = build_vertex(3, "c", None).unwrap();
        let err = build_path(vec![v1, v2, v3]).unwrap_err();
        assert_eq!(err.to_string(), "paths require an edge at element 1");
    }

    #[test]
    fn build_path_rejects_even_arity() {
        let v1 = build_vertex(1, "a", None).unwrap();
        let e = build_edge(2, 1, 3, "to", None).unwrap();
        let v2 = build_vertex(3, "b", None).unwrap();
        let extra = build_edge(4, 3, 5, "to", None).unwrap();
        let err = build_path(vec![v1, e, v2, extra]).unwrap_err();
        assert!(err.to_string().contains("odd number"));
    }

    #[test]
    fn built_path_round_trips() {
        let v1 = build_vertex(1, "a", None).unwrap();
        let e = build_edge(2, 1, 3, "to", None).unwrap();
        let v2 = build_vertex(3, "b", None).unwrap();
        let path = build_path(vec![v1, e, v2]).unwrap();
        let text = to_string(&path).unwrap();
        assert_eq!(from_str(&text).unwrap(), path);
    }
}
