//! Accessors over graph entities, and the host lookup boundary.
//!
//! The accessor functions reduce their argument through the raw-scalar
//! wrapper, propagate null arguments as null results, and reject
//! arguments of the wrong entity kind with a hard error. `start_node`
//! and `end_node` additionally resolve ids through a [`GraphStore`],
//! the only place this crate touches storage it does not own.

use crate::error::{Error, Result};
use crate::{Map, Value};

/// Resolves entity identifiers to stored graph data.
///
/// The value core never owns graph storage; hosts implement this to let
/// [`start_node`] and [`end_node`] turn an edge's endpoint ids back into
/// vertex values. Both methods fail with [`Error::NotFound`] when the
/// id resolves to nothing; unlike property misses, a dangling endpoint
/// is a hard error.
pub trait GraphStore {
    /// The label name owning the given graph id.
    fn label_name(&self, graph_id: i64) -> Result<String>;

    /// The stored vertex with the given label and id, as a finalized
    /// vertex value.
    fn vertex_by_id(&self, label: &str, id: i64) -> Result<Value>;
}

/// The `id` pair of a vertex or edge.
///
/// # Examples
///
/// ```rust
/// use graphval::{construct, entity, Value};
///
/// let vertex = construct::build_vertex(7, "City", None).unwrap();
/// assert_eq!(entity::id(&vertex).unwrap(), Value::Integer(7));
/// assert_eq!(entity::id(&Value::Null).unwrap(), Value::Null);
/// ```
pub fn id(value: &Value) -> Result<Value> {
    match value.as_scalar() {
        Some(Value::Null) => Ok(Value::Null),
        Some(Value::Vertex(map)) | Some(Value::Edge(map)) => Ok(entity_pair(map, "id")),
        _ => Err(Error::type_mismatch(
            "id() argument must be a vertex, an edge or null",
        )),
    }
}

/// The `start_id` pair of an edge.
pub fn start_id(value: &Value) -> Result<Value> {
    edge_pair(value, "start_id", "start_id() argument must be an edge or null")
}

/// The `end_id` pair of an edge.
pub fn end_id(value: &Value) -> Result<Value> {
    edge_pair(value, "end_id", "end_id() argument must be an edge or null")
}

/// The `label` pair of a vertex or edge, as a string value.
pub fn label(value: &Value) -> Result<Value> {
    match value.as_scalar() {
        Some(Value::Null) => Ok(Value::Null),
        Some(Value::Vertex(map)) | Some(Value::Edge(map)) => Ok(entity_pair(map, "label")),
        _ => Err(Error::type_mismatch(
            "label() argument must be a vertex, an edge or null",
        )),
    }
}

/// The `properties` pair of a vertex or edge, as a plain object.
pub fn properties(value: &Value) -> Result<Value> {
    match value.as_scalar() {
        Some(Value::Null) => Ok(Value::Null),
        Some(Value::Vertex(map)) | Some(Value::Edge(map)) => {
            Ok(entity_pair(map, "properties"))
        }
        _ => Err(Error::type_mismatch(
            "properties() argument must be a vertex, an edge or null",
        )),
    }
}

/// The number of edges in a path: `(elements − 1) / 2`.
///
/// # Examples
///
/// ```rust
/// use graphval::{construct, entity, Value};
///
/// let v1 = construct::build_vertex(1, "a", None).unwrap();
/// let e = construct::build_edge(2, 1, 3, "to", None).unwrap();
/// let v2 = construct::build_vertex(3, "b", None).unwrap();
/// let path = construct::build_path(vec![v1, e, v2]).unwrap();
/// assert_eq!(entity::path_length(&path).unwrap(), Value::Integer(1));
/// ```
pub fn path_length(value: &Value) -> Result<Value> {
    match value.as_scalar() {
        Some(Value::Null) => Ok(Value::Null),
        Some(Value::Path(elems)) => Ok(Value::Integer(((elems.len() - 1) / 2) as i64)),
        _ => Err(Error::type_mismatch(
            "length() argument must be a path or null",
        )),
    }
}

/// Resolves an edge's start endpoint to its stored vertex.
pub fn start_node<S: GraphStore>(store: &S, edge: &Value) -> Result<Value> {
    resolve_endpoint(store, edge, "start_id")
}

/// Resolves an edge's end endpoint to its stored vertex.
pub fn end_node<S: GraphStore>(store: &S, edge: &Value) -> Result<Value> {
    resolve_endpoint(store, edge, "end_id")
}

fn resolve_endpoint<S: GraphStore>(store: &S, edge: &Value, key: &str) -> Result<Value> {
    let map = match edge.as_scalar() {
        Some(Value::Null) => return Ok(Value::Null),
        Some(Value::Edge(map)) => map,
        _ => {
            return Err(Error::type_mismatch(
                "endpoint argument must be an edge or null",
            ))
        }
    };
    let graph_id = match map.get_ignore_case(key) {
        Some(Value::Integer(i)) => *i,
        _ => return Err(Error::structural("edge is missing an endpoint id")),
    };
    let label = store.label_name(graph_id)?;
    store.vertex_by_id(&label, graph_id)
}

fn edge_pair(value: &Value, key: &str, err: &str) -> Result<Value> {
    match value.as_scalar() {
        Some(Value::Null) => Ok(Value::Null),
        Some(Value::Edge(map)) => Ok(entity_pair(map, key)),
        _ => Err(Error::type_mismatch(err.to_string())),
    }
}

// Shape validation at construction guarantees the pair exists; a miss
// here would mean a hand-assembled entity, which the closed constructors
// prevent.
fn entity_pair(map: &Map, key: &str) -> Value {
    map.get_ignore_case(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct;

    struct StubStore;

    impl GraphStore for StubStore {
        fn label_name(&self, graph_id: i64) -> Result<String> {
            if graph_id == 404 {
                return Err(Error::not_found(format!("graph id {graph_id}")));
            }
            Ok("Person".to_string())
        }

        fn vertex_by_id(&self, label: &str, id: i64) -> Result<Value> {
            construct::build_vertex(id, label, None)
        }
    }

    fn sample_edge(start: i64, end: i64) -> Value {
        construct::build_edge(10, start, end, "KNOWS", None).unwrap()
    }

    #[test]
    fn id_reads_vertices_and_edges() {
        let vertex = construct::build_vertex(5, "City", None).unwrap();
        assert_eq!(id(&vertex).unwrap(), Value::Integer(5));
        assert_eq!(id(&sample_edge(1, 2)).unwrap(), Value::Integer(10));
        assert!(id(&Value::from(3)).is_err());
    }

    #[test]
    fn endpoint_ids_are_edge_only() {
        let edge = sample_edge(1, 2);
        assert_eq!(start_id(&edge).unwrap(), Value::Integer(1));
        assert_eq!(end_id(&edge).unwrap(), Value::Integer(2));

        let vertex = construct::build_vertex(5, "City", None).unwrap();
        assert!(start_id(&vertex).is_err());
        assert_eq!(start_id(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn label_and_properties() {
        let vertex = construct::build_vertex(5, "City", None).unwrap();
        assert_eq!(label(&vertex).unwrap(), Value::from("City"));
        assert!(properties(&vertex).unwrap().is_object());
    }

    #[test]
    fn path_length_counts_edges() {
        let v1 = construct::build_vertex(1, "a", None).unwrap();
        let e1 = construct::build_edge(2, 1, 3, "to", None).unwrap();
        let v2 = construct::build_vertex(3, "b", None).unwrap();
        let e2 = construct::build_edge(4, 3, 5, "to", None).unwrap();
        let v3 = construct::build_vertex(5, "c", None).unwrap();
        let path = construct::build_path(vec![v1, e1, v2, e2, v3]).unwrap();
        assert_eq!(path_length(&path).unwrap(), Value::Integer(2));
        assert!(path_length(&Value::from(1)).is_err());
    }

    #[test]
    fn endpoints_resolve_through_the_store() {
        let edge = sample_edge(21, 22);
        let start = start_node(&StubStore, &edge).unwrap();
        assert_eq!(id(&start).unwrap(), Value::Integer(21));
        let end = end_node(&StubStore, &edge).unwrap();
        assert_eq!(id(&end).unwrap(), Value::Integer(22));
    }

    #[test]
    fn dangling_endpoint_is_a_hard_error() {
        let edge = sample_edge(404, 1);
        let err = start_node(&StubStore, &edge).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "graph id 404 does not exist");
    }

    #[test]
    fn null_edge_propagates() {
        assert_eq!(start_node(&StubStore, &Value::Null).unwrap(), Value::Null);
    }
}
