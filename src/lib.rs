//! # graphval
//!
//! A self-describing value format for graph-extended JSON data.
//!
//! ## What is graphval?
//!
//! graphval is the value core of a property-graph query runtime: the JSON
//! data model (null, booleans, numbers, strings, arrays, objects) extended
//! with arbitrary-precision numerics and first-class graph entities
//! (vertices, edges and paths) that reuse the object and array payload
//! shapes under distinct type tags.
//!
//! ## Key Features
//!
//! - **Graph entities as values**: `::vertex`, `::edge` and `::path`
//!   annotations turn validated containers into typed entities
//! - **One assembly path**: text parsing and programmatic construction
//!   both drive the same event-stack [`Builder`]
//! - **Canonical text form**: compact and pretty serialization re-parse
//!   to the same value, entities included
//! - **Query operators**: chained access, slicing, membership and string
//!   predicates with three-valued null semantics
//! - **Total ordering**: every pair of values compares, with the numeric
//!   class canonicalized across integer, float and numeric tags
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use graphval::{access, from_str, to_string, Value};
//!
//! let value = from_str(
//!     "{\"id\": 1, \"label\": \"Person\", \"properties\": {\"name\": \"Ada\"}}::vertex",
//! ).unwrap();
//!
//! // Standalone entities are scalars; access reads their property bag.
//! assert_eq!(
//!     access(&value, &[Value::from("name")]).unwrap(),
//!     Value::from("Ada"),
//! );
//!
//! // The canonical text form round-trips.
//! let text = to_string(&value).unwrap();
//! assert_eq!(from_str(&text).unwrap(), value);
//! ```
//!
//! ### Dynamic Values with the gval! Macro
//!
//! ```rust
//! use graphval::{gval, Value};
//!
//! let data = gval!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "graphs"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ### Building Entities Programmatically
//!
//! ```rust
//! use graphval::{construct, entity, Value};
//!
//! let v1 = construct::build_vertex(1, "City", None).unwrap();
//! let e = construct::build_edge(2, 1, 3, "ROAD", None).unwrap();
//! let v2 = construct::build_vertex(3, "City", None).unwrap();
//! let path = construct::build_path(vec![v1, e, v2]).unwrap();
//!
//! assert_eq!(entity::path_length(&path).unwrap(), Value::Integer(1));
//! ```
//!
//! ## Null versus error
//!
//! Operators distinguish data misses from kind violations: an absent key
//! or out-of-range index yields null, while indexing an object with an
//! integer or slicing a non-list is an [`Error`]. Null operands propagate
//! as null results wherever the operator tolerates them.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All array indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - No panics in the public API; builder misuse surfaces as
//!   [`Error::Invariant`], not as a panic

pub mod builder;
pub mod cmp;
pub mod construct;
pub mod entity;
pub mod error;
pub mod iter;
pub mod macros;
pub mod map;
pub mod ops;
pub mod parse;
pub mod ser;
pub mod typecast;
pub mod value;

pub use builder::{Builder, MAX_NESTING_DEPTH, MAX_STRING_LEN};
pub use cmp::{compare, equal};
pub use entity::GraphStore;
pub use error::{Error, Result};
pub use map::Map;
pub use ops::{access, contains, ends_with, head, in_list, last, size, slice, starts_with};
pub use parse::from_str;
pub use ser::{to_string, to_string_pretty};
pub use typecast::{cast_edge, cast_float, cast_numeric, cast_path, cast_vertex};
pub use value::{Array, Value};
