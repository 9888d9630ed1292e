//! Error types for graph value construction, parsing and querying.
//!
//! All fallible operations in this crate return [`Result`]. The variants
//! follow the taxonomy of the value core:
//!
//! - **Syntax**: invalid input text, with line/column information
//! - **Structural**: a container does not have the shape required by a
//!   typecast annotation or entity constructor
//! - **TypeMismatch**: an operator was given an operand of the wrong
//!   scalar or container kind
//! - **StringTooLong** / **NestingTooDeep**: resource limits enforced
//!   during construction
//! - **NotFound**: a required external lookup (label name, vertex row)
//!   produced nothing. Plain key/index misses are *not* errors, they
//!   yield null values instead
//! - **Invariant**: a builder-contract breach; always a caller bug,
//!   never bad input
//!
//! ## Examples
//!
//! ```rust
//! use graphval::{from_str, Error};
//!
//! let result = from_str("{\"id\": 1}::vertex");
//! assert!(matches!(result, Err(Error::Structural(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by the graph value core.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid input text.
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
    },

    /// A container failed shape validation during a typecast annotation
    /// or an entity constructor.
    #[error("{0}")]
    Structural(String),

    /// An operator operand had the wrong scalar or container kind.
    #[error("{0}")]
    TypeMismatch(String),

    /// A string payload exceeded the representable length.
    #[error("string too long to represent as a graph value string ({len} bytes, max {max})")]
    StringTooLong { len: usize, max: usize },

    /// Input nesting exceeded the construction depth limit.
    #[error("maximum container nesting depth of {0} exceeded")]
    NestingTooDeep(usize),

    /// A required external lookup found nothing.
    #[error("{0} does not exist")]
    NotFound(String),

    /// Builder contract breach. Indicates a bug in the calling code,
    /// not bad input.
    #[error("builder contract violated: {0}")]
    Invariant(String),

    /// Generic message.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graphval::Error;
    ///
    /// let err = Error::syntax(3, 7, "unexpected character ';'");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates a structural-shape error, e.g. "object is not a vertex".
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::Structural(msg.into())
    }

    /// Creates a type-mismatch error for an operator operand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graphval::Error;
    ///
    /// let err = Error::type_mismatch("array index must resolve to an integer value");
    /// assert!(err.to_string().contains("integer"));
    /// ```
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Error::TypeMismatch(msg.into())
    }

    /// Creates a not-found error for a failed required lookup.
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    /// Creates an invariant-violation error for a builder contract breach.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Error::Invariant(msg.into())
    }

    /// Creates a generic error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
