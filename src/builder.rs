//! Event-stack assembly of graph value trees.
//!
//! This module provides the [`Builder`], a stack-based assembler that
//! receives a flat sequence of structural events (begin-object, key,
//! value, begin-array, end-object, end-array) and produces a fully nested
//! [`Value`]. The text parser and the programmatic constructors in
//! [`crate::construct`] both drive the same builder, so every value in
//! the system is assembled through one code path.
//!
//! ## Contract
//!
//! Events must describe well-formed nesting. Violations (a value pushed
//! on an object frame with no pending key, a key pushed anywhere else, a
//! mismatched close, events after the root value completed) are caller
//! bugs and surface as [`Error::Invariant`], never as recoverable input
//! errors.
//!
//! ## Examples
//!
//! ```rust
//! use graphval::{Builder, Value};
//!
//! let mut b = Builder::new();
//! b.begin_object().unwrap();
//! b.push_key("answer").unwrap();
//! b.push_value(Value::from(42)).unwrap();
//! b.end_object().unwrap();
//!
//! let value = b.finish().unwrap();
//! assert_eq!(graphval::to_string(&value).unwrap(), "{\"answer\": 42}");
//! ```

use crate::error::{Error, Result};
use crate::value::Array;
use crate::{Map, Value};

/// Maximum byte length of any string payload (key or scalar). Checked at
/// construction time, before the string is attached to any frame.
pub const MAX_STRING_LEN: usize = 0x7FFF_FFFF;

/// Maximum open-frame depth during construction. Deeply nested input
/// aborts with a resource error instead of exhausting the call stack in
/// later recursive consumers.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// One level of in-progress object or array construction.
enum Frame {
    Object { map: Map, pending_key: Option<String> },
    Array(Vec<Value>),
}

/// Stack-based assembler turning structural events into a [`Value`] tree.
///
/// Each parse or build operation owns its own builder; nothing is shared
/// across concurrent callers. Once [`Builder::finish`] returns, the value
/// is finalized and immutable.
#[derive(Default)]
pub struct Builder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl Builder {
    /// Creates a builder with no open frames.
    #[must_use]
    pub fn new() -> Self {
        Builder {
            stack: Vec::new(),
            root: None,
        }
    }

    /// Opens a new object frame.
    pub fn begin_object(&mut self) -> Result<()> {
        self.check_open()?;
        self.check_depth()?;
        self.stack.push(Frame::Object {
            map: Map::new(),
            pending_key: None,
        });
        Ok(())
    }

    /// Opens a new array frame.
    pub fn begin_array(&mut self) -> Result<()> {
        self.check_open()?;
        self.check_depth()?;
        self.stack.push(Frame::Array(Vec::new()));
        Ok(())
    }

    /// Buffers a key for the next value on the top object frame.
    ///
    /// Only legal when the top frame is an object with no key already
    /// pending.
    pub fn push_key(&mut self, name: &str) -> Result<()> {
        check_string_length(name.len())?;
        match self.stack.last_mut() {
            Some(Frame::Object { pending_key, .. }) => {
                if pending_key.is_some() {
                    return Err(Error::invariant("key pushed while a key is already pending"));
                }
                *pending_key = Some(name.to_string());
                Ok(())
            }
            _ => Err(Error::invariant("key pushed outside of an object frame")),
        }
    }

    /// Pushes a completed value.
    ///
    /// On an array frame the value is appended; on an object frame it
    /// completes the pending key/value pair. With no open frame it
    /// becomes the root. A raw-scalar wrapper pushed here is unwrapped
    /// first: the wrapper is only legal at the root of a finalized
    /// container, so embedding a finalized scalar into a larger value
    /// re-plants the bare scalar.
    pub fn push_value(&mut self, value: Value) -> Result<()> {
        let value = unwrap_raw_scalar(value);
        if let Value::String(s) = &value {
            check_string_length(s.len())?;
        }
        self.attach(value)
    }

    /// Closes the top object frame.
    pub fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object { map, pending_key }) => {
                if pending_key.is_some() {
                    return Err(Error::invariant("object closed with a dangling key"));
                }
                self.attach(Value::Object(map))
            }
            Some(frame) => {
                self.stack.push(frame);
                Err(Error::invariant("end_object on an array frame"))
            }
            None => Err(Error::invariant("end_object with no open frame")),
        }
    }

    /// Closes the top array frame.
    pub fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array(elems)) => self.attach(Value::Array(Array::new(elems))),
            Some(frame) => {
                self.stack.push(frame);
                Err(Error::invariant("end_array on an object frame"))
            }
            None => Err(Error::invariant("end_array with no open frame")),
        }
    }

    /// Applies a typecast annotation to the most recently completed value.
    ///
    /// The builder owns the slot the value landed in (root, last array
    /// element, or last object pair), so validation and re-tagging happen
    /// in place; a value that was already stored in its parent frame is
    /// the value that gets re-tagged.
    pub fn annotate(&mut self, label: &str) -> Result<()> {
        let target = self
            .last_completed_mut()
            .ok_or_else(|| Error::invariant("annotation with no completed value"))?;
        crate::typecast::retag_container(target, label)
    }

    /// Finalizes construction and returns the assembled value.
    ///
    /// A scalar at the root (including a vertex, edge or path) is wrapped
    /// in the raw-scalar single-element array, keeping the finalized
    /// container uniformly array-or-object at the top level.
    pub fn finish(self) -> Result<Value> {
        if !self.stack.is_empty() {
            return Err(Error::invariant("finish with unclosed containers"));
        }
        let root = self
            .root
            .ok_or_else(|| Error::invariant("finish before any value was produced"))?;
        Ok(finalize_root(root))
    }

    fn attach(&mut self, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Array(elems)) => {
                elems.push(value);
                Ok(())
            }
            Some(Frame::Object { map, pending_key }) => match pending_key.take() {
                Some(key) => {
                    map.insert(key, value);
                    Ok(())
                }
                None => Err(Error::invariant(
                    "value pushed on an object frame with no pending key",
                )),
            },
            None => {
                if self.root.is_some() {
                    return Err(Error::invariant("value pushed after the root completed"));
                }
                self.root = Some(value);
                Ok(())
            }
        }
    }

    fn last_completed_mut(&mut self) -> Option<&mut Value> {
        match self.stack.last_mut() {
            Some(Frame::Array(elems)) => elems.last_mut(),
            Some(Frame::Object { map, .. }) => {
                let index = map.len().checked_sub(1)?;
                map.get_index_value_mut(index)
            }
            None => self.root.as_mut(),
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::invariant("event after the root value completed"));
        }
        // A container opening directly under an object frame needs a key
        // just like a scalar does.
        if let Some(Frame::Object { pending_key, .. }) = self.stack.last() {
            if pending_key.is_none() {
                return Err(Error::invariant(
                    "container opened on an object frame with no pending key",
                ));
            }
        }
        Ok(())
    }

    fn check_depth(&self) -> Result<()> {
        if self.stack.len() >= MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        Ok(())
    }
}

/// Rejects string payloads beyond the representable length.
pub fn check_string_length(len: usize) -> Result<()> {
    if len > MAX_STRING_LEN {
        return Err(Error::StringTooLong {
            len,
            max: MAX_STRING_LEN,
        });
    }
    Ok(())
}

/// Wraps a root scalar in the raw-scalar array; containers pass through.
pub(crate) fn finalize_root(root: Value) -> Value {
    match root {
        Value::Array(ref a) if a.is_raw_scalar() => root,
        v if v.is_scalar() => Value::Array(Array::raw_scalar(v)),
        v => v,
    }
}

/// Strips the raw-scalar wrapper from a finalized value so it can be
/// embedded in a larger container.
pub(crate) fn unwrap_raw_scalar(value: Value) -> Value {
    match value {
        Value::Array(a) if a.is_raw_scalar() => a
            .into_elems()
            .into_iter()
            .next()
            .unwrap_or(Value::Null),
        v => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_containers() {
        let mut b = Builder::new();
        b.begin_object().unwrap();
        b.push_key("items").unwrap();
        b.begin_array().unwrap();
        b.push_value(Value::from(1)).unwrap();
        b.push_value(Value::from(2)).unwrap();
        b.end_array().unwrap();
        b.end_object().unwrap();

        let value = b.finish().unwrap();
        let obj = value.as_object().unwrap();
        let items = obj.get("items").unwrap().as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(!items.is_raw_scalar());
    }

    #[test]
    fn root_scalar_is_wrapped() {
        let mut b = Builder::new();
        b.push_value(Value::from("alone")).unwrap();
        let value = b.finish().unwrap();

        let arr = value.as_array().unwrap();
        assert!(arr.is_raw_scalar());
        assert_eq!(arr.len(), 1);
        assert_eq!(value.as_scalar().and_then(|v| v.as_str()), Some("alone"));
    }

    #[test]
    fn value_without_pending_key_is_fatal() {
        let mut b = Builder::new();
        b.begin_object().unwrap();
        let err = b.push_value(Value::Null).unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn duplicate_pending_key_is_fatal() {
        let mut b = Builder::new();
        b.begin_object().unwrap();
        b.push_key("a").unwrap();
        let err = b.push_key("b").unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn mismatched_close_is_fatal() {
        let mut b = Builder::new();
        b.begin_array().unwrap();
        let err = b.end_object().unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn finish_with_open_frame_is_fatal() {
        let mut b = Builder::new();
        b.begin_array().unwrap();
        let err = b.finish().unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let mut b = Builder::new();
        for _ in 0..MAX_NESTING_DEPTH {
            b.begin_array().unwrap();
        }
        let err = b.begin_array().unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep(_)));
    }

    #[test]
    fn duplicate_object_keys_collapse_last_wins() {
        let mut b = Builder::new();
        b.begin_object().unwrap();
        b.push_key("k").unwrap();
        b.push_value(Value::from(1)).unwrap();
        b.push_key("k").unwrap();
        b.push_value(Value::from(2)).unwrap();
        b.end_object().unwrap();

        let value = b.finish().unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("k").and_then(|v| v.as_i64()), Some(2));
    }

    #[test]
    fn embedded_finalized_scalar_is_unwrapped() {
        let finalized = finalize_root(Value::from(9));
        let mut b = Builder::new();
        b.begin_array().unwrap();
        b.push_value(finalized).unwrap();
        b.end_array().unwrap();

        let value = b.finish().unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.get(0), Some(&Value::Integer(9)));
    }
}
