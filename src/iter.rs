//! Pull iteration over finalized containers.
//!
//! The serializer does not recurse over [`Value`] directly; it consumes a
//! flat stream of structural [`Token`]s produced here, mirroring the
//! event stream the builder accepted. Entities (vertices, edges, paths)
//! are *not* descended into; they surface as scalar tokens, and the
//! serializer renders them with a nested pass. A scalar root is streamed
//! as its raw-scalar wrapper so consumers see a uniform
//! begin/elements/end shape with the wrapper flagged.

use crate::Value;

/// One structural step through a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// An array opens. `raw_scalar` marks the standalone-scalar wrapper,
    /// which renders without brackets.
    BeginArray { raw_scalar: bool },
    /// An object opens.
    BeginObject,
    /// An object pair key.
    Key(&'a str),
    /// A scalar (or entity) in an object pair value position.
    PairValue(&'a Value),
    /// A scalar (or entity) array element.
    Elem(&'a Value),
    /// The matching array close.
    EndArray { raw_scalar: bool },
    /// The matching object close.
    EndObject,
}

enum State<'a> {
    Array {
        elems: std::slice::Iter<'a, Value>,
        raw_scalar: bool,
    },
    Object {
        pairs: indexmap::map::Iter<'a, String, Value>,
        pending: Option<&'a Value>,
    },
}

/// Iterator yielding the token stream of a finalized value.
///
/// ## Examples
///
/// ```rust
/// use graphval::iter::{Token, Tokens};
/// use graphval::Value;
///
/// let value = Value::from(vec![Value::from(1)]);
/// let tokens: Vec<_> = Tokens::new(&value).collect();
/// assert_eq!(tokens.len(), 3); // begin, element, end
/// assert!(matches!(tokens[1], Token::Elem(&Value::Integer(1))));
/// ```
pub struct Tokens<'a> {
    start: Option<&'a Value>,
    stack: Vec<State<'a>>,
    synthetic_scalar: Option<&'a Value>,
}

impl<'a> Tokens<'a> {
    /// Tokenizes a value. A bare scalar (including an entity) streams as
    /// if it were raw-scalar wrapped.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Tokens {
            start: Some(value),
            stack: Vec::new(),
            synthetic_scalar: None,
        }
    }

    /// Pushes a container state and returns its begin token; scalars and
    /// entities pass through as `None`.
    fn descend(&mut self, value: &'a Value) -> Option<Token<'a>> {
        match value {
            Value::Array(arr) => {
                self.stack.push(State::Array {
                    elems: arr.iter(),
                    raw_scalar: arr.is_raw_scalar(),
                });
                Some(Token::BeginArray {
                    raw_scalar: arr.is_raw_scalar(),
                })
            }
            Value::Object(map) => {
                self.stack.push(State::Object {
                    pairs: map.iter(),
                    pending: None,
                });
                Some(Token::BeginObject)
            }
            _ => None,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(scalar) = self.synthetic_scalar.take() {
            return Some(Token::Elem(scalar));
        }
        if let Some(root) = self.start.take() {
            if let Some(token) = self.descend(root) {
                return Some(token);
            }
            // Scalar root: stream it as the wrapper it would occupy in a
            // finalized container.
            self.synthetic_scalar = Some(root);
            let empty: &'a [Value] = &[];
            self.stack.push(State::Array {
                elems: empty.iter(),
                raw_scalar: true,
            });
            return Some(Token::BeginArray { raw_scalar: true });
        }
        loop {
            let state = self.stack.last_mut()?;
            match state {
                State::Array { elems, raw_scalar } => {
                    let raw = *raw_scalar;
                    match elems.next() {
                        Some(elem) => match self.descend(elem) {
                            Some(token) => return Some(token),
                            None => return Some(Token::Elem(elem)),
                        },
                        None => {
                            self.stack.pop();
                            return Some(Token::EndArray { raw_scalar: raw });
                        }
                    }
                }
                State::Object { pairs, pending } => {
                    if let Some(value) = pending.take() {
                        match self.descend(value) {
                            Some(token) => return Some(token),
                            None => return Some(Token::PairValue(value)),
                        }
                    }
                    match pairs.next() {
                        Some((key, value)) => {
                            *pending = Some(value);
                            return Some(Token::Key(key));
                        }
                        None => {
                            self.stack.pop();
                            return Some(Token::EndObject);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_str;

    fn tokens(text: &str) -> (Value, usize) {
        let value = from_str(text).unwrap();
        let count = Tokens::new(&value).count();
        (value, count)
    }

    #[test]
    fn object_stream_shape() {
        let value = from_str("{\"a\": 1, \"b\": [true]}").unwrap();
        let stream: Vec<_> = Tokens::new(&value).collect();
        assert!(matches!(stream[0], Token::BeginObject));
        assert!(matches!(stream[1], Token::Key("a")));
        assert!(matches!(stream[2], Token::PairValue(&Value::Integer(1))));
        assert!(matches!(stream[3], Token::Key("b")));
        assert!(matches!(
            stream[4],
            Token::BeginArray { raw_scalar: false }
        ));
        assert!(matches!(stream[5], Token::Elem(&Value::Bool(true))));
        assert!(matches!(stream[6], Token::EndArray { raw_scalar: false }));
        assert!(matches!(stream[7], Token::EndObject));
        assert_eq!(stream.len(), 8);
    }

    #[test]
    fn raw_scalar_wrapper_is_flagged() {
        let value = from_str("42").unwrap();
        let stream: Vec<_> = Tokens::new(&value).collect();
        assert!(matches!(stream[0], Token::BeginArray { raw_scalar: true }));
        assert!(matches!(stream[1], Token::Elem(&Value::Integer(42))));
        assert!(matches!(stream[2], Token::EndArray { raw_scalar: true }));
    }

    #[test]
    fn bare_scalar_streams_like_wrapped() {
        let bare = Value::from(42);
        let stream: Vec<_> = Tokens::new(&bare).collect();
        assert!(matches!(stream[0], Token::BeginArray { raw_scalar: true }));
        assert!(matches!(stream[1], Token::Elem(&Value::Integer(42))));
        assert_eq!(stream.len(), 3);
    }

    #[test]
    fn entities_are_not_descended_into() {
        let vertex = crate::construct::build_vertex(1, "Person", None).unwrap();
        let stream: Vec<_> = Tokens::new(&vertex).collect();
        // begin (raw), the vertex as one scalar element, end.
        assert_eq!(stream.len(), 3);
        assert!(matches!(stream[1], Token::Elem(v) if v.is_vertex()));
    }

    #[test]
    fn empty_containers() {
        let (_, n) = tokens("[]");
        assert_eq!(n, 2);
        let (_, m) = tokens("{}");
        assert_eq!(m, 2);
    }
}
