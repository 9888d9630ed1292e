//! Canonical text rendering of graph values.
//!
//! One worker drives both the compact and the pretty form off the token
//! stream in [`crate::iter`]. The two differ only in whitespace: pretty
//! output indents four spaces per nesting level and breaks after
//! separators, compact output joins with `", "`. Scalar payloads render
//! identically in both, so compact and pretty output re-parse to the
//! same value.
//!
//! ## Examples
//!
//! ```rust
//! use graphval::{from_str, to_string, to_string_pretty};
//!
//! let value = from_str("{\"a\": [1, 2]}").unwrap();
//! assert_eq!(to_string(&value).unwrap(), "{\"a\": [1, 2]}");
//! assert_eq!(
//!     to_string_pretty(&value).unwrap(),
//!     "{\n    \"a\": [\n        1,\n        2\n    ]\n}",
//! );
//! ```

use crate::error::Result;
use crate::iter::{Token, Tokens};
use crate::{Map, Value};

/// Serializes a value to its compact canonical text form.
///
/// # Examples
///
/// ```rust
/// use graphval::{to_string, Value};
///
/// assert_eq!(to_string(&Value::from(1.0)).unwrap(), "1.0");
/// assert_eq!(to_string(&Value::from("a\"b")).unwrap(), "\"a\\\"b\"");
/// ```
pub fn to_string(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_tokens(&mut out, Tokens::new(value), false, 0);
    Ok(out)
}

/// Serializes a value with four-space indentation per nesting level.
///
/// Raw-scalar wrappers still render bracketless, and entity bodies render
/// compact inside the pretty layout, matching the canonical form.
pub fn to_string_pretty(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_tokens(&mut out, Tokens::new(value), true, 0);
    Ok(out)
}

/// The shared worker: separator bookkeeping plus indentation, with a
/// "last token was a key" latch so a container opening as a pair value
/// stays on its key's line.
fn write_tokens(out: &mut String, tokens: Tokens<'_>, indent: bool, base_level: usize) {
    let mut first = true;
    let mut level = base_level;
    let mut last_was_key = false;
    // The wrapper only occurs at the root of the stream, so one latch
    // covers it for the whole pass.
    let mut raw_scalar = false;
    // Indentation is suppressed before the very first token so the root
    // opener starts at column zero.
    let mut use_indent = false;

    for token in tokens {
        let was_key = matches!(token, Token::Key(_));
        match token {
            Token::BeginArray { raw_scalar: raw } => {
                if !first {
                    push_separator(out, indent);
                }
                first = true;
                if raw {
                    raw_scalar = true;
                } else {
                    if !last_was_key {
                        push_indent(out, use_indent, level);
                    }
                    out.push('[');
                }
                level += 1;
            }
            Token::BeginObject => {
                if !first {
                    push_separator(out, indent);
                }
                first = true;
                if !last_was_key {
                    push_indent(out, use_indent, level);
                }
                out.push('{');
                level += 1;
            }
            Token::Key(key) => {
                if !first {
                    push_separator(out, indent);
                }
                first = true;
                push_indent(out, use_indent, level);
                push_quoted(out, key);
                out.push_str(": ");
            }
            Token::PairValue(value) => {
                first = false;
                write_scalar(out, value);
            }
            Token::Elem(value) => {
                if !first {
                    push_separator(out, indent);
                }
                first = false;
                if !raw_scalar {
                    push_indent(out, use_indent, level);
                }
                write_scalar(out, value);
            }
            Token::EndArray { raw_scalar: raw } => {
                level -= 1;
                if !raw {
                    push_indent(out, use_indent, level);
                    out.push(']');
                }
                first = false;
            }
            Token::EndObject => {
                level -= 1;
                push_indent(out, use_indent, level);
                out.push('}');
                first = false;
            }
        }
        last_was_key = was_key;
        use_indent = indent;
    }
}

fn push_separator(out: &mut String, indent: bool) {
    if indent {
        out.push(',');
    } else {
        out.push_str(", ");
    }
}

fn push_indent(out: &mut String, active: bool, level: usize) {
    if !active {
        return;
    }
    out.push('\n');
    for _ in 0..level {
        out.push_str("    ");
    }
}

/// Renders one scalar payload, entities included.
fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Integer(i) => {
            out.push_str(&i.to_string());
        }
        Value::Float(f) => write_float(out, *f),
        Value::Numeric(n) => {
            out.push_str(&n.to_string());
            out.push_str("::numeric");
        }
        Value::String(s) => push_quoted(out, s),
        Value::Vertex(map) => {
            write_entity_body(out, map);
            out.push_str("::vertex");
        }
        Value::Edge(map) => {
            write_entity_body(out, map);
            out.push_str("::edge");
        }
        Value::Path(elems) => {
            // Path elements are entities by construction, so each one is
            // a scalar render.
            out.push('[');
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_scalar(out, elem);
            }
            out.push_str("]::path");
        }
        // Plain containers never reach the scalar writer; the iterator
        // descends into them instead.
        Value::Array(_) | Value::Object(_) => {
            debug_assert!(false, "container in scalar position");
        }
    }
}

fn write_entity_body(out: &mut String, map: &Map) {
    out.push('{');
    let mut first = true;
    for (key, value) in map.iter() {
        if !first {
            out.push_str(", ");
        }
        first = false;
        push_quoted(out, key);
        out.push_str(": ");
        match value {
            Value::Object(_) | Value::Array(_) => {
                write_tokens(out, Tokens::new(value), false, 0);
            }
            scalar => write_scalar(out, scalar),
        }
    }
    out.push('}');
}

/// Floats render in Rust's shortest round-trip decimal form, with a
/// trailing `.0` appended when the digits alone would re-parse as an
/// integer. Non-finite floats use the spelled-out forms.
fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
        return;
    }
    if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }
    let rendered = f.to_string();
    out.push_str(&rendered);
    if !needs_no_decimal_marker(&rendered) {
        out.push_str(".0");
    }
}

/// True when the rendered text already carries a decimal point, an
/// exponent, or any other non-digit past the sign.
fn needs_no_decimal_marker(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.bytes().all(|b| b.is_ascii_digit())
}

/// Quotes and escapes a string payload.
fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_str;

    fn compact(text: &str) -> String {
        to_string(&from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn raw_scalars_render_bracketless() {
        assert_eq!(compact("42"), "42");
        assert_eq!(compact("\"hi\""), "\"hi\"");
        assert_eq!(compact("null"), "null");
        assert_eq!(compact("true"), "true");
    }

    #[test]
    fn float_decimal_marker() {
        assert_eq!(to_string(&Value::from(1.0)).unwrap(), "1.0");
        assert_eq!(to_string(&Value::from(-3.0)).unwrap(), "-3.0");
        assert_eq!(to_string(&Value::from(1.5)).unwrap(), "1.5");
        assert_eq!(to_string(&Value::from(f64::NAN)).unwrap(), "NaN");
        assert_eq!(
            to_string(&Value::from(f64::NEG_INFINITY)).unwrap(),
            "-Infinity"
        );
    }

    #[test]
    fn numeric_suffix() {
        assert_eq!(compact("12.50::numeric"), "12.50::numeric");
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            to_string(&Value::from("a\"b\\c\nd\u{0001}")).unwrap(),
            "\"a\\\"b\\\\c\\nd\\u0001\"",
        );
    }

    #[test]
    fn compact_containers() {
        assert_eq!(
            compact("{\"a\": 1, \"b\": [true, null]}"),
            "{\"a\": 1, \"b\": [true, null]}"
        );
        assert_eq!(compact("[]"), "[]");
        assert_eq!(compact("{}"), "{}");
    }

    #[test]
    fn pretty_keeps_container_open_on_key_line() {
        let value = from_str("{\"a\": {\"b\": 1}}").unwrap();
        assert_eq!(
            to_string_pretty(&value).unwrap(),
            "{\n    \"a\": {\n        \"b\": 1\n    }\n}",
        );
    }

    #[test]
    fn pretty_scalar_has_no_leading_newline() {
        let value = from_str("7").unwrap();
        assert_eq!(to_string_pretty(&value).unwrap(), "7");
    }

    #[test]
    fn vertex_renders_with_suffix() {
        let vertex = crate::construct::build_vertex(1, "Person", None).unwrap();
        assert_eq!(
            to_string(&vertex).unwrap(),
            "{\"id\": 1, \"label\": \"Person\", \"properties\": {}}::vertex",
        );
    }

    #[test]
    fn path_renders_with_suffix() {
        let v1 = crate::construct::build_vertex(1, "a", None).unwrap();
        let e = crate::construct::build_edge(2, 1, 3, "to", None).unwrap();
        let v2 = crate::construct::build_vertex(3, "b", None).unwrap();
        let path = crate::construct::build_path(vec![v1, e, v2]).unwrap();
        let text = to_string(&path).unwrap();
        assert!(text.starts_with('['));
        assert!(text.ends_with("]::path"));
        assert!(text.contains("::vertex, "));
        assert!(text.contains("::edge, "));
    }
}
