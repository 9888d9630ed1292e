//! Text parsing of graph values.
//!
//! A hand-written lexer feeds a parser that drives the [`Builder`]
//! event-for-event, so text input and programmatic construction share
//! one assembly path. The grammar is the JSON grammar extended with
//! trailing `::label` typecast annotations on any value: container
//! annotations re-tag the just-closed container through the builder,
//! scalar annotations (`::numeric`, `::integer`, `::float`) reinterpret
//! the pending literal's text before it is pushed.
//!
//! Errors carry the line and column of the offending byte.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::typecast::ScalarAnnotation;
use crate::Value;

/// Parses the canonical text form into a finalized value.
///
/// # Examples
///
/// ```rust
/// use graphval::from_str;
///
/// let value = from_str("{\"nums\": [1, 2.5, 3::numeric]}").unwrap();
/// assert!(value.is_object());
///
/// let err = from_str("[1, 2").unwrap_err();
/// assert!(err.to_string().contains("syntax error"));
/// ```
pub fn from_str(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input);
    let mut builder = Builder::new();
    parser.parse_value(&mut builder)?;
    parser.expect_end()?;
    builder.finish()
}

/// One lexical token, with number literals kept as text so a scalar
/// annotation can reinterpret them.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Str(String),
    Number { text: String, is_float: bool },
    True,
    False,
    Null,
    Annotation(String),
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn err(&self, msg: impl Into<String>) -> Error {
        Error::syntax(self.line, self.col, msg)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let b = self
            .peek_byte()
            .ok_or_else(|| self.err("unexpected end of input"))?;
        match b {
            b'{' => {
                self.bump();
                Ok(Token::LBrace)
            }
            b'}' => {
                self.bump();
                Ok(Token::RBrace)
            }
            b'[' => {
                self.bump();
                Ok(Token::LBracket)
            }
            b']' => {
                self.bump();
                Ok(Token::RBracket)
            }
            b',' => {
                self.bump();
                Ok(Token::Comma)
            }
            b':' => {
                self.bump();
                if self.peek_byte() == Some(b':') {
                    self.bump();
                    Ok(Token::Annotation(self.lex_identifier()?))
                } else {
                    Ok(Token::Colon)
                }
            }
            b'"' => Ok(Token::Str(self.lex_string()?)),
            b'-' | b'0'..=b'9' => self.lex_number(),
            b'a'..=b'z' | b'A'..=b'Z' => {
                let word = self.lex_identifier()?;
                match word.as_str() {
                    "true" => Ok(Token::True),
                    "false" => Ok(Token::False),
                    "null" => Ok(Token::Null),
                    other => Err(self.err(format!("unexpected identifier \"{other}\""))),
                }
            }
            other => Err(self.err(format!("unexpected character '{}'", other as char))),
        }
    }

    fn lex_identifier(&mut self) -> Result<String> {
        let start = self.pos;
        while matches!(
            self.peek_byte(),
            Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')
        ) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.err("expected an identifier"));
        }
        // Identifier bytes are ASCII, so the slice is valid UTF-8.
        Ok(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
    }

    fn lex_string(&mut self) -> Result<String> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            let b = self
                .bump()
                .ok_or_else(|| self.err("unterminated string"))?;
            match b {
                b'"' => return Ok(out),
                b'\\' => {
                    let esc = self
                        .bump()
                        .ok_or_else(|| self.err("unterminated escape sequence"))?;
                    match esc {
                        b'"' => out.push('"'),
                        b'\\' => out.push('\\'),
                        b'/' => out.push('/'),
                        b'b' => out.push('\u{0008}'),
                        b'f' => out.push('\u{000C}'),
                        b'n' => out.push('\n'),
                        b'r' => out.push('\r'),
                        b't' => out.push('\t'),
                        b'u' => out.push(self.lex_unicode_escape()?),
                        other => {
                            return Err(
                                self.err(format!("invalid escape character '{}'", other as char))
                            )
                        }
                    }
                }
                b if b < 0x20 => {
                    return Err(self.err("unescaped control character in string"))
                }
                b => {
                    // Re-assemble multi-byte UTF-8 sequences byte-for-byte;
                    // the input is a &str so the bytes are known valid.
                    let mut buf = vec![b];
                    let extra = match b {
                        0xC0..=0xDF => 1,
                        0xE0..=0xEF => 2,
                        0xF0..=0xF7 => 3,
                        _ => 0,
                    };
                    for _ in 0..extra {
                        if let Some(next) = self.bump() {
                            buf.push(next);
                        }
                    }
                    match std::str::from_utf8(&buf) {
                        Ok(s) => out.push_str(s),
                        Err(_) => return Err(self.err("invalid UTF-8 in string")),
                    }
                }
            }
        }
    }

    fn lex_unicode_escape(&mut self) -> Result<char> {
        let first = self.lex_hex4()?;
        // Surrogate pairs encode characters outside the basic plane.
        if (0xD800..=0xDBFF).contains(&first) {
            if self.bump() != Some(b'\\') || self.bump() != Some(b'u') {
                return Err(self.err("unpaired surrogate in unicode escape"));
            }
            let second = self.lex_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(self.err("invalid low surrogate in unicode escape"));
            }
            let code = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
            return char::from_u32(code)
                .ok_or_else(|| self.err("invalid unicode escape"));
        }
        if (0xDC00..=0xDFFF).contains(&first) {
            return Err(self.err("unpaired surrogate in unicode escape"));
        }
        char::from_u32(first).ok_or_else(|| self.err("invalid unicode escape"))
    }

    fn lex_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let b = self
                .bump()
                .ok_or_else(|| self.err("truncated unicode escape"))?;
            let digit = (b as char)
                .to_digit(16)
                .ok_or_else(|| self.err("invalid hex digit in unicode escape"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn lex_number(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut is_float = false;
        if self.peek_byte() == Some(b'-') {
            self.bump();
        }
        match self.peek_byte() {
            Some(b'0') => {
                self.bump();
                if matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                    return Err(self.err("leading zeros are not allowed in numbers"));
                }
            }
            Some(b'1'..=b'9') => {
                while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                    self.bump();
                }
            }
            _ => return Err(self.err("expected a digit")),
        }
        if self.peek_byte() == Some(b'.') {
            is_float = true;
            self.bump();
            if !matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                return Err(self.err("expected a digit after the decimal point"));
            }
            while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                self.bump();
            }
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.bump();
            }
            if !matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                return Err(self.err("expected a digit in the exponent"));
            }
            while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                self.bump();
            }
        }
        let text = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        Ok(Token::Number { text, is_float })
    }

    /// Consumes a trailing `::label` annotation if one follows.
    fn maybe_annotation(&mut self) -> Result<Option<String>> {
        let checkpoint = (self.pos, self.line, self.col);
        self.skip_whitespace();
        if self.peek_byte() == Some(b':') {
            self.bump();
            if self.peek_byte() == Some(b':') {
                self.bump();
                return Ok(Some(self.lex_identifier()?));
            }
        }
        // Not an annotation; whatever follows belongs to the caller.
        (self.pos, self.line, self.col) = checkpoint;
        Ok(None)
    }

    fn parse_value(&mut self, builder: &mut Builder) -> Result<()> {
        let token = self.next_token()?;
        self.parse_value_from(token, builder)
    }

    fn parse_value_from(&mut self, token: Token, builder: &mut Builder) -> Result<()> {
        match token {
            Token::LBrace => {
                builder.begin_object()?;
                self.parse_object_body(builder)?;
                builder.end_object()?;
                if let Some(label) = self.maybe_annotation()? {
                    builder.annotate(&label)?;
                }
                Ok(())
            }
            Token::LBracket => {
                builder.begin_array()?;
                self.parse_array_body(builder)?;
                builder.end_array()?;
                if let Some(label) = self.maybe_annotation()? {
                    builder.annotate(&label)?;
                }
                Ok(())
            }
            scalar => {
                let annotation = self.maybe_annotation()?;
                let value = self.materialize_scalar(scalar, annotation.as_deref())?;
                builder.push_value(value)
            }
        }
    }

    fn parse_object_body(&mut self, builder: &mut Builder) -> Result<()> {
        let mut token = self.next_token()?;
        if token == Token::RBrace {
            return Ok(());
        }
        loop {
            let key = match token {
                Token::Str(key) => key,
                _ => return Err(self.err("expected a string key")),
            };
            builder.push_key(&key)?;
            if self.next_token()? != Token::Colon {
                return Err(self.err("expected ':' after object key"));
            }
            self.parse_value(builder)?;
            match self.next_token()? {
                Token::Comma => token = self.next_token()?,
                Token::RBrace => return Ok(()),
                _ => return Err(self.err("expected ',' or '}' in object")),
            }
        }
    }

    fn parse_array_body(&mut self, builder: &mut Builder) -> Result<()> {
        let mut token = self.next_token()?;
        if token == Token::RBracket {
            return Ok(());
        }
        loop {
            self.parse_value_from(token, builder)?;
            match self.next_token()? {
                Token::Comma => token = self.next_token()?,
                Token::RBracket => return Ok(()),
                _ => return Err(self.err("expected ',' or ']' in array")),
            }
        }
    }

    /// Turns a scalar token into a [`Value`], applying an annotation to
    /// the literal's text first. An annotated null stays null whatever
    /// the label says; the label is not even validated.
    fn materialize_scalar(&self, token: Token, annotation: Option<&str>) -> Result<Value> {
        if token == Token::Null {
            return Ok(Value::Null);
        }
        let annotation = match annotation {
            Some(label) => Some(ScalarAnnotation::from_label(label)?),
            None => None,
        };
        let text: &str = match &token {
            Token::True => {
                if annotation.is_some() {
                    return Err(self.err("cannot annotate a boolean literal"));
                }
                return Ok(Value::Bool(true));
            }
            Token::False => {
                if annotation.is_some() {
                    return Err(self.err("cannot annotate a boolean literal"));
                }
                return Ok(Value::Bool(false));
            }
            Token::Str(s) => s,
            Token::Number { text, .. } => text,
            _ => return Err(self.err("expected a value")),
        };
        match (&token, annotation) {
            (Token::Str(s), None) => Ok(Value::String(s.clone())),
            (Token::Number { is_float: false, .. }, None)
            | (_, Some(ScalarAnnotation::Integer)) => text
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| self.err(format!("integer value out of range: {text}"))),
            (Token::Number { is_float: true, .. }, None)
            | (_, Some(ScalarAnnotation::Float)) => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.err(format!("invalid float literal: {text}"))),
            (_, Some(ScalarAnnotation::Numeric)) => BigDecimal::from_str(text)
                .map(Value::Numeric)
                .map_err(|_| self.err(format!("invalid numeric literal: {text}"))),
            _ => Err(self.err("expected a value")),
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos != self.bytes.len() {
            return Err(self.err("trailing characters after the value"));
        }
        Ok(())
    }
}
