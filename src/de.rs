//! Container decoding.
//!
//! This module provides the [`Deserializer`], the character stream every
//! decode operation reads from. It owns the cursor (byte position, line and
//! column) and a failed flag, and knows how to parse bare and quoted element
//! tokens. Structural tokens are handled by [`crate::reader::FormatChecker`].
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use container_codec::from_str;
//! use std::collections::HashMap;
//!
//! let map: HashMap<i32, i32> = from_str("{(1,2),(3,4)}").unwrap();
//! assert_eq!(map[&3], 4);
//! ```
//!
//! ## Reading a prefix
//!
//! Decoding consumes only the container; trailing input stays unread:
//!
//! ```rust
//! use container_codec::Deserializer;
//!
//! let mut de = Deserializer::from_str("<1,2>rest");
//! let v: Vec<u8> = de.decode().unwrap();
//! assert_eq!(v, vec![1, 2]);
//! assert_eq!(de.remaining(), "rest");
//! ```

use crate::container::Container;
use crate::element::Element;
use crate::format::{Shape, StopSet};
use crate::options::CodecOptions;
use crate::reader::FormatChecker;
use crate::seq::ElementSeq;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The character stream that containers are decoded from.
///
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    failed: bool,
    depth: usize,
    options: &'de CodecOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, CodecOptions::shared())
    }

    pub fn with_options(input: &'de str, options: &'de CodecOptions) -> Self {
        Deserializer {
            input,
            position: 0,
            line: 1,
            column: 1,
            failed: false,
            depth: 0,
            options,
        }
    }

    /// Decodes one value of type `T` at the cursor.
    ///
    /// On failure the stream is marked failed and later calls return
    /// [`Error::StreamFailed`] until [`Deserializer::clear_failed`] is called.
    ///
    /// # Errors
    ///
    /// Returns the first structural or element error encountered.
    pub fn decode<T: Element>(&mut self) -> Result<T> {
        self.ensure_not_failed()?;
        T::decode(self, StopSet::NONE).map_err(|err| {
            self.set_failed();
            err
        })
    }

    /// Decodes a container at the cursor, inserting each element into `target`
    /// as soon as it is read.
    ///
    /// Elements read before an error stay in `target`.
    ///
    /// # Errors
    ///
    /// Returns the first structural or element error encountered.
    pub fn decode_into<C: Container>(&mut self, target: &mut C) -> Result<()> {
        let mut elements = self.elements::<C::Item>(C::SHAPE)?;
        for item in &mut elements {
            target.insert_item(item?);
        }
        Ok(())
    }

    /// Starts a lazy, single-pass read of a container of `shape` with elements of type `T`.
    ///
    /// # Errors
    ///
    /// Fails if the shape is not registered, the stream has failed, or the
    /// nesting limit is reached.
    pub fn elements<'a, T: Element>(&'a mut self, shape: Shape) -> Result<ElementSeq<'a, 'de, T>> {
        let spec = self.options.registry.lookup(shape)?;
        ElementSeq::new(self, spec)
    }

    /// Decodes a pair at the cursor in the registered pair format.
    ///
    /// # Errors
    ///
    /// Returns the first structural or element error encountered.
    pub fn decode_pair<A: Element, B: Element>(&mut self) -> Result<(A, B)> {
        self.ensure_not_failed()?;
        let spec = self.options.registry.lookup(Shape::PAIR)?;
        if !spec.open.is_whitespace() {
            self.skip_whitespace();
        }
        FormatChecker::new(self, spec)?.read_pair()
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unread part of the input.
    #[must_use]
    pub fn remaining(&self) -> &'de str {
        &self.input[self.position..]
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn options(&self) -> &'de CodecOptions {
        self.options
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Clears the failed flag so the stream can be read again from the cursor.
    pub fn clear_failed(&mut self) {
        self.failed = false;
    }

    pub(crate) fn set_failed(&mut self) {
        self.failed = true;
    }

    pub(crate) fn ensure_not_failed(&self) -> Result<()> {
        if self.failed {
            Err(Error::StreamFailed)
        } else {
            Ok(())
        }
    }

    /// Enters one level of container nesting.
    pub(crate) fn enter_scope(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                line: self.line,
                col: self.column,
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_scope(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    pub(crate) fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    /// Consumes the next character iff it equals `expected`.
    pub(crate) fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads a bare token up to whitespace, a stop character or end of input.
    fn read_token(&mut self, stop: StopSet) -> &'de str {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if stop.ends_token(ch) {
                break;
            }
            self.next_char();
        }
        &self.input[start..self.position]
    }

    /// Parses the next token with `T`'s [`FromStr`] implementation.
    ///
    /// Leading whitespace is skipped. The token is either bare or, when its
    /// text holds whitespace or a stop character, double-quoted. The cursor is
    /// left on the character that ended the token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementDecode`] for an empty token or a token `T` rejects.
    pub fn parse_token<T>(&mut self, stop: StopSet) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.parse_token_with(stop, std::any::type_name::<T>(), str::parse::<T>)
    }

    /// Parses the next token with a custom parser; `type_name` appears in errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementDecode`] for an empty token or a token `parse` rejects.
    pub fn parse_token_with<T, E, F>(&mut self, stop: StopSet, type_name: &str, parse: F) -> Result<T>
    where
        F: FnOnce(&str) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        self.skip_whitespace();
        let (line, col) = (self.line, self.column);
        let quoted;
        let token = if self.peek_char() == Some('"') {
            quoted = self.parse_quoted(type_name)?;
            quoted.as_str()
        } else {
            let token = self.read_token(stop);
            if token.is_empty() {
                let found = match self.peek_char() {
                    Some(ch) => format!("found {:?}", ch),
                    None => "found end of input".to_string(),
                };
                return Err(Error::element_decode(
                    line,
                    col,
                    type_name,
                    format!("expected a value, {}", found),
                ));
            }
            token
        };
        parse(token).map_err(|e| {
            Error::element_decode(line, col, type_name, format!("{} (token {:?})", e, token))
        })
    }

    /// Parses a text element: either a double-quoted string with escapes or a bare token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementDecode`] for an empty bare token, an unterminated
    /// string or an invalid escape.
    pub fn parse_text(&mut self, stop: StopSet) -> Result<String> {
        self.skip_whitespace();
        if self.peek_char() == Some('"') {
            return self.parse_quoted("string");
        }
        let (line, col) = (self.line, self.column);
        let token = self.read_token(stop);
        if token.is_empty() {
            return Err(Error::element_decode(line, col, "string", "expected a value"));
        }
        Ok(token.to_string())
    }

    /// Reads a double-quoted string at the cursor and resolves its escapes.
    fn parse_quoted(&mut self, type_name: &str) -> Result<String> {
        let (line, col) = (self.line, self.column);
        self.next_char(); // consume opening quote
        let mut result = String::new();
        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('0') => result.push('\0'),
                    Some('u') => result.push(self.parse_unicode_escape()?),
                    Some(other) => {
                        return Err(Error::element_decode(
                            self.line,
                            self.column,
                            type_name,
                            format!("unknown escape sequence '\\{}'", other),
                        ))
                    }
                    None => {
                        return Err(Error::element_decode(
                            self.line,
                            self.column,
                            type_name,
                            "unexpected end of input in escape sequence",
                        ))
                    }
                },
                other => result.push(other),
            }
        }
        Err(Error::element_decode(line, col, type_name, "unterminated string"))
    }

    /// Parses the four hex digits of a `\uXXXX` escape.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.next_char() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                _ => {
                    return Err(Error::element_decode(
                        self.line,
                        self.column,
                        "string",
                        "invalid unicode escape sequence (expected 4 hex digits)",
                    ))
                }
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                Error::element_decode(self.line, self.column, "string", "invalid unicode code point")
            })
    }
}
