//! Container encoding.
//!
//! This module provides the [`Serializer`], which writes containers as
//! `open elem (delim elem)* close` using the formats in the configured
//! [`FormatRegistry`](crate::FormatRegistry). A delimiter is written between
//! elements only: never before the first or after the last, so an empty
//! container is just `open` followed by `close`.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use container_codec::to_string;
//! use std::collections::BTreeSet;
//!
//! let set: BTreeSet<u8> = [3, 1, 2].into_iter().collect();
//! assert_eq!(to_string(&set).unwrap(), "{1,2,3}");
//! assert_eq!(to_string(&Vec::<u8>::new()).unwrap(), "<>");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use container_codec::{CodecOptions, Element, Serializer, StopSet};
//!
//! let options = CodecOptions::new();
//! let mut serializer = Serializer::new(&options);
//! (vec![1, 2], vec![3, 4]).encode(&mut serializer, StopSet::NONE).unwrap();
//! assert_eq!(serializer.into_inner(), "(<1,2>,<3,4>)");
//! ```

use crate::container::Container;
use crate::element::Element;
use crate::format::{FormatSpec, Shape, StopSet};
use crate::options::CodecOptions;
use crate::Result;
use std::fmt;

/// The container serializer.
///
/// Accumulates text into an internal buffer; retrieve it with
/// [`Serializer::into_inner`].
pub struct Serializer<'a> {
    output: String,
    options: &'a CodecOptions,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a CodecOptions) -> Self {
        Serializer {
            output: String::with_capacity(64),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Writes `value` with its `Display` implementation.
    ///
    /// The text is quoted like [`Serializer::write_text`] when it would not
    /// read back as one bare token, e.g. a timestamp under a `:` delimiter.
    pub fn write_token<T: fmt::Display + ?Sized>(&mut self, value: &T, stop: StopSet) {
        self.write_text(&value.to_string(), stop);
    }

    #[inline]
    fn needs_quotes(s: &str, stop: StopSet) -> bool {
        s.is_empty()
            || s.starts_with('"')
            || s.chars().any(|ch| {
                ch.is_whitespace()
                    || ch.is_control()
                    || ch == '"'
                    || ch == '\\'
                    || stop.contains(ch)
            })
    }

    /// Writes text, quoting and escaping it when a bare token would not read back.
    pub fn write_text(&mut self, s: &str, stop: StopSet) {
        if !Self::needs_quotes(s, stop) {
            self.output.push_str(s);
            return;
        }
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                '\0' => self.output.push_str("\\0"),
                ch if ch.is_control() => {
                    self.output.push_str(&format!("\\u{:04x}", ch as u32));
                }
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    /// Writes `container` in the format registered for its shape.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedShape`] if the shape, or the shape of
    /// a nested element, has no registered format.
    pub fn write_container<C: Container + ?Sized>(&mut self, container: &C) -> Result<()> {
        let spec = self.options.registry.lookup(C::SHAPE)?;
        self.output.push(spec.open);
        let mut writer = SeqWriter {
            ser: &mut *self,
            spec,
            first: true,
        };
        container.write_items(&mut writer)?;
        self.output.push(spec.close);
        Ok(())
    }

    /// Writes `first` and `second` in the pair format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedShape`] if no pair format is registered.
    pub fn write_pair<A: Element, B: Element>(&mut self, first: &A, second: &B) -> Result<()> {
        let spec = self.options.registry.lookup(Shape::PAIR)?;
        self.output.push(spec.open);
        first.encode(self, spec.stop_set())?;
        self.output.push(spec.delim);
        second.encode(self, spec.stop_set())?;
        self.output.push(spec.close);
        Ok(())
    }
}

/// Writes the elements of one container, placing delimiters between them.
///
/// Handed to [`Container::write_items`] by [`Serializer::write_container`].
pub struct SeqWriter<'s, 'a> {
    ser: &'s mut Serializer<'a>,
    spec: FormatSpec,
    first: bool,
}

impl SeqWriter<'_, '_> {
    /// Writes one element.
    ///
    /// # Errors
    ///
    /// Propagates the element's encoding error.
    pub fn element<E: Element>(&mut self, element: &E) -> Result<()> {
        self.delimit();
        element.encode(self.ser, self.spec.stop_set())
    }

    /// Writes one mapping entry as a pair.
    ///
    /// # Errors
    ///
    /// Propagates the key's or value's encoding error.
    pub fn pair<K: Element, V: Element>(&mut self, key: &K, value: &V) -> Result<()> {
        self.delimit();
        self.ser.write_pair(key, value)
    }

    fn delimit(&mut self) {
        if self.first {
            self.first = false;
        } else {
            self.ser.output.push(self.spec.delim);
        }
    }
}
