//! Container formats and the shape registry.
//!
//! Every container shape (sequence, set, mapping, pair, ...) is written as
//! `open elem (delim elem)* close`. The [`FormatRegistry`] maps a [`Shape`] to
//! the [`FormatSpec`] holding those three characters. Encoding and decoding
//! look the shape up once per container, so both directions always agree.
//!
//! ## Default formats
//!
//! | Shape | Example |
//! |-------|---------|
//! | [`Shape::SEQUENCE`] | `<1,2,3>` |
//! | [`Shape::LINKED_SEQUENCE`] | `[1,2,3]` |
//! | [`Shape::SET`] | `{1,2,3}` |
//! | [`Shape::MAPPING`] | `{(1,2),(3,4)}` |
//! | [`Shape::PAIR`] | `(1,2)` |
//!
//! ## Examples
//!
//! ```rust
//! use container_codec::{FormatRegistry, FormatSpec, Shape};
//!
//! let mut registry = FormatRegistry::default();
//! assert_eq!(registry.lookup(Shape::SEQUENCE).unwrap(), FormatSpec::new('<', '>', ','));
//!
//! // Shapes are open: new ones are registered, not special-cased.
//! const RING: Shape = Shape::new("ring");
//! registry.register(RING, FormatSpec::new('|', '|', ';'));
//! assert!(registry.lookup(RING).is_ok());
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `{open, close, delim}` triple governing one shape's text representation.
///
/// The three characters are expected to be pairwise distinct. This is not
/// enforced on construction; see [`FormatSpec::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatSpec {
    pub open: char,
    pub close: char,
    pub delim: char,
}

impl FormatSpec {
    #[must_use]
    pub const fn new(open: char, close: char, delim: char) -> Self {
        FormatSpec { open, close, delim }
    }

    /// Returns `true` when open, close and delimiter are pairwise distinct.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.open != self.close && self.open != self.delim && self.close != self.delim
    }

    /// Checks that the characters are pairwise distinct.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] naming `shape` otherwise.
    pub fn validate(&self, shape: Shape) -> Result<()> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(Error::InvalidFormat {
                shape: shape.name().to_string(),
                open: self.open,
                close: self.close,
                delim: self.delim,
            })
        }
    }

    /// The characters that end a bare element token inside this format.
    #[must_use]
    pub const fn stop_set(&self) -> StopSet {
        StopSet {
            delim: Some(self.delim),
            close: Some(self.close),
        }
    }
}

/// Identifies which [`FormatSpec`] and element rule apply to a container type.
///
/// Shapes are compared by name. The built-in shapes are associated constants;
/// downstream code adds its own with [`Shape::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape(&'static str);

impl Shape {
    /// Ordered sequences such as `Vec<T>`.
    pub const SEQUENCE: Shape = Shape("sequence");
    /// Singly or doubly linked sequences such as `LinkedList<T>`.
    pub const LINKED_SEQUENCE: Shape = Shape("linked_sequence");
    /// Sets of unique elements.
    pub const SET: Shape = Shape("set");
    /// Key to value mappings; each element is a pair.
    pub const MAPPING: Shape = Shape("mapping");
    /// Two-element tuples.
    pub const PAIR: Shape = Shape("pair");

    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Shape(name)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Mapping from shape names to their formats.
///
/// Entries keep their registration order, which makes a serialized registry
/// stable and easy to diff.
///
/// # Examples
///
/// ```rust
/// use container_codec::{Error, FormatRegistry, Shape};
///
/// let registry = FormatRegistry::empty();
/// assert!(matches!(
///     registry.lookup(Shape::SET),
///     Err(Error::UnsupportedShape(_))
/// ));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatRegistry(IndexMap<String, FormatSpec>);

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = FormatRegistry::empty();
        registry.register(Shape::SEQUENCE, FormatSpec::new('<', '>', ','));
        registry.register(Shape::LINKED_SEQUENCE, FormatSpec::new('[', ']', ','));
        registry.register(Shape::SET, FormatSpec::new('{', '}', ','));
        registry.register(Shape::MAPPING, FormatSpec::new('{', '}', ','));
        registry.register(Shape::PAIR, FormatSpec::new('(', ')', ','));
        registry
    }
}

impl FormatRegistry {
    /// Creates a registry with no shapes.
    #[must_use]
    pub fn empty() -> Self {
        FormatRegistry(IndexMap::new())
    }

    /// Returns the format registered for `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] if nothing is registered.
    pub fn lookup(&self, shape: Shape) -> Result<FormatSpec> {
        self.0
            .get(shape.name())
            .copied()
            .ok_or_else(|| Error::unsupported_shape(shape.name()))
    }

    /// Registers `spec` for `shape`, returning the format it replaces.
    pub fn register(&mut self, shape: Shape, spec: FormatSpec) -> Option<FormatSpec> {
        self.0.insert(shape.name().to_string(), spec)
    }

    /// Returns `true` if a format is registered for `shape`.
    #[must_use]
    pub fn contains(&self, shape: Shape) -> bool {
        self.0.contains_key(shape.name())
    }

    /// Iterates over `(shape name, format)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Checks every registered format for clashing characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for the first offending entry.
    pub fn validate(&self) -> Result<()> {
        for (name, spec) in &self.0 {
            if !spec.is_well_formed() {
                return Err(Error::InvalidFormat {
                    shape: name.clone(),
                    open: spec.open,
                    close: spec.close,
                    delim: spec.delim,
                });
            }
        }
        Ok(())
    }
}

/// Characters that terminate a bare element token.
///
/// Element parsers receive the stop set of the enclosing container so that
/// `<1,2>` splits at `,` and `>` without any shared classification state.
/// Whitespace always ends a bare token, whatever the stop set holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StopSet {
    delim: Option<char>,
    close: Option<char>,
}

impl StopSet {
    /// Stop set for top-level values: only whitespace and end of input end a token.
    pub const NONE: StopSet = StopSet {
        delim: None,
        close: None,
    };

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.delim == Some(ch) || self.close == Some(ch)
    }

    /// Returns `true` if `ch` ends a bare token.
    #[must_use]
    pub fn ends_token(&self, ch: char) -> bool {
        ch.is_whitespace() || self.contains(ch)
    }
}
