//! Lazy, single-pass element decoding.
//!
//! [`ElementSeq`] drives a [`FormatChecker`] one step at a time and yields
//! each decoded element. It is live from the moment it is constructed: the
//! first element (or the immediate close) is read eagerly, and every call to
//! `next` returns the element read so far while looking one element ahead.
//!
//! ```rust
//! use container_codec::{Deserializer, Shape};
//!
//! let mut de = Deserializer::from_str("<1,2,3>");
//! let mut seq = de.elements::<u32>(Shape::SEQUENCE).unwrap();
//! assert!(!seq.is_exhausted());
//! let total: u32 = seq.by_ref().map(|r| r.unwrap()).sum();
//! assert_eq!(total, 6);
//! assert!(seq.is_exhausted());
//! ```

use crate::de::Deserializer;
use crate::element::Element;
use crate::format::FormatSpec;
use crate::reader::FormatChecker;
use crate::Result;
use std::iter::FusedIterator;

/// A finite, non-restartable producer of decoded container elements.
///
/// Yields `Ok(element)` for each element in input order. A malformed
/// container yields a single `Err` after the elements read before it, and
/// then ends.
pub struct ElementSeq<'a, 'de, T> {
    checker: FormatChecker<'a, 'de>,
    lookahead: Option<Result<T>>,
}

impl<'a, 'de, T: Element> ElementSeq<'a, 'de, T> {
    /// Starts reading a container in `spec`'s format at the cursor.
    ///
    /// Leading whitespace is skipped unless the open character is itself
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StreamFailed`] if the stream has failed, or
    /// [`crate::Error::DepthLimitExceeded`] if the nesting limit is reached.
    /// Malformed input is reported through the iterator.
    pub fn new(de: &'a mut Deserializer<'de>, spec: FormatSpec) -> Result<Self> {
        de.ensure_not_failed()?;
        if !spec.open.is_whitespace() {
            de.skip_whitespace();
        }
        let checker = FormatChecker::new(de, spec)?;
        let mut seq = ElementSeq {
            checker,
            lookahead: None,
        };
        seq.lookahead = seq.advance();
        Ok(seq)
    }

    /// Returns `true` once the reader consumed the close token or failed.
    ///
    /// A failure still comes out of `next` once after this turns `true`.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.checker.state().is_terminal()
    }

    fn advance(&mut self) -> Option<Result<T>> {
        if self.checker.state().is_terminal() {
            return None;
        }
        self.checker.step::<T>().transpose()
    }
}

impl<T: Element> Iterator for ElementSeq<'_, '_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.lookahead.take()?;
        if current.is_ok() {
            self.lookahead = self.advance();
        }
        Some(current)
    }
}

impl<T: Element> FusedIterator for ElementSeq<'_, '_, T> {}
