//! Structural token validation for one container read.
//!
//! A [`FormatChecker`] consumes the open, close and delimiter characters of a
//! single container from a [`Deserializer`], tracking which token may come
//! next in a [`ParserState`]. Element values in between are delegated to the
//! element type's [`Element::decode`] with the container's [`StopSet`].
//!
//! The checker only ever looks one character ahead and matches structural
//! characters exactly at the cursor; whitespace is tolerated before element
//! values only.
//!
//! Every checker holds one level of the stream's nesting budget, released
//! when it is dropped.
//!
//! [`StopSet`]: crate::StopSet

use crate::de::Deserializer;
use crate::element::Element;
use crate::format::FormatSpec;
use crate::options::DelimiterPolicy;
use crate::{Error, Result};

/// Position of a [`FormatChecker`] within a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
    /// The open token has not been read yet.
    NeedOpen,
    /// Inside the container, before the first element or after a delimiter.
    NeedElementOrClose,
    /// After an element; a delimiter or the close token must follow.
    NeedDelimOrClose,
    /// The close token was consumed.
    Done,
    /// Malformed input was found; the stream has been marked failed.
    Errored,
}

impl ParserState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParserState::Done | ParserState::Errored)
    }
}

/// Validates the structural tokens of one container against a [`FormatSpec`].
pub struct FormatChecker<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    spec: FormatSpec,
    state: ParserState,
}

impl<'a, 'de> FormatChecker<'a, 'de> {
    /// Creates a checker that still has to read the open token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthLimitExceeded`] if the stream is already nested
    /// as deep as its options allow.
    pub fn new(de: &'a mut Deserializer<'de>, spec: FormatSpec) -> Result<Self> {
        de.enter_scope()?;
        log::trace!(
            "container {}..{} opened at depth {}",
            spec.open,
            spec.close,
            de.depth()
        );
        Ok(FormatChecker {
            de,
            spec,
            state: ParserState::NeedOpen,
        })
    }

    /// Creates a checker for a container whose open token the caller already consumed.
    ///
    /// # Errors
    ///
    /// Same as [`FormatChecker::new`].
    pub fn with_open_consumed(de: &'a mut Deserializer<'de>, spec: FormatSpec) -> Result<Self> {
        let mut checker = Self::new(de, spec)?;
        checker.state = ParserState::NeedElementOrClose;
        Ok(checker)
    }

    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state
    }

    #[must_use]
    pub fn spec(&self) -> FormatSpec {
        self.spec
    }

    /// Consumes the open token if it is still required.
    ///
    /// Returns `false`, leaving state and stream untouched, if the open token
    /// is required but the next character is something else.
    pub fn read_open_if_needed(&mut self) -> bool {
        if self.state != ParserState::NeedOpen {
            return true;
        }
        if self.de.eat_char(self.spec.open) {
            self.transition(ParserState::NeedElementOrClose);
            true
        } else {
            false
        }
    }

    /// Consumes the close token if it is next.
    pub fn try_close(&mut self) -> bool {
        if self.de.eat_char(self.spec.close) {
            self.transition(ParserState::Done);
            true
        } else {
            false
        }
    }

    /// Consumes a delimiter if one is required before the next element.
    ///
    /// No delimiter is required before the first element.
    pub fn read_delim_if_needed(&mut self) -> bool {
        if self.state != ParserState::NeedDelimOrClose {
            return true;
        }
        if self.de.eat_char(self.spec.delim) {
            self.transition(ParserState::NeedElementOrClose);
            true
        } else {
            false
        }
    }

    /// Decodes one element value, after which a delimiter is required.
    ///
    /// Under [`DelimiterPolicy::Lenient`] redundant delimiters in front of the
    /// value are skipped; under [`DelimiterPolicy::Strict`] they are rejected.
    ///
    /// # Errors
    ///
    /// Returns the element's decode error, [`Error::MalformedClose`] if the
    /// input ends before the value, or [`Error::MalformedDelimiter`] for a
    /// rejected stray delimiter. The state is left unchanged.
    pub fn read_element_value<T: Element>(&mut self) -> Result<T> {
        self.skip_stray_delimiters()?;
        if self.de.peek_char().is_none() {
            return Err(Error::malformed_close(
                self.de.line(),
                self.de.column(),
                self.spec.close,
                None,
            ));
        }
        let value = T::decode(self.de, self.spec.stop_set())?;
        self.transition(ParserState::NeedDelimOrClose);
        Ok(value)
    }

    /// Advances by one element: `open? (close | delim? element)`.
    ///
    /// Returns `Ok(None)` once the close token is consumed. Any failure moves
    /// the checker to [`ParserState::Errored`] and marks the stream failed.
    ///
    /// # Errors
    ///
    /// Returns the structural or element error that stopped the read.
    pub fn step<T: Element>(&mut self) -> Result<Option<T>> {
        if !self.read_open_if_needed() {
            return Err(self.fail(|line, col, found, spec| {
                Error::malformed_open(line, col, spec.open, found)
            }));
        }
        if self.try_close() {
            return Ok(None);
        }
        if !self.read_delim_if_needed() {
            return Err(self.fail_missing_delimiter());
        }
        match self.read_element_value::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(self.fail_with(err)),
        }
    }

    /// Reads a complete two-element container: `open first delim second close`.
    ///
    /// # Errors
    ///
    /// Returns the first structural or element error; the checker ends up in
    /// [`ParserState::Errored`] and the stream is marked failed.
    pub fn read_pair<A: Element, B: Element>(&mut self) -> Result<(A, B)> {
        if !self.read_open_if_needed() {
            return Err(self.fail(|line, col, found, spec| {
                Error::malformed_open(line, col, spec.open, found)
            }));
        }
        let first = self.read_element_value::<A>().map_err(|e| self.fail_with(e))?;
        if !self.read_delim_if_needed() {
            return Err(self.fail_missing_delimiter());
        }
        let second = self.read_element_value::<B>().map_err(|e| self.fail_with(e))?;
        if !self.try_close() {
            return Err(self.fail(|line, col, found, spec| {
                Error::malformed_close(line, col, spec.close, found)
            }));
        }
        Ok((first, second))
    }

    fn skip_stray_delimiters(&mut self) -> Result<()> {
        self.de.skip_whitespace();
        match self.de.options().delimiters {
            DelimiterPolicy::Lenient => {
                while let Some(ch) = self.de.peek_char() {
                    if ch == self.spec.delim || ch.is_whitespace() {
                        self.de.next_char();
                    } else {
                        break;
                    }
                }
                Ok(())
            }
            DelimiterPolicy::Strict => {
                if self.de.peek_char() == Some(self.spec.delim) {
                    Err(Error::malformed_delimiter(
                        self.de.line(),
                        self.de.column(),
                        self.spec.delim,
                        Some(self.spec.delim),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// A missing delimiter at end of input means the container was never closed.
    fn fail_missing_delimiter(&mut self) -> Error {
        self.fail(|line, col, found, spec| match found {
            None => Error::malformed_close(line, col, spec.close, None),
            Some(_) => Error::malformed_delimiter(line, col, spec.delim, found),
        })
    }

    fn fail<F>(&mut self, build: F) -> Error
    where
        F: FnOnce(usize, usize, Option<char>, &FormatSpec) -> Error,
    {
        let err = build(
            self.de.line(),
            self.de.column(),
            self.de.peek_char(),
            &self.spec,
        );
        self.fail_with(err)
    }

    fn fail_with(&mut self, err: Error) -> Error {
        log::debug!("container read failed in state {:?}: {}", self.state, err);
        self.state = ParserState::Errored;
        self.de.set_failed();
        err
    }

    fn transition(&mut self, next: ParserState) {
        log::trace!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl Drop for FormatChecker<'_, '_> {
    fn drop(&mut self) {
        self.de.leave_scope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodecOptions, Shape};

    fn sequence() -> FormatSpec {
        FormatSpec::new('<', '>', ',')
    }

    #[test]
    fn test_state_walk() {
        let mut de = Deserializer::from_str("<7,8>");
        let mut checker = FormatChecker::new(&mut de, sequence()).unwrap();
        assert_eq!(checker.state(), ParserState::NeedOpen);
        assert!(checker.read_open_if_needed());
        assert_eq!(checker.state(), ParserState::NeedElementOrClose);
        assert!(!checker.try_close());
        assert!(checker.read_delim_if_needed());
        assert_eq!(checker.read_element_value::<i32>().unwrap(), 7);
        assert_eq!(checker.state(), ParserState::NeedDelimOrClose);
        assert!(checker.read_delim_if_needed());
        assert_eq!(checker.state(), ParserState::NeedElementOrClose);
        assert_eq!(checker.read_element_value::<i32>().unwrap(), 8);
        assert!(checker.try_close());
        assert_eq!(checker.state(), ParserState::Done);
    }

    #[test]
    fn test_open_mismatch_leaves_stream() {
        let mut de = Deserializer::from_str("[1]");
        {
            let mut checker = FormatChecker::new(&mut de, sequence()).unwrap();
            assert!(!checker.read_open_if_needed());
            assert_eq!(checker.state(), ParserState::NeedOpen);
        }
        assert_eq!(de.remaining(), "[1]");
        assert!(!de.is_failed());
    }

    #[test]
    fn test_open_already_consumed() {
        let mut de = Deserializer::from_str("5>");
        let mut checker = FormatChecker::with_open_consumed(&mut de, sequence()).unwrap();
        assert_eq!(checker.step::<u8>().unwrap(), Some(5));
        assert_eq!(checker.step::<u8>().unwrap(), None);
    }

    #[test]
    fn test_step_error_marks_stream_failed() {
        let mut de = Deserializer::from_str("<1 2>");
        {
            let mut checker = FormatChecker::new(&mut de, sequence()).unwrap();
            assert_eq!(checker.step::<i32>().unwrap(), Some(1));
            assert!(matches!(
                checker.step::<i32>(),
                Err(Error::MalformedDelimiter { .. })
            ));
            assert_eq!(checker.state(), ParserState::Errored);
        }
        assert!(de.is_failed());
    }

    #[test]
    fn test_depth_released_on_drop() {
        let options = CodecOptions::new().with_max_depth(1);
        let mut de = Deserializer::with_options("<>", &options);
        let spec = options.registry.lookup(Shape::SEQUENCE).unwrap();
        drop(FormatChecker::new(&mut de, spec).unwrap());
        assert_eq!(de.depth(), 0);
        let checker = FormatChecker::new(&mut de, spec).unwrap();
        drop(checker);
    }

    #[test]
    fn test_input_ending_before_value_is_unclosed() {
        for input in ["<", "<1,", "<1, "] {
            let mut de = Deserializer::from_str(input);
            let mut checker = FormatChecker::new(&mut de, sequence()).unwrap();
            let mut result = checker.step::<i32>();
            while let Ok(Some(_)) = result {
                result = checker.step::<i32>();
            }
            match result {
                Err(Error::MalformedClose { expected, found, .. }) => {
                    assert_eq!(expected, '>');
                    assert_eq!(found, "end of input");
                }
                other => panic!("Expected MalformedClose for {:?}, got {:?}", input, other),
            }
            assert_eq!(checker.state(), ParserState::Errored);
        }
    }

    #[test]
    fn test_truncated_pair_is_unclosed() {
        let spec = FormatSpec::new('(', ')', ',');
        for input in ["(", "(1", "(1,"] {
            let mut de = Deserializer::from_str(input);
            let mut checker = FormatChecker::new(&mut de, spec).unwrap();
            assert_eq!(
                checker.read_pair::<u8, u8>(),
                Err(Error::malformed_close(1, input.len() + 1, ')', None))
            );
        }
    }

    #[test]
    fn test_strict_stray_delimiter_reports_character() {
        let options = CodecOptions::new().with_delimiters(DelimiterPolicy::Strict);
        let mut de = Deserializer::with_options("<,1>", &options);
        let mut checker = FormatChecker::new(&mut de, sequence()).unwrap();
        assert_eq!(
            checker.step::<i32>(),
            Err(Error::malformed_delimiter(1, 2, ',', Some(',')))
        );
    }

    #[test]
    fn test_read_pair() {
        let mut de = Deserializer::from_str("(3,x)");
        let spec = FormatSpec::new('(', ')', ',');
        let mut checker = FormatChecker::new(&mut de, spec).unwrap();
        let pair: (u8, String) = checker.read_pair().unwrap();
        assert_eq!(pair, (3, "x".to_string()));
        assert_eq!(checker.state(), ParserState::Done);
    }
}
