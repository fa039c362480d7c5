//! Error types for container encoding and decoding.
//!
//! Decoding errors carry the line and column where the problem was detected,
//! along with the character the reader expected and what it found instead.
//!
//! ## Error Categories
//!
//! - **Structural errors**: missing open, close or delimiter tokens
//! - **Element errors**: an element's own text could not be parsed
//! - **Registry errors**: unknown shapes or formats with clashing characters
//! - **I/O errors**: failures of the underlying reader or writer
//!
//! ## Examples
//!
//! ```rust
//! use container_codec::{from_str, Error};
//!
//! let result: Result<Vec<i32>, Error> = from_str("1,2,3>");
//! assert!(matches!(result, Err(Error::MalformedOpen { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding containers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The expected open token was not found at the current position
    #[error("Malformed container at line {line}, column {col}: expected '{expected}' to open, found {found}")]
    MalformedOpen {
        line: usize,
        col: usize,
        expected: char,
        found: String,
    },

    /// The input ended, or an unexpected token appeared, where the close token was expected
    #[error("Malformed container at line {line}, column {col}: expected '{expected}' to close, found {found}")]
    MalformedClose {
        line: usize,
        col: usize,
        expected: char,
        found: String,
    },

    /// A required delimiter between two elements is missing, or a delimiter
    /// appeared where the strict policy forbids one
    #[error("Malformed container at line {line}, column {col}: expected delimiter '{expected}', found {found}")]
    MalformedDelimiter {
        line: usize,
        col: usize,
        expected: char,
        found: String,
    },

    /// The element's own text could not be parsed as the element type
    #[error("Failed to decode {type_name} at line {line}, column {col}: {msg}")]
    ElementDecode {
        line: usize,
        col: usize,
        type_name: String,
        msg: String,
    },

    /// No format is registered for the requested shape
    #[error("Unsupported shape: no format registered for '{0}'")]
    UnsupportedShape(String),

    /// A registered format reuses a character across open, close and delimiter
    #[error("Invalid format for '{shape}': open '{open}', close '{close}' and delimiter '{delim}' must be distinct")]
    InvalidFormat {
        shape: String,
        open: char,
        close: char,
        delim: char,
    },

    /// A keyed operation assumed one key set was a subset of another
    #[error("Key mismatch: {0}")]
    KeyMismatch(String),

    /// Containers are nested deeper than the configured limit
    #[error("Nesting depth limit of {limit} exceeded at line {line}, column {col}")]
    DepthLimitExceeded { line: usize, col: usize, limit: usize },

    /// A previous read on this stream failed and the failure was not cleared
    #[error("Input stream is in a failed state")]
    StreamFailed,

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a missing-open error. `found` is the peeked character, `None` at end of input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use container_codec::Error;
    ///
    /// let err = Error::malformed_open(1, 1, '<', Some('1'));
    /// assert!(err.to_string().contains("expected '<'"));
    /// ```
    pub fn malformed_open(line: usize, col: usize, expected: char, found: Option<char>) -> Self {
        Error::MalformedOpen {
            line,
            col,
            expected,
            found: describe(found),
        }
    }

    /// Creates a missing-close error.
    pub fn malformed_close(line: usize, col: usize, expected: char, found: Option<char>) -> Self {
        Error::MalformedClose {
            line,
            col,
            expected,
            found: describe(found),
        }
    }

    /// Creates a delimiter error.
    pub fn malformed_delimiter(
        line: usize,
        col: usize,
        expected: char,
        found: Option<char>,
    ) -> Self {
        Error::MalformedDelimiter {
            line,
            col,
            expected,
            found: describe(found),
        }
    }

    /// Creates an element decode error for the element type `type_name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use container_codec::Error;
    ///
    /// let err = Error::element_decode(2, 7, "i32", "invalid digit found in string");
    /// assert!(err.to_string().contains("Failed to decode i32"));
    /// ```
    pub fn element_decode<T: fmt::Display>(line: usize, col: usize, type_name: &str, msg: T) -> Self {
        Error::ElementDecode {
            line,
            col,
            type_name: type_name.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported shape error.
    pub fn unsupported_shape(shape: &str) -> Self {
        Error::UnsupportedShape(shape.to_string())
    }

    /// Creates a key mismatch error.
    pub fn key_mismatch<T: fmt::Display>(msg: T) -> Self {
        Error::KeyMismatch(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader or writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors caused by the container's structural tokens.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MalformedOpen { .. }
                | Error::MalformedClose { .. }
                | Error::MalformedDelimiter { .. }
        )
    }
}

fn describe(found: Option<char>) -> String {
    match found {
        Some(ch) => format!("{:?}", ch),
        None => "end of input".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
