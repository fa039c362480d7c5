//! Configuration options for encoding and decoding.
//!
//! - [`CodecOptions`]: the registry, delimiter policy and nesting limit
//! - [`DelimiterPolicy`]: how stray delimiters are treated while decoding
//!
//! ## Examples
//!
//! ```rust
//! use container_codec::{from_str_with_options, CodecOptions, DelimiterPolicy};
//!
//! let lenient: Vec<i32> = container_codec::from_str("<1,,2>").unwrap();
//! assert_eq!(lenient, vec![1, 2]);
//!
//! let options = CodecOptions::new().with_delimiters(DelimiterPolicy::Strict);
//! assert!(from_str_with_options::<Vec<i32>>("<1,,2>", &options).is_err());
//! ```

use crate::format::{FormatRegistry, FormatSpec, Shape};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Treatment of delimiters that appear where an element is expected.
///
/// # Examples
///
/// ```rust
/// use container_codec::DelimiterPolicy;
///
/// assert_eq!(DelimiterPolicy::default(), DelimiterPolicy::Lenient);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterPolicy {
    /// Skip redundant delimiters before an element, so `<1,,2>` and `<,1>`
    /// decode as `[1, 2]` and `[1]`.
    #[default]
    Lenient,
    /// Reject a delimiter where an element is expected.
    Strict,
}

/// Configuration for encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use container_codec::{CodecOptions, FormatSpec, Shape};
///
/// let options = CodecOptions::new()
///     .with_format(Shape::SEQUENCE, FormatSpec::new('[', ']', ';'))
///     .with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub registry: FormatRegistry,
    pub delimiters: DelimiterPolicy,
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            registry: FormatRegistry::default(),
            delimiters: DelimiterPolicy::default(),
            max_depth: 128,
        }
    }
}

impl CodecOptions {
    /// Creates default options: the built-in formats, lenient delimiters, depth 128.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared default options used by the crate-level entry points.
    pub(crate) fn shared() -> &'static CodecOptions {
        static DEFAULT: OnceLock<CodecOptions> = OnceLock::new();
        DEFAULT.get_or_init(CodecOptions::default)
    }

    /// Replaces the whole format registry.
    #[must_use]
    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Registers `spec` for `shape`, replacing any existing format.
    #[must_use]
    pub fn with_format(mut self, shape: Shape, spec: FormatSpec) -> Self {
        self.registry.register(shape, spec);
        self
    }

    #[must_use]
    pub fn with_delimiters(mut self, policy: DelimiterPolicy) -> Self {
        self.delimiters = policy;
        self
    }

    /// Sets the maximum container nesting accepted while decoding.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_partial_json() {
        let options: CodecOptions =
            serde_json::from_str(r#"{"delimiters":"strict","max_depth":4}"#).unwrap();
        assert_eq!(options.delimiters, DelimiterPolicy::Strict);
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.registry, FormatRegistry::default());
    }

    #[test]
    fn test_with_format() {
        let options =
            CodecOptions::new().with_format(Shape::PAIR, FormatSpec::new('[', ']', ':'));
        assert_eq!(options.registry.lookup(Shape::PAIR).unwrap().delim, ':');
    }
}
