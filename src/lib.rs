//! # container_codec
//!
//! A format-aware text codec for homogeneous and pair-like containers.
//!
//! ## What does it do?
//!
//! Containers are written as `open elem (delim elem)* close`, with the three
//! structural characters chosen per container shape:
//!
//! | Container | Text |
//! |-----------|------|
//! | `Vec<i32>` | `<1,2,3>` |
//! | `LinkedList<i32>` | `[1,2,3]` |
//! | `HashSet<i32>` | `{1,2,3}` |
//! | `HashMap<i32, i32>` | `{(1,2),(3,4)}` |
//! | `(i32, i32)` | `(1,2)` |
//!
//! Reading validates the structure as it goes and reports malformed input
//! with typed errors carrying line and column information.
//!
//! ## Key Features
//!
//! - **Symmetric**: `from_str(&to_string(&x)?)? == x` for every supported shape
//! - **Pluggable formats**: shapes map to brackets through a [`FormatRegistry`],
//!   and new shapes are registered rather than special-cased
//! - **Lazy reading**: [`ElementSeq`] decodes one element per step, single pass
//! - **No shared state**: element parsers get the enclosing delimiters as an
//!   explicit [`StopSet`], so concurrent decodes never interfere
//!
//! ## Quick Start
//!
//! ```rust
//! use container_codec::{from_str, to_string};
//! use std::collections::HashMap;
//!
//! let numbers = vec![1, 2, 3];
//! let text = to_string(&numbers).unwrap();
//! assert_eq!(text, "<1,2,3>");
//! assert_eq!(from_str::<Vec<i32>>(&text).unwrap(), numbers);
//!
//! let map: HashMap<i32, i32> = from_str("{(1,2),(3,4)}").unwrap();
//! assert_eq!(map[&1], 2);
//!
//! let pair = (vec![1, 2], vec![3, 4]);
//! assert_eq!(to_string(&pair).unwrap(), "(<1,2>,<3,4>)");
//! ```
//!
//! ## Custom Formats
//!
//! ```rust
//! use container_codec::{to_string_with_options, CodecOptions, FormatSpec, Shape};
//!
//! let options = CodecOptions::new().with_format(Shape::SEQUENCE, FormatSpec::new('[', ']', ';'));
//! assert_eq!(to_string_with_options(&vec![1, 2], &options).unwrap(), "[1;2]");
//! ```
//!
//! ## Logging
//!
//! Parser state transitions are logged at `trace` level and parse failures at
//! `debug` level through the [`log`] facade. Nothing is printed unless the
//! application installs a logger.
//!
//! ## Format Specification
//!
//! See [`grammar`] for the full text format.

pub mod container;
pub mod de;
pub mod element;
pub mod error;
pub mod format;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod reader;
pub mod ser;
pub mod seq;

pub use container::Container;
pub use de::Deserializer;
pub use element::Element;
pub use error::{Error, Result};
pub use format::{FormatRegistry, FormatSpec, Shape, StopSet};
pub use options::{CodecOptions, DelimiterPolicy};
pub use reader::{FormatChecker, ParserState};
pub use ser::{SeqWriter, Serializer};
pub use seq::ElementSeq;

use std::io;

/// Encode any `T: Element` to a string using the default formats.
///
/// # Examples
///
/// ```rust
/// use container_codec::to_string;
/// use std::collections::BTreeMap;
///
/// let map: BTreeMap<u8, u8> = [(1, 10), (2, 20)].into_iter().collect();
/// assert_eq!(to_string(&map).unwrap(), "{(1,10),(2,20)}");
/// ```
///
/// # Errors
///
/// Encoding in-memory values only fails if the default registry lacked a
/// shape, which cannot happen for the built-in container types.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Element>(value: &T) -> Result<String> {
    to_string_with_options(value, CodecOptions::shared())
}

/// Encode any `T: Element` to a string with custom options.
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] if a container shape in `value` has no
/// format in `options.registry`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Element>(value: &T, options: &CodecOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    value.encode(&mut serializer, StopSet::NONE)?;
    Ok(serializer.into_inner())
}

/// Encode any `T: Element` to a writer.
///
/// No trailing newline is written.
///
/// # Examples
///
/// ```rust
/// use container_codec::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!['a', 'b']).unwrap();
/// assert_eq!(buffer, b"<a,b>");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Element,
{
    to_writer_with_options(writer, value, CodecOptions::shared())
}

/// Encode any `T: Element` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &CodecOptions) -> Result<()>
where
    W: io::Write,
    T: Element,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decode a `T` from the start of a string.
///
/// Leading whitespace is skipped; anything after the value is ignored. Use
/// [`Deserializer`] to find out where the value ended.
///
/// # Examples
///
/// ```rust
/// use container_codec::from_str;
///
/// let v: Vec<i32> = from_str("  <1,2,3> trailing").unwrap();
/// assert_eq!(v, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a well-formed `T`. Error messages
/// include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: Element>(s: &str) -> Result<T> {
    from_str_with_options(s, CodecOptions::shared())
}

/// Decode a `T` from the start of a string with custom options.
///
/// # Errors
///
/// Returns an error if the input is not a well-formed `T` under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T: Element>(s: &str, options: &CodecOptions) -> Result<T> {
    let mut deserializer = Deserializer::with_options(s, options);
    deserializer.decode()
}

/// Decode a container from a string, inserting elements into `target` as they are read.
///
/// On error, elements decoded before the failure remain in `target`.
///
/// # Examples
///
/// ```rust
/// use container_codec::from_str_into;
///
/// let mut v: Vec<i32> = Vec::new();
/// assert!(from_str_into("<1,2,oops>", &mut v).is_err());
/// assert_eq!(v, vec![1, 2]);
/// ```
///
/// # Errors
///
/// Returns the first structural or element error encountered.
pub fn from_str_into<C: Container>(s: &str, target: &mut C) -> Result<()> {
    let mut deserializer = Deserializer::from_str(s);
    deserializer.decode_into(target)
}

/// Decode a `T` from bytes of text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not a well-formed `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T: Element>(v: &[u8]) -> Result<T> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Decode a `T` from an I/O stream.
///
/// The whole stream is read before decoding starts.
///
/// # Examples
///
/// ```rust
/// use container_codec::from_reader;
/// use std::io::Cursor;
///
/// let v: Vec<u16> = from_reader(Cursor::new(b"<7,8>\n")).unwrap();
/// assert_eq!(v, vec![7, 8]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text is not a well-formed `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Element,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};

    #[test]
    fn test_roundtrip_vec() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "<1,2,3,4,5>");
        let back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, back);
    }

    #[test]
    fn test_roundtrip_map() {
        let mut map = HashMap::new();
        map.insert(1, "one".to_string());
        map.insert(2, "two words".to_string());
        let text = to_string(&map).unwrap();
        let back: HashMap<i32, String> = from_str(&text).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    fn test_nested_set_of_pairs() {
        let set: BTreeSet<(u8, bool)> = [(1, true), (2, false)].into_iter().collect();
        let text = to_string(&set).unwrap();
        assert_eq!(text, "{(1,true),(2,false)}");
        assert_eq!(from_str::<BTreeSet<(u8, bool)>>(&text).unwrap(), set);
    }

    #[test]
    fn test_custom_options() {
        let options = CodecOptions::new()
            .with_format(Shape::SEQUENCE, FormatSpec::new('[', ']', ';'))
            .with_format(Shape::PAIR, FormatSpec::new('<', '>', ':'));
        let value = vec![(1, 2), (3, 4)];
        let text = to_string_with_options(&value, &options).unwrap();
        assert_eq!(text, "[<1:2>;<3:4>]");
        let back: Vec<(i32, i32)> = from_str_with_options(&text, &options).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_from_slice_invalid_utf8() {
        assert!(matches!(
            from_slice::<Vec<u8>>(&[0x3c, 0xff, 0x3e]),
            Err(Error::Custom(_))
        ));
    }
}
