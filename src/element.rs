//! Per-type element codecs.
//!
//! [`Element`] is implemented by everything that can appear inside a
//! container: numbers, booleans, text, dates, big integers, pairs, and the
//! containers themselves (see [`crate::container`]), which is what makes
//! nesting such as `(<1,2>,<3,4>)` work.
//!
//! Scalars are written with `Display` and read back as bare tokens. Text is
//! written bare when that is unambiguous and double-quoted otherwise:
//!
//! ```rust
//! use container_codec::to_string;
//!
//! let words = vec!["plain".to_string(), "with space".to_string(), "a,b".to_string()];
//! assert_eq!(to_string(&words).unwrap(), r#"<plain,"with space","a,b">"#);
//! ```

use crate::de::Deserializer;
use crate::ser::Serializer;
use crate::{Error, Result, StopSet};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use num_bigint::{BigInt, BigUint};

/// Encoding and decoding rule for one element type.
///
/// `stop` is the stop set of the enclosing container: the characters that
/// end a bare token. Types that write bare tokens must not emit them
/// unescaped; types with their own brackets ignore it.
pub trait Element: Sized {
    /// Appends the text form of `self` to `ser`.
    ///
    /// # Errors
    ///
    /// Fails only if a nested shape has no registered format.
    fn encode(&self, ser: &mut Serializer<'_>, stop: StopSet) -> Result<()>;

    /// Reads one value at the cursor of `de`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text at the cursor is not a valid `Self`.
    fn decode(de: &mut Deserializer<'_>, stop: StopSet) -> Result<Self>;
}

crate::scalar_element!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool,
);

crate::scalar_element!(BigInt, BigUint, NaiveDate);

impl Element for String {
    fn encode(&self, ser: &mut Serializer<'_>, stop: StopSet) -> Result<()> {
        ser.write_text(self, stop);
        Ok(())
    }

    fn decode(de: &mut Deserializer<'_>, stop: StopSet) -> Result<Self> {
        de.parse_text(stop)
    }
}

impl Element for char {
    fn encode(&self, ser: &mut Serializer<'_>, stop: StopSet) -> Result<()> {
        let mut buf = [0u8; 4];
        ser.write_text(self.encode_utf8(&mut buf), stop);
        Ok(())
    }

    fn decode(de: &mut Deserializer<'_>, stop: StopSet) -> Result<Self> {
        let (line, col) = (de.line(), de.column());
        let text = de.parse_text(stop)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(Error::element_decode(
                line,
                col,
                "char",
                format!("expected a single character, found {:?}", text),
            )),
        }
    }
}

/// Timestamps are written in RFC 3339 form, quoted if a stop character such
/// as `:` or `-` is in use.
impl Element for DateTime<Utc> {
    fn encode(&self, ser: &mut Serializer<'_>, stop: StopSet) -> Result<()> {
        ser.write_token(&self.to_rfc3339_opts(SecondsFormat::AutoSi, true), stop);
        Ok(())
    }

    fn decode(de: &mut Deserializer<'_>, stop: StopSet) -> Result<Self> {
        de.parse_token_with(stop, "DateTime<Utc>", |token| {
            DateTime::parse_from_rfc3339(token).map(|dt| dt.with_timezone(&Utc))
        })
    }
}

impl<A: Element, B: Element> Element for (A, B) {
    fn encode(&self, ser: &mut Serializer<'_>, _stop: StopSet) -> Result<()> {
        ser.write_pair(&self.0, &self.1)
    }

    fn decode(de: &mut Deserializer<'_>, _stop: StopSet) -> Result<Self> {
        de.decode_pair()
    }
}
