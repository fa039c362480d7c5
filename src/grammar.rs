//! Container Text Format
//!
//! This module documents the text format read and written by this crate.
//!
//! # Grammar
//!
//! Every container shape shares one grammar, parameterized by the three
//! characters of its [`FormatSpec`](crate::FormatSpec):
//!
//! ```text
//! container := ws* open ( element ( delim element )* )? close
//! element   := ws* ( container | pair | quoted | bare )
//! pair      := ws* popen element pdelim element pclose
//! bare      := any run of characters up to whitespace, the enclosing delim
//!              or close, or end of input
//! quoted    := '"' ( char | escape )* '"'
//! ```
//!
//! Structural characters (open, close, delimiter) are matched exactly at the
//! cursor: whitespace is allowed before an element or before a container's
//! open token, but not in front of a delimiter or close token.
//!
//! ```text
//! <1, 2, 3>     ok
//! < 1,2>        ok
//! <1 ,2>        MalformedDelimiter
//! <1,2 >        MalformedDelimiter
//! ```
//!
//! # Default Formats
//!
//! | Shape | Open | Close | Delim | Example |
//! |-------|------|-------|-------|---------|
//! | sequence | `<` | `>` | `,` | `<1,2,3>` |
//! | linked sequence | `[` | `]` | `,` | `[1,2,3]` |
//! | set | `{` | `}` | `,` | `{1,2,3}` |
//! | mapping | `{` | `}` | `,` | `{(1,2),(3,4)}` |
//! | pair | `(` | `)` | `,` | `(1,2)` |
//!
//! Mapping entries are pairs, written in the pair format independent of the
//! mapping's own brackets. Containers nest: `(<1,2>,<3,4>)` is a pair of two
//! sequences.
//!
//! # Elements
//!
//! | Type | Text |
//! |------|------|
//! | Integers, floats, `bool` | `Display` form: `42`, `-1.5`, `true` |
//! | `BigInt`, `BigUint` | Decimal digits of any length |
//! | `NaiveDate` | `2024-01-15` |
//! | `DateTime<Utc>` | RFC 3339: `2024-01-15T10:30:00Z` |
//! | `String`, `char` | Bare when unambiguous, otherwise quoted |
//!
//! Scalars follow the same quoting rule as text, so `2024-01-15` is written
//! `"2024-01-15"` inside a container whose delimiter is `-`.
//!
//! Text is quoted when it is empty, starts with `"`, or contains whitespace,
//! control characters, `"`, `\`, or the enclosing container's delimiter or
//! close character. Quoted text supports these escapes:
//!
//! ```text
//! \"  - quote
//! \\  - backslash
//! \n  - newline
//! \r  - carriage return
//! \t  - tab
//! \b  - backspace
//! \f  - form feed
//! \0  - null character
//! \uXXXX - Unicode codepoint (4 hex digits)
//! ```
//!
//! # Delimiters
//!
//! A delimiter is written between elements only. Reading is lenient by
//! default and skips redundant delimiters in front of an element:
//!
//! ```text
//! <1,,2>   -> [1, 2]
//! <,1>     -> [1]
//! <1,>     ElementDecode (a value must follow a delimiter)
//! ```
//!
//! [`DelimiterPolicy::Strict`](crate::DelimiterPolicy::Strict) rejects the
//! first two with `MalformedDelimiter`.
//!
//! # Trailing Input
//!
//! Decoding stops right after the outermost close token. Anything after it
//! is left unread and available through
//! [`Deserializer::remaining`](crate::Deserializer::remaining).
