/// Implements [`Element`](crate::Element) for types that round-trip through
/// [`Display`](std::fmt::Display) and [`FromStr`](std::str::FromStr).
///
/// The value is written with `Display` and read back with `FromStr`. The text
/// is written bare, ending at whitespace or the enclosing container's
/// delimiter or close character, and double-quoted when it contains one of
/// those.
///
/// # Examples
///
/// ```rust
/// use container_codec::{from_str, scalar_element, to_string};
/// use std::fmt;
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(i32);
///
/// impl fmt::Display for Celsius {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}C", self.0)
///     }
/// }
///
/// impl FromStr for Celsius {
///     type Err = String;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.strip_suffix('C')
///             .and_then(|n| n.parse().ok())
///             .map(Celsius)
///             .ok_or_else(|| format!("not a temperature: {}", s))
///     }
/// }
///
/// scalar_element!(Celsius);
///
/// let temps = vec![Celsius(-3), Celsius(21)];
/// assert_eq!(to_string(&temps).unwrap(), "<-3C,21C>");
/// assert_eq!(from_str::<Vec<Celsius>>("<-3C,21C>").unwrap(), temps);
/// ```
#[macro_export]
macro_rules! scalar_element {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $ty {
                fn encode(
                    &self,
                    ser: &mut $crate::Serializer<'_>,
                    stop: $crate::StopSet,
                ) -> $crate::Result<()> {
                    ser.write_token(self, stop);
                    Ok(())
                }

                fn decode(
                    de: &mut $crate::Deserializer<'_>,
                    stop: $crate::StopSet,
                ) -> $crate::Result<Self> {
                    de.parse_token::<$ty>(stop)
                }
            }
        )+
    };
}
