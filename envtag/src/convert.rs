//! Built-in string-to-value conversions.
//!
//! Every leaf field a walker decodes goes through [`FromEnvValue`]. The
//! built-in implementations form a closed set of per-kind handlers: scalars,
//! durations, sequences, maps, and optional/boxed wrappers. Implementing the
//! trait for your own type registers a new handler and fully replaces the
//! built-in rules for fields of that type.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::time::Duration;

use crate::error::{Kind, ParseError};

/// Conversion from one raw environment value into a typed field value.
///
/// The conversion is a pure function of the raw string; it knows nothing
/// about structs, attributes, or lookup keys. List and map implementations
/// recurse through the same trait for their elements.
///
/// # Custom types
///
/// Implementing `FromEnvValue` for your own type makes it decodable as a
/// leaf, even if it is a struct. This is the override hook: there is no
/// built-in rule left to consult for such a field.
///
/// ```rust
/// use envtag::{FromEnvValue, Kind, ParseError};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct LogLevel(u8);
///
/// impl FromEnvValue for LogLevel {
///     const KIND: Kind = Kind::Named("log level");
///
///     fn from_env_value(raw: &str) -> Result<Self, ParseError> {
///         match raw {
///             "error" => Ok(LogLevel(0)),
///             "warn" => Ok(LogLevel(1)),
///             "info" => Ok(LogLevel(2)),
///             "debug" => Ok(LogLevel(3)),
///             _ => Err(ParseError::Unparseable {
///                 value: raw.to_owned(),
///                 kind: Self::KIND,
///             }),
///         }
///     }
/// }
///
/// assert_eq!(LogLevel::from_env_value("warn"), Ok(LogLevel(1)));
/// ```
pub trait FromEnvValue: Sized {
    /// Kind tag used in diagnostics.
    const KIND: Kind;

    /// Convert one raw environment value.
    fn from_env_value(raw: &str) -> Result<Self, ParseError>;

    /// Convert a list literal whose elements have this type.
    ///
    /// The default splits the raw value on `,` and converts each piece.
    /// `u8` overrides it so `Vec<u8>` fields receive the raw value's bytes
    /// verbatim, uninterpreted by the delimiter rule.
    #[doc(hidden)]
    fn from_env_list(raw: &str) -> Result<Vec<Self>, ParseError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        raw.split(',').map(Self::from_env_value).collect()
    }
}

impl FromEnvValue for String {
    const KIND: Kind = Kind::Str;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        Ok(raw.to_owned())
    }
}

impl FromEnvValue for bool {
    const KIND: Kind = Kind::Bool;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(ParseError::Unparseable {
                value: raw.to_owned(),
                kind: Kind::Bool,
            }),
        }
    }
}

macro_rules! impl_from_env_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl FromEnvValue for $ty {
            const KIND: Kind = Kind::$kind { bits: <$ty>::BITS };

            fn from_env_value(raw: &str) -> Result<Self, ParseError> {
                parse_integer(raw)
                    .and_then(|wide| <$ty>::try_from(wide).ok())
                    .ok_or_else(|| ParseError::Unparseable {
                        value: raw.to_owned(),
                        kind: Self::KIND,
                    })
            }
        }
    )*};
}

impl_from_env_int! {
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    isize => Int,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    usize => Uint,
}

// u8 is implemented by hand so the element hook can route `Vec<u8>` around
// the comma-splitting rule.
impl FromEnvValue for u8 {
    const KIND: Kind = Kind::Uint { bits: 8 };

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        parse_integer(raw)
            .and_then(|wide| u8::try_from(wide).ok())
            .ok_or_else(|| ParseError::Unparseable {
                value: raw.to_owned(),
                kind: Self::KIND,
            })
    }

    fn from_env_list(raw: &str) -> Result<Vec<Self>, ParseError> {
        Ok(raw.as_bytes().to_vec())
    }
}

macro_rules! impl_from_env_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromEnvValue for $ty {
            const KIND: Kind = Kind::Float {
                bits: (::std::mem::size_of::<$ty>() * 8) as u32,
            };

            fn from_env_value(raw: &str) -> Result<Self, ParseError> {
                raw.parse::<$ty>().map_err(|_| ParseError::Unparseable {
                    value: raw.to_owned(),
                    kind: Self::KIND,
                })
            }
        }
    )*};
}

impl_from_env_float!(f32, f64);

impl FromEnvValue for Duration {
    const KIND: Kind = Kind::Duration;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        parse_duration(raw).ok_or_else(|| ParseError::Unparseable {
            value: raw.to_owned(),
            kind: Kind::Duration,
        })
    }
}

impl<T: FromEnvValue> FromEnvValue for Vec<T> {
    const KIND: Kind = Kind::List;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        T::from_env_list(raw)
    }
}

impl<K, V, S> FromEnvValue for HashMap<K, V, S>
where
    K: FromEnvValue + Eq + Hash,
    V: FromEnvValue,
    S: BuildHasher + Default,
{
    const KIND: Kind = Kind::Map;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        let mut map = Self::default();
        if raw.trim().is_empty() {
            return Ok(map);
        }
        for token in raw.split(',') {
            let (key, value) = split_map_entry(token)?;
            map.insert(K::from_env_value(key)?, V::from_env_value(value)?);
        }
        Ok(map)
    }
}

impl<K, V> FromEnvValue for BTreeMap<K, V>
where
    K: FromEnvValue + Ord,
    V: FromEnvValue,
{
    const KIND: Kind = Kind::Map;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        let mut map = Self::new();
        if raw.trim().is_empty() {
            return Ok(map);
        }
        for token in raw.split(',') {
            let (key, value) = split_map_entry(token)?;
            map.insert(K::from_env_value(key)?, V::from_env_value(value)?);
        }
        Ok(map)
    }
}

impl<T: FromEnvValue> FromEnvValue for Option<T> {
    const KIND: Kind = T::KIND;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        T::from_env_value(raw).map(Some)
    }
}

impl<T: FromEnvValue> FromEnvValue for Box<T> {
    const KIND: Kind = T::KIND;

    fn from_env_value(raw: &str) -> Result<Self, ParseError> {
        T::from_env_value(raw).map(Box::new)
    }
}

/// Splits one map pair token, requiring exactly one `:` separator.
fn split_map_entry(token: &str) -> Result<(&str, &str), ParseError> {
    let mut parts = token.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key, value)),
        _ => Err(ParseError::MapEntry {
            token: token.to_owned(),
        }),
    }
}

/// Parses an integer literal with conventional base prefixes.
///
/// Accepts an optional sign, then `0x`/`0X` (hex), `0o`/`0O` (octal),
/// `0b`/`0B` (binary), a legacy leading `0` (octal), or decimal digits.
/// Underscores are permitted between digits. The wide result is range-checked
/// against the destination width by the caller.
fn parse_integer(raw: &str) -> Option<i128> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (radix, digits) = if let Some(rest) = strip_prefix_ci(body, "0x") {
        (16, rest)
    } else if let Some(rest) = strip_prefix_ci(body, "0o") {
        (8, rest)
    } else if let Some(rest) = strip_prefix_ci(body, "0b") {
        (2, rest)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || digits.contains('+')
        || digits.contains('-')
    {
        return None;
    }
    let plain: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = i128::from_str_radix(&plain, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn strip_prefix_ci<'a>(body: &'a str, prefix: &str) -> Option<&'a str> {
    body.strip_prefix(prefix)
        .or_else(|| body.strip_prefix(prefix.to_ascii_uppercase().as_str()))
}

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

/// Parses a compound unit-suffixed duration such as `1h30m`, `1.5s` or
/// `500ms`. A bare `0` is permitted; any other unitless value, the empty
/// string, and negative values are not.
fn parse_duration(raw: &str) -> Option<Duration> {
    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_part, after_int) = rest.split_at(int_end);
        let (frac_part, after_frac) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_end = tail
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(tail.len());
                tail.split_at(frac_end)
            }
            None => ("", after_int),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let unit_end = after_frac
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_frac.len());
        let (unit, tail) = after_frac.split_at(unit_end);
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)?;
        if !int_part.is_empty() {
            let whole: u128 = int_part.parse().ok()?;
            total = total.checked_add(whole.checked_mul(scale)?)?;
        }
        if !frac_part.is_empty() {
            let frac: f64 = format!("0.{frac_part}").parse().ok()?;
            total = total.checked_add((frac * scale as f64) as u128)?;
        }
        rest = tail;
    }
    let secs = u64::try_from(total / 1_000_000_000).ok()?;
    let nanos = (total % 1_000_000_000) as u32;
    Some(Duration::new(secs, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_identity() {
        assert_eq!(
            String::from_env_value("  spaces kept  "),
            Ok("  spaces kept  ".to_owned())
        );
    }

    #[test]
    fn bool_accepts_conventional_spellings() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert_eq!(bool::from_env_value(raw), Ok(true), "{raw}");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(bool::from_env_value(raw), Ok(false), "{raw}");
        }
        assert!(bool::from_env_value("yes").is_err());
        assert!(bool::from_env_value("").is_err());
    }

    #[test]
    fn integer_base_prefixes() {
        assert_eq!(i32::from_env_value("42"), Ok(42));
        assert_eq!(i32::from_env_value("+42"), Ok(42));
        assert_eq!(i32::from_env_value("-42"), Ok(-42));
        assert_eq!(i32::from_env_value("0x1A"), Ok(26));
        assert_eq!(i32::from_env_value("0X1a"), Ok(26));
        assert_eq!(i32::from_env_value("0o17"), Ok(15));
        assert_eq!(i32::from_env_value("017"), Ok(15));
        assert_eq!(i32::from_env_value("0b101"), Ok(5));
        assert_eq!(i32::from_env_value("1_000_000"), Ok(1_000_000));
        assert_eq!(i32::from_env_value("0"), Ok(0));
    }

    #[test]
    fn integer_rejects_malformed_literals() {
        for raw in ["", " 1", "1 ", "abc", "0x", "08", "1__0", "_1", "1_", "0x-5", "--1"] {
            assert!(i64::from_env_value(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn integer_range_checks_declared_width() {
        assert_eq!(i8::from_env_value("127"), Ok(127));
        assert_eq!(
            i8::from_env_value("128"),
            Err(ParseError::Unparseable {
                value: "128".into(),
                kind: Kind::Int { bits: 8 },
            })
        );
        assert_eq!(i8::from_env_value("-128"), Ok(-128));
        assert!(i8::from_env_value("-129").is_err());
        assert_eq!(u8::from_env_value("255"), Ok(255));
        assert!(u8::from_env_value("256").is_err());
        assert!(u16::from_env_value("-1").is_err());
        assert_eq!(u64::from_env_value("18446744073709551615"), Ok(u64::MAX));
        assert!(u64::from_env_value("18446744073709551616").is_err());
    }

    #[test]
    fn float_parses_decimal_and_exponential() {
        assert_eq!(f64::from_env_value("3.25"), Ok(3.25));
        assert_eq!(f32::from_env_value("1e3"), Ok(1000.0));
        assert_eq!(
            f32::from_env_value("x"),
            Err(ParseError::Unparseable {
                value: "x".into(),
                kind: Kind::Float { bits: 32 },
            })
        );
    }

    #[test]
    fn duration_compound_grammar() {
        assert_eq!(
            Duration::from_env_value("1h30m"),
            Ok(Duration::from_secs(5400))
        );
        assert_eq!(
            Duration::from_env_value("500ms"),
            Ok(Duration::from_millis(500))
        );
        assert_eq!(
            Duration::from_env_value("1.5s"),
            Ok(Duration::from_millis(1500))
        );
        assert_eq!(
            Duration::from_env_value("2h45m30s"),
            Ok(Duration::from_secs(2 * 3600 + 45 * 60 + 30))
        );
        assert_eq!(Duration::from_env_value("250ns"), Ok(Duration::from_nanos(250)));
        assert_eq!(Duration::from_env_value("3µs"), Ok(Duration::from_micros(3)));
        assert_eq!(Duration::from_env_value("0"), Ok(Duration::ZERO));
        assert_eq!(Duration::from_env_value("+2s"), Ok(Duration::from_secs(2)));
    }

    #[test]
    fn duration_rejects_unitless_and_negative_values() {
        for raw in ["", "300", "h", "1x", "-5s", "1h 30m", "1.s."] {
            assert!(Duration::from_env_value(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn list_splits_on_commas_in_order() {
        assert_eq!(
            Vec::<String>::from_env_value("one,two"),
            Ok(vec!["one".to_owned(), "two".to_owned()])
        );
        assert_eq!(
            Vec::<i32>::from_env_value("1,2,3"),
            Ok(vec![1, 2, 3])
        );
    }

    #[test]
    fn empty_list_literal_yields_empty_vec() {
        assert_eq!(Vec::<String>::from_env_value(""), Ok(Vec::new()));
        assert_eq!(Vec::<i32>::from_env_value("   "), Ok(Vec::new()));
    }

    #[test]
    fn list_element_failure_carries_the_element_error() {
        assert_eq!(
            Vec::<i32>::from_env_value("1,x,3"),
            Err(ParseError::Unparseable {
                value: "x".into(),
                kind: Kind::Int { bits: 32 },
            })
        );
    }

    #[test]
    fn byte_vectors_take_the_raw_value_verbatim() {
        assert_eq!(
            Vec::<u8>::from_env_value("one,two"),
            Ok(b"one,two".to_vec())
        );
        assert_eq!(Vec::<u8>::from_env_value(""), Ok(Vec::new()));
        assert_eq!(Vec::<u8>::from_env_value("  "), Ok(b"  ".to_vec()));
    }

    #[test]
    fn map_pairs_split_on_single_colon() {
        let map = HashMap::<String, i32>::from_env_value("one:1,two:2").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["one"], 1);
        assert_eq!(map["two"], 2);
    }

    #[test]
    fn empty_map_literal_yields_empty_map() {
        let map = HashMap::<String, String>::from_env_value(" ").unwrap();
        assert!(map.is_empty());
        let map = BTreeMap::<String, String>::from_env_value("").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn map_duplicate_keys_last_occurrence_wins() {
        let map = HashMap::<String, i32>::from_env_value("a:1,a:2").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], 2);
    }

    #[test]
    fn map_entry_without_exactly_one_separator_fails() {
        assert_eq!(
            HashMap::<String, String>::from_env_value("a:b,c"),
            Err(ParseError::MapEntry { token: "c".into() })
        );
        assert_eq!(
            HashMap::<String, String>::from_env_value("a:b:c"),
            Err(ParseError::MapEntry {
                token: "a:b:c".into()
            })
        );
    }

    #[test]
    fn map_sides_convert_by_their_own_types() {
        let map = BTreeMap::<i32, bool>::from_env_value("1:true,2:false").unwrap();
        assert_eq!(map[&1], true);
        assert_eq!(map[&2], false);
        assert!(BTreeMap::<i32, bool>::from_env_value("x:true").is_err());
    }

    #[test]
    fn optional_and_boxed_values_wrap_the_inner_conversion() {
        assert_eq!(Option::<u16>::from_env_value("8080"), Ok(Some(8080)));
        assert_eq!(Box::<i64>::from_env_value("-9"), Ok(Box::new(-9)));
        assert_eq!(
            Option::<u16>::from_env_value("x"),
            Err(ParseError::Unparseable {
                value: "x".into(),
                kind: Kind::Uint { bits: 16 },
            })
        );
    }
}
