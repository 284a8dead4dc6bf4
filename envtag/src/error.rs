//! Error types for environment variable decoding.

use std::fmt;

/// The kind of value a conversion targeted, as reported in diagnostics.
///
/// Numeric kinds carry the declared bit width so an operator can tell
/// `int[8]` overflow apart from `int[64]` overflow without reading source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Str,
    Bool,
    Int { bits: u32 },
    Uint { bits: u32 },
    Float { bits: u32 },
    Duration,
    List,
    Map,
    /// A user-supplied conversion, labelled by the implementing type.
    Named(&'static str),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Str => f.write_str("string"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int { bits } => write!(f, "int[{bits}]"),
            Kind::Uint { bits } => write!(f, "uint[{bits}]"),
            Kind::Float { bits } => write!(f, "float[{bits}]"),
            Kind::Duration => f.write_str("duration"),
            Kind::List => f.write_str("list"),
            Kind::Map => f.write_str("map"),
            Kind::Named(name) => f.write_str(name),
        }
    }
}

/// A conversion failure, before it has been attributed to a lookup key.
///
/// [`FromEnvValue`](crate::FromEnvValue) implementations return this; the
/// struct walker and the single-key helpers wrap it into [`Error`] together
/// with the key that produced the value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The value does not match the target kind's grammar, or is out of
    /// range for the declared bit width.
    #[error("unable to parse '{value}' as {kind}")]
    Unparseable {
        /// The raw value that failed to convert.
        value: String,
        /// The conversion target.
        kind: Kind,
    },

    /// A map literal pair token did not contain exactly one `:` separator.
    #[error("invalid map entry {token:?}")]
    MapEntry {
        /// The offending pair token, verbatim.
        token: String,
    },
}

/// Errors that can occur when decoding environment variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A participating field's key was absent from the lookup source while
    /// decoding under the required policy.
    #[error("environment variable '{key}' is required but not set")]
    Required {
        /// The resolved lookup key.
        key: String,
    },

    /// A single-key helper found no value.
    #[error("environment variable '{key}' not found")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// A value does not match the target kind's grammar.
    #[error("unable to parse ['{key}'='{value}'] as {kind}")]
    Unparseable {
        /// The resolved lookup key.
        key: String,
        /// The raw value, verbatim.
        value: String,
        /// The conversion target.
        kind: Kind,
    },

    /// A map literal pair token did not contain exactly one `:` separator.
    #[error("invalid map entry {token:?} for '{key}'")]
    MapEntry {
        /// The resolved lookup key.
        key: String,
        /// The offending pair token, verbatim.
        token: String,
    },

    /// A field-level `deserializer` function rejected the value.
    #[error("failed to deserialize environment variable '{key}': {message}")]
    Deserialize {
        /// The resolved lookup key.
        key: String,
        /// The deserializer's own error text.
        message: String,
    },
}

impl Error {
    /// Attribute a conversion failure to the key whose value it rejected.
    pub(crate) fn attributed(key: &str, err: ParseError) -> Self {
        match err {
            ParseError::Unparseable { value, kind } => Error::Unparseable {
                key: key.to_owned(),
                value,
                kind,
            },
            ParseError::MapEntry { token } => Error::MapEntry {
                key: key.to_owned(),
                token,
            },
        }
    }
}
