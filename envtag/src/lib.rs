//! Tag-driven environment variable decoding into plain structs
//!
//! `envtag` populates the fields of an existing struct value from
//! environment variables, matching attribute-declared keys to variable names
//! and converting each textual value into the field's native type. No
//! hand-written parsing per field, no intermediate representation.
//!
//! # Features
//!
//! - **Declarative**: field-to-key mapping with `#[derive(EnvDecode)]`
//! - **Type-directed**: conversion is chosen by the field's type, including
//!   lists, maps, durations and optional values
//! - **In-place**: decodes into a `&mut` destination, so defaults are
//!   whatever the destination already holds
//! - **Injected lookup**: the environment is behind the [`Lookup`] trait;
//!   any string map can stand in for it
//! - **Extensible**: implement [`FromEnvValue`] for your own leaf types, or
//!   name a `deserializer` function per field
//!
//! # Value Parsing
//!
//! One flat textual encoding per field:
//!
//! - Strings: `DATABASE_URL=postgres://localhost/db` (verbatim)
//! - Booleans: `DEBUG=true` (also `1/t/T/TRUE/True` and the `false` family)
//! - Integers: `PORT=8080`, with `0x`/`0o`/`0b`/leading-`0` base prefixes,
//!   range-checked against the field's exact width
//! - Floats: `RATIO=0.75`, decimal or exponential
//! - Durations: `TIMEOUT=1h30m` (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`)
//! - Lists: `HOSTS=a.example,b.example` (comma-separated; `Vec<u8>` takes
//!   the raw bytes verbatim instead)
//! - Maps: `LIMITS=read:10,write:2` (comma-separated `key:value` pairs)
//!
//! There is no escaping mechanism for literal `,` or `:` inside list and map
//! tokens.
//!
//! # Example
//!
//! ```rust
//! use envtag::{EnvDecode, FromEnv};
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct Config {
//!     #[env(key = "PORT")]
//!     port: u16,
//!
//!     #[env(key = "HOSTS")]
//!     hosts: Vec<String>,
//!
//!     #[env(key = "TIMEOUT")]
//!     timeout: std::time::Duration,
//! }
//!
//! # fn main() -> Result<(), envtag::Error> {
//! std::env::set_var("PORT", "8080");
//! std::env::set_var("HOSTS", "a.example,b.example");
//! std::env::set_var("TIMEOUT", "2m30s");
//!
//! let config = Config::from_env()?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.hosts, vec!["a.example", "b.example"]);
//! assert_eq!(config.timeout, std::time::Duration::from_secs(150));
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(key = "NAME")]`
//!
//! The lookup key for the field under the default `env` tag namespace.
//! `key = "-"` excludes the field entirely; `key = ""` is a valid literal
//! key (looked up verbatim); a field with no `#[env(...)]` attribute never
//! participates. Keys are not trimmed or case-folded.
//!
//! ## `#[env(tag(ns = "NAME", ...))]`
//!
//! Keys under alternate tag namespaces, selected at decode time through
//! [`Options::tag`]:
//!
//! ```rust
//! use envtag::{EnvDecode, Options};
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct Config {
//!     #[env(key = "PORT", tag(deploy = "DEPLOY_PORT"))]
//!     port: u16,
//! }
//!
//! # fn main() -> Result<(), envtag::Error> {
//! std::env::set_var("DEPLOY_PORT", "9090");
//! let mut config = Config::default();
//! envtag::decode_with(&mut config, &[Options { tag: "deploy".into(), ..Options::default() }])?;
//! assert_eq!(config.port, 9090);
//! # Ok(())
//! # }
//! ```
//!
//! ## `#[env(nested)]`
//!
//! Recurse into a struct-typed field with the same options. `Option<T>`
//! nesting is allocated with `Default::default()` before the recursion:
//!
//! ```rust
//! use envtag::{EnvDecode, FromEnv};
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct Redis {
//!     #[env(key = "REDIS_URL")]
//!     url: String,
//! }
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct Config {
//!     #[env(nested)]
//!     redis: Redis,
//! }
//!
//! # fn main() -> Result<(), envtag::Error> {
//! std::env::set_var("REDIS_URL", "redis://localhost");
//! let config = Config::from_env()?;
//! assert_eq!(config.redis.url, "redis://localhost");
//! # Ok(())
//! # }
//! ```
//!
//! ## `#[env(key = "NAME", deserializer = "function")]`
//!
//! A per-field conversion function `fn(&str) -> Result<T, E>` that replaces
//! the built-in rules for that field — JSON via
//! `deserializer = "serde_json::from_str"`, or anything you define.
//!
//! # Decode policy
//!
//! [`Options`] carries the tag namespace and the required policy. Overrides
//! merge left to right; a required field whose key is absent fails with
//! [`Error::Required`], a lenient one is left untouched. On the first
//! failing field the decode returns immediately — fields processed earlier
//! keep their new values (decode into a scratch value and assign on success
//! if you need atomicity).

mod convert;
mod error;
mod options;
mod source;

#[doc(hidden)]
pub mod de;

pub use convert::FromEnvValue;
pub use error::{Error, Kind, ParseError};
pub use options::{Options, DEFAULT_TAG};
pub use source::{Lookup, ProcessEnv};

pub use envtag_derive::EnvDecode;

/// A destination whose fields can be populated from a lookup source.
///
/// Implemented via `#[derive(EnvDecode)]`; the generated walker visits
/// fields in declaration order, depth-first through `nested` fields, and
/// mutates the destination in place.
pub trait EnvDecode {
    /// Populate `self` from `source` under fully-resolved `options`.
    fn decode_from<L: Lookup + ?Sized>(
        &mut self,
        source: &L,
        options: &Options,
    ) -> Result<(), Error>;
}

/// Construction entry points for destinations with a `Default`.
///
/// # Errors
///
/// - A required environment variable is not set
/// - An environment variable value cannot be converted to the field's type
pub trait FromEnv: EnvDecode + Default {
    /// Builds a default value and populates it from the process environment.
    fn from_env() -> Result<Self, Error> {
        Self::from_env_with(&[])
    }

    /// Like [`FromEnv::from_env`], merging option overrides left to right.
    fn from_env_with(overrides: &[Options]) -> Result<Self, Error> {
        let mut value = Self::default();
        decode_from(&mut value, &ProcessEnv, overrides)?;
        Ok(value)
    }
}

impl<T: EnvDecode + ?Sized> EnvDecode for Box<T> {
    fn decode_from<L: Lookup + ?Sized>(
        &mut self,
        source: &L,
        options: &Options,
    ) -> Result<(), Error> {
        (**self).decode_from(source, options)
    }
}

impl<T: EnvDecode + Default> FromEnv for T {}

/// Populates `dest` from the process environment with default options.
pub fn decode<T: EnvDecode>(dest: &mut T) -> Result<(), Error> {
    decode_with(dest, &[])
}

/// Populates `dest` from the process environment, merging option overrides
/// left to right.
pub fn decode_with<T: EnvDecode>(dest: &mut T, overrides: &[Options]) -> Result<(), Error> {
    decode_from(dest, &ProcessEnv, overrides)
}

/// Populates `dest` from an explicit lookup source.
pub fn decode_from<T, L>(dest: &mut T, source: &L, overrides: &[Options]) -> Result<(), Error>
where
    T: EnvDecode,
    L: Lookup + ?Sized,
{
    dest.decode_from(source, &Options::resolve(overrides))
}

/// Looks up one key in the process environment and converts it.
///
/// Fails with [`Error::NotFound`] when the key is unset, and with the
/// converter's diagnostic when the value does not parse:
///
/// ```rust
/// # fn main() -> Result<(), envtag::Error> {
/// std::env::set_var("WORKERS", "4");
/// let workers: usize = envtag::var("WORKERS")?;
/// assert_eq!(workers, 4);
/// # Ok(())
/// # }
/// ```
pub fn var<T: FromEnvValue>(key: &str) -> Result<T, Error> {
    var_from(&ProcessEnv, key)
}

/// Looks up one key in `source` and converts it.
pub fn var_from<L, T>(source: &L, key: &str) -> Result<T, Error>
where
    L: Lookup + ?Sized,
    T: FromEnvValue,
{
    match source.lookup(key) {
        Some(raw) => T::from_env_value(&raw).map_err(|err| Error::attributed(key, err)),
        None => Err(Error::NotFound {
            key: key.to_owned(),
        }),
    }
}
