//! Runtime support invoked by `#[derive(EnvDecode)]` expansions.
//!
//! The derive stays thin; field semantics live here so they can be tested
//! and documented in one place.

use std::fmt::Display;

use crate::convert::FromEnvValue;
use crate::error::Error;
use crate::options::Options;
use crate::source::Lookup;
use crate::EnvDecode;

/// Decode one leaf field.
///
/// An absent key under the required policy is an error; an absent key
/// otherwise leaves the field untouched.
#[doc(hidden)]
pub fn decode_leaf<L, T>(
    source: &L,
    key: &str,
    required: bool,
    field: &mut T,
) -> Result<(), Error>
where
    L: Lookup + ?Sized,
    T: FromEnvValue,
{
    match source.lookup(key) {
        Some(raw) => {
            *field = T::from_env_value(&raw).map_err(|err| Error::attributed(key, err))?;
            Ok(())
        }
        None if required => Err(Error::Required {
            key: key.to_owned(),
        }),
        None => Ok(()),
    }
}

/// Decode one leaf field through a field-level deserializer function,
/// bypassing the built-in conversion rules for that field.
#[doc(hidden)]
pub fn decode_leaf_with<L, T, F, E>(
    source: &L,
    key: &str,
    required: bool,
    field: &mut T,
    deserialize: F,
) -> Result<(), Error>
where
    L: Lookup + ?Sized,
    F: FnOnce(&str) -> Result<T, E>,
    E: Display,
{
    match source.lookup(key) {
        Some(raw) => {
            *field = deserialize(&raw).map_err(|err| Error::Deserialize {
                key: key.to_owned(),
                message: err.to_string(),
            })?;
            Ok(())
        }
        None if required => Err(Error::Required {
            key: key.to_owned(),
        }),
        None => Ok(()),
    }
}

/// Recurse into a nested struct field with the same options.
#[doc(hidden)]
pub fn decode_nested<L, T>(source: &L, options: &Options, field: &mut T) -> Result<(), Error>
where
    L: Lookup + ?Sized,
    T: EnvDecode,
{
    field.decode_from(source, options)
}

/// Recurse into an optional nested struct, allocating default storage
/// exactly once before the recursion.
#[doc(hidden)]
pub fn decode_nested_opt<L, T>(
    source: &L,
    options: &Options,
    field: &mut Option<T>,
) -> Result<(), Error>
where
    L: Lookup + ?Sized,
    T: EnvDecode + Default,
{
    field.get_or_insert_with(T::default).decode_from(source, options)
}
