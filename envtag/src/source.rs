//! Lookup sources consulted during decoding.
//!
//! Decoding never reads the process environment directly; it goes through
//! the [`Lookup`] capability, so tests and embedders can substitute any
//! key/value store. [`ProcessEnv`] is the conventional source.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;

/// A key/value provider queried once per participating field.
pub trait Lookup {
    /// Returns the value for `key`, or `None` when the key is unset.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn map_sources_answer_by_key() {
        let source: HashMap<String, String> =
            [("PORT".to_owned(), "8080".to_owned())].into_iter().collect();
        assert_eq!(source.lookup("PORT"), Some("8080".to_owned()));
        assert_eq!(source.lookup("MISSING"), None);

        let source: BTreeMap<String, String> =
            [("NAME".to_owned(), "svc".to_owned())].into_iter().collect();
        assert_eq!(source.lookup("NAME"), Some("svc".to_owned()));
    }

    #[test]
    #[serial]
    fn process_env_reads_the_real_environment() {
        env::set_var("ENVTAG_SOURCE_TEST", "present");
        assert_eq!(
            ProcessEnv.lookup("ENVTAG_SOURCE_TEST"),
            Some("present".to_owned())
        );
        env::remove_var("ENVTAG_SOURCE_TEST");
        assert_eq!(ProcessEnv.lookup("ENVTAG_SOURCE_TEST"), None);
    }
}
