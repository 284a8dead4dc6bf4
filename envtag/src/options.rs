//! Decode options and their merge rule.

/// The tag namespace consulted when no override supplies one.
pub const DEFAULT_TAG: &str = "env";

/// Options governing one decode pass.
///
/// Several `Options` values may be passed to the decode entry points; they
/// merge left to right, each non-default field overriding the accumulated
/// result (see [`Options::resolve`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// The tag namespace whose keys are looked up. Default `"env"`.
    pub tag: String,
    /// Fail when a participating field's key is absent from the source.
    /// Default `false`.
    pub required: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            tag: DEFAULT_TAG.to_owned(),
            required: false,
        }
    }
}

impl Options {
    /// Options with the default tag namespace and the lenient policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds overrides left to right onto the defaults.
    ///
    /// A tag equal to `""` or to the literal default never overrides, so a
    /// custom tag applied by an earlier value survives later defaults — and
    /// cannot be reset back to `"env"` by a later override. `required`
    /// latches true.
    pub fn resolve(overrides: &[Options]) -> Options {
        let mut merged = Options::default();
        for options in overrides {
            if !options.tag.is_empty() && options.tag != DEFAULT_TAG {
                merged.tag = options.tag.clone();
            }
            if options.required {
                merged.required = true;
            }
        }
        merged
    }

    /// Selects the lookup key for a field from its per-namespace key table.
    ///
    /// Returns `None` when the active namespace has no entry, or when its
    /// entry is the exclusion sentinel `-`. The empty string is a valid
    /// literal key.
    #[doc(hidden)]
    pub fn key_in<'k>(&self, keys: &[(&str, &'k str)]) -> Option<&'k str> {
        keys.iter()
            .find(|(tag, _)| *tag == self.tag)
            .map(|(_, key)| *key)
            .filter(|key| *key != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_of_nothing_is_the_default() {
        let options = Options::resolve(&[]);
        assert_eq!(options.tag, "env");
        assert!(!options.required);
    }

    #[test]
    fn later_overrides_win_field_by_field() {
        let merged = Options::resolve(&[
            Options {
                tag: "conf".into(),
                ..Options::default()
            },
            Options {
                required: true,
                ..Options::default()
            },
        ]);
        assert_eq!(merged.tag, "conf");
        assert!(merged.required);
    }

    #[test]
    fn default_tag_and_empty_tag_do_not_override() {
        let merged = Options::resolve(&[
            Options {
                tag: "conf".into(),
                ..Options::default()
            },
            Options {
                tag: "env".into(),
                ..Options::default()
            },
            Options {
                tag: String::new(),
                ..Options::default()
            },
        ]);
        assert_eq!(merged.tag, "conf");
    }

    #[test]
    fn required_latches_true() {
        let merged = Options::resolve(&[
            Options {
                required: true,
                ..Options::default()
            },
            Options {
                required: false,
                ..Options::default()
            },
        ]);
        assert!(merged.required);
    }

    #[test]
    fn key_selection_honors_namespace_and_sentinel() {
        let options = Options::default();
        assert_eq!(options.key_in(&[("env", "PORT")]), Some("PORT"));
        assert_eq!(options.key_in(&[("env", "")]), Some(""));
        assert_eq!(options.key_in(&[("env", "-")]), None);
        assert_eq!(options.key_in(&[("conf", "PORT")]), None);

        let alt = Options {
            tag: "conf".into(),
            ..Options::default()
        };
        assert_eq!(
            alt.key_in(&[("env", "PORT"), ("conf", "CONF_PORT")]),
            Some("CONF_PORT")
        );
    }
}
