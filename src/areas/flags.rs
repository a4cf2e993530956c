//! Feature flag configuration
//!
//! Flags are read from environment variables named `FEATURE_<NAME>`:
//! - `FEATURE_<NAME>=true` enables the flag
//! - `FEATURE_<NAME>=false` marks the flag as known but disabled
//!
//! Any other value, or no variable at all, leaves the flag disabled.
//! The set is computed once and never changes afterwards.

use std::collections::BTreeSet;

/// Prefix of the environment variables that carry flag values
pub const FLAG_ENV_PREFIX: &str = "FEATURE_";

const ENABLED_VALUE: &str = "true";
const DISABLED_VALUE: &str = "false";

/// Enabled and known-disabled feature flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    enabled: BTreeSet<String>,
    seen_disabled: BTreeSet<String>,
}

impl FlagSet {
    /// Build the flag set from the current process environment
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build the flag set from an explicit list of environment variables
    ///
    /// Variables without the `FEATURE_` prefix are ignored, as is a variable
    /// named exactly `FEATURE_`. Only the literal values `true` and `false`
    /// have an effect.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut flags = FlagSet::default();

        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(FLAG_ENV_PREFIX) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            match value.as_ref() {
                ENABLED_VALUE => {
                    flags.enabled.insert(name.to_string());
                }
                DISABLED_VALUE => {
                    flags.seen_disabled.insert(name.to_string());
                }
                _ => {}
            }
        }

        flags
    }

    /// Build the flag set from a flag name to boolean mapping
    pub fn from_config<K: Into<String>>(config: impl IntoIterator<Item = (K, bool)>) -> Self {
        let mut flags = FlagSet::default();

        for (name, enabled) in config {
            if enabled {
                flags.enabled.insert(name.into());
            } else {
                flags.seen_disabled.insert(name.into());
            }
        }

        flags
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Whether the flag was explicitly set to `false`
    pub fn is_known_disabled(&self, name: &str) -> bool {
        self.seen_disabled.contains(name)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    pub fn seen_disabled(&self) -> impl Iterator<Item = &str> {
        self.seen_disabled.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty() && self.seen_disabled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn only_prefixed_variables_are_considered() {
        let flags = FlagSet::from_vars([
            ("FEATURE_SEARCH", "true"),
            ("PATH", "/usr/bin"),
            ("FEATURES_X", "true"),
            ("feature_lower", "true"),
        ]);

        assert_eq!(flags.enabled().collect::<Vec<_>>(), vec!["SEARCH"]);
        assert!(flags.seen_disabled().next().is_none());
    }

    #[test]
    fn false_marks_flag_as_known_disabled() {
        let flags = FlagSet::from_vars([("FEATURE_BETA", "false"), ("FEATURE_GAMMA", "true")]);

        assert!(flags.is_known_disabled("BETA"));
        assert!(!flags.is_enabled("BETA"));
        assert!(flags.is_enabled("GAMMA"));
        assert!(!flags.is_known_disabled("GAMMA"));
    }

    #[rstest]
    #[case("maybe")]
    #[case("TRUE")]
    #[case("True")]
    #[case("1")]
    #[case("yes")]
    #[case(" true")]
    #[case("")]
    fn only_literal_true_enables(#[case] value: &str) {
        let flags = FlagSet::from_vars([("FEATURE_X", value)]);

        assert!(!flags.is_enabled("X"));
        assert!(!flags.is_known_disabled("X"));
    }

    #[test]
    fn bare_prefix_is_ignored() {
        let flags = FlagSet::from_vars([("FEATURE_", "true")]);

        assert!(flags.is_empty());
    }

    #[test]
    fn flag_names_are_case_sensitive() {
        let flags = FlagSet::from_vars([("FEATURE_Search", "true")]);

        assert!(flags.is_enabled("Search"));
        assert!(!flags.is_enabled("SEARCH"));
        assert!(!flags.is_enabled("search"));
    }

    #[test]
    fn config_mapping_splits_enabled_and_disabled() {
        let flags = FlagSet::from_config([("A", true), ("B", false), ("C", true)]);

        assert_eq!(flags.enabled().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(flags.seen_disabled().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn empty_environment_yields_empty_set() {
        let flags = FlagSet::from_vars(Vec::<(String, String)>::new());

        assert!(flags.is_empty());
        assert_eq!(flags, FlagSet::default());
    }
}
