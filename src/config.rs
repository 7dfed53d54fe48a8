//! Runtime configuration namespaces.
//!
//! A [`ConfigSet`] holds the values of one service's options. Values come
//! from environment variables named `CALI_<NAMESPACE>_<KEY>`, upper-cased,
//! falling back to the schema default.

use log::warn;
use std::collections::BTreeMap;
use std::env;

/// Prefix shared by all configuration variables.
const ENV_PREFIX: &str = "CALI_";

/// One recognized option of a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Option key, lower case
    pub key: &'static str,
    /// Value used when the variable is unset
    pub default: &'static str,
    /// One line description
    pub description: &'static str,
}

/// Options of the `mpit` namespace. It has none.
pub const MPIT_CONFIG: &[ConfigEntry] = &[];

/// Resolved configuration of one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
    namespace: String,
    values: BTreeMap<&'static str, String>,
    unrecognized: Vec<String>,
}

impl ConfigSet {
    /// Resolve `schema` for `namespace` from the process environment.
    pub fn init(namespace: &str, schema: &[ConfigEntry]) -> Self {
        Self::from_vars(namespace, schema, env::vars())
    }

    /// Resolve `schema` for `namespace` from an explicit set of variables.
    ///
    /// Variables under the namespace prefix that match no schema key are
    /// reported once with a warning and otherwise ignored.
    pub fn from_vars<I>(namespace: &str, schema: &[ConfigEntry], vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{ENV_PREFIX}{}_", namespace.to_uppercase());
        let mut values: BTreeMap<&'static str, String> = schema
            .iter()
            .map(|entry| (entry.key, entry.default.to_string()))
            .collect();
        let mut unrecognized = Vec::new();

        for (name, value) in vars {
            let Some(key) = name.strip_prefix(&prefix) else {
                continue;
            };
            match schema
                .iter()
                .find(|entry| entry.key.eq_ignore_ascii_case(key))
            {
                Some(entry) => {
                    values.insert(entry.key, value);
                }
                None => unrecognized.push(name),
            }
        }

        unrecognized.sort();
        for name in &unrecognized {
            warn!(target: "mpit", "Unrecognized {namespace} config variable {name} ignored");
        }

        ConfigSet {
            namespace: namespace.to_string(),
            values,
            unrecognized,
        }
    }

    /// Namespace this set was resolved for.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Value of `key`, `None` if the key is not in the schema.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Variables under this namespace that matched no schema entry.
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &[ConfigEntry] = &[ConfigEntry {
        key: "verbosity",
        default: "user_basic",
        description: "Highest verbosity level to enumerate",
    }];

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn mpit_schema_is_empty() {
        let config = ConfigSet::from_vars("mpit", MPIT_CONFIG, Vec::new());
        assert_eq!(config.namespace(), "mpit");
        assert!(config.get("anything").is_none());
        assert!(config.unrecognized().is_empty());
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ConfigSet::from_vars("demo", SCHEMA, vars(&[("PATH", "/bin")]));
        assert_eq!(config.get("verbosity"), Some("user_basic"));
    }

    #[test]
    fn environment_overrides_default() {
        let config = ConfigSet::from_vars(
            "demo",
            SCHEMA,
            vars(&[("CALI_DEMO_VERBOSITY", "tuner_all")]),
        );
        assert_eq!(config.get("verbosity"), Some("tuner_all"));
    }

    #[test]
    fn unknown_keys_are_collected_not_fatal() {
        let config = ConfigSet::from_vars(
            "mpit",
            MPIT_CONFIG,
            vars(&[
                ("CALI_MPIT_ZETA", "1"),
                ("CALI_MPIT_ALPHA", "2"),
                ("CALI_OTHER_KEY", "3"),
            ]),
        );
        assert_eq!(
            config.unrecognized(),
            &["CALI_MPIT_ALPHA".to_string(), "CALI_MPIT_ZETA".to_string()]
        );
    }
}
