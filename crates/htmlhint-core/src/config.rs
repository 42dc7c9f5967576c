//! Configuration types for htmlhint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Namespace accepted in front of preset names (`htmlhint:recommended`).
pub const PRESET_NAMESPACE: &str = "htmlhint:";

/// Name of the preset used when a configuration names neither presets nor rules.
pub const DEFAULT_PRESET: &str = "recommended";

/// Mapping from rule id to severity.
///
/// A missing key means the rule is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ruleset(BTreeMap<String, Severity>);

impl Ruleset {
    /// Creates an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Severity of a rule, if set.
    #[must_use]
    pub fn get(&self, rule_id: &str) -> Option<Severity> {
        self.0.get(rule_id).copied()
    }

    /// Severity of a rule, treating a missing entry as [`Severity::Off`].
    #[must_use]
    pub fn severity(&self, rule_id: &str) -> Severity {
        self.get(rule_id).unwrap_or(Severity::Off)
    }

    /// Returns true if the rule is set to anything but off.
    #[must_use]
    pub fn is_active(&self, rule_id: &str) -> bool {
        self.severity(rule_id).is_active()
    }

    /// Sets a rule's severity, replacing any previous value.
    pub fn set(&mut self, rule_id: impl Into<String>, severity: Severity) {
        self.0.insert(rule_id.into(), severity);
    }

    /// Builder-style [`Ruleset::set`].
    #[must_use]
    pub fn with(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.set(rule_id, severity);
        self
    }

    /// Overlays `other` on top of `self`; entries of `other` win.
    pub fn extend_from(&mut self, other: &Ruleset) {
        for (rule_id, severity) in other.iter() {
            self.0.insert(rule_id.to_string(), severity);
        }
    }

    /// Iterates entries in rule id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.0.iter().map(|(id, severity)| (id.as_str(), *severity))
    }

    /// Number of entries, including those set to off.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no entries are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Severity)> for Ruleset {
    fn from_iter<I: IntoIterator<Item = (K, Severity)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Caller-supplied configuration.
///
/// `rules: None` and `rules: Some(empty)` are different: the first falls
/// back to the default preset, the second enables nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Presets to apply, in order. Later presets win.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    /// Explicit rule severities, applied after all presets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Ruleset>,
}

impl Configuration {
    /// Creates an empty configuration, which resolves to the default preset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a preset to `extends`.
    #[must_use]
    pub fn extend(mut self, preset: impl Into<String>) -> Self {
        self.extends.push(preset.into());
        self
    }

    /// Sets an explicit rule severity, creating the rules map if needed.
    #[must_use]
    pub fn rule(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.rules
            .get_or_insert_with(Ruleset::new)
            .set(rule_id, severity);
        self
    }

    /// Sets an explicitly empty rules map.
    #[must_use]
    pub fn no_rules(mut self) -> Self {
        self.rules = Some(Ruleset::new());
        self
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as JSON
    /// (the `.htmlhintrc` format).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        }
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// A named, immutable ruleset shipped with the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Preset name without namespace (e.g., "recommended").
    pub name: &'static str,
    /// Short description for listings.
    pub description: &'static str,
    /// Rules enabled by the preset.
    pub ruleset: Ruleset,
}

/// The set of presets a linter can resolve `extends` entries against.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a preset, replacing one with the same name.
    #[must_use]
    pub fn with(mut self, preset: Preset) -> Self {
        self.presets.retain(|p| p.name != preset.name);
        self.presets.push(preset);
        self
    }

    /// Looks up a preset by name, with or without the `htmlhint:` namespace.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Preset> {
        let bare = name.strip_prefix(PRESET_NAMESPACE).unwrap_or(name);
        self.presets.iter().find(|p| p.name == bare)
    }

    /// Iterates presets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// `extends` names a preset that does not exist.
    #[error("Unknown preset \"{name}\"")]
    UnknownPreset {
        /// The name as written in the configuration.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Configuration::default();
        assert!(config.extends.is_empty());
        assert!(config.rules.is_none());
    }

    #[test]
    fn empty_rules_is_not_absent_rules() {
        let absent = Configuration::parse_json("{}").unwrap();
        let empty = Configuration::parse_json(r#"{"rules": {}}"#).unwrap();
        assert_eq!(absent.rules, None);
        assert_eq!(empty.rules, Some(Ruleset::new()));
    }

    #[test]
    fn test_parse_json_config() {
        let config = Configuration::parse_json(
            r#"{
                "extends": ["htmlhint:recommended"],
                "rules": { "alt-require": "error", "tag-pair": false, "id-unique": "warning" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.extends, vec!["htmlhint:recommended"]);
        let rules = config.rules.unwrap();
        assert_eq!(rules.get("alt-require"), Some(Severity::Error));
        assert_eq!(rules.get("tag-pair"), Some(Severity::Off));
        assert_eq!(rules.get("id-unique"), Some(Severity::Warning));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
extends = ["legacy"]

[rules]
alt-require = "warning"
tag-pair = "off"
"#;
        let config = Configuration::parse_toml(toml).unwrap();
        assert_eq!(config.extends, vec!["legacy"]);
        let rules = config.rules.unwrap();
        assert_eq!(rules.severity("alt-require"), Severity::Warning);
        assert!(!rules.is_active("tag-pair"));
    }

    #[test]
    fn invalid_severity_is_a_parse_error() {
        let err = Configuration::parse_json(r#"{"rules": {"alt-require": "loud"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn catalog_accepts_namespaced_names() {
        let catalog = PresetCatalog::new().with(Preset {
            name: "recommended",
            description: "",
            ruleset: Ruleset::new().with("tag-pair", Severity::Error),
        });
        assert!(catalog.get("recommended").is_some());
        assert!(catalog.get("htmlhint:recommended").is_some());
        assert!(catalog.get("strict").is_none());
    }

    #[test]
    fn extend_from_overrides_entries() {
        let mut base = Ruleset::new()
            .with("a", Severity::Error)
            .with("b", Severity::Warning);
        base.extend_from(&Ruleset::new().with("b", Severity::Off));
        assert_eq!(base.get("a"), Some(Severity::Error));
        assert_eq!(base.get("b"), Some(Severity::Off));
    }
}
