//! Grammar configuration loader for rulesplit.
//!
//! `defaults/rulesplit.default.toml` is embedded into every binary so the
//! built-in English grammar ships with the tokenizer. Applications layer their
//! own grammar files on top of (or instead of) those defaults via [`Loader`]
//! before deserializing into [`GrammarConfig`].
//!
//! Layering a file that defines `rules` or `exceptions` replaces the whole
//! list from earlier sources; lists are never merged entry by entry.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;
pub use config::FileFormat as GrammarFormat;

const DEFAULT_TOML: &str = include_str!("../defaults/rulesplit.default.toml");

/// Top-level grammar configuration consumed by the tokenizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrammarConfig {
    #[serde(default)]
    pub settings: Settings,
    /// Rules in priority order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    #[serde(default)]
    pub exceptions: Vec<ExceptionConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub hazard_policy: HazardPolicy,
}

/// What to do with a rule whose capture group could reproduce the whole token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardPolicy {
    /// Refuse to build the rule set.
    #[default]
    Reject,
    /// Log a warning and keep the rule.
    Warn,
}

/// A single named rule as written in a grammar file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    /// Unanchored pattern; anchors are added when the rule is compiled.
    pub pattern: String,
}

/// An exception lexicon entry: `surface` is replaced verbatim by `tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExceptionConfig {
    pub surface: String,
    pub tokens: Vec<String>,
}

/// Helper for layering grammar files over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Start a loader with no rules and no exceptions.
    pub fn bare() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Layer a grammar file. The format follows the file extension
    /// (`.toml`, `.yaml`, `.json`). Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref()).required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer grammar text held in memory.
    pub fn with_str(mut self, source: &str, format: FileFormat) -> Self {
        self.builder = self.builder.add_source(File::from_str(source, format));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GrammarConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GrammarConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rule_names(config: &GrammarConfig) -> Vec<&str> {
        config.rules.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn loads_default_grammar_in_priority_order() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(
            rule_names(&config),
            vec![
                "initial-punctuation",
                "final-punctuation",
                "all-punctuation",
                "currency"
            ]
        );
        assert_eq!(config.settings.hazard_policy, HazardPolicy::Reject);
    }

    #[test]
    fn default_exceptions_are_case_sensitive_entries() {
        let config = load_defaults().expect("defaults to deserialize");
        let whats = config
            .exceptions
            .iter()
            .find(|e| e.surface == "What's")
            .expect("What's entry");
        assert_eq!(whats.tokens, vec!["What", "'s"]);
        assert!(!config.exceptions.iter().any(|e| e.surface == "what's"));
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("settings.hazard_policy", "warn")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.settings.hazard_policy, HazardPolicy::Warn);
    }

    #[test]
    fn bare_loader_is_empty() {
        let config = Loader::bare().build().expect("empty config to build");
        assert!(config.rules.is_empty());
        assert!(config.exceptions.is_empty());
        assert_eq!(config.settings.hazard_policy, HazardPolicy::Reject);
    }

    #[test]
    fn layered_file_replaces_rule_list() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "rules:\n  - name: hyphen\n    pattern: '(.+?)(-)(.+)'\n"
        )
        .expect("write grammar");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(rule_names(&config), vec!["hyphen"]);
        // Exceptions were not redefined, so the defaults remain.
        assert!(config.exceptions.iter().any(|e| e.surface == "don't"));
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn in_memory_json_grammar() {
        let config = Loader::bare()
            .with_str(
                r#"{"rules": [{"name": "dash", "pattern": "(.+?)(-)(.+)"}],
                    "exceptions": [{"surface": "e-mail", "tokens": ["e-mail"]}]}"#,
                GrammarFormat::Json,
            )
            .build()
            .expect("config to build");
        assert_eq!(rule_names(&config), vec!["dash"]);
        assert_eq!(config.exceptions[0].tokens, vec!["e-mail"]);
    }
}
