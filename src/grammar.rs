//! Grammar assembly
//!
//! Turns a deserialized [`GrammarConfig`] into the compiled pieces the
//! tokenizer runs on. All validation happens here, at load time: a grammar
//! that builds is a grammar that tokenizes without errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use rulesplit::config::Loader;
//! use rulesplit::Tokenizer;
//!
//! let config = Loader::new().with_file("my-grammar.toml").build()?;
//! let tokenizer = Tokenizer::from_config(&config)?;
//! ```

use crate::engine::Tokenizer;
use crate::lexicon::ExceptionLexicon;
use crate::rules::{RuleError, RuleSet};
use once_cell::sync::OnceCell;
use rulesplit_config::{load_defaults, ConfigError, GrammarConfig};

/// Error that can occur when loading a grammar
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("failed to load grammar configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Compile the configured rules, in order, under the configured hazard policy.
pub fn load_rule_set(config: &GrammarConfig) -> Result<RuleSet, RuleError> {
    RuleSet::from_patterns(
        config
            .rules
            .iter()
            .map(|rule| (rule.name.as_str(), rule.pattern.as_str())),
        config.settings.hazard_policy,
    )
}

/// Build the exception lexicon. A surface listed twice keeps its last entry.
pub fn load_exception_lexicon(config: &GrammarConfig) -> ExceptionLexicon {
    let mut lexicon = ExceptionLexicon::new();
    for entry in &config.exceptions {
        if lexicon
            .insert(entry.surface.as_str(), entry.tokens.iter().map(String::as_str))
            .is_some()
        {
            log::warn!("exception '{}' defined more than once; keeping the last entry", entry.surface);
        }
    }
    log::debug!("built exception lexicon with {} entries", lexicon.len());
    lexicon
}

impl Tokenizer {
    pub fn from_config(config: &GrammarConfig) -> Result<Self, RuleError> {
        let rules = load_rule_set(config)?;
        let exceptions = load_exception_lexicon(config);
        Ok(Tokenizer::new(rules, exceptions))
    }
}

static DEFAULT_TOKENIZER: OnceCell<Tokenizer> = OnceCell::new();

/// Process-wide tokenizer for the built-in English grammar, built on first use.
pub fn default_tokenizer() -> Result<&'static Tokenizer, GrammarError> {
    DEFAULT_TOKENIZER.get_or_try_init(|| -> Result<Tokenizer, GrammarError> {
        let config = load_defaults()?;
        Ok(Tokenizer::from_config(&config)?)
    })
}
