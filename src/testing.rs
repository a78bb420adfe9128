//! Test fixtures
//!
//! Tests should not hand-roll their own grammars for the standard behaviour:
//! a slightly different punctuation class in one test file quietly changes
//! what is being tested. Use these builders instead, and keep ad-hoc rules for
//! tests that are about rule mechanics rather than English text.
//!
//! The scenario grammar is the four English rules (initial punctuation, final
//! punctuation, all punctuation, currency) with a small exception lexicon of
//! three contractions. It matches the embedded default grammar rule for rule.

use crate::engine::Tokenizer;
use crate::lexicon::ExceptionLexicon;
use crate::rules::{HazardPolicy, RuleSet};

/// Scenario rules, in priority order.
pub const SCENARIO_RULES: &[(&str, &str)] = &[
    ("initial-punctuation", r#"(["'(\[{¡¿])(.+)"#),
    ("final-punctuation", r#"(.+?)([.,;:!?"')\]}]+)"#),
    ("all-punctuation", r"([[:punct:]])([[:punct:]]+)"),
    ("currency", r"([$€£¥])(.+)"),
];

/// Scenario exceptions.
pub const SCENARIO_EXCEPTIONS: &[(&str, &[&str])] = &[
    ("What's", &["What", "'s"]),
    ("I'm", &["I", "'m"]),
    ("don't", &["do", "n't"]),
];

pub fn scenario_rule_set() -> RuleSet {
    RuleSet::from_patterns(SCENARIO_RULES.iter().copied(), HazardPolicy::Reject)
        .expect("scenario rules are valid")
}

pub fn scenario_lexicon() -> ExceptionLexicon {
    SCENARIO_EXCEPTIONS
        .iter()
        .map(|(surface, tokens)| (*surface, tokens.iter().copied()))
        .collect()
}

pub fn scenario_tokenizer() -> Tokenizer {
    Tokenizer::new(scenario_rule_set(), scenario_lexicon())
}

/// Tokenizer over ad-hoc rules and exceptions, built with the warn policy so
/// tests can exercise hazardous rules.
pub fn tokenizer_with(rules: &[(&str, &str)], exceptions: &[(&str, &[&str])]) -> Tokenizer {
    let rules = RuleSet::from_patterns(rules.iter().copied(), HazardPolicy::Warn)
        .expect("test rules are valid");
    let exceptions = exceptions
        .iter()
        .map(|(surface, tokens)| (*surface, tokens.iter().copied()))
        .collect();
    Tokenizer::new(rules, exceptions)
}

/// [`tokenizer_with`] and an empty lexicon.
pub fn rules_only_tokenizer(rules: &[(&str, &str)]) -> Tokenizer {
    tokenizer_with(rules, &[])
}
