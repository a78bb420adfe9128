//! # rulesplit
//!
//! A rule-driven recursive tokenizer.
//!
//! Text is split on whitespace and every chunk is decomposed by an ordered list
//! of grammar rules. A rule is a regex that must match a whole token; a match
//! means the token is not atomic and is split along the rule's capture groups,
//! each of which is decomposed again from the first rule. A token no rule
//! matches is accepted as it is. An exception lexicon of irregular words
//! (contractions, abbreviations) is checked before any rule.
//!
//! File Layout
//!
//! src/
//!   ├── rules        Rule compilation, matching, rule sets and the recursion hazard check
//!   ├── lexicon      Exception lexicon
//!   ├── engine       The tokenizer and its decomposition trees
//!   ├── grammar      Building all of the above from a grammar configuration
//!   ├── formats      Rendering tokens and trees
//!   └── testing      Shared fixtures for tests
//!
//! Grammar files and the embedded default grammar are handled by the
//! `rulesplit-config` crate, re-exported here as [`config`].

pub mod engine;
pub mod formats;
pub mod grammar;
pub mod lexicon;
pub mod rules;
pub mod testing;

pub use engine::{Decomposition, OutlineRow, RowKind, Tokenizer};
pub use grammar::{default_tokenizer, load_exception_lexicon, load_rule_set, GrammarError};
pub use lexicon::ExceptionLexicon;
pub use rules::{HazardPolicy, Rule, RuleError, RuleSet};
pub use rulesplit_config as config;
