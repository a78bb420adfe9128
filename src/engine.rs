//! Tokenizer engine
//!
//! Splits text on whitespace and decomposes every chunk:
//!
//! 1. A chunk found in the [`ExceptionLexicon`] is replaced by its listed
//!    tokens and nothing else happens to it.
//! 2. Otherwise the chunk enters the rule walk: rules are tried in priority
//!    order; the first rule that matches splits the token and every non-empty
//!    capture starts its own walk from the first rule. The exception lexicon
//!    is not consulted again.
//! 3. A token that no rule matches is atomic and is accepted unchanged.
//!
//! The walk keeps its pending captures on an explicit stack rather than the
//! call stack, so a rule that peels one character per split (such as trailing
//! punctuation on `"??????"`) handles runs of any length.
//!
//! The rule set and lexicon are shared read-only behind `Arc`; every call owns
//! its own accumulator, so one `Tokenizer` can serve many threads.

mod explain;

pub use explain::{Decomposition, OutlineRow, RowKind};

use crate::lexicon::ExceptionLexicon;
use crate::rules::{Rule, RuleMatch, RuleSet};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: Arc<RuleSet>,
    exceptions: Arc<ExceptionLexicon>,
}

/// Work left in a rule walk, popped last-in first-out.
#[derive(Debug, Clone, Copy)]
enum Pending<'t> {
    /// Run through the rules from the first one
    Walk(&'t str),
    /// Accept unchanged: a capture that equals the token it came from
    Accept(&'t str),
}

impl<'t> Pending<'t> {
    /// Queue entries for the parts of a split, last part first.
    fn parts_of<'m>(token: &'t str, found: &'m RuleMatch<'t>) -> impl Iterator<Item = Self> + 'm {
        found.parts().rev().map(move |part| {
            if part == token {
                Pending::Accept(part)
            } else {
                Pending::Walk(part)
            }
        })
    }
}

impl Tokenizer {
    pub fn new(rules: RuleSet, exceptions: ExceptionLexicon) -> Self {
        Self::from_shared(Arc::new(rules), Arc::new(exceptions))
    }

    /// Build a tokenizer over data already shared with other tokenizers.
    pub fn from_shared(rules: Arc<RuleSet>, exceptions: Arc<ExceptionLexicon>) -> Self {
        Self { rules, exceptions }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn exceptions(&self) -> &ExceptionLexicon {
        &self.exceptions
    }

    /// Tokenize `text` into a flat, ordered list of non-empty tokens.
    ///
    /// Empty or whitespace-only text gives an empty list. There is no failure
    /// case: every chunk ends up as exception tokens, split parts or itself.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut accepted = Vec::new();

        for chunk in text.split_whitespace() {
            match self.exceptions.lookup(chunk) {
                Some(tokens) => accepted.extend(tokens.iter().cloned()),
                None => self.decompose(chunk, &mut accepted),
            }
        }

        accepted
    }

    /// Run the rule walk for one chunk, appending its atomic tokens in order.
    fn decompose(&self, chunk: &str, accepted: &mut Vec<String>) {
        let mut pending = vec![Pending::Walk(chunk)];

        while let Some(next) = pending.pop() {
            let token = match next {
                Pending::Walk(token) => token,
                Pending::Accept(token) => {
                    accepted.push(token.to_string());
                    continue;
                }
            };

            match self.first_match(token) {
                Some((_, found)) => pending.extend(Pending::parts_of(token, &found)),
                None => accepted.push(token.to_string()),
            }
        }
    }

    /// The first rule, in priority order, that matches the whole of `token`.
    fn first_match<'t>(&self, token: &'t str) -> Option<(&Rule, RuleMatch<'t>)> {
        for rule in self.rules.iter() {
            if let Some(found) = rule.match_token(token) {
                log::trace!("rule '{}' splits {:?}: {:?}", rule.name(), token, found.captures);
                return Some((rule, found));
            }
        }
        None
    }
}
