//! Compiled decomposition rules
//!
//! A rule is a named regex that must account for an entire token. The pattern
//! is written unanchored in grammar files; compiling wraps it as
//! `^(?:pattern)$` and turns on case-insensitive matching.
//!
//! ## Matching is rejection
//!
//! Unlike the usual matcher, a successful match does not accept the token: it
//! says the token is NOT atomic and must be split along the capture groups.
//!
//! ```text
//! Rule:     final-punctuation = (.+?)([.,;:!?]+)
//! Token:    "you?"
//! Result:   Match, captures ["you", "?"]
//! Token:    "you"
//! Result:   No match (the token is atomic as far as this rule goes)
//! ```

use super::hazard;
use super::RuleError;
use regex::{Regex, RegexBuilder};

/// A single named rule compiled for whole-token matching.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    pattern: String,
    regex: Regex,
    /// Capture groups (1-based) that could span the whole token.
    hazards: Vec<usize>,
}

/// Result of matching a rule against a token.
///
/// Captures are kept in pattern order; a group that did not participate in the
/// match is reported as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    pub captures: Vec<&'t str>,
}

impl<'t> RuleMatch<'t> {
    /// The non-empty captures, in pattern order.
    pub fn parts(&self) -> impl DoubleEndedIterator<Item = &'t str> + '_ {
        self.captures.iter().copied().filter(|c| !c.is_empty())
    }
}

impl Rule {
    /// Compile a rule from its unanchored pattern
    ///
    /// # Example
    /// ```ignore
    /// let rule = Rule::compile("currency", "([$€£¥])(.+)")?;
    /// ```
    pub fn compile(name: impl Into<String>, pattern: &str) -> Result<Self, RuleError> {
        let name = name.into();
        let invalid = |message: String| RuleError::InvalidPattern {
            rule: name.clone(),
            message,
        };

        // Parse the raw pattern on its own first so a pattern like `a)|(b`
        // cannot escape the anchors we wrap around it.
        let hir = regex_syntax::Parser::new()
            .parse(pattern)
            .map_err(|e| invalid(e.to_string()))?;
        let hazards = hazard::whole_token_groups(&hir);

        let regex = RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            name,
            pattern: pattern.to_string(),
            regex,
            hazards,
        })
    }

    /// Match the whole token against this rule.
    pub fn match_token<'t>(&self, token: &'t str) -> Option<RuleMatch<'t>> {
        let caps = self.regex.captures(token)?;

        // Group 0 is the full match, which is always the whole token here
        let captures = (1..caps.len())
            .map(|i| caps.get(i).map_or("", |m| m.as_str()))
            .collect();

        Some(RuleMatch { captures })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the pattern as written, without the added anchors
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of capture groups in the pattern.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Capture groups that could reproduce the entire token they were matched
    /// against. A rule with any of these can recurse forever.
    pub fn hazardous_groups(&self) -> &[usize] {
        &self.hazards
    }
}
