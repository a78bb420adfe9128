//! Grammar rules
//!
//! A [`RuleSet`] is the ordered list of [`Rule`]s the tokenizer walks. The order
//! is the priority order and is fixed once the set is built.
//!
//! Building a set checks its shape (non-empty, unique names) and runs the
//! recursion hazard check from [`hazard`] on every rule, applying the
//! configured [`HazardPolicy`].

pub mod hazard;
pub mod pattern;

pub use pattern::{Rule, RuleMatch};
pub use rulesplit_config::HazardPolicy;

use std::collections::HashSet;

/// Errors raised while building rules. None of these can happen during
/// tokenization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("invalid pattern for rule '{rule}': {message}")]
    InvalidPattern { rule: String, message: String },
    #[error("rule set is empty")]
    EmptyRuleSet,
    #[error("duplicate rule name '{0}'")]
    DuplicateRule(String),
    #[error("rule '{rule}': capture group {group} can reproduce the whole token")]
    RecursionHazard { rule: String, group: usize },
}

/// Ordered, non-empty collection of uniquely named rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, policy: HazardPolicy) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::EmptyRuleSet);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.name()) {
                return Err(RuleError::DuplicateRule(rule.name().to_string()));
            }

            if let Some(&group) = rule.hazardous_groups().first() {
                match policy {
                    HazardPolicy::Reject => {
                        return Err(RuleError::RecursionHazard {
                            rule: rule.name().to_string(),
                            group,
                        })
                    }
                    HazardPolicy::Warn => log::warn!(
                        "rule '{}': capture groups {:?} can reproduce the whole token; \
                         such captures will be accepted as they are",
                        rule.name(),
                        rule.hazardous_groups()
                    ),
                }
            }
        }

        log::debug!("built rule set with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Compile `(name, pattern)` pairs in order and build a set from them.
    pub fn from_patterns<I, N, P>(patterns: I, policy: HazardPolicy) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|(name, pattern)| Rule::compile(name, pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules, policy)
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a built set; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rule names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let set = RuleSet::from_patterns(
            [("b", "(b)(.+)"), ("a", "(a)(.+)"), ("c", "(c)(.+)")],
            HazardPolicy::Reject,
        )
        .unwrap();
        assert_eq!(set.names(), vec!["b", "a", "c"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(1).map(Rule::name), Some("a"));
        assert!(set.get(3).is_none());
    }

    #[test]
    fn test_empty_rejected() {
        let result = RuleSet::new(vec![], HazardPolicy::Reject);
        assert_eq!(result.unwrap_err(), RuleError::EmptyRuleSet);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = RuleSet::from_patterns(
            [("dup", "(a)(.+)"), ("dup", "(b)(.+)")],
            HazardPolicy::Reject,
        );
        assert_eq!(result.unwrap_err(), RuleError::DuplicateRule("dup".into()));
    }

    #[test]
    fn test_invalid_pattern_surfaces() {
        let result = RuleSet::from_patterns([("ok", "(a)(.+)"), ("bad", "([")], HazardPolicy::Reject);
        assert!(matches!(
            result,
            Err(RuleError::InvalidPattern { ref rule, .. }) if rule == "bad"
        ));
    }

    #[test]
    fn test_hazard_rejected() {
        let result = RuleSet::from_patterns([("everything", "(.+)")], HazardPolicy::Reject);
        assert_eq!(
            result.unwrap_err(),
            RuleError::RecursionHazard {
                rule: "everything".into(),
                group: 1
            }
        );
    }

    #[test]
    fn test_hazard_warned() {
        let set = RuleSet::from_patterns([("everything", "(.+)")], HazardPolicy::Warn).unwrap();
        assert_eq!(set.names(), vec!["everything"]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RuleError::EmptyRuleSet.to_string(), "rule set is empty");
        assert_eq!(
            RuleError::RecursionHazard {
                rule: "x".into(),
                group: 2
            }
            .to_string(),
            "rule 'x': capture group 2 can reproduce the whole token"
        );
    }
}
