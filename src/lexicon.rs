//! Exception lexicon
//!
//! Irregular words (contractions, abbreviations) whose split cannot be derived
//! from the grammar rules. Lookup is exact and case-sensitive: `"What's"` and
//! `"what's"` are different keys. A hit replaces the word with its listed
//! tokens verbatim; those tokens never go through the rules.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl ExceptionLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, returning the tokens it replaced.
    ///
    /// Empty strings are dropped from `tokens` since they would show up as
    /// empty output tokens.
    pub fn insert<S, I, T>(&mut self, surface: S, tokens: I) -> Option<Vec<String>>
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.is_empty())
            .collect();
        self.entries.insert(surface.into(), tokens)
    }

    pub fn lookup(&self, token: &str) -> Option<&[String]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(surface, tokens)| (surface.as_str(), tokens.as_slice()))
    }
}

impl<S, I, T> FromIterator<(S, I)> for ExceptionLexicon
where
    S: Into<String>,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (S, I)>>(iter: It) -> Self {
        let mut lexicon = Self::new();
        for (surface, tokens) in iter {
            lexicon.insert(surface, tokens);
        }
        lexicon
    }
}
