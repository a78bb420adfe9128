//! Decomposition trees
//!
//! [`Tokenizer::explain`] runs the same walk as [`Tokenizer::tokenize`] but
//! keeps the structure: which chunk hit the exception lexicon, which rule split
//! which token, and what was accepted as atomic. The leaves of the trees, in
//! order, are exactly the tokens `tokenize` returns.
//!
//! Trees can be as deep as a chunk is long. Building, walking and dropping
//! them never recurses; [`Decomposition::outline`] flattens a tree for
//! renderers that should not recurse either. The derived `Serialize`, `Clone`
//! and `PartialEq` impls do recurse, one level per tree level.

use super::{Pending, Tokenizer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Decomposition {
    /// Chunk replaced by an exception lexicon entry
    Exception { surface: String, tokens: Vec<String> },
    /// Token split by a rule; `parts` follow the rule's non-empty captures
    Split {
        token: String,
        rule: String,
        parts: Vec<Decomposition>,
    },
    /// Token no rule matched
    Atomic { token: String },
}

/// One line of a flattened tree, in depth-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineRow<'a> {
    pub depth: usize,
    pub kind: RowKind,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowKind {
    Exception,
    /// One of the tokens listed by an exception entry
    ExceptionToken,
    Split,
    Atomic,
}

impl Decomposition {
    /// The text this node stands for.
    pub fn source(&self) -> &str {
        match self {
            Decomposition::Exception { surface, .. } => surface.as_str(),
            Decomposition::Split { token, .. } | Decomposition::Atomic { token } => token.as_str(),
        }
    }

    /// Accepted tokens under this node, in order.
    pub fn leaves(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Decomposition::Exception { tokens, .. } => out.extend(tokens.iter().cloned()),
                Decomposition::Split { parts, .. } => stack.extend(parts.iter().rev()),
                Decomposition::Atomic { token } => out.push(token.clone()),
            }
        }
        out
    }

    /// Every node of the tree, depth first, with its depth below this one.
    pub fn outline(&self) -> Vec<OutlineRow<'_>> {
        let mut rows = Vec::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Decomposition::Exception { surface, tokens } => {
                    rows.push(OutlineRow::new(depth, RowKind::Exception, surface, None));
                    rows.extend(tokens.iter().map(|token| {
                        OutlineRow::new(depth + 1, RowKind::ExceptionToken, token, None)
                    }));
                }
                Decomposition::Split { token, rule, parts } => {
                    rows.push(OutlineRow::new(depth, RowKind::Split, token, Some(rule.as_str())));
                    stack.extend(parts.iter().rev().map(|part| (part, depth + 1)));
                }
                Decomposition::Atomic { token } => {
                    rows.push(OutlineRow::new(depth, RowKind::Atomic, token, None));
                }
            }
        }
        rows
    }
}

impl<'a> OutlineRow<'a> {
    fn new(depth: usize, kind: RowKind, text: &'a str, rule: Option<&'a str>) -> Self {
        Self {
            depth,
            kind,
            text,
            rule,
        }
    }
}

impl Drop for Decomposition {
    fn drop(&mut self) {
        let Decomposition::Split { parts, .. } = self else {
            return;
        };
        // Unlink children before they drop so no drop goes more than one level deep
        let mut orphans = std::mem::take(parts);
        while let Some(mut node) = orphans.pop() {
            if let Decomposition::Split { parts, .. } = &mut node {
                orphans.append(parts);
            }
        }
    }
}

/// Work left while building trees, popped last-in first-out.
enum Step<'t> {
    Next(Pending<'t>),
    /// All `parts` of a split are built; fold them into its node
    Close {
        token: &'t str,
        rule: String,
        parts: usize,
    },
}

impl Tokenizer {
    /// One decomposition tree per whitespace-delimited chunk of `text`.
    pub fn explain(&self, text: &str) -> Vec<Decomposition> {
        let mut trees = Vec::new();

        for chunk in text.split_whitespace() {
            match self.exceptions.lookup(chunk) {
                Some(tokens) => trees.push(Decomposition::Exception {
                    surface: chunk.to_string(),
                    tokens: tokens.to_vec(),
                }),
                None => self.explain_chunk(chunk, &mut trees),
            }
        }

        trees
    }

    /// Build the tree for one chunk on top of `built`.
    ///
    /// Every walked token leaves exactly one node on `built`, so when a split
    /// closes its parts are the last nodes there.
    fn explain_chunk(&self, chunk: &str, built: &mut Vec<Decomposition>) {
        let mut steps = vec![Step::Next(Pending::Walk(chunk))];

        while let Some(step) = steps.pop() {
            match step {
                Step::Next(Pending::Accept(token)) => built.push(Decomposition::Atomic {
                    token: token.to_string(),
                }),
                Step::Next(Pending::Walk(token)) => match self.first_match(token) {
                    Some((rule, found)) => {
                        steps.push(Step::Close {
                            token,
                            rule: rule.name().to_string(),
                            parts: found.parts().count(),
                        });
                        steps.extend(Pending::parts_of(token, &found).map(Step::Next));
                    }
                    None => built.push(Decomposition::Atomic {
                        token: token.to_string(),
                    }),
                },
                Step::Close { token, rule, parts } => {
                    let parts = built.split_off(built.len() - parts);
                    built.push(Decomposition::Split {
                        token: token.to_string(),
                        rule,
                        parts,
                    });
                }
            }
        }
    }
}
