//! Output formats
//!
//! Rendering for token lists and decomposition trees:
//!
//! - `simple`: tokens separated by single spaces
//! - `lines`: one token per line
//! - `json`, `yaml`: serialized lists
//!
//! Trees are rendered from their [`Decomposition::outline`] rows. In `json`
//! and `yaml` that is one list of rows per chunk. In `simple` and `lines` it
//! is an indented outline, one node per line, with the splitting rule in
//! brackets and exception hits in braces:
//!
//! ```text
//! Hi, [final-punctuation]
//!   Hi
//!   ,
//! don't {exception}
//!   do
//!   n't
//! ```

use crate::engine::{Decomposition, OutlineRow, RowKind};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Lines,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["simple", "lines", "json", "yaml"];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Lines => "lines",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(OutputFormat::Simple),
            "lines" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(FormatError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unknown output format '{0}' (available: simple, lines, json, yaml)")]
    Unknown(String),
    #[error("failed to serialize as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn render_tokens(tokens: &[String], format: OutputFormat) -> Result<String, FormatError> {
    Ok(match format {
        OutputFormat::Simple => tokens.join(" "),
        OutputFormat::Lines => tokens.join("\n"),
        OutputFormat::Json => serde_json::to_string(tokens)?,
        OutputFormat::Yaml => serde_yaml::to_string(tokens)?,
    })
}

pub fn render_explanation(
    trees: &[Decomposition],
    format: OutputFormat,
) -> Result<String, FormatError> {
    let outlines: Vec<Vec<OutlineRow<'_>>> = trees.iter().map(Decomposition::outline).collect();
    Ok(match format {
        OutputFormat::Simple | OutputFormat::Lines => {
            let mut out = String::new();
            for row in outlines.iter().flatten() {
                write_row(row, &mut out);
            }
            // Drop the final newline so callers decide how to terminate output
            out.pop();
            out
        }
        OutputFormat::Json => serde_json::to_string_pretty(&outlines)?,
        OutputFormat::Yaml => serde_yaml::to_string(&outlines)?,
    })
}

fn write_row(row: &OutlineRow<'_>, out: &mut String) {
    let indent = "  ".repeat(row.depth);
    let text = row.text;
    match (row.kind, row.rule) {
        (RowKind::Split, Some(rule)) => out.push_str(&format!("{indent}{text} [{rule}]\n")),
        (RowKind::Exception, _) => out.push_str(&format!("{indent}{text} {{exception}}\n")),
        _ => out.push_str(&format!("{indent}{text}\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_names() {
        for name in OutputFormat::NAMES {
            let format: OutputFormat = name.parse().unwrap();
            assert_eq!(format.name(), *name);
        }
    }

    #[test]
    fn test_unknown_format_lists_names() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown output format 'xml' (available: simple, lines, json, yaml)"
        );
    }

    #[test]
    fn test_render_simple_and_lines() {
        let t = tokens(&["Hi", ",", "you"]);
        assert_eq!(render_tokens(&t, OutputFormat::Simple).unwrap(), "Hi , you");
        assert_eq!(render_tokens(&t, OutputFormat::Lines).unwrap(), "Hi\n,\nyou");
    }

    #[test]
    fn test_render_json() {
        let t = tokens(&["do", "n't"]);
        assert_eq!(render_tokens(&t, OutputFormat::Json).unwrap(), r#"["do","n't"]"#);
    }

    #[test]
    fn test_render_yaml() {
        let t = tokens(&["$", "5.00"]);
        let yaml = render_tokens(&t, OutputFormat::Yaml).unwrap();
        let back: Vec<String> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tokens(&[], OutputFormat::Simple).unwrap(), "");
        assert_eq!(render_explanation(&[], OutputFormat::Lines).unwrap(), "");
    }

    #[test]
    fn test_outline() {
        let trees = vec![
            Decomposition::Split {
                token: "Hi,".into(),
                rule: "final-punctuation".into(),
                parts: vec![
                    Decomposition::Atomic { token: "Hi".into() },
                    Decomposition::Atomic { token: ",".into() },
                ],
            },
            Decomposition::Exception {
                surface: "don't".into(),
                tokens: tokens(&["do", "n't"]),
            },
        ];
        assert_eq!(
            render_explanation(&trees, OutputFormat::Simple).unwrap(),
            "Hi, [final-punctuation]\n  Hi\n  ,\ndon't {exception}\n  do\n  n't"
        );
    }

    #[test]
    fn test_explanation_json_rows() {
        let trees = vec![Decomposition::Split {
            token: "$5".into(),
            rule: "currency".into(),
            parts: vec![
                Decomposition::Atomic { token: "$".into() },
                Decomposition::Atomic { token: "5".into() },
            ],
        }];
        let json = render_explanation(&trees, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([[
                {"depth": 0, "kind": "split", "text": "$5", "rule": "currency"},
                {"depth": 1, "kind": "atomic", "text": "$"},
                {"depth": 1, "kind": "atomic", "text": "5"},
            ]])
        );
    }

    #[test]
    fn test_deep_outline() {
        let tokenizer = crate::testing::rules_only_tokenizer(&[("tail", "(.+?)(.)")]);
        let trees = tokenizer.explain(&"x".repeat(2_000));
        let outline = render_explanation(&trees, OutputFormat::Lines).unwrap();
        assert_eq!(outline.lines().filter(|line| line.trim() == "x").count(), 2_000);
        assert!(outline.lines().last().unwrap().starts_with(&"  ".repeat(1_999)));
    }
}
