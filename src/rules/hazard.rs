//! Static check for rules that can recurse forever.
//!
//! Every capture of a matching rule is fed back into the rule walk. If a
//! capture can be the entire token, the same token comes back to the same rule
//! and the walk never ends. A capture can be the entire token exactly when
//! everything else in the pattern around it can match the empty string, which
//! is a structural property of the pattern and can be read off its HIR.

use regex_syntax::hir::{Hir, HirKind};

/// Capture group indices (1-based, pattern order) that could span a whole match.
pub fn whole_token_groups(hir: &Hir) -> Vec<usize> {
    let mut groups = Vec::new();
    collect(hir, &mut groups);
    groups.sort_unstable();
    groups.dedup();
    groups
}

fn can_be_empty(hir: &Hir) -> bool {
    hir.properties().minimum_len() == Some(0)
}

/// Collect the groups that could span the whole of `hir`'s match.
fn collect(hir: &Hir, out: &mut Vec<usize>) {
    match hir.kind() {
        HirKind::Capture(cap) => {
            out.push(cap.index as usize);
            collect(&cap.sub, out);
        }
        HirKind::Concat(subs) => {
            for (i, sub) in subs.iter().enumerate() {
                let rest_empty = subs
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .all(|(_, other)| can_be_empty(other));
                if rest_empty {
                    collect(sub, out);
                }
            }
        }
        HirKind::Alternation(subs) => {
            for sub in subs {
                collect(sub, out);
            }
        }
        HirKind::Repetition(rep) => {
            if rep.max == Some(0) {
                return;
            }
            // With two or more mandatory iterations a single one only spans the
            // whole match if the others can be empty.
            if rep.min <= 1 || can_be_empty(&rep.sub) {
                collect(&rep.sub, out);
            }
        }
        HirKind::Empty | HirKind::Literal(_) | HirKind::Class(_) | HirKind::Look(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(pattern: &str) -> Vec<usize> {
        let hir = regex_syntax::Parser::new().parse(pattern).unwrap();
        whole_token_groups(&hir)
    }

    #[test]
    fn test_split_rules_are_safe() {
        assert!(groups(r#"(["'(\[{¡¿])(.+)"#).is_empty());
        assert!(groups(r#"(.+?)([.,;:!?"')\]}]+)"#).is_empty());
        assert!(groups(r"([[:punct:]])([[:punct:]]+)").is_empty());
        assert!(groups(r"([$€£¥])(.+)").is_empty());
    }

    #[test]
    fn test_lone_group_is_hazardous() {
        assert_eq!(groups("(.+)"), vec![1]);
    }

    #[test]
    fn test_optional_neighbours() {
        assert_eq!(groups("(a*)(b*)"), vec![1, 2]);
        assert_eq!(groups("(-)?(\\d+)"), vec![2]);
    }

    #[test]
    fn test_nested_groups() {
        // Group 2 is all of group 1, which is all of the token
        assert_eq!(groups("((\\w+))"), vec![1, 2]);
        // Group 3 is only part of group 1
        assert_eq!(groups("((\\w)(\\w+))"), vec![1]);
    }

    #[test]
    fn test_alternation_branches() {
        assert_eq!(groups("(a)|(b)"), vec![1, 2]);
        assert_eq!(groups("x(a)|(b)y"), Vec::<usize>::new());
    }

    #[test]
    fn test_repetition() {
        assert_eq!(groups("(ab)+"), vec![1]);
        assert!(groups("(ab){2}").is_empty());
        assert!(groups("(a){0}b").is_empty());
    }

    #[test]
    fn test_groups_without_captures() {
        assert!(groups("abc").is_empty());
        assert!(groups("(?:ab)(?:cd)").is_empty());
    }
}
