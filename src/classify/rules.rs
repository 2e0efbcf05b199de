//! Ordered keyword rule tables.
//!
//! A rule is a regex alternation matched on whole-word boundaries against
//! lowercased text. Rules of one attribute are tried in table order and the
//! first match decides the outcome, so the order *is* the precedence.

use regex::Regex;

use crate::error::Result;

use super::{Children, Gender};

/// A single keyword rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<T> {
    /// Regex alternation, without word boundaries
    pub pattern: &'static str,
    /// Value produced when the pattern matches
    pub outcome: T,
}

/// A versioned set of rules for both attributes.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    /// Table revision, reported alongside results
    pub version: u32,
    /// Gender rules, in precedence order
    pub gender: &'static [Rule<Gender>],
    /// Children rules, in precedence order
    pub children: &'static [Rule<Children>],
}

/// Current rule table.
///
/// Gender rules 3 and 4 can never fire after rules 1 and 2; they are kept
/// so the table matches the published heuristic exactly.
///
/// Known limitation: the bare `filho`/`filhos` cue in children rule 2 also
/// fires on phrases such as "número de filhos: não informado".
pub const RULES_V1: RuleTable = RuleTable {
    version: 1,
    gender: &[
        Rule {
            pattern: r"sexo[:\s]*feminino|feminino|mulher|advogada",
            outcome: Gender::Feminino,
        },
        Rule {
            pattern: r"sexo[:\s]*masculino|masculino|homem|advogado",
            outcome: Gender::Masculino,
        },
        Rule {
            pattern: r"mulher",
            outcome: Gender::Feminino,
        },
        Rule {
            pattern: r"homem",
            outcome: Gender::Masculino,
        },
    ],
    children: &[
        Rule {
            pattern: r"sem filhos|não tem filhos|nao tem filhos|não possui filhos|nao possui filhos|filhos[:\s]*0",
            outcome: Children::Nao,
        },
        Rule {
            pattern: r"tem filhos|filho|filhos|filhos[:\s]*sim|filhos[:\s]*s",
            outcome: Children::Sim,
        },
    ],
};

/// Compile an alternation so it only matches whole words.
pub(crate) fn word_regex(alternation: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"\b(?:{})\b", alternation))?)
}

/// Rules of one attribute, compiled.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRules<T> {
    rules: Vec<(Regex, T)>,
}

impl<T: Copy> CompiledRules<T> {
    pub(crate) fn compile(rules: &[Rule<T>]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| Ok((word_regex(rule.pattern)?, rule.outcome)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Outcome of the first rule matching `text`, which must already be
    /// normalized.
    pub(crate) fn first_match(&self, text: &str) -> Option<T> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, outcome)| *outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_rule_order() {
        let gender: Vec<Gender> = RULES_V1.gender.iter().map(|r| r.outcome).collect();
        assert_eq!(
            gender,
            vec![
                Gender::Feminino,
                Gender::Masculino,
                Gender::Feminino,
                Gender::Masculino
            ]
        );
        assert_eq!(RULES_V1.children[0].outcome, Children::Nao);
        assert_eq!(RULES_V1.children[1].outcome, Children::Sim);
    }

    #[test]
    fn test_word_regex_respects_boundaries() {
        let re = word_regex("homem|filho").unwrap();
        assert!(re.is_match("um homem"));
        assert!(!re.is_match("homenagem"));
        assert!(!re.is_match("filhote"));
        assert!(re.is_match("filho."));
    }

    #[test]
    fn test_word_regex_unicode_boundaries() {
        let re = word_regex("não tem filhos").unwrap();
        assert!(re.is_match("ela não tem filhos"));
        assert!(!re.is_match("ãnão tem filhos"));
    }

    #[test]
    fn test_first_match_wins() {
        let rules = CompiledRules::compile(&[
            Rule {
                pattern: "a",
                outcome: 1,
            },
            Rule {
                pattern: "a|b",
                outcome: 2,
            },
        ])
        .unwrap();
        assert_eq!(rules.first_match("b a"), Some(1));
        assert_eq!(rules.first_match("b"), Some(2));
        assert_eq!(rules.first_match("c"), None);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(word_regex("(unclosed").is_err());
    }
}
