//! Gender and children-status classification of profile text.

mod rules;

pub use rules::{Rule, RuleTable, RULES_V1};

pub(crate) use rules::word_regex;

use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use rules::CompiledRules;

/// Gender label of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    /// Male
    Masculino,
    /// Female
    Feminino,
    /// No gender cue found
    Desconhecido,
}

impl Gender {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Masculino => "Masculino",
            Gender::Feminino => "Feminino",
            Gender::Desconhecido => "Desconhecido",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Children-status label of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Children {
    /// Has children
    Sim,
    /// Has no children
    #[serde(rename = "Não")]
    Nao,
    /// No children cue found
    Desconhecido,
}

impl Children {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Children::Sim => "Sim",
            Children::Nao => "Não",
            Children::Desconhecido => "Desconhecido",
        }
    }
}

impl fmt::Display for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and NFC-normalize text before matching, so that decomposed
/// accents ("na\u{303}o") match the composed keywords ("não").
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Infers gender and children-status from free text with an ordered
/// keyword rule table.
///
/// Matching is case-insensitive and on whole words. Classification never
/// fails: no matching rule means `None`.
///
/// # Example
///
/// ```
/// use perfil::classify::{AttributeClassifier, Children, Gender};
///
/// let classifier = AttributeClassifier::new();
/// assert_eq!(classifier.classify_gender("Advogada, OAB/SP"), Some(Gender::Feminino));
/// assert_eq!(classifier.classify_children("Sem filhos"), Some(Children::Nao));
/// ```
#[derive(Debug, Clone)]
pub struct AttributeClassifier {
    version: u32,
    gender: CompiledRules<Gender>,
    children: CompiledRules<Children>,
}

impl AttributeClassifier {
    /// Classifier using the current rule table.
    pub fn new() -> Self {
        Self::with_rules(&RULES_V1).expect("built-in rule table compiles")
    }

    /// Classifier using a custom rule table.
    pub fn with_rules(table: &RuleTable) -> Result<Self> {
        Ok(Self {
            version: table.version,
            gender: CompiledRules::compile(table.gender)?,
            children: CompiledRules::compile(table.children)?,
        })
    }

    /// Version of the rule table in use.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Gender cue in `chunk`, if any.
    pub fn classify_gender(&self, chunk: &str) -> Option<Gender> {
        self.gender.first_match(&normalize(chunk))
    }

    /// Children cue in `chunk`, if any. Negations take precedence over the
    /// broad positive cues.
    pub fn classify_children(&self, chunk: &str) -> Option<Children> {
        self.children.first_match(&normalize(chunk))
    }

    /// Both attributes, normalizing the chunk once.
    pub fn classify(&self, chunk: &str) -> (Option<Gender>, Option<Children>) {
        let text = normalize(chunk);
        (
            self.gender.first_match(&text),
            self.children.first_match(&text),
        )
    }
}

impl Default for AttributeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
