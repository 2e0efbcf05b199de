//! Document-wide keyword counts, used when no profile can be isolated.

use regex::Regex;
use serde::Serialize;

use crate::analysis::{ClassifiedRecord, AGGREGATE_MARKER};
use crate::classify::{normalize, word_regex, Children, Gender};

const MASCULINO_PATTERN: &str = r"masculino|homem|advogado";
const FEMININO_PATTERN: &str = r"feminino|mulher|advogada";
const FILHOS_PATTERN: &str = r"filho|filhos|tem filhos";
const SEM_FILHOS_PATTERN: &str =
    r"sem filhos|não tem filhos|nao tem filhos|não possui filhos|nao possui filhos";

/// Occurrences of each keyword group in a document.
///
/// The groups are independent: one sentence can count towards several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeywordCounts {
    /// Male cues
    pub masculino: usize,
    /// Female cues
    pub feminino: usize,
    /// Children cues
    pub filhos: usize,
    /// No-children cues
    pub sem_filhos: usize,
}

impl KeywordCounts {
    /// True when no keyword was found at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Coarse whole-document keyword counter.
///
/// This reports whether each signal is present in the document, not how
/// many people it describes.
#[derive(Debug, Clone)]
pub struct FallbackAggregator {
    masculino: Regex,
    feminino: Regex,
    filhos: Regex,
    sem_filhos: Regex,
}

impl FallbackAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self {
            masculino: word_regex(MASCULINO_PATTERN).expect("valid pattern"),
            feminino: word_regex(FEMININO_PATTERN).expect("valid pattern"),
            filhos: word_regex(FILHOS_PATTERN).expect("valid pattern"),
            sem_filhos: word_regex(SEM_FILHOS_PATTERN).expect("valid pattern"),
        }
    }

    /// Count keyword occurrences across the whole text.
    pub fn count(&self, text: &str) -> KeywordCounts {
        let text = normalize(text);
        KeywordCounts {
            masculino: self.masculino.find_iter(&text).count(),
            feminino: self.feminino.find_iter(&text).count(),
            filhos: self.filhos.find_iter(&text).count(),
            sem_filhos: self.sem_filhos.find_iter(&text).count(),
        }
    }

    /// One partial record per non-zero count, in the order
    /// Masculino, Feminino, Sim, Não.
    pub fn records(&self, text: &str) -> Vec<ClassifiedRecord> {
        let counts = self.count(text);
        log::debug!("keyword counts: {:?}", counts);

        let mut records = Vec::with_capacity(4);
        if counts.masculino > 0 {
            records.push(aggregate(Gender::Masculino, Children::Desconhecido));
        }
        if counts.feminino > 0 {
            records.push(aggregate(Gender::Feminino, Children::Desconhecido));
        }
        if counts.filhos > 0 {
            records.push(aggregate(Gender::Desconhecido, Children::Sim));
        }
        if counts.sem_filhos > 0 {
            records.push(aggregate(Gender::Desconhecido, Children::Nao));
        }
        records
    }
}

impl Default for FallbackAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn aggregate(gender: Gender, children: Children) -> ClassifiedRecord {
    ClassifiedRecord {
        gender,
        children,
        raw: AGGREGATE_MARKER.to_string(),
    }
}
