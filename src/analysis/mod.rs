//! Profile analysis: segmentation, classification and the keyword fallback.

mod counts;
mod report;

pub use counts::{CountEntry, CountTable};
pub use report::Report;

use serde::Serialize;

use crate::aggregate::FallbackAggregator;
use crate::classify::{AttributeClassifier, Children, Gender};
use crate::segment::{ProfileSegmenter, MIN_CHUNK_LEN};

/// `raw` value of records synthesized from document-wide keyword counts.
pub const AGGREGATE_MARKER: &str = "aggregated";

/// One classified profile, or one aggregate signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    /// Gender label
    pub gender: Gender,
    /// Children-status label
    pub children: Children,
    /// Source chunk, or [`AGGREGATE_MARKER`]
    pub raw: String,
}

impl ClassifiedRecord {
    /// Whether this record came from the keyword fallback.
    pub fn is_aggregate(&self) -> bool {
        self.raw == AGGREGATE_MARKER
    }
}

/// How the records of a [`ResultSet`] were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Per-profile classification of segmented chunks
    Profiles,
    /// Document-wide keyword counts
    Aggregate,
    /// Nothing found
    #[default]
    Empty,
}

/// Records in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResultSet {
    /// How the records were produced
    pub source: RecordSource,
    /// The records
    pub records: Vec<ClassifiedRecord>,
}

impl ResultSet {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedRecord> {
        self.records.iter()
    }

    /// The first `n` records.
    pub fn sample(&self, n: usize) -> &[ClassifiedRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ClassifiedRecord;
    type IntoIter = std::slice::Iter<'a, ClassifiedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Options for analyzing extracted text.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Chunks of this many characters or fewer are discarded
    pub min_chunk_len: usize,

    /// Use document-wide keyword counts when no profile is classified
    pub aggregate_fallback: bool,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum chunk length.
    pub fn with_min_chunk_len(mut self, len: usize) -> Self {
        self.min_chunk_len = len;
        self
    }

    /// Enable or disable the keyword fallback.
    pub fn with_aggregate_fallback(mut self, enabled: bool) -> Self {
        self.aggregate_fallback = enabled;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_chunk_len: MIN_CHUNK_LEN,
            aggregate_fallback: true,
        }
    }
}

/// Turns extracted report text into classified records.
///
/// Each chunk yields a record when at least one attribute is recognized.
/// If no chunk does, the whole text is scanned for keywords instead and
/// one partial record is emitted per signal found.
///
/// # Example
///
/// ```
/// use perfil::analysis::AnalysisPipeline;
/// use perfil::classify::Gender;
///
/// let results = AnalysisPipeline::new().analyze("Nome: Maria Souza, advogada, sem filhos");
/// assert_eq!(results.records[0].gender, Gender::Feminino);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    segmenter: ProfileSegmenter,
    classifier: AttributeClassifier,
    aggregator: FallbackAggregator,
    aggregate_fallback: bool,
}

impl AnalysisPipeline {
    /// Pipeline with default options and rules.
    pub fn new() -> Self {
        Self::with_options(&AnalysisOptions::default())
    }

    /// Pipeline with custom options.
    pub fn with_options(options: &AnalysisOptions) -> Self {
        Self {
            segmenter: ProfileSegmenter::with_min_len(options.min_chunk_len),
            classifier: AttributeClassifier::new(),
            aggregator: FallbackAggregator::new(),
            aggregate_fallback: options.aggregate_fallback,
        }
    }

    /// Replace the classifier (e.g. with another rule table).
    pub fn with_classifier(mut self, classifier: AttributeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Classify `text`.
    pub fn analyze(&self, text: &str) -> ResultSet {
        let records: Vec<ClassifiedRecord> = self
            .segmenter
            .segment(text)
            .filter_map(|chunk| {
                let (gender, children) = self.classifier.classify(chunk.as_str());
                if gender.is_none() && children.is_none() {
                    return None;
                }
                Some(ClassifiedRecord {
                    gender: gender.unwrap_or(Gender::Desconhecido),
                    children: children.unwrap_or(Children::Desconhecido),
                    raw: chunk.into_string(),
                })
            })
            .collect();

        if !records.is_empty() {
            return ResultSet {
                source: RecordSource::Profiles,
                records,
            };
        }

        if self.aggregate_fallback {
            let records = self.aggregator.records(text);
            if !records.is_empty() {
                log::info!(
                    "no profile classified, using {} aggregate record(s)",
                    records.len()
                );
                return ResultSet {
                    source: RecordSource::Aggregate,
                    records,
                };
            }
        }

        ResultSet::default()
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}
