//! # perfil
//!
//! Demographic counts for lawyer profile reports published as PDF.
//!
//! The text of the report is extracted through a chain of PDF backends,
//! split into per-profile chunks, and each chunk is classified by gender
//! and children-status with ordered keyword rules. When no profile can be
//! isolated the whole document is scanned for keywords instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use perfil::{analyze_file, render};
//!
//! fn main() -> perfil::Result<()> {
//!     let report = analyze_file("perfil2.pdf")?;
//!
//!     let text = render::to_text(&report, &render::RenderOptions::default())?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Backend fallback**: lopdf first, pdf-extract second, each behind a
//!   cargo feature of the same name
//! - **Versioned rules**: precedence-ordered keyword tables per attribute
//! - **Keyword fallback**: document-wide counts when segmentation fails
//! - **Summary page mode**: headline numbers read from one fixed page

pub mod aggregate;
pub mod analysis;
pub mod classify;
pub mod detect;
pub mod error;
pub mod extract;
pub mod page_summary;
pub mod render;
pub mod segment;

// Re-export commonly used types
pub use aggregate::{FallbackAggregator, KeywordCounts};
pub use analysis::{
    AnalysisOptions, AnalysisPipeline, ClassifiedRecord, CountEntry, CountTable, RecordSource,
    Report, ResultSet, AGGREGATE_MARKER,
};
pub use classify::{AttributeClassifier, Children, Gender, RuleTable, RULES_V1};
pub use error::{Error, Result};
pub use extract::{
    AttemptOutcome, BackendAttempt, BackendKind, ErrorMode, ExtractOptions, Extraction, PageSource,
    PdfBackend, PdfSource, TextExtractor,
};
pub use page_summary::{PageCounts, PageSummary, PageSummaryOptions, DEFAULT_SUMMARY_PAGE};
pub use render::{JsonFormat, RenderOptions};
pub use segment::{ProfileChunk, ProfileSegmenter, MIN_CHUNK_LEN};

use std::path::Path;
use std::sync::Arc;

/// Default report file name looked up by the command-line tool.
pub const DEFAULT_REPORT_FILE: &str = "Microsoft Word - perfil2.mhtml.pdf";

/// Extract the plain text of a PDF file.
///
/// Returns an empty string if no backend finds any text.
///
/// # Example
///
/// ```no_run
/// let text = perfil::extract_text("perfil2.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Perfil::new().extract(path).map(|e| e.text)
}

/// Extract and analyze a PDF file with default options.
///
/// Fails with `NoTextExtracted` when no backend finds any text.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<Report> {
    Perfil::new().analyze(path)
}

/// Extract and analyze a PDF held in memory (e.g. an upload).
pub fn analyze_bytes(data: &[u8]) -> Result<Report> {
    Perfil::new().analyze_bytes(data)
}

/// Analyze text that was already extracted.
pub fn analyze_text(text: &str) -> ResultSet {
    AnalysisPipeline::new().analyze(text)
}

/// Read the headline counts from the default summary page (page 34).
pub fn page_counts<P: AsRef<Path>>(path: P) -> Result<PageCounts> {
    Perfil::new().page_counts(path)
}

/// Builder tying extraction, analysis and the summary page together.
///
/// # Example
///
/// ```no_run
/// use perfil::{BackendKind, Perfil};
///
/// let report = Perfil::new()
///     .with_backends(&[BackendKind::PdfExtract])
///     .lenient()
///     .with_min_chunk_len(20)
///     .analyze("perfil2.pdf")?;
/// println!("{} records", report.results.len());
/// # Ok::<(), perfil::Error>(())
/// ```
#[derive(Default)]
pub struct Perfil {
    extract_options: ExtractOptions,
    analysis_options: AnalysisOptions,
    page_options: PageSummaryOptions,
    custom_backends: Option<Vec<Arc<dyn PdfBackend>>>,
}

impl Perfil {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these built-in backends, in this order.
    pub fn with_backends(mut self, backends: &[BackendKind]) -> Self {
        self.extract_options = self.extract_options.with_backends(backends);
        self.custom_backends = None;
        self
    }

    /// Use a custom backend chain.
    pub fn with_custom_backends(mut self, backends: Vec<Arc<dyn PdfBackend>>) -> Self {
        self.custom_backends = Some(backends);
        self
    }

    /// Skip unreadable pages instead of abandoning the backend.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Set the minimum profile chunk length.
    pub fn with_min_chunk_len(mut self, len: usize) -> Self {
        self.analysis_options = self.analysis_options.with_min_chunk_len(len);
        self
    }

    /// Enable or disable the keyword fallback.
    pub fn with_aggregate_fallback(mut self, enabled: bool) -> Self {
        self.analysis_options = self.analysis_options.with_aggregate_fallback(enabled);
        self
    }

    /// Set the 1-based summary page.
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_options = self.page_options.with_page_number(page_number);
        self
    }

    /// The configured text extractor.
    pub fn extractor(&self) -> TextExtractor {
        match &self.custom_backends {
            Some(backends) => TextExtractor::with_backends(backends.clone())
                .with_error_mode(self.extract_options.error_mode),
            None => TextExtractor::from_options(&self.extract_options),
        }
    }

    /// Extract the text of a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        self.extractor().extract(&PdfSource::from(path.as_ref()))
    }

    /// Extract and analyze a PDF file.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        self.analyze_source(&PdfSource::from(path.as_ref()))
    }

    /// Extract and analyze a PDF held in memory.
    pub fn analyze_bytes(&self, data: &[u8]) -> Result<Report> {
        self.analyze_source(&PdfSource::from(data))
    }

    /// Extract and analyze any PDF source.
    pub fn analyze_source(&self, source: &PdfSource) -> Result<Report> {
        let extraction = self.extractor().extract(source)?;
        if extraction.is_blank() {
            return Err(Error::NoTextExtracted {
                attempts: extraction.attempts,
            });
        }

        let pipeline = AnalysisPipeline::with_options(&self.analysis_options);
        let results = pipeline.analyze(&extraction.text);
        log::debug!("{} record(s) from {:?}", results.len(), results.source);
        Ok(Report::new(extraction, results))
    }

    /// Read the headline counts from the summary page.
    pub fn page_counts<P: AsRef<Path>>(&self, path: P) -> Result<PageCounts> {
        self.page_summary()
            .summarize(&PdfSource::from(path.as_ref()))
    }

    /// The configured summary page reader.
    pub fn page_summary(&self) -> PageSummary {
        PageSummary::with_options(self.extractor(), &self.page_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfil_builder() {
        let perfil = Perfil::new()
            .with_backends(&[BackendKind::PdfExtract])
            .lenient()
            .with_min_chunk_len(20)
            .with_page_number(2);

        assert_eq!(
            perfil.extract_options.backends,
            vec![BackendKind::PdfExtract]
        );
        assert_eq!(perfil.extract_options.error_mode, ErrorMode::Lenient);
        assert_eq!(perfil.analysis_options.min_chunk_len, 20);
        assert_eq!(perfil.page_summary().page_number(), 2);
    }

    #[test]
    fn test_perfil_builder_default() {
        let perfil = Perfil::default();
        assert_eq!(perfil.page_options.page_number, DEFAULT_SUMMARY_PAGE);
        assert!(perfil.analysis_options.aggregate_fallback);
    }

    #[test]
    fn test_no_backends_is_unavailable() {
        let perfil = Perfil::new().with_backends(&[]);
        assert!(perfil.extractor().backend_names().is_empty());
        assert!(matches!(
            perfil.analyze_bytes(b"%PDF-1.4\n"),
            Err(Error::BackendUnavailable)
        ));
    }

    #[test]
    fn test_analyze_missing_file() {
        let result = analyze_file("/nonexistent/Microsoft Word - perfil2.mhtml.pdf");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_analyze_invalid_bytes_reports_no_text() {
        let result = analyze_bytes(b"not a pdf");
        match result {
            Err(Error::NoTextExtracted { attempts }) => {
                assert_eq!(attempts.len(), perfil_backend_count());
                assert!(attempts
                    .iter()
                    .all(|a| !matches!(a.outcome, AttemptOutcome::Accepted { .. })));
            }
            Err(Error::BackendUnavailable) => assert_eq!(perfil_backend_count(), 0),
            other => panic!("unexpected result: {:?}", other.map(|r| r.results)),
        }
    }

    fn perfil_backend_count() -> usize {
        BackendKind::ALL.iter().filter(|k| k.is_available()).count()
    }

    #[test]
    fn test_analyze_text() {
        let results = analyze_text("Advogado: Carlos Lima, sem filhos");
        assert_eq!(results.len(), 1);
        assert_eq!(results.records[0].gender, Gender::Desconhecido);
        assert_eq!(results.records[0].children, Children::Nao);
    }
}
