//! Error types for perfil.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::extract::BackendAttempt;

/// Result type alias for perfil operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Things to try when no backend produced any text.
const NO_TEXT_SUGGESTIONS: &[&str] = &[
    "Try the other extraction backend (--backend lopdf or --backend pdf-extract)",
    "If the PDF is a scanned image, run it through OCR (e.g. Tesseract) first",
];

/// Error types that can occur while extracting or analyzing a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source document does not exist or cannot be read.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No text extraction backend is compiled in or configured.
    #[error(
        "No PDF text extraction backend available; build with the `lopdf` or `pdf-extract` feature"
    )]
    BackendUnavailable,

    /// A single backend failed. Recovered locally by the extractor.
    #[error("{backend} backend failed: {message}")]
    Backend {
        /// Backend name
        backend: String,
        /// Failure description
        message: String,
    },

    /// Every backend was tried and none produced text.
    #[error("No text extracted from PDF ({} backend(s) tried)", .attempts.len())]
    NoTextExtracted {
        /// What each backend did
        attempts: Vec<BackendAttempt>,
    },

    /// The data is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Requested page does not exist.
    #[error("Page {requested} is out of range (document has {page_count} pages)")]
    PageIndexOutOfRange {
        /// 1-based page that was requested
        requested: u32,
        /// Pages actually present
        page_count: u32,
    },

    /// A classification rule did not compile.
    #[error("Invalid classification pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Remediation hints shown to the user, if any.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Error::NoTextExtracted { .. } => NO_TEXT_SUGGESTIONS,
            _ => &[],
        }
    }
}

#[cfg(feature = "lopdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(feature = "pdf-extract")]
impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::TextExtract(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageIndexOutOfRange {
            requested: 34,
            page_count: 12,
        };
        assert_eq!(
            err.to_string(),
            "Page 34 is out of range (document has 12 pages)"
        );

        let err = Error::NotFound(PathBuf::from("perfil.pdf"));
        assert_eq!(err.to_string(), "File not found: perfil.pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_suggestions_only_for_missing_text() {
        let err = Error::NoTextExtracted { attempts: vec![] };
        assert_eq!(err.suggestions().len(), 2);
        assert!(err.suggestions()[1].contains("OCR"));
        assert!(Error::UnknownFormat.suggestions().is_empty());
    }
}
