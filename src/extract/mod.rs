//! Text extraction from PDF documents.
//!
//! [`TextExtractor`] walks an ordered chain of [`PdfBackend`]s and keeps
//! the first one that produces text. Built-in backends are selected with
//! [`BackendKind`]; custom ones (or mocks) can be injected directly.

mod backend;
mod extractor;
mod options;

#[cfg(feature = "lopdf")]
pub use backend::LopdfBackend;
#[cfg(feature = "pdf-extract")]
pub use backend::PdfExtractBackend;
pub use backend::{BackendKind, PageSource, PdfBackend};
pub use extractor::{AttemptOutcome, BackendAttempt, Extraction, TextExtractor};
pub use options::{ErrorMode, ExtractOptions};

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where a PDF comes from: a file on disk or bytes already in memory
/// (e.g. an upload).
#[derive(Debug, Clone)]
pub enum PdfSource {
    /// A file path
    Path(PathBuf),
    /// In-memory document bytes
    Bytes(Vec<u8>),
}

impl PdfSource {
    /// Read the document bytes.
    ///
    /// Any failure to read a path is reported as `NotFound`.
    pub fn read(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            PdfSource::Path(path) => match std::fs::read(path) {
                Ok(data) => Ok(Cow::Owned(data)),
                Err(e) => {
                    log::debug!("cannot read {}: {}", path.display(), e);
                    Err(Error::NotFound(path.clone()))
                }
            },
            PdfSource::Bytes(data) => Ok(Cow::Borrowed(data)),
        }
    }
}

impl From<PathBuf> for PdfSource {
    fn from(path: PathBuf) -> Self {
        PdfSource::Path(path)
    }
}

impl From<&Path> for PdfSource {
    fn from(path: &Path) -> Self {
        PdfSource::Path(path.to_path_buf())
    }
}

impl From<&str> for PdfSource {
    fn from(path: &str) -> Self {
        PdfSource::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for PdfSource {
    fn from(data: Vec<u8>) -> Self {
        PdfSource::Bytes(data)
    }
}

impl From<&[u8]> for PdfSource {
    fn from(data: &[u8]) -> Self {
        PdfSource::Bytes(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_not_found() {
        let source = PdfSource::from("/nonexistent/perfil2.pdf");
        match source.read() {
            Err(Error::NotFound(path)) => {
                assert_eq!(path, PathBuf::from("/nonexistent/perfil2.pdf"))
            }
            other => panic!("expected NotFound, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_bytes_are_borrowed() {
        let source = PdfSource::from(&b"%PDF-1.4"[..]);
        let data = source.read().unwrap();
        assert!(matches!(data, Cow::Borrowed(_)));
        assert_eq!(&*data, b"%PDF-1.4");
    }

    #[test]
    fn test_missing_path_checked_before_backends() {
        let extractor = TextExtractor::with_backends(vec![]);
        let result = extractor.extract(&PdfSource::from("/nonexistent/perfil2.pdf"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
