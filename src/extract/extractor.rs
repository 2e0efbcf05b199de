//! Backend fallback chain.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

use super::options::{ErrorMode, ExtractOptions};
use super::{PdfBackend, PdfSource};

/// What happened when one backend was tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The backend produced text and it was used.
    Accepted {
        /// Characters of text produced
        chars: usize,
    },
    /// The backend ran but produced only whitespace.
    Blank,
    /// The backend failed to open or read the document.
    Failed {
        /// Error message
        error: String,
    },
}

/// One entry of the extraction attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendAttempt {
    /// Backend name
    pub backend: String,
    /// Result of the attempt
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Text extracted from a document, along with how it was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// Concatenated page text. Empty when no backend produced anything.
    #[serde(skip_serializing)]
    pub text: String,

    /// Backend whose output was accepted
    pub backend: Option<String>,

    /// Every backend tried, in order
    pub attempts: Vec<BackendAttempt>,
}

impl Extraction {
    /// True when the text has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters extracted.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extracts plain text from PDFs through an ordered chain of backends.
///
/// A backend's output is used wholesale or not at all: the first backend
/// that yields non-whitespace text wins, failures and blank results move on
/// to the next backend.
///
/// # Example
///
/// ```no_run
/// use perfil::extract::{PdfSource, TextExtractor};
///
/// let extractor = TextExtractor::new();
/// let extraction = extractor.extract(&PdfSource::from("perfil.pdf"))?;
/// println!("{} chars via {:?}", extraction.char_count(), extraction.backend);
/// # Ok::<(), perfil::Error>(())
/// ```
pub struct TextExtractor {
    backends: Vec<Arc<dyn PdfBackend>>,
    error_mode: ErrorMode,
}

impl TextExtractor {
    /// Extractor with every compiled-in backend in default order.
    pub fn new() -> Self {
        Self::from_options(&ExtractOptions::default())
    }

    /// Build the backend chain from options, skipping backends that are
    /// not compiled in.
    pub fn from_options(options: &ExtractOptions) -> Self {
        let backends = options
            .backends
            .iter()
            .filter_map(|kind| {
                let backend = kind.instantiate();
                if backend.is_none() {
                    log::warn!("{} backend requested but not compiled in", kind);
                }
                backend
            })
            .collect();

        Self {
            backends,
            error_mode: options.error_mode,
        }
    }

    /// Extractor over an explicit backend chain.
    pub fn with_backends(backends: Vec<Arc<dyn PdfBackend>>) -> Self {
        Self {
            backends,
            error_mode: ErrorMode::default(),
        }
    }

    /// Set how page errors are handled.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Names of the configured backends, in order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Extract the text of every page.
    ///
    /// Fails with `NotFound` for an unreadable path and `BackendUnavailable`
    /// for an empty chain. Otherwise never fails: when all backends come up
    /// empty the returned extraction has blank text and a full attempt log.
    pub fn extract(&self, source: &PdfSource) -> Result<Extraction> {
        let data = source.read()?;

        if self.backends.is_empty() {
            return Err(Error::BackendUnavailable);
        }

        let mut attempts = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            let name = backend.name().to_string();
            match self.read_all_pages(backend.as_ref(), &data) {
                Ok(text) if !text.trim().is_empty() => {
                    log::debug!("{}: extracted {} bytes of text", name, text.len());
                    attempts.push(BackendAttempt {
                        backend: name.clone(),
                        outcome: AttemptOutcome::Accepted {
                            chars: text.chars().count(),
                        },
                    });
                    return Ok(Extraction {
                        text,
                        backend: Some(name),
                        attempts,
                    });
                }
                Ok(_) => {
                    log::info!("{}: no text found, trying next backend", name);
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Blank,
                    });
                }
                Err(e) => {
                    log::warn!("{}: extraction failed: {}", name, e);
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(Extraction {
            text: String::new(),
            backend: None,
            attempts,
        })
    }

    /// Read the text of a single 0-based page.
    ///
    /// Uses the first backend that can open the document. A page index past
    /// the end is a document-level error and is returned immediately.
    pub fn read_page(&self, source: &PdfSource, index: u32) -> Result<String> {
        let data = source.read()?;

        let mut last_error = Error::BackendUnavailable;

        for backend in &self.backends {
            let pages = match backend.open(&data) {
                Ok(pages) => pages,
                Err(e) => {
                    log::warn!("{}: cannot open document: {}", backend.name(), e);
                    last_error = backend_error(backend.as_ref(), e);
                    continue;
                }
            };

            let page_count = pages.page_count();
            if index >= page_count {
                return Err(Error::PageIndexOutOfRange {
                    requested: index + 1,
                    page_count,
                });
            }

            match pages.page_text(index) {
                Ok(text) => return Ok(text.unwrap_or_default()),
                Err(e) => {
                    log::warn!("{}: page {} failed: {}", backend.name(), index + 1, e);
                    last_error = backend_error(backend.as_ref(), e);
                }
            }
        }

        Err(last_error)
    }

    fn read_all_pages(&self, backend: &dyn PdfBackend, data: &[u8]) -> Result<String> {
        let pages = backend.open(data)?;
        let mut text = String::new();

        for index in 0..pages.page_count() {
            match pages.page_text(index) {
                Ok(Some(page_text)) if !page_text.is_empty() => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Ok(_) => log::debug!("{}: page {} has no text", backend.name(), index + 1),
                Err(e) if self.error_mode == ErrorMode::Lenient => {
                    log::warn!("{}: skipping page {}: {}", backend.name(), index + 1, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(text)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn backend_error(backend: &dyn PdfBackend, err: Error) -> Error {
    Error::Backend {
        backend: backend.name().to_string(),
        message: err.to_string(),
    }
}
