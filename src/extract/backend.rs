//! PDF backend abstraction layer.
//!
//! Each backend turns raw PDF bytes into an open [`PageSource`] that can be
//! walked page by page. The extractor only sees these traits, so concrete
//! libraries (lopdf, pdf-extract) can be swapped, reordered, or mocked.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

#[cfg(any(feature = "lopdf", feature = "pdf-extract"))]
use crate::error::Error;
use crate::error::Result;

/// A PDF text extraction library.
pub trait PdfBackend: Send + Sync {
    /// Short name used in logs and attempt reports.
    fn name(&self) -> &str;

    /// Open a document held in memory.
    ///
    /// The returned source owns everything it needs; dropping it releases
    /// the document.
    fn open(&self, data: &[u8]) -> Result<Box<dyn PageSource>>;
}

/// An open document whose pages can be read in order.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text of the 0-based page `index`.
    ///
    /// `Ok(None)` means the page has no text layer.
    fn page_text(&self, index: u32) -> Result<Option<String>>;
}

/// Built-in backends, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Structure-aware extraction through lopdf.
    Lopdf,
    /// Lower-fidelity extraction through pdf-extract.
    PdfExtract,
}

impl BackendKind {
    /// All built-in backends, highest priority first.
    pub const ALL: [BackendKind; 2] = [BackendKind::Lopdf, BackendKind::PdfExtract];

    /// Backend name as reported in attempts.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Lopdf => "lopdf",
            BackendKind::PdfExtract => "pdf-extract",
        }
    }

    /// Whether the backend was compiled into this build.
    pub fn is_available(self) -> bool {
        match self {
            BackendKind::Lopdf => cfg!(feature = "lopdf"),
            BackendKind::PdfExtract => cfg!(feature = "pdf-extract"),
        }
    }

    /// Create the backend, or `None` if its feature is disabled.
    pub fn instantiate(self) -> Option<Arc<dyn PdfBackend>> {
        match self {
            #[cfg(feature = "lopdf")]
            BackendKind::Lopdf => Some(Arc::new(LopdfBackend)),
            #[cfg(feature = "pdf-extract")]
            BackendKind::PdfExtract => Some(Arc::new(PdfExtractBackend)),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// LopdfBackend
// ---------------------------------------------------------------------------

/// Backend that reads the page tree with lopdf and extracts each page's
/// text with the page's font encodings.
#[cfg(feature = "lopdf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

#[cfg(feature = "lopdf")]
struct LopdfPages {
    doc: lopdf::Document,
    /// lopdf page numbers (1-based), in page order.
    page_numbers: Vec<u32>,
}

#[cfg(feature = "lopdf")]
impl PdfBackend for LopdfBackend {
    fn name(&self) -> &str {
        BackendKind::Lopdf.name()
    }

    fn open(&self, data: &[u8]) -> Result<Box<dyn PageSource>> {
        let format = crate::detect::detect_format_from_bytes(data)?;
        log::debug!("lopdf: loading {} ({} bytes)", format, data.len());

        let doc = lopdf::Document::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("lopdf: document is encrypted, text may be unreadable");
        }

        let page_numbers = doc.get_pages().keys().copied().collect();
        Ok(Box::new(LopdfPages { doc, page_numbers }))
    }
}

#[cfg(feature = "lopdf")]
impl PageSource for LopdfPages {
    fn page_count(&self) -> u32 {
        self.page_numbers.len() as u32
    }

    fn page_text(&self, index: u32) -> Result<Option<String>> {
        let page_num = *self
            .page_numbers
            .get(index as usize)
            .ok_or(Error::PageIndexOutOfRange {
                requested: index + 1,
                page_count: self.page_count(),
            })?;

        let text = self
            .doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;

        Ok(if text.is_empty() { None } else { Some(text) })
    }
}

// ---------------------------------------------------------------------------
// PdfExtractBackend
// ---------------------------------------------------------------------------

/// Backend built on pdf-extract. Decodes the whole document when opened.
#[cfg(feature = "pdf-extract")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

#[cfg(feature = "pdf-extract")]
struct PdfExtractPages {
    pages: Vec<String>,
}

#[cfg(feature = "pdf-extract")]
impl PdfBackend for PdfExtractBackend {
    fn name(&self) -> &str {
        BackendKind::PdfExtract.name()
    }

    fn open(&self, data: &[u8]) -> Result<Box<dyn PageSource>> {
        // pdf-extract panics on some malformed fonts and content streams.
        let pages = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }))
        .map_err(|_| Error::TextExtract("pdf-extract panicked while decoding".to_string()))??;

        log::debug!("pdf-extract: decoded {} pages", pages.len());
        Ok(Box::new(PdfExtractPages { pages }))
    }
}

#[cfg(feature = "pdf-extract")]
impl PageSource for PdfExtractPages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, index: u32) -> Result<Option<String>> {
        let text = self
            .pages
            .get(index as usize)
            .ok_or(Error::PageIndexOutOfRange {
                requested: index + 1,
                page_count: self.page_count(),
            })?;

        Ok(if text.is_empty() {
            None
        } else {
            Some(text.clone())
        })
    }
}
