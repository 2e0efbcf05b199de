//! Extraction options and configuration.

use super::BackendKind;

/// Options for extracting text from PDF documents.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Backends to try, highest priority first
    pub backends: Vec<BackendKind>,

    /// How page-level failures inside a backend are handled
    pub error_mode: ErrorMode,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the backend chain.
    pub fn with_backends(mut self, backends: &[BackendKind]) -> Self {
        self.backends = backends.to_vec();
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            backends: BackendKind::ALL.to_vec(),
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Page error handling inside a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A page error fails the whole backend, moving on to the next one
    #[default]
    Strict,
    /// Skip the page and keep reading with the same backend
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_backends(&[BackendKind::PdfExtract])
            .lenient();

        assert_eq!(options.backends, vec![BackendKind::PdfExtract]);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(
            options.backends,
            vec![BackendKind::Lopdf, BackendKind::PdfExtract]
        );
    }
}
