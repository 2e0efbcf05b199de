//! Rendering options and configuration.

/// Options for rendering analysis reports.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Rows shown in the record sample table
    pub sample_size: usize,

    /// Width in characters of the longest bar
    pub bar_width: usize,

    /// Characters of extracted text shown when nothing was classified
    pub preview_chars: usize,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sample rows.
    pub fn with_sample_size(mut self, rows: usize) -> Self {
        self.sample_size = rows;
        self
    }

    /// Set the bar width. At least one character.
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    /// Set the preview length.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_size: 50,
            bar_width: 40,
            preview_chars: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_sample_size(10)
            .with_bar_width(0)
            .with_preview_chars(200);

        assert_eq!(options.sample_size, 10);
        assert_eq!(options.bar_width, 1);
        assert_eq!(options.preview_chars, 200);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.sample_size, 50);
        assert_eq!(options.preview_chars, 1500);
    }
}
