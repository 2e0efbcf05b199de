//! Splitting extracted text into per-profile chunks.

use std::borrow::Cow;

use regex::Regex;

/// Fragments this short (in characters, after trimming) are treated as noise.
pub const MIN_CHUNK_LEN: usize = 10;

/// Blank lines, or one of the labels that start a profile.
const DELIMITER_PATTERN: &str = r"(?i)\n{2,}|Nome:|Perfil|Advogad[oa]:";

/// One candidate profile: trimmed text longer than the minimum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChunk(String);

impl ProfileChunk {
    /// Chunk text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the chunk text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ProfileChunk {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits report text on blank lines and profile labels
/// (`Nome:`, `Perfil`, `Advogado:`, `Advogada:`, any case).
#[derive(Debug, Clone)]
pub struct ProfileSegmenter {
    delimiter: Regex,
    min_len: usize,
}

impl ProfileSegmenter {
    /// Segmenter with the default minimum chunk length.
    pub fn new() -> Self {
        Self::with_min_len(MIN_CHUNK_LEN)
    }

    /// Segmenter discarding chunks of `min_len` characters or fewer.
    pub fn with_min_len(min_len: usize) -> Self {
        Self {
            delimiter: Regex::new(DELIMITER_PATTERN).expect("delimiter pattern compiles"),
            min_len,
        }
    }

    /// Chunks of `text` in document order.
    pub fn segment(&self, text: &str) -> std::vec::IntoIter<ProfileChunk> {
        let text = normalize_line_endings(text);

        let chunks: Vec<ProfileChunk> = self
            .delimiter
            .split(&text)
            .map(str::trim)
            .filter(|part| part.chars().count() > self.min_len)
            .map(|part| ProfileChunk(part.to_string()))
            .collect();

        log::debug!("segmented text into {} chunks", chunks.len());
        chunks.into_iter()
    }
}

impl Default for ProfileSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
