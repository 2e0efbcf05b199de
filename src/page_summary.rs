//! Headline counts printed on a single summary page of the report.
//!
//! Some reports state their totals in prose on one fixed page
//! ("120 homens, 45 mulheres, e 10 advogados com filhos"). This mode reads
//! only that page and pulls the three numbers out with regexes.

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::extract::{PdfSource, TextExtractor};

/// 1-based page holding the summary in the standard report.
pub const DEFAULT_SUMMARY_PAGE: u32 = 34;

const HOMENS_PATTERN: &str = r"(?i)\b(\d[\d.,]*)\s+homens\b";
const MULHERES_PATTERN: &str = r"(?i)\b(\d[\d.,]*)\s+mulheres\b";
const FILHOS_PATTERN: &str = r"(?i)\b(\d[\d.,]*)\s+(?:advogad[oa]s\s+)?com\s+filhos\b";

/// Options for the single-page summary.
#[derive(Debug, Clone)]
pub struct PageSummaryOptions {
    /// 1-based page to read
    pub page_number: u32,
}

impl PageSummaryOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 1-based page to read. Page 0 is treated as page 1.
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number.max(1);
        self
    }
}

impl Default for PageSummaryOptions {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_SUMMARY_PAGE,
        }
    }
}

/// Counts read from the summary page. Missing phrases count as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageCounts {
    /// 1-based page the counts were read from
    pub page_number: u32,
    /// "<n> homens"
    pub homens: u64,
    /// "<n> mulheres"
    pub mulheres: u64,
    /// "<n> advogados com filhos" / "<n> com filhos"
    pub filhos: u64,
}

/// Reads the summary page of a report and extracts its counts.
pub struct PageSummary {
    extractor: TextExtractor,
    page_number: u32,
    homens: Regex,
    mulheres: Regex,
    filhos: Regex,
}

impl PageSummary {
    /// Summary of the default page.
    pub fn new(extractor: TextExtractor) -> Self {
        Self::with_options(extractor, &PageSummaryOptions::default())
    }

    /// Summary with custom options.
    pub fn with_options(extractor: TextExtractor, options: &PageSummaryOptions) -> Self {
        Self {
            extractor,
            page_number: options.page_number.max(1),
            homens: Regex::new(HOMENS_PATTERN).expect("valid pattern"),
            mulheres: Regex::new(MULHERES_PATTERN).expect("valid pattern"),
            filhos: Regex::new(FILHOS_PATTERN).expect("valid pattern"),
        }
    }

    /// Page this summary reads (1-based).
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Read the summary page of `source` and parse its counts.
    ///
    /// Fails with `PageIndexOutOfRange` if the document is shorter than the
    /// summary page, or with the backend error if it cannot be opened.
    pub fn summarize(&self, source: &PdfSource) -> Result<PageCounts> {
        let text = self.extractor.read_page(source, self.page_number - 1)?;
        log::debug!(
            "page {}: {} characters of text",
            self.page_number,
            text.len()
        );
        Ok(self.parse(&text))
    }

    /// Parse counts from already extracted page text.
    pub fn parse(&self, text: &str) -> PageCounts {
        PageCounts {
            page_number: self.page_number,
            homens: first_number(&self.homens, text),
            mulheres: first_number(&self.mulheres, text),
            filhos: first_number(&self.filhos, text),
        }
    }
}

fn first_number(re: &Regex, text: &str) -> u64 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_grouped_number(m.as_str()))
        .unwrap_or(0)
}

/// Parse an integer written with `.` or `,` digit grouping ("1.234").
///
/// Returns `None` when nothing numeric remains or the value overflows.
pub fn parse_grouped_number(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| !matches!(c, '.' | ',')).collect();
    digits.parse().ok()
}
