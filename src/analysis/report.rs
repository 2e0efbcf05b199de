//! Complete analysis output for one document.

use serde::Serialize;

use crate::extract::Extraction;

use super::{CountTable, ResultSet};

/// Extraction details, classified records and both count tables.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// How the text was obtained
    pub extraction: Extraction,
    /// Classified records
    pub results: ResultSet,
    /// Counts by gender label
    pub gender_counts: CountTable,
    /// Counts by children-status label
    pub children_counts: CountTable,
}

impl Report {
    /// Build a report, deriving the count tables from `results`.
    pub fn new(extraction: Extraction, results: ResultSet) -> Self {
        let gender_counts = CountTable::by_gender(&results);
        let children_counts = CountTable::by_children(&results);
        Self {
            extraction,
            results,
            gender_counts,
            children_counts,
        }
    }

    /// The extracted text the records were derived from.
    pub fn text(&self) -> &str {
        &self.extraction.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisPipeline;

    fn extraction(text: &str) -> Extraction {
        Extraction {
            text: text.to_string(),
            backend: Some("lopdf".to_string()),
            attempts: vec![],
        }
    }

    #[test]
    fn test_report_counts_match_results() {
        let text = "Nome: Maria Souza, advogada, tem filhos\n\nNome: Rui Alves, advogado, tem filhos";
        let results = AnalysisPipeline::new().analyze(text);
        let report = Report::new(extraction(text), results);

        assert_eq!(report.gender_counts.get("Feminino"), 1);
        assert_eq!(report.gender_counts.get("Masculino"), 1);
        assert_eq!(report.children_counts.get("Sim"), 2);
        assert_eq!(report.text(), text);
    }

    #[test]
    fn test_report_json_omits_text() {
        let report = Report::new(extraction("segredo"), ResultSet::default());
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("segredo"));
        assert!(json.contains("\"gender_counts\":[]"));
    }
}
