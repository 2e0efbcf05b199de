//! JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a report, page counts, or any other result to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_summary::PageCounts;

    fn counts() -> PageCounts {
        PageCounts {
            page_number: 34,
            homens: 120,
            mulheres: 45,
            filhos: 10,
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&counts(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"homens\": 120"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&counts(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"page_number":34,"homens":120,"mulheres":45,"filhos":10}"#
        );
    }
}
