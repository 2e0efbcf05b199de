//! Per-label counts of a result set.

use serde::Serialize;

use super::{ClassifiedRecord, ResultSet};

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    /// Category label
    pub label: String,
    /// Records with that label
    pub count: usize,
}

/// Label counts, sorted by descending count.
///
/// Labels with equal counts keep the order in which they first appear in
/// the result set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CountTable {
    entries: Vec<CountEntry>,
}

impl CountTable {
    /// Count records by gender label.
    pub fn by_gender(results: &ResultSet) -> Self {
        Self::group(results, |r| r.gender.label())
    }

    /// Count records by children-status label.
    pub fn by_children(results: &ResultSet) -> Self {
        Self::group(results, |r| r.children.label())
    }

    fn group<F>(results: &ResultSet, key: F) -> Self
    where
        F: Fn(&ClassifiedRecord) -> &'static str,
    {
        let mut entries: Vec<CountEntry> = Vec::new();

        for record in results {
            let label = key(record);
            match entries.iter_mut().find(|e| e.label == label) {
                Some(entry) => entry.count += 1,
                None => entries.push(CountEntry {
                    label: label.to_string(),
                    count: 1,
                }),
            }
        }

        // Stable sort keeps first-appearance order among ties.
        entries.sort_by_key(|e| std::cmp::Reverse(e.count));
        Self { entries }
    }

    /// Count for `label`, 0 if absent.
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map_or(0, |e| e.count)
    }

    /// Entries, largest first.
    pub fn iter(&self) -> std::slice::Iter<'_, CountEntry> {
        self.entries.iter()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Largest count, 0 when empty.
    pub fn max(&self) -> usize {
        self.entries.first().map_or(0, |e| e.count)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RecordSource;
    use crate::classify::{Children, Gender};

    fn record(gender: Gender, children: Children) -> ClassifiedRecord {
        ClassifiedRecord {
            gender,
            children,
            raw: String::new(),
        }
    }

    fn results() -> ResultSet {
        ResultSet {
            source: RecordSource::Profiles,
            records: vec![
                record(Gender::Masculino, Children::Desconhecido),
                record(Gender::Feminino, Children::Sim),
                record(Gender::Feminino, Children::Nao),
                record(Gender::Desconhecido, Children::Sim),
            ],
        }
    }

    #[test]
    fn test_by_gender_sorted_descending() {
        let table = CountTable::by_gender(&results());
        let labels: Vec<(&str, usize)> = table
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect();
        assert_eq!(
            labels,
            vec![("Feminino", 2), ("Masculino", 1), ("Desconhecido", 1)]
        );
        assert_eq!(table.total(), 4);
        assert_eq!(table.max(), 2);
    }

    #[test]
    fn test_by_children() {
        let table = CountTable::by_children(&results());
        assert_eq!(table.get("Sim"), 2);
        assert_eq!(table.get("Não"), 1);
        assert_eq!(table.get("Desconhecido"), 1);
        assert_eq!(table.iter().next().unwrap().label, "Sim");
    }

    #[test]
    fn test_empty_result_set() {
        let table = CountTable::by_gender(&ResultSet::default());
        assert!(table.is_empty());
        assert_eq!(table.max(), 0);
        assert_eq!(table.get("Masculino"), 0);
    }

    #[test]
    fn test_serializes_as_list() {
        let json = serde_json::to_string(&CountTable::by_children(&results())).unwrap();
        assert!(json.starts_with("[{\"label\":\"Sim\",\"count\":2}"));
    }
}
