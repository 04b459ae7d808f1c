use indexmap::IndexSet;

use crate::model::Record;
use crate::profile::PLACEHOLDER_COLUMNS;

/// Export column order for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    columns: Vec<String>,
}

impl OutputSchema {
    /// Canonical columns in declared order, then every other field name in
    /// the order it first shows up across `records`.
    pub fn derive(canonical: &[&str], records: &[Record]) -> Self {
        let mut columns: IndexSet<String> = canonical.iter().map(|name| name.to_string()).collect();
        for placeholder in PLACEHOLDER_COLUMNS {
            columns.insert(placeholder.to_string());
        }
        for record in records {
            for field in record.keys() {
                if !columns.contains(field.as_str()) {
                    columns.insert(field.clone());
                }
            }
        }

        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// One row per schema column; absent fields and placeholder columns are
    /// empty.
    pub fn row<'r>(&self, record: &'r Record) -> Vec<&'r str> {
        self.columns
            .iter()
            .map(|column| {
                if PLACEHOLDER_COLUMNS.contains(&column.as_str()) {
                    ""
                } else {
                    record.get(column).map(String::as_str).unwrap_or_default()
                }
            })
            .collect()
    }
}
