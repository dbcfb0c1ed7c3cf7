//! Rectangular string table as delivered by the data source.

use std::io::Read;

use crate::SourceError;

// ---

/// Column names plus string-typed cells, exactly as fetched.
///
/// Rows may be ragged; a missing cell reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    // ---
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    // ---
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Decode a CSV body; the first record is the header row.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, SourceError> {
        // ---
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let columns = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Index of a column, ignoring surrounding whitespace and ASCII case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
