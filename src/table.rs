//! In-memory record table
//!
//! A `Table` holds the rows of one newline-delimited JSON dataset. Columns are
//! the union of all keys seen while loading, kept in first-appearance order.
//! Absent keys are stored as `Value::Null`, so "absent" and "null" are the same
//! missing value for every analysis pass.

pub mod loader;

use serde_json::{Map, Value};

use crate::error::ReportError;

pub use loader::{Flatten, load_ndjson_file, parse_ndjson};

/// Ordered rows with a shared column list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from parsed records, padding missing keys with null
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a column by name, failing with `MissingColumn` when absent
    pub fn require_column(&self, name: &str) -> Result<Column<'_>, ReportError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| ReportError::MissingColumn {
                column: name.to_string(),
            })?;
        Ok(Column {
            table: self,
            name: &self.columns[index],
            index,
        })
    }
}

/// Borrowed view of a single column
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    table: &'a Table,
    name: &'a str,
    index: usize,
}

impl<'a> Column<'a> {
    pub fn name(self) -> &'a str {
        self.name
    }

    pub fn values(self) -> impl Iterator<Item = &'a Value> + 'a {
        let (table, index) = (self.table, self.index);
        table.rows.iter().map(move |row| &row[index])
    }

    pub fn null_count(self) -> usize {
        self.values().filter(|v| v.is_null()).count()
    }
}

/// Text form of a cell: strings verbatim, other values as compact JSON.
/// Returns `None` for null.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Hashable comparison key for a cell. Nested values collapse to their
/// canonical JSON text, and string quoting keeps `"1"` distinct from `1`.
pub fn cell_key(value: &Value) -> String {
    value.to_string()
}

/// Comparison key for an entire row
pub fn row_key(row: &[Value]) -> String {
    let mut key = String::new();
    for (i, value) in row.iter().enumerate() {
        if i > 0 {
            // Unescaped control characters never occur in serialized JSON
            key.push('\u{1f}');
        }
        key.push_str(&cell_key(value));
    }
    key
}
