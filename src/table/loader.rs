//! NDJSON loader
//!
//! Parses newline-delimited JSON text into a `Table`, one object per line.

use std::path::Path;

use serde_json::{Map, Value};

use super::Table;
use crate::error::ReportError;

/// How nested objects are laid out as columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flatten {
    /// Nested objects stay as single cell values
    Nested,
    /// Nested objects become dotted columns (`_id.$oid`); arrays are kept whole
    Dotted,
}

/// Parse newline-delimited JSON into a table
///
/// Blank lines are skipped. Line numbers in errors are 1-based and count
/// blank lines, so they match what an editor shows.
pub fn parse_ndjson(text: &str, flatten: Flatten) -> Result<Table, ReportError> {
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value =
            serde_json::from_str(line).map_err(|e| ReportError::InvalidJson {
                line: line_no,
                message: e.to_string(),
            })?;

        let Value::Object(map) = value else {
            return Err(ReportError::NotAnObject { line: line_no });
        };

        let record = match flatten {
            Flatten::Nested => map,
            Flatten::Dotted => {
                let mut flat = Map::new();
                flatten_into("", map, &mut flat);
                flat
            }
        };
        records.push(record);
    }

    let table = Table::from_records(records);
    log::debug!(
        "Parsed {} rows with {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Read a file and parse it as newline-delimited JSON
pub fn load_ndjson_file(path: &Path, flatten: Flatten) -> Result<Table, ReportError> {
    log::debug!("Loading {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    parse_ndjson(&text, flatten)
}

/// Empty nested objects contribute no column.
fn flatten_into(prefix: &str, map: Map<String, Value>, out: &mut Map<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(&path, inner, out),
            other => {
                out.insert(path, other);
            }
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;
