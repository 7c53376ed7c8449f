//! Duplicate detection
//!
//! Rows and identity values are compared through `table::row_key` and
//! `table::cell_key`, so nested objects and arrays compare by their JSON text.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ReportError;
use crate::table::{Table, cell_key, row_key};

/// Duplicate count for one identity field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyDuplicates {
    pub column: String,
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    pub total_records: usize,
    pub unique_records: usize,
    pub exact_duplicates: usize,
    pub key_duplicates: Vec<KeyDuplicates>,
}

impl DuplicateSummary {
    pub fn for_column(&self, column: &str) -> Option<usize> {
        self.key_duplicates
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.duplicates)
    }
}

/// Number of distinct rows under full-row equality
pub fn distinct_rows(table: &Table) -> usize {
    table
        .rows()
        .iter()
        .map(|row| row_key(row))
        .collect::<HashSet<_>>()
        .len()
}

/// `total_rows - distinct_rows`
pub fn exact_duplicates(table: &Table) -> usize {
    table.len() - distinct_rows(table)
}

/// Rows whose value in `column` repeats an earlier row's value.
/// Null counts as one value.
pub fn key_duplicates(table: &Table, column: &str) -> Result<usize, ReportError> {
    let column = table.require_column(column)?;
    let distinct = column.values().map(cell_key).collect::<HashSet<_>>().len();
    Ok(table.len() - distinct)
}

/// Exact duplicates plus per-key duplicates for every identity field
pub fn check_duplicates(
    table: &Table,
    identity_fields: &[&str],
) -> Result<DuplicateSummary, ReportError> {
    let key_duplicates = identity_fields
        .iter()
        .map(|&column| {
            Ok(KeyDuplicates {
                column: column.to_string(),
                duplicates: key_duplicates(table, column)?,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    let unique_records = distinct_rows(table);
    log::debug!(
        "{} of {} rows are distinct",
        unique_records,
        table.len()
    );

    Ok(DuplicateSummary {
        total_records: table.len(),
        unique_records,
        exact_duplicates: table.len() - unique_records,
        key_duplicates,
    })
}
