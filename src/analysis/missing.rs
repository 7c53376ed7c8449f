//! Missing-value analysis

use serde::Serialize;

use crate::table::Table;

/// Null statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMissing {
    pub column: String,
    pub total_missing: usize,
    pub percent_missing: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingSummary {
    pub total_records: usize,
    pub columns: Vec<ColumnMissing>,
}

impl MissingSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnMissing> {
        self.columns.iter().find(|c| c.column == name)
    }

    /// Columns with at least one missing value, in table order
    pub fn with_missing(&self) -> impl Iterator<Item = &ColumnMissing> {
        self.columns.iter().filter(|c| c.total_missing > 0)
    }
}

/// Count null/absent values per column
pub fn check_missing_values(table: &Table) -> MissingSummary {
    let total_records = table.len();
    let columns = table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let total_missing = table.rows().iter().filter(|row| row[index].is_null()).count();
            // A table with zero rows also has zero columns
            let percent_missing = total_missing as f64 / total_records as f64 * 100.0;
            ColumnMissing {
                column: name.clone(),
                total_missing,
                percent_missing,
            }
        })
        .collect();

    MissingSummary {
        total_records,
        columns,
    }
}
