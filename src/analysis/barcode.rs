//! Barcode format checks

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::Frequencies;
use crate::error::ReportError;
use crate::table::{Table, cell_key, cell_text};

static ALL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("barcode pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeSummary {
    /// Null counts as one value
    pub unique_barcode_count: usize,
    /// Character length -> number of barcodes
    pub length_distribution: Frequencies,
    /// Values failing the all-digits pattern, in row order
    pub non_numeric_barcodes: Vec<String>,
}

/// True when the barcode text consists only of digits
pub fn is_numeric_barcode(text: &str) -> bool {
    ALL_DIGITS.is_match(text)
}

pub fn check_barcode_validity(
    table: &Table,
    column: &str,
) -> Result<BarcodeSummary, ReportError> {
    let column = table.require_column(column)?;

    let unique_barcode_count = column.values().map(cell_key).collect::<HashSet<_>>().len();

    let texts: Vec<String> = column.values().filter_map(cell_text).collect();
    let length_distribution =
        Frequencies::tally(texts.iter().map(|t| t.chars().count().to_string()));
    let non_numeric_barcodes = texts
        .into_iter()
        .filter(|t| !is_numeric_barcode(t))
        .collect();

    Ok(BarcodeSummary {
        unique_barcode_count,
        length_distribution,
        non_numeric_barcodes,
    })
}
