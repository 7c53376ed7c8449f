//! Categorical distributions and cross-field consistency

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::Frequencies;
use crate::error::ReportError;
use crate::table::{Table, cell_key, cell_text};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    /// Includes null when any row lacks a category
    pub unique_categories: Vec<Value>,
    pub unique_category_codes: Vec<Value>,
    pub category_counts: Frequencies,
    pub category_code_counts: Frequencies,
    /// Rows where both fields are present but disagree after normalization
    pub category_code_mismatches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandConsistency {
    pub brands_without_codes: usize,
    pub mismatched_names: usize,
    pub top_brand_distribution: Frequencies,
}

/// Unique values of a column in first-appearance order
pub fn unique_values(
    table: &Table,
    column: &str,
    include_null: bool,
) -> Result<Vec<Value>, ReportError> {
    let column = table.require_column(column)?;
    let mut seen = HashSet::new();
    Ok(column
        .values()
        .filter(|v| include_null || !v.is_null())
        .filter(|v| seen.insert(cell_key(v)))
        .cloned()
        .collect())
}

/// Frequency of each non-null value
pub fn value_counts(table: &Table, column: &str) -> Result<Frequencies, ReportError> {
    let column = table.require_column(column)?;
    Ok(Frequencies::tally_values(column.values()))
}

/// Count rows where `upper(name) != code` with underscores read as spaces.
/// Only rows with both fields present are compared.
pub fn category_code_mismatches(
    table: &Table,
    name_column: &str,
    code_column: &str,
) -> Result<usize, ReportError> {
    let names = table.require_column(name_column)?;
    let codes = table.require_column(code_column)?;

    Ok(names
        .values()
        .zip(codes.values())
        .filter_map(|(name, code)| Some((cell_text(name)?, cell_text(code)?)))
        .filter(|(name, code)| name.to_uppercase() != code.replace('_', " "))
        .count())
}

pub fn analyze_categorical(
    table: &Table,
    name_column: &str,
    code_column: &str,
) -> Result<CategoricalSummary, ReportError> {
    Ok(CategoricalSummary {
        unique_categories: unique_values(table, name_column, true)?,
        unique_category_codes: unique_values(table, code_column, false)?,
        category_counts: value_counts(table, name_column)?,
        category_code_counts: value_counts(table, code_column)?,
        category_code_mismatches: category_code_mismatches(table, name_column, code_column)?,
    })
}

/// Compare brand names against brand codes.
///
/// A null on either side counts as a mismatch, the same as a NaN comparison.
pub fn brand_consistency(table: &Table) -> Result<BrandConsistency, ReportError> {
    let names = table.require_column("name")?;
    let codes = table.require_column("brandCode")?;

    let mismatched_names = names
        .values()
        .zip(codes.values())
        .filter(|(name, code)| name.is_null() || code.is_null() || name != code)
        .count();

    Ok(BrandConsistency {
        brands_without_codes: codes.null_count(),
        mismatched_names,
        top_brand_distribution: value_counts(table, "topBrand")?,
    })
}
