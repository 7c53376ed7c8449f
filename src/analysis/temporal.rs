//! Millisecond-epoch timestamp analysis

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalSummary {
    /// `None` when the column holds no timestamps
    pub creation: Option<DateRange>,
    pub login: Option<DateRange>,
}

/// Convert a millisecond epoch into a UTC date-time. Null maps to `None`.
///
/// `column` and `row` are only used for error reporting.
pub fn to_datetime(
    value: &Value,
    column: &str,
    row: usize,
) -> Result<Option<DateTime<Utc>>, ReportError> {
    let invalid = || ReportError::InvalidTimestamp {
        column: column.to_string(),
        row,
        value: value.to_string(),
    };

    let millis = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(ms) => return DateTime::from_timestamp_millis(ms).map(Some).ok_or_else(invalid),
            None => n.as_f64().ok_or_else(invalid)?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(ms) => return DateTime::from_timestamp_millis(ms).map(Some).ok_or_else(invalid),
                Err(_) => s.parse::<f64>().map_err(|_| invalid())?,
            }
        }
        _ => return Err(invalid()),
    };

    // Fractional milliseconds keep nanosecond precision so same-millisecond
    // ordering survives the conversion
    let nanos = (millis * 1_000_000.0).round();
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Some(DateTime::from_timestamp_nanos(nanos as i64)))
}

/// Convert every value of a column
pub fn timestamps(table: &Table, column: &str) -> Result<Vec<Option<DateTime<Utc>>>, ReportError> {
    let col = table.require_column(column)?;
    col.values()
        .enumerate()
        .map(|(row, value)| to_datetime(value, column, row))
        .collect()
}

fn date_range(values: &[Option<DateTime<Utc>>]) -> Option<DateRange> {
    let earliest = values.iter().flatten().min()?;
    let latest = values.iter().flatten().max()?;
    Some(DateRange {
        earliest: *earliest,
        latest: *latest,
    })
}

pub fn analyze_temporal(
    table: &Table,
    created_column: &str,
    login_column: &str,
) -> Result<TemporalSummary, ReportError> {
    let created = timestamps(table, created_column)?;
    let login = timestamps(table, login_column)?;

    Ok(TemporalSummary {
        creation: date_range(&created),
        login: date_range(&login),
    })
}

/// Row indices where the login timestamp is strictly before creation.
/// Rows missing either timestamp are never flagged.
pub fn login_before_creation(
    table: &Table,
    created_column: &str,
    login_column: &str,
) -> Result<Vec<usize>, ReportError> {
    let created = timestamps(table, created_column)?;
    let login = timestamps(table, login_column)?;

    let flagged: Vec<usize> = created
        .iter()
        .zip(login.iter())
        .enumerate()
        .filter_map(|(row, pair)| match pair {
            (Some(created), Some(login)) if login < created => Some(row),
            _ => None,
        })
        .collect();

    log::debug!("{} rows have {} before {}", flagged.len(), login_column, created_column);
    Ok(flagged)
}
