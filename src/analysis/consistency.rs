//! Data consistency issues

use std::fmt;

use serde::Serialize;

use super::missing::MissingSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    /// Columns of a dataset that contain null or absent values
    MissingValues {
        dataset: String,
        columns: Vec<(String, usize)>,
    },
    LoginBeforeCreation { count: usize },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::MissingValues { dataset, columns } => {
                write!(f, "Missing values found in {}: {{", dataset)?;
                for (i, (column, count)) in columns.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", column, count)?;
                }
                write!(f, "}}")
            }
            ConsistencyIssue::LoginBeforeCreation { count } => write!(
                f,
                "Found {} cases where login date is before creation date",
                count
            ),
        }
    }
}

pub fn missing_values_issue(dataset: &str, summary: &MissingSummary) -> Option<ConsistencyIssue> {
    let columns: Vec<(String, usize)> = summary
        .with_missing()
        .map(|c| (c.column.clone(), c.total_missing))
        .collect();

    if columns.is_empty() {
        return None;
    }

    Some(ConsistencyIssue::MissingValues {
        dataset: dataset.to_string(),
        columns,
    })
}

pub fn login_order_issue(flagged_rows: &[usize]) -> Option<ConsistencyIssue> {
    if flagged_rows.is_empty() {
        None
    } else {
        Some(ConsistencyIssue::LoginBeforeCreation {
            count: flagged_rows.len(),
        })
    }
}
