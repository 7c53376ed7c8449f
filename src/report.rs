//! Report assembly and output
//!
//! Each pipeline builds a structured report that implements both `Serialize`
//! and `Display`. Rendering happens only at the boundary, in `write_report`.

pub mod brands;
pub mod users_receipts;

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

pub use brands::BrandReport;
pub use users_receipts::UsersReceiptsReport;

/// Output encoding for a report file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Fixed-layout plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the requested format
pub fn render<R>(report: &R, format: ReportFormat) -> Result<String, ReportError>
where
    R: Serialize + fmt::Display,
{
    match format {
        ReportFormat::Text => Ok(report.to_string()),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write a report to `path`, creating parent directories and replacing any
/// existing file
pub fn write_report<R>(report: &R, path: &Path, format: ReportFormat) -> Result<(), ReportError>
where
    R: Serialize + fmt::Display,
{
    let contents = render(report, format)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }

    fs::write(path, contents).map_err(|e| ReportError::io(path, e))?;
    log::info!("Wrote {} report to {:?}", format, path);
    Ok(())
}

pub(crate) fn format_datetime(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => "N/A".to_string(),
    }
}
