//! dqreport library - data quality reports for newline-delimited JSON
//!
//! This library exposes the loader, analysis passes and report builders used
//! by the `dqreport` binary.

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod table;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::ReportError;
pub use report::{BrandReport, ReportFormat, UsersReceiptsReport};
pub use table::{Flatten, Table};
