// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

use crate::report::ReportFormat;

/// Default input and output directories
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("report")
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            data_dir: default_data_dir(),
            report_dir: default_report_dir(),
        }
    }
}

/// Report output section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.paths.data_dir.join(file_name)
    }

    pub fn report_path(&self, file_name: &str) -> PathBuf {
        self.paths.report_dir.join(file_name)
    }
}
