//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use zipmover_core::PackReport;
use zipmover_core::UnpackReport;

/// Everything the `move` command reports.
pub struct MoveSummary {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Archive path if it was kept on disk.
    pub kept_archive: Option<PathBuf>,
    pub pack: PackReport,
    pub unpack: UnpackReport,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format move result
    fn format_move_result(&self, summary: &MoveSummary) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
        }
    }

    pub fn warning(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Warning,
            data: Some(data),
        }
    }
}
