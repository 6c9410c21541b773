//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::MoveSummary;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct MoveOutput {
    source: String,
    dest: String,
    sha256: Option<String>,
    archive_kept: Option<String>,
    archive_size: u64,
    files_added: usize,
    files_skipped: usize,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    compression_ratio: f64,
    pack_duration_ms: u128,
    unpack_duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&MoveSummary> for MoveOutput {
    fn from(summary: &MoveSummary) -> Self {
        Self {
            source: summary.source.display().to_string(),
            dest: summary.dest.display().to_string(),
            sha256: summary.pack.hash.as_ref().map(ToString::to_string),
            archive_kept: summary
                .kept_archive
                .as_ref()
                .map(|p| p.display().to_string()),
            archive_size: summary.pack.archive_size,
            files_added: summary.pack.files_added,
            files_skipped: summary.pack.files_skipped,
            files_extracted: summary.unpack.files_extracted,
            directories_created: summary.unpack.directories_created,
            bytes_written: summary.unpack.bytes_written,
            compression_ratio: summary.pack.compression_ratio(),
            pack_duration_ms: summary.pack.duration.as_millis(),
            unpack_duration_ms: summary.unpack.duration.as_millis(),
            warnings: summary.pack.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_move_result(&self, summary: &MoveSummary) -> Result<()> {
        let output = JsonOutput::success("move", MoveOutput::from(summary));
        Self::output(&output)
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::warning(
            "move",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use zipmover_core::ContentHash;
    use zipmover_core::PackReport;
    use zipmover_core::UnpackReport;

    #[test]
    fn test_move_output_structure() {
        let summary = MoveSummary {
            source: PathBuf::from("src"),
            dest: PathBuf::from("dst"),
            kept_archive: None,
            pack: PackReport {
                files_added: 2,
                hash: Some(ContentHash::of_bytes(b"zip")),
                ..Default::default()
            },
            unpack: UnpackReport {
                files_extracted: 2,
                ..Default::default()
            },
        };

        let output = JsonOutput::success("move", MoveOutput::from(&summary));
        let json: serde_json::Value = serde_json::to_value(&output).unwrap();

        assert_eq!(json["operation"], "move");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["files_added"], 2);
        assert_eq!(json["data"]["sha256"].as_str().unwrap().len(), 64);
        assert!(json["data"]["archive_kept"].is_null());
    }
}
