//! Error conversion utilities for CLI.
//!
//! Converts zipmover-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use zipmover_core::MoverError;

/// Converts `MoverError` to a user-friendly anyhow error with context
pub fn convert_mover_error(err: MoverError, archive: &Path) -> anyhow::Error {
    match err {
        MoverError::SourceNotFound { path } => {
            anyhow!(
                "Source directory not found: {}\n\
                 HINT: Check the SOURCE argument.",
                path.display()
            )
        }
        MoverError::SourceNotDirectory { path } => {
            anyhow!(
                "Source is not a directory: {}\n\
                 HINT: zipmover packs whole directories; wrap single files in a folder.",
                path.display()
            )
        }
        MoverError::IntegrityMismatch {
            path,
            expected,
            actual,
        } => {
            anyhow!(
                "Integrity check failed: archive '{}' changed after packing\n\
                 Expected sha256: {expected}\n\
                 Found sha256:    {}\n\
                 HINT: Another process modified the archive. Nothing was extracted.",
                path.display(),
                actual.as_deref().unwrap_or("<unreadable>")
            )
        }
        MoverError::ArchiveOpenFailed { path, reason }
        | MoverError::ArchiveCloseFailed { path, reason } => {
            anyhow!(
                "Cannot write archive '{}': {reason}\n\
                 HINT: Check free space and permissions of the archive directory.",
                path.display()
            )
        }
        MoverError::ArchiveWriteFailed { path, reason } => {
            anyhow!(
                "Cannot add '{}' to archive '{}': {reason}",
                path.display(),
                archive.display()
            )
        }
        MoverError::DeleteFailed { path, source } => {
            anyhow!(
                "Cannot remove archive '{}': {source}\n\
                 HINT: Delete it manually once the cause is fixed.",
                path.display()
            )
        }
        MoverError::TempDirFailed(source) => {
            anyhow!(
                "Cannot create a scratch directory for the archive: {source}\n\
                 HINT: Check TMPDIR, or choose a location with --archive."
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error moving through archive '{}'", archive.display())),
    }
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(
    result: Result<T, MoverError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_mover_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_convert_integrity_mismatch() {
        let err = MoverError::IntegrityMismatch {
            path: PathBuf::from("/tmp/a.zip"),
            expected: "ab".repeat(32),
            actual: None,
        };
        let converted = convert_mover_error(err, Path::new("/tmp/a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Integrity check failed"));
        assert!(msg.contains("<unreadable>"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_source_not_found() {
        let err = MoverError::SourceNotFound {
            path: PathBuf::from("missing"),
        };
        let converted = convert_mover_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Source directory not found"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_convert_fallback_keeps_cause() {
        let err = MoverError::DestNotDirectory {
            path: PathBuf::from("file.txt"),
        };
        let converted = convert_mover_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("a.zip"));
        assert!(msg.contains("not a directory"));
    }

    #[test]
    fn test_convert_temp_dir_failed_has_no_archive_path() {
        let err = MoverError::TempDirFailed(std::io::Error::other("no space left"));
        let converted = convert_mover_error(err, Path::new(""));
        let msg = format!("{converted:?}");
        assert!(msg.contains("scratch directory"));
        assert!(msg.contains("no space left"));
        assert!(!msg.contains("''"));
    }
}
