//! Pack and unpack operation reporting.

use std::time::Duration;

use crate::ContentHash;

/// Report of a successful pack.
///
/// # Examples
///
/// ```
/// use zipmover_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.bytes_written = 1000;
/// report.archive_size = 250;
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of files added to the archive.
    pub files_added: usize,

    /// Total uncompressed bytes read from the source tree.
    pub bytes_written: u64,

    /// Size of the finished archive file in bytes.
    pub archive_size: u64,

    /// Digest recorded for the archive.
    pub hash: Option<ContentHash>,

    /// Number of entries left out (symlinks, special files, excluded).
    pub files_skipped: usize,

    /// Duration of the pack.
    pub duration: Duration,

    /// Warnings generated while walking the source.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates a new empty pack report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns uncompressed size divided by archive size.
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.archive_size as f64
    }
}

/// Report of a successful unpack.
#[derive(Debug, Clone, Default)]
pub struct UnpackReport {
    /// Number of files written to the destination.
    pub files_extracted: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the unpack, including verification.
    pub duration: Duration,
}

impl UnpackReport {
    /// Creates a new empty unpack report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of items written.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_report_warnings() {
        let mut report = PackReport::new();
        assert!(!report.has_warnings());
        report.add_warning("Skipped symlink: link");
        assert!(report.has_warnings());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_compression_ratio_edge_cases() {
        let mut report = PackReport::new();
        assert!(report.compression_ratio().abs() < f64::EPSILON);

        report.bytes_written = 100;
        assert!(report.compression_ratio().abs() < f64::EPSILON);

        report.archive_size = 100;
        assert!((report.compression_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unpack_report_total_items() {
        let report = UnpackReport {
            files_extracted: 3,
            directories_created: 2,
            ..Default::default()
        };
        assert_eq!(report.total_items(), 5);
    }
}
