//! Error types for archive mover operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `MoverError`.
pub type Result<T> = std::result::Result<T, MoverError>;

/// Broad classification of a [`MoverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid source, destination, archive or configuration.
    Precondition,
    /// Hash not established, or the archive no longer matches it.
    Integrity,
    /// The archive codec failed to open, write, close or extract.
    Codec,
    /// The archive file could not be removed.
    Deletion,
    /// Scratch directory, path resolution or hashing I/O failed.
    Environment,
}

/// Errors that can occur while packing, unpacking or disposing an archive.
#[derive(Error, Debug)]
pub enum MoverError {
    /// Source directory does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("source path is not a directory: {path}")]
    SourceNotDirectory {
        /// The offending source path.
        path: PathBuf,
    },

    /// Destination directory does not exist.
    #[error("destination path not found: {path}")]
    DestNotFound {
        /// The missing destination path.
        path: PathBuf,
    },

    /// Destination path exists but is not a directory.
    #[error("destination path is not a directory: {path}")]
    DestNotDirectory {
        /// The offending destination path.
        path: PathBuf,
    },

    /// Archive file is missing or cannot be read.
    #[error("archive is missing or unreadable: {path}")]
    ArchiveUnreadable {
        /// The archive path.
        path: PathBuf,
    },

    /// Archive could not be opened by the codec.
    #[error("failed to open archive {path}: {reason}")]
    ArchiveOpenFailed {
        /// The archive path.
        path: PathBuf,
        /// Codec diagnostic.
        reason: String,
    },

    /// A source file could not be added to the archive.
    #[error("failed to add {path} to archive: {reason}")]
    ArchiveWriteFailed {
        /// The source file that failed.
        path: PathBuf,
        /// Codec diagnostic.
        reason: String,
    },

    /// Archive could not be finalized.
    #[error("failed to finalize archive {path}: {reason}")]
    ArchiveCloseFailed {
        /// The archive path.
        path: PathBuf,
        /// Codec diagnostic.
        reason: String,
    },

    /// Extraction failed part way.
    #[error("failed to extract archive: {reason}")]
    ArchiveExtractFailed {
        /// Codec diagnostic.
        reason: String,
    },

    /// Unpack was requested before a successful pack.
    #[error("archive integrity not established: pack has not completed")]
    IntegrityNotEstablished,

    /// Archive bytes no longer match the digest recorded at pack time.
    #[error("archive integrity mismatch for {path}: expected {expected}, found {}", .actual.as_deref().unwrap_or("unreadable archive"))]
    IntegrityMismatch {
        /// The archive path.
        path: PathBuf,
        /// Digest recorded at pack time.
        expected: String,
        /// Digest of the current bytes, `None` if they could not be read.
        actual: Option<String>,
    },

    /// Archive file could not be deleted.
    #[error("failed to delete archive {path}: {source}")]
    DeleteFailed {
        /// The archive path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Digest of the freshly written archive could not be computed.
    #[error("failed to hash archive {path}: {source}")]
    HashFailed {
        /// The archive path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Private scratch directory for a generated archive path could not be
    /// created.
    #[error("failed to allocate scratch directory: {0}")]
    TempDirFailed(#[source] std::io::Error),

    /// Archive path is empty or cannot be resolved to an absolute path.
    #[error("invalid archive path {path}: {reason}")]
    InvalidArchivePath {
        /// The supplied path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why it was rejected.
        reason: String,
    },
}

impl MoverError {
    /// Returns the taxonomy bucket of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipmover_core::ErrorCategory;
    /// use zipmover_core::MoverError;
    ///
    /// assert_eq!(
    ///     MoverError::IntegrityNotEstablished.category(),
    ///     ErrorCategory::Integrity
    /// );
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotFound { .. }
            | Self::SourceNotDirectory { .. }
            | Self::DestNotFound { .. }
            | Self::DestNotDirectory { .. }
            | Self::ArchiveUnreadable { .. }
            | Self::InvalidConfig { .. } => ErrorCategory::Precondition,
            Self::IntegrityNotEstablished | Self::IntegrityMismatch { .. } => {
                ErrorCategory::Integrity
            }
            Self::ArchiveOpenFailed { .. }
            | Self::ArchiveWriteFailed { .. }
            | Self::ArchiveCloseFailed { .. }
            | Self::ArchiveExtractFailed { .. } => ErrorCategory::Codec,
            Self::DeleteFailed { .. } => ErrorCategory::Deletion,
            Self::HashFailed { .. }
            | Self::TempDirFailed(_)
            | Self::InvalidArchivePath { .. } => ErrorCategory::Environment,
        }
    }

    /// Returns `true` if the integrity gate rejected the operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipmover_core::MoverError;
    ///
    /// let err = MoverError::IntegrityMismatch {
    ///     path: PathBuf::from("a.zip"),
    ///     expected: "00".repeat(32),
    ///     actual: None,
    /// };
    /// assert!(err.is_integrity_violation());
    ///
    /// let err = MoverError::SourceNotFound {
    ///     path: PathBuf::from("src"),
    /// };
    /// assert!(!err.is_integrity_violation());
    /// ```
    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(self.category(), ErrorCategory::Integrity)
    }

    /// Returns the codec or validation diagnostic carried by this error, if
    /// any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::ArchiveOpenFailed { reason, .. }
            | Self::ArchiveWriteFailed { reason, .. }
            | Self::ArchiveCloseFailed { reason, .. }
            | Self::ArchiveExtractFailed { reason }
            | Self::InvalidArchivePath { reason, .. }
            | Self::InvalidConfig { reason } => Some(reason),
            _ => None,
        }
    }
}
