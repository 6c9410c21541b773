//! Configuration for packing archives.

use crate::MoverError;
use crate::Result;

/// Highest accepted compression level.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Configuration for an [`ArchiveMover`](crate::ArchiveMover).
///
/// The defaults archive every regular file under the source directory, so
/// pack followed by unpack reproduces the tree.
///
/// # Examples
///
/// ```
/// use zipmover_core::MoverConfig;
///
/// let config = MoverConfig::default()
///     .with_compression_level(9)
///     .with_exclude_patterns(vec!["*.log".to_string()]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoverConfig {
    /// Compression level: `0` stores entries uncompressed, `1`-`9` deflate.
    ///
    /// Default: `6`.
    pub compression_level: u8,

    /// Follow symlinks and archive their targets.
    ///
    /// Default: `false` (symlinks are skipped).
    pub follow_symlinks: bool,

    /// Patterns of entries left out of the archive.
    ///
    /// Supports exact names, `prefix*` and `*suffix`, matched against every
    /// component of the entry name.
    ///
    /// Default: empty.
    pub exclude_patterns: Vec<String>,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            compression_level: 6,
            follow_symlinks: false,
            exclude_patterns: Vec::new(),
        }
    }
}

impl MoverConfig {
    /// Creates a `MoverConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if `level` is above 9. Use `validate()` for non-panicking
    /// validation of a struct built by hand.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(
            level <= MAX_COMPRESSION_LEVEL,
            "compression level must be 0-9"
        );
        self.compression_level = level;
        self
    }

    /// Sets whether symlinks are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the compression level is above 9 or an
    /// exclude pattern is empty.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(MoverError::InvalidConfig {
                reason: format!(
                    "compression level {} is out of range 0-{MAX_COMPRESSION_LEVEL}",
                    self.compression_level
                ),
            });
        }
        if self.exclude_patterns.iter().any(String::is_empty) {
            return Err(MoverError::InvalidConfig {
                reason: "exclude patterns must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mover_config_default() {
        let config = MoverConfig::default();
        assert_eq!(config.compression_level, 6);
        assert!(!config.follow_symlinks);
        assert!(config.exclude_patterns.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mover_config_builder() {
        let config = MoverConfig::new()
            .with_compression_level(0)
            .with_follow_symlinks(true)
            .with_exclude_patterns(vec!["*.tmp".to_string()]);

        assert_eq!(config.compression_level, 0);
        assert!(config.follow_symlinks);
        assert_eq!(config.exclude_patterns, vec!["*.tmp".to_string()]);
    }

    #[test]
    fn test_mover_config_validate_level() {
        let config = MoverConfig {
            compression_level: 10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MoverError::InvalidConfig { .. }));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_mover_config_validate_empty_pattern() {
        let config = MoverConfig::default().with_exclude_patterns(vec![String::new()]);
        assert!(config.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "compression level must be 0-9")]
    fn test_mover_config_builder_invalid_level() {
        let _config = MoverConfig::default().with_compression_level(12);
    }
}
