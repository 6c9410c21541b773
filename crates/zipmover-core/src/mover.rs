//! The integrity-gated archive mover.

use std::fs;
use std::fs::File;
use std::io;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tempfile::NamedTempFile;
use tempfile::TempDir;

use crate::ContentHash;
use crate::IntegrityState;
use crate::MoverConfig;
use crate::MoverError;
use crate::PackReport;
use crate::Result;
use crate::UnpackReport;
use crate::codec::ArchiveCodec;
use crate::codec::ZipCodec;
use crate::walker::collect_source_entries;

const SCRATCH_PREFIX: &str = "zipmover-";
const SCRATCH_ARCHIVE_NAME: &str = "archive.zip";

/// Where the archive lives.
#[derive(Debug)]
enum ArchiveLocation {
    /// Caller-supplied path, never removed on drop.
    Explicit(PathBuf),
    /// Generated path inside a private scratch directory owned by the mover.
    Scratch { _dir: TempDir, path: PathBuf },
}

impl ArchiveLocation {
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Scratch { path, .. } => path,
        }
    }
}

/// Packs a directory into one archive file and unpacks it only while the
/// file still matches the digest taken at pack time.
///
/// # Examples
///
/// ```no_run
/// use zipmover_core::ArchiveMover;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut mover = ArchiveMover::new()?;
/// mover.pack("build/output")?;
/// println!("sha256: {}", mover.hash().map_or("-", |h| h.as_str()));
///
/// mover.unpack("/srv/deploy")?;
/// mover.dispose()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ArchiveMover<C = ZipCodec> {
    location: ArchiveLocation,
    state: IntegrityState,
    config: MoverConfig,
    codec: C,
}

impl ArchiveMover<ZipCodec> {
    /// Creates a mover whose archive lives in a fresh private scratch
    /// directory under the system temp dir.
    ///
    /// The scratch directory has a random name, so concurrent movers never
    /// share an archive. It is removed when the mover is dropped.
    ///
    /// # Errors
    ///
    /// Returns `TempDirFailed` if the scratch directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(MoverError::TempDirFailed)?;
        let path = dir.path().join(SCRATCH_ARCHIVE_NAME);

        Ok(Self::with_location(ArchiveLocation::Scratch { _dir: dir, path }))
    }

    /// Creates a mover bound to `path`.
    ///
    /// Relative paths are resolved against the current directory. Nothing is
    /// created on disk until [`pack`](Self::pack).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchivePath` if `path` is empty, names a directory, or
    /// cannot be made absolute.
    pub fn at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| MoverError::InvalidArchivePath {
            path: path.to_path_buf(),
            reason,
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("path is empty".to_string()));
        }
        let resolved = std::path::absolute(path).map_err(|e| invalid(e.to_string()))?;
        if resolved.file_name().is_none() || resolved.is_dir() {
            return Err(invalid("path does not name a file".to_string()));
        }

        Ok(Self::with_location(ArchiveLocation::Explicit(resolved)))
    }

    fn with_location(location: ArchiveLocation) -> Self {
        Self {
            location,
            state: IntegrityState::Empty,
            config: MoverConfig::default(),
            codec: ZipCodec::new(),
        }
    }
}

impl<C: ArchiveCodec> ArchiveMover<C> {
    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: MoverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the codec.
    #[must_use]
    pub fn with_codec<D: ArchiveCodec>(self, codec: D) -> ArchiveMover<D> {
        ArchiveMover {
            location: self.location,
            state: self.state,
            config: self.config,
            codec,
        }
    }

    /// Returns the absolute path of the archive file.
    #[must_use]
    pub fn archive_path(&self) -> &Path {
        self.location.path()
    }

    /// Returns the digest recorded by the last successful pack.
    #[must_use]
    pub const fn hash(&self) -> Option<&ContentHash> {
        self.state.hash()
    }

    /// Returns the integrity state.
    #[must_use]
    pub const fn state(&self) -> &IntegrityState {
        &self.state
    }

    /// Returns `true` once a pack has succeeded.
    #[must_use]
    pub const fn is_packed(&self) -> bool {
        self.state.is_packed()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MoverConfig {
        &self.config
    }

    /// Packs every regular file under `source` into the archive and records
    /// its SHA-256 digest.
    ///
    /// Entry names are paths relative to `source` with `/` separators. The
    /// archive is written beside its final path and renamed into place, so
    /// any prior archive is replaced only once the new one is complete.
    ///
    /// # Errors
    ///
    /// - `SourceNotFound` / `SourceNotDirectory` before anything is written
    /// - `InvalidConfig` if the configuration fails validation
    /// - `ArchiveOpenFailed`, `ArchiveWriteFailed`, `ArchiveCloseFailed` from
    ///   the codec
    /// - `HashFailed` if the finished archive cannot be read back
    ///
    /// On any error except `HashFailed` the integrity state is unchanged.
    /// After `HashFailed` the state is `Empty`, since the archive on disk no
    /// longer matches any earlier digest.
    pub fn pack<P: AsRef<Path>>(&mut self, source: P) -> Result<PackReport> {
        let source = source.as_ref();
        let start = Instant::now();

        if !source.exists() {
            return Err(MoverError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        if !source.is_dir() {
            return Err(MoverError::SourceNotDirectory {
                path: source.to_path_buf(),
            });
        }
        self.config.validate()?;

        let mut report = PackReport::default();
        let entries = collect_source_entries(source, &self.config, &mut report)?;

        let archive = self.location.path().to_path_buf();
        let mut staged = self.open_staging_file()?;
        self.codec.write_archive(
            staged.as_file_mut(),
            &archive,
            &entries,
            &self.config,
            &mut report,
        )?;

        let close_failed = |reason: String| MoverError::ArchiveCloseFailed {
            path: archive.clone(),
            reason,
        };
        staged
            .as_file()
            .sync_all()
            .map_err(|e| close_failed(e.to_string()))?;
        if let Some(permissions) = self.archive_permissions() {
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| close_failed(e.to_string()))?;
        }
        let archive_size = staged
            .as_file()
            .metadata()
            .map_err(|e| close_failed(e.to_string()))?
            .len();
        staged
            .persist(&archive)
            .map_err(|e| close_failed(e.error.to_string()))?;

        let hash = match ContentHash::of_file(&archive) {
            Ok(hash) => hash,
            Err(source) => {
                self.state = IntegrityState::Empty;
                return Err(MoverError::HashFailed {
                    path: archive,
                    source,
                });
            }
        };

        report.archive_size = archive_size;
        report.hash = Some(hash.clone());
        report.duration = start.elapsed();
        self.state = IntegrityState::Packed(hash);

        Ok(report)
    }

    /// Verifies the archive against the pack-time digest and extracts it into
    /// `dest`, overwriting existing files.
    ///
    /// Checks run in order: digest recorded, digest matches the current
    /// bytes, `dest` is an existing directory, archive is a readable file.
    /// Nothing is written to `dest` unless all of them pass. The digest is
    /// never updated by an unpack.
    ///
    /// # Errors
    ///
    /// - `IntegrityNotEstablished` if no pack has succeeded
    /// - `IntegrityMismatch` if the archive changed or cannot be read
    /// - `DestNotFound` / `DestNotDirectory`
    /// - `ArchiveUnreadable` if the verified handle is not a regular file,
    ///   which only a special file whose contents hash to the recorded digest
    ///   can produce; directories and unreadable files fail the read during
    ///   verification and are reported as `IntegrityMismatch`
    /// - `ArchiveOpenFailed` / `ArchiveExtractFailed` from the codec; files
    ///   extracted before the failure stay on disk
    pub fn unpack<P: AsRef<Path>>(&self, dest: P) -> Result<UnpackReport> {
        let dest = dest.as_ref();
        let start = Instant::now();
        let archive = self.location.path();

        let IntegrityState::Packed(expected) = &self.state else {
            return Err(MoverError::IntegrityNotEstablished);
        };

        // The same handle is verified and then extracted.
        let mismatch = |actual: Option<ContentHash>| MoverError::IntegrityMismatch {
            path: archive.to_path_buf(),
            expected: expected.to_string(),
            actual: actual.map(|h| h.to_string()),
        };
        let mut input = File::open(archive).map_err(|_| mismatch(None))?;
        let actual = ContentHash::of_reader(&mut input).map_err(|_| mismatch(None))?;
        if actual != *expected {
            return Err(mismatch(Some(actual)));
        }

        if !dest.exists() {
            return Err(MoverError::DestNotFound {
                path: dest.to_path_buf(),
            });
        }
        if !dest.is_dir() {
            return Err(MoverError::DestNotDirectory {
                path: dest.to_path_buf(),
            });
        }

        let unreadable = |_: io::Error| MoverError::ArchiveUnreadable {
            path: archive.to_path_buf(),
        };
        if !input.metadata().map_err(unreadable)?.is_file() {
            return Err(MoverError::ArchiveUnreadable {
                path: archive.to_path_buf(),
            });
        }
        input.seek(SeekFrom::Start(0)).map_err(unreadable)?;

        let mut report = UnpackReport::default();
        self.codec.extract_all(input, archive, dest, &mut report)?;
        report.duration = start.elapsed();

        Ok(report)
    }

    /// Deletes the archive file if it exists.
    ///
    /// The recorded digest is kept; a later unpack fails the integrity gate
    /// because the archive is gone.
    ///
    /// # Errors
    ///
    /// Returns `DeleteFailed` if the file exists but cannot be removed.
    pub fn dispose(&self) -> Result<()> {
        let archive = self.location.path();
        match fs::remove_file(archive) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MoverError::DeleteFailed {
                path: archive.to_path_buf(),
                source,
            }),
        }
    }

    /// Permissions the finished archive should carry.
    ///
    /// Staged files are created owner-only. That suits the scratch location,
    /// but an explicit archive keeps the mode of the file it replaces, and a
    /// new one is readable by others like a plainly created file.
    fn archive_permissions(&self) -> Option<fs::Permissions> {
        let ArchiveLocation::Explicit(path) = &self.location else {
            return None;
        };
        match fs::metadata(path) {
            Ok(existing) if existing.is_file() => Some(existing.permissions()),
            _ => default_archive_permissions(),
        }
    }

    /// Creates the temp file the archive is written to before being renamed
    /// over the final path.
    fn open_staging_file(&self) -> Result<NamedTempFile> {
        let archive = self.location.path();
        let parent = archive
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        tempfile::Builder::new()
            .prefix(".zipmover-")
            .suffix(".partial")
            .tempfile_in(parent)
            .map_err(|e| MoverError::ArchiveOpenFailed {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

#[cfg(unix)]
fn default_archive_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_archive_permissions() -> Option<fs::Permissions> {
    None
}
