//! Source tree enumeration for packing.
//!
//! Walks a source directory and turns every regular file into a
//! [`SourceEntry`] carrying the `/`-separated entry name it is stored under.
//! Directories are never emitted; empty directories therefore do not survive
//! a pack.

use crate::MoverConfig;
use crate::MoverError;
use crate::PackReport;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A regular file selected for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full filesystem path of the file.
    pub path: PathBuf,

    /// Name inside the archive: relative to the source root, `/` separated,
    /// no leading separator.
    pub entry_name: String,

    /// Size in bytes at walk time.
    pub size: u64,
}

/// Collects the regular files under `root`, sorted by entry name.
///
/// Symlinks are skipped unless `config.follow_symlinks` is set. Skipped
/// symlinks and special files are counted in `report.files_skipped` with a
/// warning; excluded entries are counted silently.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipmover_core::MoverConfig;
/// use zipmover_core::PackReport;
/// use zipmover_core::walker::collect_source_entries;
///
/// let mut report = PackReport::default();
/// let entries = collect_source_entries(Path::new("src"), &MoverConfig::default(), &mut report)?;
/// for entry in &entries {
///     println!("{}", entry.entry_name);
/// }
/// # Ok::<(), zipmover_core::MoverError>(())
/// ```
///
/// # Errors
///
/// Returns `ArchiveWriteFailed` naming the offending path if an entry cannot
/// be read, its name is not valid UTF-8, or a path component contains a
/// backslash. ZIP readers treat `\` as a separator, so such a file would be
/// restored at a different path.
pub fn collect_source_entries(
    root: &Path,
    config: &MoverConfig,
    report: &mut PackReport,
) -> Result<Vec<SourceEntry>> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();

    let mut entries = Vec::new();

    for entry in walker {
        let entry = entry.map_err(|e| MoverError::ArchiveWriteFailed {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: format!("walkdir error: {e}"),
        })?;
        let path = entry.path();

        let relative = path
            .strip_prefix(root)
            .map_err(|e| MoverError::ArchiveWriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if config
            .exclude_patterns
            .iter()
            .any(|pattern| matches_pattern(relative, pattern))
        {
            if !entry.file_type().is_dir() {
                report.files_skipped += 1;
            }
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            report.files_skipped += 1;
            report.add_warning(format!("Skipped symlink: {}", path.display()));
            continue;
        }
        if !file_type.is_file() {
            report.files_skipped += 1;
            report.add_warning(format!("Skipped special file: {}", path.display()));
            continue;
        }

        if has_backslash(relative) {
            return Err(MoverError::ArchiveWriteFailed {
                path: path.to_path_buf(),
                reason: "file name contains a backslash".to_string(),
            });
        }

        let size = entry
            .metadata()
            .map_err(|e| MoverError::ArchiveWriteFailed {
                path: path.to_path_buf(),
                reason: format!("cannot read metadata: {e}"),
            })?
            .len();

        entries.push(SourceEntry {
            path: path.to_path_buf(),
            entry_name: entry_name(relative).ok_or_else(|| MoverError::ArchiveWriteFailed {
                path: path.to_path_buf(),
                reason: "entry name is not valid UTF-8".to_string(),
            })?,
            size,
        });
    }

    entries.sort_by(|a, b| a.entry_name.cmp(&b.entry_name));
    Ok(entries)
}

/// Builds the archive entry name for a path relative to the source root.
///
/// Returns `None` if a component is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipmover_core::walker::entry_name;
///
/// assert_eq!(entry_name(Path::new("a/b/c.txt")).as_deref(), Some("a/b/c.txt"));
/// assert_eq!(entry_name(Path::new("./top.md")).as_deref(), Some("top.md"));
/// ```
#[must_use]
pub fn entry_name(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => parts.push(".."),
        }
    }
    Some(parts.join("/"))
}

/// Matches any component of `path` against a simple glob pattern.
///
/// Supports exact names, `prefix*` and `*suffix`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipmover_core::walker::matches_pattern;
///
/// assert!(matches_pattern(Path::new("dir/.git/config"), ".git"));
/// assert!(matches_pattern(Path::new("dir/test.tmp"), "*.tmp"));
/// assert!(matches_pattern(Path::new("temp_file"), "temp*"));
/// assert!(!matches_pattern(Path::new("file_temp"), "temp*"));
/// ```
#[must_use]
pub fn matches_pattern(path: &Path, pattern: &str) -> bool {
    path.components()
        .filter_map(|component| component.as_os_str().to_str())
        .any(|component| pattern_matches(component, pattern))
}

fn has_backslash(relative: &Path) -> bool {
    relative
        .components()
        .any(|component| component.as_os_str().to_string_lossy().contains('\\'))
}

fn pattern_matches(s: &str, pattern: &str) -> bool {
    if pattern == s {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return s.starts_with(prefix);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return s.ends_with(suffix);
    }
    false
}
