//! Archive codec seam and its ZIP implementation.
//!
//! The mover owns the archive file handles; a codec only turns a list of
//! [`SourceEntry`] values into archive bytes and back. Handles are dropped,
//! and therefore closed, on every exit path.

use crate::MoverConfig;
use crate::MoverError;
use crate::PackReport;
use crate::Result;
use crate::UnpackReport;
use crate::walker::SourceEntry;
use std::fs::File;
use std::fs::create_dir_all;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Trait for archive codecs driven by an [`ArchiveMover`](crate::ArchiveMover).
pub trait ArchiveCodec {
    /// Writes `entries` into `output` and finalizes the archive.
    ///
    /// `archive` is the final archive path, used for diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveWriteFailed` naming the source file if an entry cannot
    /// be added, or `ArchiveCloseFailed` if the archive cannot be finalized.
    fn write_archive(
        &self,
        output: &mut File,
        archive: &Path,
        entries: &[SourceEntry],
        config: &MoverConfig,
        report: &mut PackReport,
    ) -> Result<()>;

    /// Extracts every entry of `input` under `dest`, overwriting existing
    /// files.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveOpenFailed` if `input` is not a readable archive, or
    /// `ArchiveExtractFailed` carrying the codec diagnostic.
    fn extract_all(
        &self,
        input: File,
        archive: &Path,
        dest: &Path,
        report: &mut UnpackReport,
    ) -> Result<()>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}

/// ZIP codec backed by the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodec;

impl ZipCodec {
    /// Creates a new ZIP codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn file_options(config: &MoverConfig) -> SimpleFileOptions {
        if config.compression_level == 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(config.compression_level)))
        }
    }
}

impl ArchiveCodec for ZipCodec {
    fn write_archive(
        &self,
        output: &mut File,
        archive: &Path,
        entries: &[SourceEntry],
        config: &MoverConfig,
        report: &mut PackReport,
    ) -> Result<()> {
        let mut zip = ZipWriter::new(output);
        let options = Self::file_options(config);

        for entry in entries {
            let write_failed = |reason: String| MoverError::ArchiveWriteFailed {
                path: entry.path.clone(),
                reason,
            };

            let mut file = File::open(&entry.path).map_err(|e| write_failed(e.to_string()))?;
            let file_options = options.large_file(entry.size >= u64::from(u32::MAX));

            zip.start_file(entry.entry_name.as_str(), file_options)
                .map_err(|e| write_failed(format!("failed to start entry: {e}")))?;
            let bytes = io::copy(&mut file, &mut zip).map_err(|e| write_failed(e.to_string()))?;

            report.files_added += 1;
            report.bytes_written += bytes;
        }

        zip.finish().map_err(|e| MoverError::ArchiveCloseFailed {
            path: archive.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn extract_all(
        &self,
        input: File,
        archive: &Path,
        dest: &Path,
        report: &mut UnpackReport,
    ) -> Result<()> {
        let extract_failed = |reason: String| MoverError::ArchiveExtractFailed { reason };

        let mut zip = ZipArchive::new(input).map_err(|e| MoverError::ArchiveOpenFailed {
            path: archive.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

        for index in 0..zip.len() {
            let mut entry = zip
                .by_index(index)
                .map_err(|e| extract_failed(format!("entry {index}: {e}")))?;

            let Some(relative) = entry.enclosed_name() else {
                return Err(extract_failed(format!(
                    "entry '{}' escapes the destination directory",
                    entry.name()
                )));
            };
            let output_path = dest.join(relative);

            if entry.is_dir() {
                if !output_path.is_dir() {
                    create_dir_all(&output_path).map_err(|e| {
                        extract_failed(format!("{}: {e}", output_path.display()))
                    })?;
                    report.directories_created += 1;
                }
                continue;
            }

            if let Some(parent) = output_path.parent()
                && !parent.is_dir()
            {
                create_dir_all(parent)
                    .map_err(|e| extract_failed(format!("{}: {e}", parent.display())))?;
                report.directories_created += 1;
            }

            let io_failed = |e: io::Error| extract_failed(format!("{}: {e}", output_path.display()));
            let mut writer = BufWriter::with_capacity(
                COPY_BUFFER_SIZE,
                File::create(&output_path).map_err(io_failed)?,
            );
            loop {
                let n = match io::Read::read(&mut entry, &mut buffer) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(io_failed(e)),
                };
                writer.write_all(&buffer[..n]).map_err(io_failed)?;
                report.bytes_written += n as u64;
            }
            writer.flush().map_err(io_failed)?;

            report.files_extracted += 1;
        }

        Ok(())
    }

    fn format_name(&self) -> &str {
        "zip"
    }
}
