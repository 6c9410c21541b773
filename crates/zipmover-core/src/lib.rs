//! Integrity-gated directory packing and unpacking.
//!
//! `zipmover-core` packs a directory tree into a single ZIP artifact, records
//! the artifact's SHA-256 digest, and refuses to unpack it unless the bytes on
//! disk still match that digest. This guards the window between pack and
//! unpack, when the archive sits on disk or travels between processes.
//!
//! # Examples
//!
//! ```no_run
//! use zipmover_core::ArchiveMover;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mover = ArchiveMover::at("/tmp/site.zip")?;
//! let report = mover.pack("public")?;
//! println!("Packed {} files", report.files_added);
//!
//! mover.unpack("/var/www/site")?;
//! mover.dispose()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod mover;
pub mod report;
pub mod state;
pub mod walker;

pub use codec::ArchiveCodec;
pub use codec::ZipCodec;
pub use config::MoverConfig;
pub use digest::ContentHash;
pub use error::ErrorCategory;
pub use error::MoverError;
pub use error::Result;
pub use mover::ArchiveMover;
pub use report::PackReport;
pub use report::UnpackReport;
pub use state::IntegrityState;
pub use walker::SourceEntry;
