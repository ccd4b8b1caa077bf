//! Commit drivers.
//!
//! Each driver consumes a reconciled [`Batch`](crate::Batch). Only the disk
//! driver mutates it; the archive and script drivers are read-only exports.

pub mod archive;
pub mod disk;
pub mod script;

pub use archive::{
    archive_entries, write_archive, write_archive_file, ArchiveEntry, ArchiveSummary,
    DEFAULT_ARCHIVE_NAME,
};
pub use disk::{commit_to_disk, CommitReport, DiskOptions, RecordOutcome};
pub use script::{render_script, write_script_file, SCRIPT_HEADER};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid file name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl DriverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
