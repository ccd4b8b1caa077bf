use crate::batch::Batch;
use crate::drivers::DriverError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const DEFAULT_ARCHIVE_NAME: &str = "renamed_files.zip";

/// One file as it will appear inside the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Directory of the record joined with its new name
    pub path: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub entries: usize,
    pub bytes: u64,
}

/// List every record under its renamed path, in batch order
pub fn archive_entries(batch: &Batch) -> Vec<ArchiveEntry> {
    batch
        .records()
        .iter()
        .map(|record| ArchiveEntry {
            path: record.target_path(),
            source: record.source.path.clone(),
        })
        .collect()
}

/// Write a zip of the batch to `writer`. The batch itself is not modified.
///
/// Two records resolving to the same path make the zip writer fail.
pub fn write_archive<W: Write + Seek>(
    batch: &Batch,
    writer: W,
) -> Result<ArchiveSummary, DriverError> {
    let mut zip = ZipWriter::new(writer);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut summary = ArchiveSummary::default();
    for entry in archive_entries(batch) {
        let mut source =
            File::open(&entry.source).map_err(|e| DriverError::io(&entry.source, e))?;
        zip.start_file(entry.path.as_str(), options)?;
        summary.bytes +=
            io::copy(&mut source, &mut zip).map_err(|e| DriverError::io(&entry.source, e))?;
        summary.entries += 1;
    }

    zip.finish()?;
    Ok(summary)
}

/// Write the archive to `path`, replacing it only once fully written
pub fn write_archive_file(batch: &Batch, path: &Path) -> Result<ArchiveSummary, DriverError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| DriverError::io(&dir, e))?;
    let summary = write_archive(batch, temp.as_file())?;
    temp.persist(path).map_err(|e| DriverError::io(path, e.error))?;
    Ok(summary)
}
