use crate::batch::Batch;
use crate::drivers::write_archive_file;
use crate::output::ArchiveResult;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Write the batch, under its new names, to a zip file at `out`
pub fn archive_operation(batch: &Batch, out: &Path) -> Result<ArchiveResult> {
    if batch.is_empty() {
        return Err(anyhow!("No files to archive"));
    }

    let summary = write_archive_file(batch, out)
        .with_context(|| format!("Failed to write archive {}", out.display()))?;

    Ok(ArchiveResult {
        path: out.to_path_buf(),
        entries: summary.entries,
        bytes: summary.bytes,
    })
}
