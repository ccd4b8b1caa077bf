use crate::batch::Batch;
use crate::import::{import_paths, scan_directory, ImportedFile};
use crate::record::RecordId;
use crate::rule::RenameRule;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Build a batch from the given sources under `rule`.
///
/// With no sources the working directory is scanned.
pub fn load_batch(
    sources: &[PathBuf],
    rule: RenameRule,
    working_dir: Option<&Path>,
    interrupted: &AtomicBool,
) -> Result<Batch> {
    let mut batch = Batch::new(rule);
    let defaults = [working_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)];
    let sources = if sources.is_empty() {
        &defaults[..]
    } else {
        sources
    };
    add_sources(&mut batch, sources, interrupted)?;
    Ok(batch)
}

/// Import each source into an existing batch.
///
/// Directories are scanned recursively and their files can be renamed in
/// place. Individual files are added as flat, read-only entries. An interrupt
/// stops the import; whatever was read so far stays in the batch.
pub fn add_sources(
    batch: &mut Batch,
    sources: &[PathBuf],
    interrupted: &AtomicBool,
) -> Result<Vec<RecordId>> {
    let mut ids = Vec::new();

    for source in sources {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }

        if source.is_dir() {
            let entries = scan_entries(source, interrupted)?;
            log::debug!("scanned {} file(s) under {}", entries.len(), source.display());
            ids.extend(batch.import_scan(entries));
        } else {
            let files = import_paths(std::slice::from_ref(source))
                .with_context(|| format!("Failed to import {}", source.display()))?;
            ids.extend(batch.import_files(files));
        }
    }

    Ok(ids)
}

/// Drop any record whose source is the file at `output`.
///
/// Exports written next to their inputs would otherwise be picked up as an
/// input by the next run. Returns the number of records removed.
pub fn exclude_output(batch: &mut Batch, output: &Path) -> usize {
    let Ok(output) = output.canonicalize() else {
        return 0;
    };

    let ids: Vec<RecordId> = batch
        .records()
        .iter()
        .filter(|record| {
            record
                .source
                .path
                .canonicalize()
                .is_ok_and(|path| path == output)
        })
        .map(|record| record.id)
        .collect();

    for id in &ids {
        log::debug!("excluding export target {} from the batch", output.display());
        batch.remove(*id);
    }
    ids.len()
}

fn scan_entries(root: &Path, interrupted: &AtomicBool) -> Result<Vec<ImportedFile>> {
    let scan = scan_directory(root)
        .with_context(|| format!("Failed to scan directory {}", root.display()))?;

    let mut entries = Vec::new();
    for entry in scan {
        if interrupted.load(Ordering::SeqCst) {
            log::warn!("scan of {} interrupted", root.display());
            break;
        }
        match entry {
            Ok(file) => entries.push(file),
            Err(e) => log::warn!("skipping entry: {}", e),
        }
    }
    Ok(entries)
}
