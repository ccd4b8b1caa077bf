use crate::batch::Batch;
use crate::drivers::DriverError;
use crate::record::RecordId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Options for renaming records in place
#[derive(Debug, Clone, Default)]
pub struct DiskOptions {
    /// Append a line per attempt to this file
    pub log_file: Option<PathBuf>,
}

/// What happened to one record that was not renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub id: RecordId,
    pub relative_path: String,
    pub reason: String,
}

/// Aggregate result of one commit pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReport {
    pub renamed: usize,
    pub failed: usize,
    pub failures: Vec<RecordOutcome>,
    /// Records without a rename capability. They stay pending.
    pub skipped: Vec<RecordOutcome>,
    /// The pass stopped early on interrupt
    pub cancelled: bool,
}

impl CommitReport {
    pub fn attempted(&self) -> usize {
        self.renamed + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

struct CommitLog {
    file: Option<File>,
}

impl CommitLog {
    fn open(path: Option<&Path>) -> Result<Self> {
        let file = if let Some(path) = path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            Some(OpenOptions::new().create(true).append(true).open(path)?)
        } else {
            None
        };
        Ok(Self { file })
    }

    /// Append one line. A failed write is reported but never stops the pass.
    fn log(&mut self, message: &str) {
        let Some(ref mut file) = self.file else {
            return;
        };
        let written = writeln!(
            file,
            "[{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        )
        .and_then(|()| file.flush());
        if let Err(e) = written {
            log::warn!("failed to write commit log: {}", e);
        }
    }
}

/// Rename every eligible record in place, one at a time and in batch order.
///
/// A failed rename marks that record `Error` and the pass moves on. Records
/// without a writable handle are reported as skipped and left pending. The
/// interrupt flag is checked before each record; records already committed
/// keep their state.
pub fn commit_to_disk(
    batch: &mut Batch,
    options: &DiskOptions,
    interrupted: &AtomicBool,
) -> Result<CommitReport> {
    let mut log = CommitLog::open(options.log_file.as_deref())?;
    let mut report = CommitReport::default();
    let targets = batch.pending_changes();

    log.log(&format!(
        "commit started: {} candidate(s), rule {}",
        targets.len(),
        batch.rule().describe()
    ));

    for id in targets {
        if interrupted.load(Ordering::SeqCst) {
            report.cancelled = true;
            log.log("commit interrupted");
            break;
        }

        let Some(record) = batch.get(id) else {
            continue;
        };
        let relative_path = record.relative_path.clone();

        let Some(handle) = record.source.writable.as_ref() else {
            log::warn!("no write access to {}, skipping", relative_path);
            log.log(&format!("skip {}: no write access", relative_path));
            report.skipped.push(RecordOutcome {
                id,
                relative_path,
                reason: "imported without write access".to_string(),
            });
            continue;
        };

        let from = record.source.path.clone();
        let to = handle.entry(&record.new_name);
        let new_name = record.new_name.clone();

        match rename_entry(&from, &to, &new_name) {
            Ok(()) => {
                batch.mark_success(id);
                report.renamed += 1;
                log::debug!("renamed {} -> {}", from.display(), to.display());
                log.log(&format!("renamed {} -> {}", from.display(), to.display()));
            },
            Err(e) => {
                let reason = e.to_string();
                batch.mark_error(id, reason.clone());
                report.failed += 1;
                log::warn!("failed to rename {}: {}", relative_path, reason);
                log.log(&format!("failed {}: {}", relative_path, reason));
                report.failures.push(RecordOutcome {
                    id,
                    relative_path,
                    reason,
                });
            },
        }
    }

    log.log(&format!(
        "commit finished: {} renamed, {} failed, {} skipped",
        report.renamed,
        report.failed,
        report.skipped.len()
    ));

    Ok(report)
}

/// Rename `from` to `to` without clobbering a different existing entry
fn rename_entry(from: &Path, to: &Path, new_name: &str) -> Result<(), DriverError> {
    validate_name(new_name)?;

    let case_only = is_case_only_change(from, to) && same_entry(from, to);
    if fs::symlink_metadata(to).is_ok() && !case_only {
        return Err(DriverError::DestinationExists(to.to_path_buf()));
    }

    fs::rename(from, to).map_err(|e| DriverError::io(from, e))
}

fn validate_name(name: &str) -> Result<(), DriverError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a directory")
    } else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        Some("name contains a path separator")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DriverError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// True when the file names differ only in letter case
fn is_case_only_change(from: &Path, to: &Path) -> bool {
    match (from.file_name(), to.file_name()) {
        (Some(a), Some(b)) => {
            let (a, b) = (a.to_string_lossy(), b.to_string_lossy());
            a != b && a.to_lowercase() == b.to_lowercase()
        },
        _ => false,
    }
}

/// True when both paths resolve to the same inode. Hard links do too, so
/// callers pair this with [`is_case_only_change`].
#[cfg(unix)]
fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_entry(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
