use crate::batch::Batch;
use crate::drivers::{commit_to_disk, DiskOptions};
use crate::output::CommitResult;
use anyhow::{Context, Result};
use std::sync::atomic::AtomicBool;

/// Rename every pending change on disk, or only count them when `dry_run`
pub fn apply_operation(
    batch: &mut Batch,
    options: &DiskOptions,
    dry_run: bool,
    interrupted: &AtomicBool,
) -> Result<CommitResult> {
    let pending = batch.pending_changes().len();

    if pending == 0 || dry_run {
        return Ok(CommitResult {
            dry_run,
            pending,
            ..CommitResult::default()
        });
    }

    let report =
        commit_to_disk(batch, options, interrupted).context("Failed to apply renames")?;
    Ok(CommitResult::from_report(report, pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::load_batch;
    use crate::record::RecordStatus;
    use crate::rule::RenameRule;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_apply_renames_scanned_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("IMG_1.jpg"), "1").unwrap();
        fs::write(temp.path().join("notes.txt"), "n").unwrap();

        let interrupted = AtomicBool::new(false);
        let mut batch = load_batch(
            &[temp.path().to_path_buf()],
            RenameRule::replace("IMG_", "photo_"),
            None,
            &interrupted,
        )
        .unwrap();

        let result =
            apply_operation(&mut batch, &DiskOptions::default(), false, &interrupted).unwrap();
        assert_eq!(result.pending, 1);
        assert_eq!(result.renamed, 1);
        assert!(!result.has_failures());
        assert!(temp.path().join("photo_1.jpg").exists());
        assert!(!temp.path().join("IMG_1.jpg").exists());
        assert_eq!(batch.records()[0].status, RecordStatus::Success);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("IMG_1.jpg"), "1").unwrap();

        let interrupted = AtomicBool::new(false);
        let mut batch = load_batch(
            &[temp.path().to_path_buf()],
            RenameRule::replace("IMG_", "photo_"),
            None,
            &interrupted,
        )
        .unwrap();

        let result =
            apply_operation(&mut batch, &DiskOptions::default(), true, &interrupted).unwrap();
        assert!(result.dry_run);
        assert_eq!(result.pending, 1);
        assert!(temp.path().join("IMG_1.jpg").exists());
        assert_eq!(batch.records()[0].status, RecordStatus::Pending);
    }

    #[test]
    fn test_nothing_pending() {
        let mut batch = Batch::default();
        let result = apply_operation(
            &mut batch,
            &DiskOptions::default(),
            false,
            &AtomicBool::new(false),
        )
        .unwrap();
        assert_eq!(result.pending, 0);
        assert_eq!(result.renamed, 0);
    }
}
