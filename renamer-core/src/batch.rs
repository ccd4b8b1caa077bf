//! The ordered collection of file records under management.
//!
//! A [`Batch`] owns both the active rule and the records. Every mutation goes
//! through `&mut Batch`, so a recompute pass can never run while a commit
//! driver is holding the batch.

use crate::import::ImportedFile;
use crate::record::{FileRecord, RecordId, RecordStatus};
use crate::rule::RenameRule;
use crate::transform::{TransformError, Transformer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Batch {
    rule: RenameRule,
    transformer: Transformer,
    records: Vec<FileRecord>,
    next_id: u64,
}

/// Counts used by previews and reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub changed: usize,
    pub pending: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Default for Batch {
    fn default() -> Self {
        Self::new(RenameRule::default())
    }
}

impl Batch {
    pub fn new(rule: RenameRule) -> Self {
        let transformer = Transformer::new(&rule);
        Self {
            rule,
            transformer,
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn rule(&self) -> &RenameRule {
        &self.rule
    }

    /// Why the current rule degraded to the identity, if it did
    pub fn rule_error(&self) -> Option<&TransformError> {
        self.transformer.error()
    }

    /// Replace the rule and recompute every non-committed record
    pub fn set_rule(&mut self, rule: RenameRule) -> usize {
        self.transformer = Transformer::new(&rule);
        self.rule = rule;
        self.reconcile()
    }

    /// Edit the rule in place, then reconcile
    pub fn update_rule<F>(&mut self, edit: F) -> usize
    where
        F: FnOnce(&mut RenameRule),
    {
        let mut rule = self.rule.clone();
        edit(&mut rule);
        self.set_rule(rule)
    }

    /// Recompute `new_name` for every record that is not `Success`.
    ///
    /// Returns the number of records recomputed.
    pub fn reconcile(&mut self) -> usize {
        let mut recomputed = 0;
        for record in &mut self.records {
            if record.status.is_final() {
                continue;
            }
            record.new_name = self.transformer.apply(&record.original_name);
            recomputed += 1;
        }
        recomputed
    }

    /// Append records chosen individually. Names are computed immediately.
    pub fn import_files<I>(&mut self, files: I) -> Vec<RecordId>
    where
        I: IntoIterator<Item = ImportedFile>,
    {
        let mut ids = Vec::new();
        for file in files {
            let new_name = self.transformer.apply(&file.name);
            ids.push(self.push(file, new_name));
        }
        ids
    }

    /// Append records from a directory scan.
    ///
    /// Records enter with their original name as a placeholder and are then
    /// corrected by the same pass a rule change uses.
    pub fn import_scan<I>(&mut self, entries: I) -> Vec<RecordId>
    where
        I: IntoIterator<Item = ImportedFile>,
    {
        let mut ids = Vec::new();
        for entry in entries {
            let placeholder = entry.name.clone();
            ids.push(self.push(entry, placeholder));
        }
        if !ids.is_empty() {
            self.reconcile();
        }
        ids
    }

    fn push(&mut self, file: ImportedFile, new_name: String) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(FileRecord {
            id,
            original_name: file.name,
            new_name,
            relative_path: file.relative_path,
            status: RecordStatus::Pending,
            source: file.source,
        });
        id
    }

    pub fn remove(&mut self, id: RecordId) -> Option<FileRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, id: RecordId) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose name differs from the computed one
    pub fn changed_records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|r| r.is_changed())
    }

    /// Ids a commit pass should target, in batch order
    pub fn pending_changes(&self) -> Vec<RecordId> {
        self.records
            .iter()
            .filter(|r| r.is_eligible())
            .map(|r| r.id)
            .collect()
    }

    /// Record a successful commit.
    ///
    /// `new_name` becomes the original name, and the relative path and source
    /// path follow it so they describe the entry as it now exists.
    pub fn mark_success(&mut self, id: RecordId) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        if record.status.is_final() {
            return false;
        }

        let committed = record.new_name.clone();
        record.relative_path = match record.directory() {
            Some(dir) => format!("{}/{}", dir, committed),
            None => committed.clone(),
        };
        record.source.path = match &record.source.writable {
            Some(handle) => handle.entry(&committed),
            None => record
                .source
                .path
                .parent()
                .map_or_else(|| PathBuf::from(&committed), |p| p.join(&committed)),
        };
        record.original_name = committed;
        record.status = RecordStatus::Success;
        true
    }

    /// Record a failed commit attempt. Committed records are left alone.
    pub fn mark_error(&mut self, id: RecordId, reason: impl Into<String>) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        if record.status.is_final() {
            return false;
        }
        record.status = RecordStatus::Error {
            reason: reason.into(),
        };
        true
    }

    pub fn stats(&self) -> BatchStats {
        let mut stats = BatchStats {
            total: self.records.len(),
            ..BatchStats::default()
        };
        for record in &self.records {
            if record.is_eligible() {
                stats.changed += 1;
            }
            match record.status {
                RecordStatus::Pending => stats.pending += 1,
                RecordStatus::Success => stats.succeeded += 1,
                RecordStatus::Error { .. } => stats.failed += 1,
            }
        }
        stats
    }

    fn record_mut(&mut self, id: RecordId) -> Option<&mut FileRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FileSource;

    fn picked(name: &str) -> ImportedFile {
        ImportedFile {
            name: name.to_string(),
            relative_path: name.to_string(),
            source: FileSource::detached(name),
        }
    }

    fn scanned(relative_path: &str) -> ImportedFile {
        let name = relative_path.rsplit('/').next().unwrap().to_string();
        ImportedFile {
            name,
            relative_path: relative_path.to_string(),
            source: FileSource::writable(format!("/root/{}", relative_path)),
        }
    }

    #[test]
    fn test_import_files_computes_names() {
        let mut batch = Batch::new(RenameRule::prepend("x_"));
        let ids = batch.import_files(vec![picked("a.txt"), picked("b.txt")]);
        assert_eq!(ids.len(), 2);
        assert_eq!(batch.records()[0].new_name, "x_a.txt");
        assert_eq!(batch.records()[1].new_name, "x_b.txt");
        assert!(batch
            .records()
            .iter()
            .all(|r| r.status == RecordStatus::Pending));
    }

    #[test]
    fn test_scan_and_picker_converge() {
        let rule = RenameRule::regex(r"\d+", "N");
        let mut picked_batch = Batch::new(rule.clone());
        picked_batch.import_files(vec![picked("img123.png")]);
        let mut scanned_batch = Batch::new(rule);
        scanned_batch.import_scan(vec![scanned("img123.png")]);
        assert_eq!(
            picked_batch.records()[0].new_name,
            scanned_batch.records()[0].new_name
        );
        assert_eq!(scanned_batch.records()[0].new_name, "imgN.png");
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut batch = Batch::default();
        let first = batch.import_files(vec![picked("a"), picked("b")]);
        batch.remove(first[1]);
        let second = batch.import_files(vec![picked("c")]);
        assert_ne!(first[1], second[0]);
        assert_ne!(first[0], second[0]);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut batch = Batch::default();
        let ids = batch.import_files(vec![picked("a"), picked("b"), picked("c")]);
        let removed = batch.remove(ids[1]).unwrap();
        assert_eq!(removed.original_name, "b");
        let names: Vec<_> = batch.records().iter().map(|r| r.original_name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(batch.remove(ids[1]).is_none());
    }

    #[test]
    fn test_set_rule_skips_committed_records() {
        let mut batch = Batch::new(RenameRule::append("_1"));
        let ids = batch.import_files(vec![picked("a.txt"), picked("b.txt")]);
        assert!(batch.mark_success(ids[0]));
        assert_eq!(batch.get(ids[0]).unwrap().original_name, "a_1.txt");

        batch.set_rule(RenameRule::append("_2"));
        assert_eq!(batch.get(ids[0]).unwrap().new_name, "a_1.txt");
        assert_eq!(batch.get(ids[1]).unwrap().new_name, "b_2.txt");
    }

    #[test]
    fn test_error_records_are_recomputed() {
        let mut batch = Batch::new(RenameRule::append("_1"));
        let ids = batch.import_files(vec![picked("a.txt")]);
        batch.mark_error(ids[0], "denied");
        batch.set_rule(RenameRule::append("_2"));
        let record = batch.get(ids[0]).unwrap();
        assert_eq!(record.new_name, "a_2.txt");
        assert_eq!(
            record.status,
            RecordStatus::Error {
                reason: "denied".to_string()
            }
        );
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut batch = Batch::new(RenameRule::replace("a", "aa"));
        batch.import_files(vec![picked("banana")]);
        batch.reconcile();
        let first = batch.records()[0].new_name.clone();
        batch.reconcile();
        assert_eq!(batch.records()[0].new_name, first);
        assert_eq!(first, "baanaanaa");
    }

    #[test]
    fn test_mark_success_updates_paths() {
        let mut batch = Batch::new(RenameRule::prepend("new_"));
        let ids = batch.import_scan(vec![scanned("docs/a.txt")]);
        batch.mark_success(ids[0]);
        let record = batch.get(ids[0]).unwrap();
        assert_eq!(record.original_name, "new_a.txt");
        assert_eq!(record.new_name, "new_a.txt");
        assert_eq!(record.relative_path, "docs/new_a.txt");
        assert_eq!(record.source.path, PathBuf::from("/root/docs/new_a.txt"));
        assert!(!record.is_changed());
    }

    #[test]
    fn test_success_is_terminal() {
        let mut batch = Batch::new(RenameRule::prepend("x_"));
        let ids = batch.import_files(vec![picked("a")]);
        assert!(batch.mark_success(ids[0]));
        assert!(!batch.mark_error(ids[0], "late failure"));
        assert!(!batch.mark_success(ids[0]));
        assert_eq!(batch.get(ids[0]).unwrap().status, RecordStatus::Success);
    }

    #[test]
    fn test_pending_changes_and_stats() {
        let mut batch = Batch::new(RenameRule::replace("old", "new"));
        let ids = batch.import_files(vec![
            picked("old_a"),
            picked("keep"),
            picked("old_b"),
            picked("old_c"),
        ]);
        batch.mark_success(ids[2]);
        batch.mark_error(ids[3], "denied");

        assert_eq!(batch.pending_changes(), vec![ids[0], ids[3]]);
        let stats = batch.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.changed, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn test_update_rule_and_rule_error() {
        let mut batch = Batch::new(RenameRule::regex("x", "y"));
        batch.import_files(vec![picked("xx")]);
        assert_eq!(batch.records()[0].new_name, "yy");

        batch.update_rule(|rule| rule.find = "(".to_string());
        assert!(batch.rule_error().is_some());
        assert_eq!(batch.records()[0].new_name, "xx");

        batch.update_rule(|rule| rule.is_active = false);
        assert!(batch.rule_error().is_none());
    }

    #[test]
    fn test_clear() {
        let mut batch = Batch::default();
        batch.import_files(vec![picked("a")]);
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
