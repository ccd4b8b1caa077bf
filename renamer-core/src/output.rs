use crate::batch::BatchStats;
use crate::drivers::{CommitReport, RecordOutcome};
use crate::record::FileRecord;
use crate::rule::RenameRule;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a preview operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResult {
    pub rule: RenameRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_error: Option<String>,
    pub stats: BatchStats,
    pub records: Vec<FileRecord>,
}

/// Result of renaming on disk
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommitResult {
    pub renamed: usize,
    pub failed: usize,
    pub failures: Vec<RecordOutcome>,
    pub skipped: Vec<RecordOutcome>,
    pub cancelled: bool,
    pub dry_run: bool,
    /// Eligible records when the pass started
    pub pending: usize,
}

impl CommitResult {
    pub fn from_report(report: CommitReport, pending: usize) -> Self {
        Self {
            renamed: report.renamed,
            failed: report.failed,
            failures: report.failures,
            skipped: report.skipped,
            cancelled: report.cancelled,
            dry_run: false,
            pending,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Result of writing a zip archive
#[derive(Debug, Serialize, Deserialize)]
pub struct ArchiveResult {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

/// Result of generating a rename script
#[derive(Debug, Serialize, Deserialize)]
pub struct ScriptResult {
    /// Where the script was written, if anywhere
    pub path: Option<PathBuf>,
    pub commands: usize,
    pub script: Option<String>,
}

/// Result of synthesizing a rule from an instruction
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResult {
    pub instruction: String,
    pub rule: Option<RenameRule>,
    pub stats: Option<BatchStats>,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "preview",
            "rule": self.rule,
            "rule_error": self.rule_error,
            "summary": self.stats,
            "records": self.records,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Rule: {}", self.rule.describe()).unwrap();
        if let Some(error) = &self.rule_error {
            writeln!(output, "Warning: {}", error).unwrap();
        }
        writeln!(
            output,
            "Files: {}, to rename: {}",
            self.stats.total, self.stats.changed
        )
        .unwrap();
        output
    }
}

impl OutputFormatter for CommitResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.has_failures() && !self.cancelled,
            "operation": "apply",
            "dry_run": self.dry_run,
            "cancelled": self.cancelled,
            "summary": {
                "pending": self.pending,
                "renamed": self.renamed,
                "failed": self.failed,
                "skipped": self.skipped.len(),
            },
            "failures": self.failures,
            "skipped": self.skipped,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.pending == 0 {
            return "No pending changes to apply.\n".to_string();
        }

        if self.dry_run {
            return format!("Dry run: {} file(s) would be renamed\n", self.pending);
        }

        let mut output = String::new();
        if self.renamed > 0 {
            writeln!(output, "✓ Renamed {} file(s)", self.renamed).unwrap();
        }

        if self.has_failures() {
            writeln!(output, "✗ Failed to rename {} file(s):", self.failed).unwrap();
            for failure in &self.failures {
                writeln!(output, "  {}: {}", failure.relative_path, failure.reason).unwrap();
            }
        }

        if !self.skipped.is_empty() {
            writeln!(
                output,
                "Skipped {} file(s) imported without write access",
                self.skipped.len()
            )
            .unwrap();
        }

        if self.cancelled {
            output.push_str("Interrupted; remaining files were left pending\n");
        }

        writeln!(output, "Success: {}, Failed: {}", self.renamed, self.failed).unwrap();
        output
    }
}

impl OutputFormatter for ArchiveResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "archive",
            "path": self.path,
            "summary": {
                "entries": self.entries,
                "bytes": self.bytes,
            },
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!(
            "✓ Wrote {} file(s) to {}\n",
            self.entries,
            self.path.display()
        )
    }
}

impl OutputFormatter for ScriptResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "script",
            "path": self.path,
            "commands": self.commands,
            "script": self.script,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        match (&self.script, &self.path) {
            (None, _) => "No changes to script.\n".to_string(),
            (Some(_), Some(path)) => format!(
                "✓ Wrote script with {} command(s) to {}\n",
                self.commands,
                path.display()
            ),
            (Some(script), None) => format!("{}\n", script),
        }
    }
}

impl OutputFormatter for SuggestResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.rule.is_some(),
            "operation": "suggest",
            "instruction": self.instruction,
            "rule": self.rule,
            "summary": self.stats,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        match &self.rule {
            Some(rule) => {
                let mut output = format!("Suggested rule: {}\n", rule.describe());
                if let Some(stats) = &self.stats {
                    writeln!(
                        output,
                        "Would rename {} of {} file(s)",
                        stats.changed, stats.total
                    )
                    .unwrap();
                }
                output
            },
            None => "No rule could be suggested; keeping the current rule.\n".to_string(),
        }
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
