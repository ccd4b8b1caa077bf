use crate::batch::Batch;
use crate::record::RecordStatus;
use std::fmt::Write;

/// Render the batch as a plain AI-friendly summary
pub fn render_summary(batch: &Batch) -> String {
    let mut output = String::new();
    let stats = batch.stats();

    writeln!(output, "[BATCH SUMMARY]").unwrap();
    writeln!(output, "Rule: {}", batch.rule().describe()).unwrap();
    if let Some(error) = batch.rule_error() {
        writeln!(output, "Rule error: {}", error).unwrap();
    }
    writeln!(output, "Files: {}", stats.total).unwrap();
    writeln!(output, "Changes: {}", stats.changed).unwrap();
    writeln!(output, "Renamed: {}", stats.succeeded).unwrap();
    writeln!(output, "Failed: {}", stats.failed).unwrap();

    let lines: Vec<String> = batch
        .records()
        .iter()
        .filter_map(|record| match &record.status {
            RecordStatus::Success => Some(format!("{} success: {}", record.id, record.relative_path)),
            RecordStatus::Error { reason } => Some(format!(
                "{} error: {} -> {} ({})",
                record.id,
                record.relative_path,
                record.target_path(),
                reason
            )),
            RecordStatus::Pending if record.is_changed() => Some(format!(
                "{} pending: {} -> {}",
                record.id,
                record.relative_path,
                record.target_path()
            )),
            RecordStatus::Pending => None,
        })
        .collect();

    if !lines.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[RECORDS]").unwrap();
        for line in lines {
            writeln!(output, "{}", line).unwrap();
        }
    }

    output
}
