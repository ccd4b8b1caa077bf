use crate::batch::Batch;
use serde_json::json;

/// Render rule, counts and records as pretty JSON
pub fn render_json(batch: &Batch) -> String {
    let value = json!({
        "rule": batch.rule(),
        "ruleError": batch.rule_error().map(ToString::to_string),
        "stats": batch.stats(),
        "records": batch.records(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string())
}
