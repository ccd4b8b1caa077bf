use crate::batch::Batch;
use crate::output::PreviewResult;
use crate::preview::{render_batch, Preview};

/// Render the batch and collect the structured view of it.
///
/// The rendered text is empty for [`Preview::None`].
pub fn preview_operation(
    batch: &Batch,
    format: Preview,
    use_color: Option<bool>,
) -> (PreviewResult, String) {
    if let Some(error) = batch.rule_error() {
        log::warn!("rule has no effect: {}", error);
    }

    let rendered = render_batch(batch, format, use_color);
    let result = PreviewResult {
        rule: batch.rule().clone(),
        rule_error: batch.rule_error().map(ToString::to_string),
        stats: batch.stats(),
        records: batch.records().to_vec(),
    };
    (result, rendered)
}
