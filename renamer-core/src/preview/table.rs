use crate::batch::Batch;
use crate::record::{FileRecord, RecordStatus};
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

const HEADERS: [&str; 6] = ["ID", "Status", "Original", "", "New", "Path"];

/// Render every record as a table row followed by a totals footer
pub fn render_table(batch: &Batch, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(vec![
            ColumnConstraint::Absolute(Width::Fixed(6)),  // ID
            ColumnConstraint::Absolute(Width::Fixed(30)), // Status
            ColumnConstraint::Absolute(Width::Fixed(40)), // Original
            ColumnConstraint::Absolute(Width::Fixed(3)),  // Arrow
            ColumnConstraint::Absolute(Width::Fixed(40)), // New
            ColumnConstraint::Absolute(Width::Fixed(50)), // Path
        ]);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(HEADERS.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    } else {
        table.set_header(HEADERS);
    }

    for record in batch.records() {
        let arrow = if record.is_changed() { "→" } else { "" };
        let status = status_text(record);

        if use_color {
            let new_cell = if record.is_changed() {
                Cell::new(&record.new_name).fg(Color::Green)
            } else {
                Cell::new(&record.new_name).fg(Color::DarkGrey)
            };
            table.add_row(vec![
                Cell::new(record.id.to_string()).fg(Color::DarkGrey),
                Cell::new(&status).fg(status_color(&record.status)),
                Cell::new(&record.original_name),
                Cell::new(arrow).fg(Color::Magenta),
                new_cell,
                Cell::new(&record.relative_path).fg(Color::DarkGrey),
            ]);
        } else {
            table.add_row(vec![
                record.id.to_string(),
                status,
                record.original_name.clone(),
                arrow.to_string(),
                record.new_name.clone(),
                record.relative_path.clone(),
            ]);
        }
    }

    let stats = batch.stats();
    let totals = format!(
        "{} files, {} to rename, {} renamed, {} failed",
        stats.total, stats.changed, stats.succeeded, stats.failed
    );
    if use_color {
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(""),
            Cell::new(totals).fg(Color::White),
        ]);
    } else {
        table.add_row(vec!["TOTALS", "", &totals]);
    }

    table.to_string()
}

fn status_text(record: &FileRecord) -> String {
    match &record.status {
        RecordStatus::Error { reason } => format!("error: {}", reason),
        status => status.label().to_string(),
    }
}

fn status_color(status: &RecordStatus) -> Color {
    match status {
        RecordStatus::Pending => Color::Yellow,
        RecordStatus::Success => Color::Green,
        RecordStatus::Error { .. } => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::tests::sample_batch;

    #[test]
    fn test_table_rows_and_totals() {
        let output = render_table(&sample_batch(), false);
        assert!(output.contains("IMG_001.jpg"));
        assert!(output.contains("photo_001.jpg"));
        assert!(output.contains("trip/IMG_001.jpg"));
        assert!(output.contains("#1"));
        assert!(output.contains("pending"));
        assert!(output.contains("TOTALS"));
        assert!(output.contains("2 files, 1 to rename"));
    }

    #[test]
    fn test_table_shows_error_reason() {
        let mut batch = sample_batch();
        let id = batch.records()[0].id;
        batch.mark_error(id, "denied");
        let output = render_table(&batch, false);
        assert!(output.contains("error: denied"));
    }

    #[test]
    fn test_table_with_color_has_escape_codes() {
        let output = render_table(&sample_batch(), true);
        assert!(output.contains("\u{1b}["));
    }
}
