use crate::batch::Batch;
use nu_ansi_term::{Color as AnsiColor, Style};
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Render changed records as `-old` / `+new` pairs.
///
/// With color, the characters that differ are highlighted on each side.
pub fn render_diff(batch: &Batch, use_color: bool) -> String {
    let mut output = String::new();

    for record in batch.changed_records() {
        let old_path = &record.relative_path;
        let new_path = record.target_path();

        if use_color {
            let (old_line, new_line) = highlight_pair(old_path, &new_path);
            writeln!(
                output,
                "{}",
                Style::new()
                    .fg(AnsiColor::DarkGray)
                    .paint(format!("@@ {} {} @@", record.id, record.status.label()))
            )
            .unwrap();
            writeln!(output, "{}{}", delete_style().paint("-"), old_line).unwrap();
            writeln!(output, "{}{}", insert_style().paint("+"), new_line).unwrap();
        } else {
            writeln!(output, "@@ {} {} @@", record.id, record.status.label()).unwrap();
            writeln!(output, "-{}", old_path).unwrap();
            writeln!(output, "+{}", new_path).unwrap();
        }
    }

    if output.is_empty() {
        output.push_str("No changes\n");
    }

    output
}

fn delete_style() -> Style {
    Style::new().fg(AnsiColor::Red)
}

fn insert_style() -> Style {
    Style::new().fg(AnsiColor::Green)
}

/// Paint both sides of a rename, emphasising the characters that changed
fn highlight_pair(old: &str, new: &str) -> (String, String) {
    let diff = TextDiff::from_chars(old, new);
    let mut old_line = String::new();
    let mut new_line = String::new();

    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                old_line.push_str(&delete_style().paint(text).to_string());
                new_line.push_str(&insert_style().paint(text).to_string());
            },
            ChangeTag::Delete => {
                let style = Style::new()
                    .on(AnsiColor::Rgb(0xC0, 0x52, 0x6A))
                    .fg(AnsiColor::Rgb(0xFF, 0xFF, 0xFF));
                old_line.push_str(&style.paint(text).to_string());
            },
            ChangeTag::Insert => {
                let style = Style::new()
                    .on(AnsiColor::Rgb(0x00, 0xA9, 0x58))
                    .fg(AnsiColor::Rgb(0xFF, 0xFF, 0xFF));
                new_line.push_str(&style.paint(text).to_string());
            },
        }
    }

    (old_line, new_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::tests::sample_batch;
    use crate::rule::RenameRule;

    #[test]
    fn test_diff_lists_only_changed_records() {
        let output = render_diff(&sample_batch(), false);
        assert_eq!(
            output,
            "@@ #1 pending @@\n-trip/IMG_001.jpg\n+trip/photo_001.jpg\n"
        );
    }

    #[test]
    fn test_diff_without_changes() {
        let mut batch = sample_batch();
        batch.set_rule(RenameRule::default());
        assert_eq!(render_diff(&batch, false), "No changes\n");
    }

    #[test]
    fn test_highlight_keeps_text() {
        let (old, new) = highlight_pair("IMG_001.jpg", "photo_001.jpg");
        assert!(old.contains("IMG"));
        assert!(new.contains("photo"));
        assert!(new.contains("\u{1b}["));
    }
}
