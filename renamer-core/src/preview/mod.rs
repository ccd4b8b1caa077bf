mod diff;
mod json;
mod summary;
mod table;

pub use diff::render_diff;
pub use json::render_json;
pub use summary::render_summary;
pub use table::render_table;

use crate::batch::Batch;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Diff,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "diff" => Ok(Self::Diff),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the batch in the specified format
pub fn render_batch(batch: &Batch, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(batch, use_color),
        Preview::Diff => render_diff(batch, use_color),
        Preview::Summary => render_summary(batch),
        Preview::Json => render_json(batch),
        Preview::None => String::new(),
    }
}

pub fn write_preview(batch: &Batch, format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_batch(batch, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}
