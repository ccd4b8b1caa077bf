use anyhow::Result;
use renamer_core::{load_batch, preview_operation, OutputFormatter, Preview, RenameRule};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use crate::OutputFormat;

pub fn handle_preview(
    paths: &[PathBuf],
    rule: RenameRule,
    preview: Preview,
    use_color: Option<bool>,
    output: OutputFormat,
    quiet: bool,
    interrupted: &AtomicBool,
) -> Result<()> {
    let batch = load_batch(paths, rule, None, interrupted)?;

    let preview = if output == OutputFormat::Json {
        Preview::None
    } else {
        preview
    };
    let (result, rendered) = preview_operation(&batch, preview, use_color);

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if quiet {
                return Ok(());
            }
            if let Some(error) = &result.rule_error {
                eprintln!("Warning: rule has no effect: {}", error);
            }
            if rendered.is_empty() {
                print!("{}", result.format_summary());
            } else {
                print!("{}", rendered);
                if !rendered.ends_with('\n') {
                    println!();
                }
            }
        },
    }

    Ok(())
}
