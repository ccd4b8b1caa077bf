use anyhow::Result;
use renamer_core::{archive_operation, exclude_output, load_batch, OutputFormatter, RenameRule};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use crate::error::CliError;
use crate::OutputFormat;

pub fn handle_archive(
    paths: &[PathBuf],
    rule: RenameRule,
    out: &Path,
    output: OutputFormat,
    quiet: bool,
    interrupted: &AtomicBool,
) -> Result<()> {
    let mut batch = load_batch(paths, rule, None, interrupted)?;
    exclude_output(&mut batch, out);
    if batch.is_empty() {
        return Err(CliError::Invalid("No files to archive".to_string()).into());
    }

    let result = archive_operation(&batch, out)?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
