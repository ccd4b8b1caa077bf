use anyhow::Result;
use renamer_core::{exclude_output, load_batch, script_operation, OutputFormatter, RenameRule};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use crate::OutputFormat;

pub fn handle_script(
    paths: &[PathBuf],
    rule: RenameRule,
    out: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
    interrupted: &AtomicBool,
) -> Result<()> {
    let mut batch = load_batch(paths, rule, None, interrupted)?;
    if let Some(out) = out {
        exclude_output(&mut batch, out);
    }
    let result = script_operation(&batch, out)?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if result.script.is_none() {
                if !quiet {
                    eprint!("{}", result.format_summary());
                }
            } else if result.path.is_none() || !quiet {
                // An inline script is the requested output, so --quiet keeps it
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
