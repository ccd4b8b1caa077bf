use anyhow::Result;
use renamer_core::{
    apply_operation, load_batch, render_batch, DiskOptions, OutputFormatter, Preview,
    RenameRule,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use crate::error::CliError;
use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
#[allow(clippy::fn_params_excessive_bools)]
pub fn handle_apply(
    paths: &[PathBuf],
    rule: RenameRule,
    preview: Preview,
    use_color: Option<bool>,
    dry_run: bool,
    log_file: Option<PathBuf>,
    yes: bool,
    output: OutputFormat,
    quiet: bool,
    interrupted: &AtomicBool,
) -> Result<()> {
    let mut batch = load_batch(paths, rule, None, interrupted)?;
    let pending = batch.pending_changes().len();

    if pending > 0 && output == OutputFormat::Summary && !quiet && preview != Preview::None {
        let rendered = render_batch(&batch, preview, use_color);
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }
    }

    if pending > 0 && !dry_run && !yes && !confirm(&mut io::stdin().lock(), pending)? {
        if !quiet {
            println!("Operation cancelled.");
        }
        return Ok(());
    }

    let options = DiskOptions { log_file };
    let result = apply_operation(&mut batch, &options, dry_run, interrupted)?;

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

    if result.has_failures() {
        return Err(CliError::RenameFailures(result.failed).into());
    }

    Ok(())
}

/// Ask before renaming. Anything but an explicit yes declines.
pub fn confirm<R: BufRead>(reader: &mut R, pending: usize) -> Result<bool> {
    eprint!("Rename {} file(s)? [y/N]: ", pending);
    io::stderr().flush()?;

    let mut response = String::new();
    reader.read_line(&mut response)?;
    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}
