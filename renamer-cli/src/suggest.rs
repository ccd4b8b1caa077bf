use anyhow::Result;
use renamer_core::{
    load_batch, render_batch, suggest_operation, OutputFormatter, Preview, RenameRule,
    RuleSynthesizer,
};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn handle_suggest(
    instruction: &str,
    paths: &[PathBuf],
    synth: &dyn RuleSynthesizer,
    preview: Preview,
    use_color: Option<bool>,
    output: OutputFormat,
    quiet: bool,
    interrupted: &AtomicBool,
) -> Result<()> {
    let mut batch = load_batch(paths, RenameRule::default(), None, interrupted)?;
    let result = suggest_operation(&mut batch, synth, instruction);

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if quiet {
                return Ok(());
            }
            print!("{}", result.format_summary());
            if result.rule.is_some() && preview != Preview::None {
                let rendered = render_batch(&batch, preview, use_color);
                print!("{}", rendered);
                if !rendered.ends_with('\n') {
                    println!();
                }
            }
        },
    }

    Ok(())
}
