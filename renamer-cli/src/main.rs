use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use renamer_core::{Config, DiskOptions, OutputFormatter, VersionResult};
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod apply;
mod archive;
mod cli;
mod error;
mod preview;
mod script;
mod shell;
mod suggest;

use cli::{resolve_preview, Cli, Commands, OutputFormat};

fn main() {
    Builder::from_env(Env::new().filter_or("RENAMER_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let interrupted = Arc::new(AtomicBool::new(false));

    // Handle SIGINT (Ctrl-C)
    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        eprintln!("\nReceived SIGINT. Stopping after the current file...");
        interrupted_clone.store(true, Ordering::SeqCst);
    })
    .expect("Error setting SIGINT handler");

    // Handle SIGTERM
    let interrupted_clone = Arc::clone(&interrupted);
    unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGTERM, move || {
            eprintln!("\nReceived SIGTERM. Stopping after the current file...");
            interrupted_clone.store(true, Ordering::SeqCst);
        })
        .expect("Error setting SIGTERM handler");
    }

    let cli = Cli::parse();

    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(error::EXIT_INVALID);
            });
    }

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("ignoring config: {e:#}");
        Config::default()
    });
    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };
    let configured_preview = config.defaults.preview_format.as_str();

    let result = match cli.command {
        Commands::Preview {
            paths,
            rule,
            preview,
            output,
            quiet,
        } => preview::handle_preview(
            &paths,
            rule.to_rule(),
            resolve_preview(preview, configured_preview, quiet),
            use_color,
            output,
            quiet,
            &interrupted,
        ),

        Commands::Apply {
            paths,
            rule,
            preview,
            dry_run,
            log_file,
            output,
            quiet,
        } => apply::handle_apply(
            &paths,
            rule.to_rule(),
            resolve_preview(preview, configured_preview, quiet),
            use_color,
            dry_run,
            log_file.or_else(|| config.defaults.log_file.clone()),
            cli.yes,
            output,
            quiet,
            &interrupted,
        ),

        Commands::Archive {
            paths,
            rule,
            out,
            output,
            quiet,
        } => archive::handle_archive(&paths, rule.to_rule(), &out, output, quiet, &interrupted),

        Commands::Script {
            paths,
            rule,
            out,
            output,
            quiet,
        } => script::handle_script(
            &paths,
            rule.to_rule(),
            out.as_deref(),
            output,
            quiet,
            &interrupted,
        ),

        Commands::Suggest {
            instruction,
            paths,
            preview,
            output,
            quiet,
        } => {
            let synth = config.synth.synthesizer();
            suggest::handle_suggest(
                &instruction,
                &paths,
                synth.as_ref(),
                resolve_preview(preview, configured_preview, quiet),
                use_color,
                output,
                quiet,
                &interrupted,
            )
        },

        Commands::Shell {
            paths,
            rule,
            preview,
            log_file,
        } => handle_shell(
            &paths,
            rule.to_rule(),
            shell::ShellOptions {
                preview: resolve_preview(preview, configured_preview, false),
                use_color,
                disk: DiskOptions {
                    log_file: log_file.or_else(|| config.defaults.log_file.clone()),
                },
            },
            &config,
            &interrupted,
        ),

        Commands::Completions { shell, out_dir } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, "renamer", &out_dir)
        },

        Commands::Version { output } => handle_version(output),
    };

    if interrupted.load(Ordering::SeqCst) {
        eprintln!("Operation interrupted.");
        process::exit(error::EXIT_INTERRUPTED);
    }

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(error::exit_code(&e));
        },
    }
}

fn handle_shell(
    paths: &[PathBuf],
    rule: renamer_core::RenameRule,
    options: shell::ShellOptions,
    config: &Config,
    interrupted: &AtomicBool,
) -> Result<()> {
    // An empty path list starts with an empty batch rather than the cwd
    let batch = if paths.is_empty() {
        renamer_core::Batch::new(rule)
    } else {
        renamer_core::load_batch(paths, rule, None, interrupted)?
    };
    let synth = config.synth.synthesizer();
    let mut session = shell::Session::new(batch, options, synth.as_ref());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout, interrupted)
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renamer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let formatted = match output {
        OutputFormat::Json => version_result.format_json(),
        OutputFormat::Summary => version_result.format_summary(),
    };

    println!("{}", formatted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;
    use tempfile::TempDir;

    #[test]
    fn test_generate_completions_bash() {
        use clap::CommandFactory;
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = <Cli as CommandFactory>::command();

        let result = generate_completions(Shell::Bash, &mut cmd, "renamer", temp_dir.path());

        assert!(result.is_ok());

        let completion_file = temp_dir.path().join("renamer.bash");
        assert!(completion_file.exists());

        let content = std::fs::read_to_string(completion_file).unwrap();
        assert!(content.contains("complete"));
        assert!(content.contains("renamer"));
    }

    #[test]
    fn test_generate_completions_zsh() {
        use clap::CommandFactory;
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = <Cli as CommandFactory>::command();

        let result = generate_completions(Shell::Zsh, &mut cmd, "renamer", temp_dir.path());

        assert!(result.is_ok());

        let completion_file = temp_dir.path().join("_renamer");
        assert!(completion_file.exists());

        let content = std::fs::read_to_string(completion_file).unwrap();
        assert!(content.contains("#compdef"));
    }

    #[test]
    fn test_generate_completions_creates_directory() {
        use clap::CommandFactory;
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("dir");
        let mut cmd = <Cli as CommandFactory>::command();

        assert!(!nested_path.exists());

        let result = generate_completions(Shell::Fish, &mut cmd, "renamer", &nested_path);

        assert!(result.is_ok());
        assert!(nested_path.join("renamer.fish").exists());
    }
}
