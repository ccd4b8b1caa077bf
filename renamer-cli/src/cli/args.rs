use clap::{Args, Parser, Subcommand};
use renamer_core::{RenameRule, DEFAULT_ARCHIVE_NAME};
use std::path::PathBuf;

use super::types::{ModeArg, OutputFormat, PreviewArg};

/// Rule-based batch file renaming with preview
#[derive(Parser, Debug)]
#[command(name = "renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::BoolishValueParser::new())]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "RENAMER_YES")]
    pub yes: bool,
}

/// The rename rule, shared by every command that builds a batch
#[derive(Args, Debug, Clone)]
pub struct RuleArgs {
    /// Kind of transformation to apply
    #[arg(long, value_enum, default_value = "replace")]
    pub mode: ModeArg,

    /// Text or pattern to look for (replace, remove, regex)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub find: String,

    /// Replacement text, or the text to prepend/append
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub replace: String,

    /// Treat --find as a regular expression in replace and remove modes
    #[arg(long)]
    pub regex: bool,

    /// Keep the rule but leave every name unchanged
    #[arg(long)]
    pub inactive: bool,
}

impl RuleArgs {
    pub fn to_rule(&self) -> RenameRule {
        RenameRule::new(self.mode.into(), self.find.clone(), self.replace.clone())
            .with_regex(self.regex)
            .active(!self.inactive)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what the rule would do to the given files and directories
    Preview {
        /// Files or directories (defaults to the current directory)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rule: RuleArgs,

        /// Preview format
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Rename files in place
    Apply {
        /// Files or directories (defaults to the current directory)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rule: RuleArgs,

        /// Preview format shown before confirming
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Show the preview and the number of renames without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Append every rename attempt to this file
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Write a zip archive of the files under their new names
    Archive {
        /// Files or directories (defaults to the current directory)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rule: RuleArgs,

        /// Archive to write
        #[arg(long, short = 'o', default_value = DEFAULT_ARCHIVE_NAME)]
        out: PathBuf,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long)]
        quiet: bool,
    },

    /// Generate a bash script that performs the renames
    Script {
        /// Files or directories (defaults to the current directory)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rule: RuleArgs,

        /// Write the script to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output
        #[arg(long)]
        quiet: bool,
    },

    /// Turn a plain-language instruction into a rule and preview it
    Suggest {
        /// What the renaming should do, e.g. "remove the dates"
        instruction: String,

        /// Files or directories (defaults to the current directory)
        paths: Vec<PathBuf>,

        /// Preview format
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Edit the rule and the file list interactively
    Shell {
        /// Files or directories to start with
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rule: RuleArgs,

        /// Preview format shown after every change
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Append every rename attempt to this file
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,
    },

    /// Generate shell completion files
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Directory to write the completion file to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use renamer_core::RuleKind;

    #[test]
    fn test_rule_args_to_rule() {
        let cli = Cli::parse_from([
            "renamer", "preview", "--mode", "regex", "--find", r"\d+", "--replace", "-n",
        ]);
        let Commands::Preview { rule, .. } = cli.command else {
            panic!("expected preview command");
        };
        let rule = rule.to_rule();
        assert_eq!(rule.kind, RuleKind::Regex);
        assert_eq!(rule.find, r"\d+");
        assert_eq!(rule.replace, "-n");
        assert!(rule.is_active);
    }

    #[test]
    fn test_default_rule_args() {
        let cli = Cli::parse_from(["renamer", "preview"]);
        let Commands::Preview { rule, paths, .. } = cli.command else {
            panic!("expected preview command");
        };
        assert!(paths.is_empty());
        assert_eq!(rule.to_rule(), RenameRule::default());
    }

    #[test]
    fn test_inactive_and_regex_flags() {
        let cli = Cli::parse_from([
            "renamer", "apply", "--find", "a.b", "--regex", "--inactive", "dir",
        ]);
        let Commands::Apply { rule, paths, .. } = cli.command else {
            panic!("expected apply command");
        };
        let rule = rule.to_rule();
        assert!(rule.use_regex);
        assert!(!rule.is_active);
        assert_eq!(paths, vec![PathBuf::from("dir")]);
    }

    #[test]
    fn test_archive_default_out() {
        let cli = Cli::parse_from(["renamer", "archive"]);
        let Commands::Archive { out, .. } = cli.command else {
            panic!("expected archive command");
        };
        assert_eq!(out, PathBuf::from("renamed_files.zip"));
    }
}
