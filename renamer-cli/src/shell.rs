use anyhow::{anyhow, bail, Result};
use renamer_core::{
    add_sources, apply_operation, archive_operation, render_batch, script_operation,
    suggest_operation, Batch, DiskOptions, OutputFormatter, Preview, RecordId, RenameRule,
    RuleKind, RuleSynthesizer, DEFAULT_ARCHIVE_NAME,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

const HELP: &str = "\
Commands:
  rule                 show the current rule
  mode <kind>          replace, remove, prepend, append or regex
  find <text>          set the text or pattern to look for
  replace <text>       set the replacement, prefix or suffix
  regex on|off         treat find as a pattern in replace and remove
  active on|off        enable or disable the rule
  add <path>...        import files or directories
  open <dir>           replace the batch with the files under <dir>
  rm <id>...           drop records from the batch
  clear                drop every record
  list                 show the preview again
  apply                rename pending records on disk
  script [file]        print or write a shell rename script
  archive [file]       write a zip of the renamed files
  suggest <request>    ask for a rule in plain words
  help                 show this help
  quit                 leave the shell
";

#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub preview: Preview,
    pub use_color: Option<bool>,
    pub disk: DiskOptions,
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive editing session over one batch
pub struct Session<'a> {
    batch: Batch,
    options: ShellOptions,
    synth: &'a dyn RuleSynthesizer,
}

impl<'a> Session<'a> {
    pub fn new(batch: Batch, options: ShellOptions, synth: &'a dyn RuleSynthesizer) -> Self {
        Self {
            batch,
            options,
            synth,
        }
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Read commands until `quit`, end of input or an interrupt
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        interrupted: &AtomicBool,
    ) -> Result<()> {
        self.show_preview(out)?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            if interrupted.load(Ordering::SeqCst) {
                break;
            }
            let line = line?;
            match self.execute(&line, out, interrupted) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {},
                Err(e) => writeln!(out, "Error: {:#}", e)?,
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    fn execute<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        interrupted: &AtomicBool,
    ) -> Result<Flow> {
        let line = line.trim_start();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest),
            None => (line.trim_end(), ""),
        };

        match command {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" | "?" => {
                write!(out, "{}", HELP)?;
                return Ok(Flow::Continue);
            },
            "rule" => {
                writeln!(out, "Rule: {}", self.batch.rule().describe())?;
                if let Some(error) = self.batch.rule_error() {
                    writeln!(out, "Rule error: {}", error)?;
                }
                return Ok(Flow::Continue);
            },
            "list" => {},
            "mode" => {
                let kind: RuleKind = rest.trim().parse().map_err(|e: String| anyhow!(e))?;
                self.batch.update_rule(|rule| rule.kind = kind);
            },
            "find" => {
                let find = rest.to_string();
                self.batch.update_rule(|rule| rule.find = find);
            },
            "replace" => {
                let replace = rest.to_string();
                self.batch.update_rule(|rule| rule.replace = replace);
            },
            "regex" => {
                let on = parse_switch(rest)?;
                self.batch.update_rule(|rule| rule.use_regex = on);
            },
            "active" => {
                let on = parse_switch(rest)?;
                self.batch.update_rule(|rule| rule.is_active = on);
            },
            "add" => {
                let paths = split_paths(rest)?;
                let added = add_sources(&mut self.batch, &paths, interrupted)?;
                writeln!(out, "Added {} file(s)", added.len())?;
            },
            "open" => {
                let dir = PathBuf::from(rest.trim());
                if !dir.is_dir() {
                    bail!("Not a directory: {}", dir.display());
                }
                self.batch.clear();
                let added = add_sources(&mut self.batch, &[dir], interrupted)?;
                writeln!(out, "Opened {} file(s)", added.len())?;
            },
            "rm" => {
                let ids = rest
                    .split_whitespace()
                    .map(|id| id.parse::<RecordId>().map_err(|e| anyhow!(e)))
                    .collect::<Result<Vec<_>>>()?;
                if ids.is_empty() {
                    bail!("Usage: rm <id>...");
                }
                for id in ids {
                    if self.batch.remove(id).is_none() {
                        writeln!(out, "No record {}", id)?;
                    }
                }
            },
            "clear" => self.batch.clear(),
            "apply" => {
                let result =
                    apply_operation(&mut self.batch, &self.options.disk, false, interrupted)?;
                write!(out, "{}", result.format_summary())?;
            },
            "script" => {
                let target = optional_path(rest);
                let result = script_operation(&self.batch, target.as_deref())?;
                write!(out, "{}", result.format_summary())?;
                return Ok(Flow::Continue);
            },
            "archive" => {
                let target =
                    optional_path(rest).unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME));
                let result = archive_operation(&self.batch, &target)?;
                write!(out, "{}", result.format_summary())?;
                return Ok(Flow::Continue);
            },
            "suggest" => {
                let instruction = rest.trim();
                if instruction.is_empty() {
                    bail!("Usage: suggest <request>");
                }
                let result = suggest_operation(&mut self.batch, self.synth, instruction);
                write!(out, "{}", result.format_summary())?;
                if result.rule.is_none() {
                    return Ok(Flow::Continue);
                }
            },
            other => bail!("Unknown command '{}'. Type 'help' for a list.", other),
        }

        self.show_preview(out)?;
        Ok(Flow::Continue)
    }

    fn show_preview<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.options.preview == Preview::None {
            return Ok(());
        }
        let rendered = render_batch(&self.batch, self.options.preview, self.options.use_color);
        write!(out, "{}", rendered)?;
        if !rendered.ends_with('\n') {
            writeln!(out)?;
        }
        Ok(())
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("Expected on or off, got '{}'", other),
    }
}

fn split_paths(rest: &str) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("Usage: add <path>...");
    }
    Ok(paths)
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| Path::new(rest).to_path_buf())
}
