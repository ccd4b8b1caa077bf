use clap::ValueEnum;
use renamer_core::{Preview, RuleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Replace,
    Remove,
    /// Add text before the whole name
    Prepend,
    /// Add text before the extension
    Append,
    Regex,
}

impl From<ModeArg> for RuleKind {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Replace => Self::Replace,
            ModeArg::Remove => Self::Remove,
            ModeArg::Prepend => Self::Prepend,
            ModeArg::Append => Self::Append,
            ModeArg::Regex => Self::Regex,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Diff,
    Summary,
    Json,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Diff => Self::Diff,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for renamer_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Pick the preview format from the flag, then the config, then the table
pub fn resolve_preview(arg: Option<PreviewArg>, configured: &str, quiet: bool) -> Preview {
    if quiet {
        return Preview::None;
    }
    arg.map_or_else(
        || configured.parse::<Preview>().unwrap_or(Preview::Table),
        Into::into,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_preview() {
        assert_eq!(resolve_preview(Some(PreviewArg::Diff), "table", false), Preview::Diff);
        assert_eq!(resolve_preview(None, "summary", false), Preview::Summary);
        assert_eq!(resolve_preview(None, "bogus", false), Preview::Table);
        assert_eq!(resolve_preview(Some(PreviewArg::Table), "table", true), Preview::None);
    }
}
