#![allow(unused)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod batch;
pub mod config;
pub mod drivers;
pub mod import;
pub mod operations;
pub mod output;
pub mod preview;
pub mod record;
pub mod rule;
pub mod synth;
pub mod transform;

pub use batch::{Batch, BatchStats};
pub use config::{Config, SynthConfig};
pub use drivers::{
    archive_entries, commit_to_disk, render_script, write_archive, write_archive_file,
    write_script_file, ArchiveEntry, ArchiveSummary, CommitReport, DiskOptions, DriverError,
    RecordOutcome, DEFAULT_ARCHIVE_NAME, SCRIPT_HEADER,
};
pub use import::{import_paths, scan_directory, DirectoryScan, ImportError, ImportedFile};
pub use operations::{
    add_sources, apply_operation, archive_operation, exclude_output, load_batch,
    preview_operation, script_operation, suggest_operation,
};
pub use output::{
    ArchiveResult, CommitResult, OutputFormat, OutputFormatter, PreviewResult, ScriptResult,
    SuggestResult, VersionResult,
};
pub use preview::{render_batch, should_use_color, write_preview, Preview};
pub use record::{FileRecord, FileSource, RecordId, RecordStatus, WritableHandle};
pub use rule::{RenameRule, RuleKind};
pub use synth::{
    build_prompt, parse_rule_response, CommandSynthesizer, RuleSynthesizer, Unavailable,
};
pub use transform::{escape_literal, transform, TransformError, Transformer};
