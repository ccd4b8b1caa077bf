//! High-level operations that correspond to CLI commands
//!
//! These modules contain the logic behind each renamer command, separated
//! from CLI concerns like argument parsing and output formatting. They act on
//! a [`Batch`](crate::Batch) built by [`load_batch`].

pub mod apply;
pub mod archive;
pub mod load;
pub mod preview;
pub mod script;
pub mod suggest;

pub use apply::apply_operation;
pub use archive::archive_operation;
pub use load::{add_sources, exclude_output, load_batch};
pub use preview::preview_operation;
pub use script::script_operation;
pub use suggest::suggest_operation;
