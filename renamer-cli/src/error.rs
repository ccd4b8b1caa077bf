use renamer_core::ImportError;
use thiserror::Error;

/// Failures that map to a specific process exit code
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0} file(s) could not be renamed")]
    RenameFailures(usize),
    #[error("{0}")]
    Invalid(String),
}

pub const EXIT_FAILURES: i32 = 1;
pub const EXIT_INVALID: i32 = 2;
pub const EXIT_INTERNAL: i32 = 3;
pub const EXIT_INTERRUPTED: i32 = 130;

pub fn exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(cli_error) = cause.downcast_ref::<CliError>() {
            return match cli_error {
                CliError::RenameFailures(_) => EXIT_FAILURES,
                CliError::Invalid(_) => EXIT_INVALID,
            };
        }
        if cause.is::<ImportError>() {
            return EXIT_INVALID;
        }
    }
    EXIT_INTERNAL
}
