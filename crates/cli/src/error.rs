use std::io;
use thiserror::Error;
use visitor::{PatternError, VisitError, VisitErrorKind};

/// Exit status for command-line usage errors and unusable patterns.
pub const EXIT_USAGE: i32 = 1;
/// Exit status when the visitor rejects an argument.
pub const EXIT_INVALID_ARGUMENT: i32 = 2;
/// Exit status when a directory cannot be listed.
pub const EXIT_FILESYSTEM: i32 = 3;
/// Exit status when the filter predicate fails.
pub const EXIT_FILTER: i32 = 4;

/// Largest status the binary reports.
pub const MAX_EXIT_CODE: i32 = 255;

/// Failures surfaced by a command-line run.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--pattern` value could not be compiled.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// The traversal reported an error.
    #[error(transparent)]
    Visit(#[from] VisitError),
    /// Writing results failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit status associated with the failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Pattern(_) | Self::Output(_) => EXIT_USAGE,
            Self::Visit(error) => match error.kind() {
                VisitErrorKind::InvalidArgument { .. } => EXIT_INVALID_ARGUMENT,
                VisitErrorKind::FilesystemAccess { .. } => EXIT_FILESYSTEM,
                VisitErrorKind::FilterFailure { .. } => EXIT_FILTER,
            },
        }
    }
}
