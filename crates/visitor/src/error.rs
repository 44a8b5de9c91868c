use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error type returned by fallible filter predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned when a traversal cannot run to completion.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct VisitError {
    #[source]
    kind: VisitErrorKind,
}

impl VisitError {
    pub(crate) fn new(kind: VisitErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn invalid_argument(message: &'static str) -> Self {
        Self::new(VisitErrorKind::InvalidArgument { message })
    }

    pub(crate) fn filesystem_access(path: PathBuf, source: io::Error) -> Self {
        Self::new(VisitErrorKind::FilesystemAccess { path, source })
    }

    pub(crate) fn filter_failure(path: PathBuf, source: BoxError) -> Self {
        Self::new(VisitErrorKind::FilterFailure { path, source })
    }

    /// Returns the specific failure that terminated traversal.
    #[must_use]
    pub fn kind(&self) -> &VisitErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error, if any.
    ///
    /// Argument validation failures happen before any path is visited and
    /// therefore report `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use visitor::{CancellationToken, Visitor};
    ///
    /// let visitor = Visitor::new(CancellationToken::new(), |_| true);
    /// let error = visitor
    ///     .enumerate_files_in("./definitely_missing_root")
    ///     .expect_err("missing root yields error");
    /// assert!(error.path().unwrap().ends_with("definitely_missing_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.kind.path()
    }
}

/// Classification of traversal failures.
#[derive(Debug, Error)]
pub enum VisitErrorKind {
    /// The caller supplied an unusable argument, such as an empty root.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: &'static str,
    },
    /// Listing the files or subdirectories of a directory failed.
    #[error("failed to list directory '{}': {source}", path.display())]
    FilesystemAccess {
        /// Directory whose contents could not be listed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// The filter predicate reported an error for a path.
    #[error("filter failed for '{}': {source}", path.display())]
    FilterFailure {
        /// Path being evaluated when the filter failed.
        path: PathBuf,
        /// Error returned by the filter.
        source: BoxError,
    },
}

impl VisitErrorKind {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            VisitErrorKind::InvalidArgument { .. } => None,
            VisitErrorKind::FilesystemAccess { path, .. }
            | VisitErrorKind::FilterFailure { path, .. } => Some(path),
        }
    }

    /// Reports whether this is an argument validation failure.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, VisitErrorKind::InvalidArgument { .. })
    }
}
