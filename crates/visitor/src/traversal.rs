use crate::error::VisitError;
use crate::events::EventKind;
use crate::visitor::Visitor;
use std::fmt;
use std::path::{Path, PathBuf};
use std::vec;

/// Lazy, depth-first sequence of the files below a root.
///
/// Each directory yields its files in listing order before any of its
/// subdirectories is entered. Subdirectories are listed only once the
/// directory's files are exhausted. The cancellation token is checked before
/// every step and immediately before each file is produced; once it is
/// observed the whole traversal ends. The first listing or filter failure is
/// yielded as an error and ends the traversal.
pub struct Traversal<'v> {
    visitor: &'v Visitor,
    root: PathBuf,
    stack: Vec<DirectoryState>,
    phase: Phase,
    outcome: Outcome,
    files: usize,
    directories: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Pending,
    Running,
    Done,
}

/// Why a traversal stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The traversal has not finished yet.
    InProgress,
    /// Every directory was visited and the finish notification fired.
    Completed,
    /// The cancellation token was observed.
    Cancelled,
    /// A listing or filter failure was reported.
    Failed,
}

#[derive(Debug)]
struct DirectoryState {
    dir: PathBuf,
    files: vec::IntoIter<PathBuf>,
    subdirectories: Option<vec::IntoIter<PathBuf>>,
    descend: bool,
}

impl DirectoryState {
    fn new(dir: PathBuf, files: Vec<PathBuf>, descend: bool) -> Self {
        Self {
            dir,
            files: files.into_iter(),
            subdirectories: None,
            descend,
        }
    }
}

impl<'v> Traversal<'v> {
    pub(crate) fn new(visitor: &'v Visitor, root: PathBuf) -> Self {
        Self {
            visitor,
            root,
            stack: Vec::new(),
            phase: Phase::Pending,
            outcome: Outcome::InProgress,
            files: 0,
            directories: 0,
        }
    }

    /// Returns the directory the traversal started from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of files produced so far.
    #[must_use]
    pub const fn files_produced(&self) -> usize {
        self.files
    }

    /// Number of subdirectories discovered so far.
    #[must_use]
    pub const fn directories_found(&self) -> usize {
        self.directories
    }

    /// Reports how the traversal ended, or [`Outcome::InProgress`].
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn start(&mut self) -> Result<(), VisitError> {
        self.phase = Phase::Running;
        logging::trace_walk!("starting traversal at {:?}", self.root);
        let state = match self.visitor.listeners.emit_started(&self.root) {
            Some(names) => {
                logging::trace_walk!("started listener supplied {} names", names.len());
                DirectoryState::new(self.root.clone(), names, false)
            }
            None => {
                let files = self.list_files(&self.root)?;
                DirectoryState::new(self.root.clone(), files, true)
            }
        };
        self.stack.push(state);
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, VisitError> {
        logging::trace_walk!("entering directory {:?}", dir);
        self.visitor
            .provider
            .files(dir)
            .map_err(|error| VisitError::filesystem_access(dir.to_path_buf(), error))
    }

    fn fail(&mut self, error: VisitError) -> Option<Result<PathBuf, VisitError>> {
        logging::trace_walk!("traversal of {:?} failed: {}", self.root, error);
        self.stop(Outcome::Failed);
        Some(Err(error))
    }

    fn stop(&mut self, outcome: Outcome) {
        self.phase = Phase::Done;
        self.outcome = outcome;
        self.stack.clear();
    }

    fn cancelled(&mut self) -> bool {
        if self.visitor.token.is_cancelled() {
            if self.phase == Phase::Running {
                logging::trace_cancel!(
                    "traversal of {:?} cancelled after {} files",
                    self.root,
                    self.files
                );
            }
            self.stop(Outcome::Cancelled);
            return true;
        }
        false
    }

    fn finish(&mut self) {
        logging::trace_walk!(
            "finished {:?}: {} files, {} directories",
            self.root,
            self.files,
            self.directories
        );
        self.stop(Outcome::Completed);
        self.visitor.listeners.emit(EventKind::Finished, &self.root);
    }
}

impl Iterator for Traversal<'_> {
    type Item = Result<PathBuf, VisitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phase == Phase::Done || self.cancelled() {
            return None;
        }

        if self.phase == Phase::Pending {
            if let Err(error) = self.start() {
                return self.fail(error);
            }
        }

        let visitor = self.visitor;
        loop {
            if self.cancelled() {
                return None;
            }

            let Some(state) = self.stack.last_mut() else {
                self.finish();
                return None;
            };

            if let Some(file) = state.files.next() {
                visitor.listeners.emit(EventKind::FileFound, &file);
                match visitor.matches(&file) {
                    Ok(true) => visitor.listeners.emit(EventKind::FilteredFileFound, &file),
                    Ok(false) => {}
                    Err(error) => return self.fail(error),
                }
                if self.cancelled() {
                    return None;
                }
                self.files += 1;
                return Some(Ok(file));
            }

            if !state.descend {
                self.stack.pop();
                continue;
            }

            if state.subdirectories.is_none() {
                match visitor.provider.subdirectories(&state.dir) {
                    Ok(dirs) => state.subdirectories = Some(dirs.into_iter()),
                    Err(error) => {
                        let error = VisitError::filesystem_access(state.dir.clone(), error);
                        return self.fail(error);
                    }
                }
            }

            let Some(subdirectory) = state.subdirectories.as_mut().and_then(Iterator::next) else {
                self.stack.pop();
                continue;
            };

            self.directories += 1;
            visitor
                .listeners
                .emit(EventKind::DirectoryFound, &subdirectory);
            match visitor.matches(&subdirectory) {
                Ok(true) => visitor
                    .listeners
                    .emit(EventKind::FilteredDirectoryFound, &subdirectory),
                Ok(false) => {}
                Err(error) => return self.fail(error),
            }
            if self.cancelled() {
                return None;
            }

            match self.list_files(&subdirectory) {
                Ok(files) => self
                    .stack
                    .push(DirectoryState::new(subdirectory, files, true)),
                Err(error) => return self.fail(error),
            }
        }
    }
}

impl fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("root", &self.root)
            .field("depth", &self.stack.len())
            .field("phase", &self.phase)
            .field("outcome", &self.outcome)
            .field("files", &self.files)
            .field("directories", &self.directories)
            .finish()
    }
}
