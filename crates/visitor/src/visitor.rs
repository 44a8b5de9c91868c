use crate::builder::VisitorBuilder;
use crate::cancel::CancellationToken;
use crate::error::VisitError;
use crate::events::{EventKind, ListenerId, ListenerRegistry};
use crate::filter::{self, FilterFn};
use crate::provider::DirectoryProvider;
use crate::traversal::Traversal;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Walks directory trees, reporting progress through listeners.
///
/// A visitor owns a filter predicate, a shared [`CancellationToken`] and a
/// registry of listeners. Construction installs a [`EventKind::Finished`]
/// listener that cancels the token, so a visitor supports a single complete
/// traversal: once a walk finishes, the token stays triggered and any later
/// walk returns nothing. Create a new visitor with a fresh token to walk again.
pub struct Visitor {
    pub(crate) token: CancellationToken,
    pub(crate) filter: FilterFn,
    pub(crate) provider: Box<dyn DirectoryProvider>,
    pub(crate) listeners: ListenerRegistry,
}

impl Visitor {
    /// Creates a visitor reading from the filesystem with the given filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use visitor::{CancellationToken, EventKind, Visitor};
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// std::fs::write(temp.path().join("a.txt"), b"a")?;
    /// std::fs::create_dir(temp.path().join("sub"))?;
    /// std::fs::write(temp.path().join("sub").join("b.md"), b"b")?;
    ///
    /// let matches = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&matches);
    /// let visitor = Visitor::new(CancellationToken::new(), |path| {
    ///     path.extension().is_some_and(|ext| ext == "md")
    /// });
    /// visitor.on(EventKind::FilteredFileFound, move |_| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// let files = visitor.enumerate_files_in(temp.path())?;
    /// assert_eq!(files, vec![temp.path().join("a.txt"), temp.path().join("sub").join("b.md")]);
    /// assert_eq!(matches.load(Ordering::SeqCst), 1);
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    #[must_use]
    pub fn new<F>(token: CancellationToken, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        VisitorBuilder::new(token).filter(filter).build()
    }

    /// Starts configuring a visitor.
    #[must_use]
    pub fn builder(token: CancellationToken) -> VisitorBuilder {
        VisitorBuilder::new(token)
    }

    pub(crate) fn from_parts(
        token: CancellationToken,
        filter: FilterFn,
        provider: Box<dyn DirectoryProvider>,
    ) -> Self {
        let listeners = ListenerRegistry::default();
        let on_finish = token.clone();
        listeners.register(
            EventKind::Finished,
            Arc::new(move |_root: &Path| on_finish.cancel()),
        );
        Self {
            token,
            filter,
            provider,
            listeners,
        }
    }

    /// Returns the cancellation token shared with the caller.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Registers a listener for `kind`. Listeners run synchronously, in
    /// registration order, with the path that triggered the notification
    /// (the root for [`EventKind::Started`] and [`EventKind::Finished`]).
    pub fn on<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&Path) + Send + Sync + 'static,
    {
        self.listeners.register(kind, Arc::new(listener))
    }

    /// Registers a [`EventKind::Started`] listener that may supply the names
    /// to visit.
    ///
    /// Returning `Some(paths)` replaces the filesystem walk: the paths are
    /// reported and produced as the root's files and nothing is descended
    /// into. When several listeners return a listing, the last one wins.
    pub fn on_started<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Path) -> Option<Vec<PathBuf>> + Send + Sync + 'static,
    {
        self.listeners.register_start(Arc::new(listener))
    }

    /// Unregisters a listener. Returns `false` if it was already removed.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of listeners registered for `kind`, including the built-in
    /// finish listener.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.count(kind)
    }

    /// Lists every file below the current working directory.
    pub fn enumerate_files(&self) -> Result<Vec<PathBuf>, VisitError> {
        let cwd = env::current_dir()
            .map_err(|error| VisitError::filesystem_access(PathBuf::from("."), error))?;
        self.enumerate_files_in(cwd)
    }

    /// Lists every file below `root`, files of a directory before its
    /// subdirectories.
    ///
    /// The result is truncated, not failed, when the token is cancelled. Any
    /// listing or filter failure discards the partial result.
    pub fn enumerate_files_in<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>, VisitError> {
        let files = self.walk(root)?.collect::<Result<Vec<_>, _>>()?;
        logging::trace_walk!("collected {} files", files.len());
        Ok(files)
    }

    /// Returns the lazy traversal behind [`enumerate_files_in`](Self::enumerate_files_in).
    ///
    /// Nothing is listed and no notification fires until the first call to
    /// [`Iterator::next`].
    pub fn walk<P: AsRef<Path>>(&self, root: P) -> Result<Traversal<'_>, VisitError> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(VisitError::invalid_argument("root directory must not be empty"));
        }
        Ok(Traversal::new(self, root.to_path_buf()))
    }

    pub(crate) fn matches(&self, path: &Path) -> Result<bool, VisitError> {
        (self.filter)(path).map_err(|source| VisitError::filter_failure(path.to_path_buf(), source))
    }
}

impl fmt::Debug for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("token", &self.token)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
