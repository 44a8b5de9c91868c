//! Notification kinds and the multicast listener registry.
//!
//! Listeners are stored per [`EventKind`] in registration order. Dispatch
//! clones the matching listener handles out of the registry before invoking
//! them, so callbacks may register or remove listeners (or cancel the walk)
//! without deadlocking.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Notification emitted during a traversal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventKind {
    /// A traversal is about to start. Receives the root.
    Started,
    /// A file was listed in the directory being visited.
    FileFound,
    /// A subdirectory was listed in the directory being visited.
    DirectoryFound,
    /// A file was listed and the filter accepted it.
    FilteredFileFound,
    /// A subdirectory was listed and the filter accepted it.
    FilteredDirectoryFound,
    /// The traversal ran to completion without cancellation or error.
    /// Receives the root.
    Finished,
}

impl EventKind {
    /// All notification kinds in the order a traversal can first emit them.
    pub const ALL: [EventKind; 6] = [
        EventKind::Started,
        EventKind::FileFound,
        EventKind::FilteredFileFound,
        EventKind::DirectoryFound,
        EventKind::FilteredDirectoryFound,
        EventKind::Finished,
    ];

    /// Stable lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::FileFound => "file-found",
            EventKind::DirectoryFound => "directory-found",
            EventKind::FilteredFileFound => "filtered-file-found",
            EventKind::FilteredDirectoryFound => "filtered-directory-found",
            EventKind::Finished => "finished",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by listener registration, used to unregister.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerId(u64);

/// Callback invoked with the path that triggered a notification.
pub type Listener = Arc<dyn Fn(&Path) + Send + Sync>;

/// Callback for [`EventKind::Started`] that may supply an alternate listing
/// of names to visit instead of reading the root from the filesystem.
pub type StartListener = Arc<dyn Fn(&Path) -> Option<Vec<PathBuf>> + Send + Sync>;

enum Slot {
    Notify(EventKind, Listener),
    Start(StartListener),
}

impl Slot {
    fn kind(&self) -> EventKind {
        match self {
            Slot::Notify(kind, _) => *kind,
            Slot::Start(_) => EventKind::Started,
        }
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    slots: Vec<(ListenerId, Slot)>,
}

/// Registry of listeners keyed by notification kind.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    inner: Mutex<Inner>,
}

impl ListenerRegistry {
    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn insert(&self, slot: Slot) -> ListenerId {
        self.with_inner(|inner| {
            let id = ListenerId(inner.next_id);
            inner.next_id += 1;
            inner.slots.push((id, slot));
            id
        })
    }

    pub(crate) fn register(&self, kind: EventKind, listener: Listener) -> ListenerId {
        if kind == EventKind::Started {
            let start: StartListener = Arc::new(move |root: &Path| {
                listener(root);
                None
            });
            return self.insert(Slot::Start(start));
        }
        self.insert(Slot::Notify(kind, listener))
    }

    pub(crate) fn register_start(&self, listener: StartListener) -> ListenerId {
        self.insert(Slot::Start(listener))
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        self.with_inner(|inner| {
            let before = inner.slots.len();
            inner.slots.retain(|(slot_id, _)| *slot_id != id);
            inner.slots.len() != before
        })
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.with_inner(|inner| {
            inner
                .slots
                .iter()
                .filter(|(_, slot)| slot.kind() == kind)
                .count()
        })
    }

    /// Invokes every listener registered for `kind`, in registration order.
    pub(crate) fn emit(&self, kind: EventKind, path: &Path) {
        let listeners: Vec<Listener> = self.with_inner(|inner| {
            inner
                .slots
                .iter()
                .filter_map(|(_, slot)| match slot {
                    Slot::Notify(slot_kind, listener) if *slot_kind == kind => {
                        Some(Arc::clone(listener))
                    }
                    _ => None,
                })
                .collect()
        });
        logging::trace_event!("{} {:?} ({} listeners)", kind, path, listeners.len());
        for listener in listeners {
            listener(path);
        }
    }

    /// Fires [`EventKind::Started`]. The last listener that returns a listing
    /// wins.
    pub(crate) fn emit_started(&self, root: &Path) -> Option<Vec<PathBuf>> {
        let listeners: Vec<StartListener> = self.with_inner(|inner| {
            inner
                .slots
                .iter()
                .filter_map(|(_, slot)| match slot {
                    Slot::Start(listener) => Some(Arc::clone(listener)),
                    Slot::Notify(..) => None,
                })
                .collect()
        });
        logging::trace_event!(
            "{} {:?} ({} listeners)",
            EventKind::Started,
            root,
            listeners.len()
        );
        let mut names = None;
        for listener in listeners {
            if let Some(listing) = listener(root) {
                names = Some(listing);
            }
        }
        names
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.with_inner(|inner| inner.slots.len());
        f.debug_struct("ListenerRegistry")
            .field("listeners", &total)
            .finish()
    }
}
