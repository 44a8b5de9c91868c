#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `visitor` walks a directory tree depth-first and reports every file and
//! directory it encounters to registered listeners, separately flagging the
//! entries accepted by a caller-supplied filter. The walk produces the same
//! files as direct filesystem enumeration, and a shared cancellation token can
//! stop it between any two steps.
//!
//! # Design
//!
//! - [`Visitor`] owns the filter, the [`CancellationToken`] and a listener
//!   registry keyed by [`EventKind`]. [`VisitorBuilder`] configures fallible
//!   filters, symlink handling, ordering, and custom listing sources.
//! - [`Traversal`] implements [`Iterator`] over an explicit stack of directory
//!   states rather than recursion. Each state yields the directory's files
//!   before its subdirectories are listed and entered.
//! - [`DirectoryProvider`] abstracts "list files" and "list subdirectories".
//!   [`FsProvider`] reads the real filesystem and sorts names so results do
//!   not depend on the platform's `read_dir` order.
//! - [`GlobFilter`] turns glob patterns into a ready-made filter predicate.
//!
//! # Invariants
//!
//! - Files of a directory are produced before any of its subdirectories is
//!   entered; subdirectories are entered in listing order.
//! - The filter runs exactly once per discovered file and subdirectory, after
//!   the plain found notification and before the filtered one.
//! - Cancellation is checked immediately before each file is produced. Once
//!   observed, the whole traversal stops and the partial result is returned
//!   as a success.
//! - A visitor cancels its own token when a traversal completes, so each
//!   visitor performs at most one full traversal. Later walks return nothing.
//!
//! # Errors
//!
//! [`VisitError`] reports an empty root, a failed directory listing, or a
//! failed filter. There is no retry and no partial salvage: the eager
//! [`Visitor::enumerate_files_in`] returns the error alone, while a lazy
//! [`Traversal`] yields the error after the files it already produced.
//!
//! # Examples
//!
//! Collect the files of a small tree and count the Markdown files seen along
//! the way:
//!
//! ```
//! use std::fs;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use visitor::{CancellationToken, EventKind, GlobFilter, Visitor};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::write(root.join("README.md"), b"readme")?;
//! fs::create_dir(root.join("docs"))?;
//! fs::write(root.join("docs").join("guide.md"), b"guide")?;
//! fs::write(root.join("main.rs"), b"fn main() {}")?;
//!
//! let markdown = GlobFilter::new(["*.md"])?;
//! let token = CancellationToken::new();
//! let visitor = Visitor::new(token.clone(), move |path| markdown.is_match(path));
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&hits);
//! visitor.on(EventKind::FilteredFileFound, move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! let files = visitor.enumerate_files_in(root)?;
//! assert_eq!(
//!     files,
//!     vec![
//!         root.join("README.md"),
//!         root.join("main.rs"),
//!         root.join("docs").join("guide.md"),
//!     ]
//! );
//! assert_eq!(hits.load(Ordering::SeqCst), 2);
//!
//! // The completed walk spent the token.
//! assert!(token.is_cancelled());
//! assert!(visitor.enumerate_files_in(root)?.is_empty());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod cancel;
mod error;
mod events;
mod filter;
mod provider;
mod traversal;
mod visitor;


pub use crate::builder::VisitorBuilder;
pub use crate::cancel::CancellationToken;
pub use crate::error::{BoxError, VisitError, VisitErrorKind};
pub use crate::events::{EventKind, Listener, ListenerId, StartListener};
pub use crate::filter::{GlobFilter, PatternError};
pub use crate::provider::{DirectoryProvider, FsProvider};
pub use crate::traversal::{Outcome, Traversal};
pub use crate::visitor::Visitor;
