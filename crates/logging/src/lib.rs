#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the diagnostics plumbing shared by the fsvisit workspace:
//! target-scoped tracing macros used by the traversal engine, the mapping from
//! `-v` counts to tracing levels, and subscriber setup for the binary.
//!
//! # Design
//!
//! - [`trace_walk!`], [`trace_filter!`], [`trace_event!`], [`trace_cancel!`]
//!   and [`trace_cli!`] forward to the `tracing` macros with one target per
//!   subsystem (see [`targets`]). Library crates only emit events; whether
//!   anything is printed is decided by the subscriber the binary installs.
//! - [`Verbosity`] converts a flag count into a [`tracing`] level filter.
//! - [`init_tracing`] installs a stderr `fmt` subscriber honouring `RUST_LOG`.
//!
//! # Examples
//!
//! ```
//! use logging::Verbosity;
//!
//! let verbosity = Verbosity::from_count(2);
//! assert_eq!(verbosity.directive(), "fsvisit=debug");
//! logging::trace_walk!("visible at {}", verbosity);
//! ```

mod subscriber;
mod tracing_macros;
mod verbosity;

pub use subscriber::{env_filter, init_tracing, init_tracing_with_filter};
pub use verbosity::Verbosity;

/// Tracing targets emitted by the workspace.
pub mod targets {
    /// Directory listing and descent.
    pub const WALK: &str = "fsvisit::walk";
    /// Filter predicate evaluation.
    pub const FILTER: &str = "fsvisit::filter";
    /// Listener dispatch.
    pub const EVENT: &str = "fsvisit::event";
    /// Cancellation requests and observations.
    pub const CANCEL: &str = "fsvisit::cancel";
    /// Command-line front end.
    pub const CLI: &str = "fsvisit::cli";

    /// Every target, for building filters.
    pub const ALL: [&str; 5] = [WALK, FILTER, EVENT, CANCEL, CLI];
}
