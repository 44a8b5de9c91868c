//! Convenience macros for fsvisit-specific tracing.
//!
//! These macros wrap the standard tracing macros with the targets listed in
//! [`crate::targets`], so subscribers can filter traversal chatter per
//! subsystem (`RUST_LOG=fsvisit::walk=trace`).

/// Emit a directory traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory {:?}", dir);
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "fsvisit::walk", $($arg)*);
    };
}

/// Emit a filter evaluation trace.
///
/// # Example
/// ```ignore
/// trace_filter!("{:?} -> {}", path, matched);
/// ```
#[macro_export]
macro_rules! trace_filter {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "fsvisit::filter", $($arg)*);
    };
}

/// Emit a notification dispatch trace.
///
/// # Example
/// ```ignore
/// trace_event!("{} {:?}", kind, path);
/// ```
#[macro_export]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "fsvisit::event", $($arg)*);
    };
}

/// Emit a cancellation trace.
///
/// # Example
/// ```ignore
/// trace_cancel!("cancelled after {} files", count);
/// ```
#[macro_export]
macro_rules! trace_cancel {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "fsvisit::cancel", $($arg)*);
    };
}

/// Emit a command-line front end trace.
///
/// # Example
/// ```ignore
/// trace_cli!("walking {:?}", root);
/// ```
#[macro_export]
macro_rules! trace_cli {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "fsvisit::cli", $($arg)*);
    };
}
