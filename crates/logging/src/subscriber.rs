//! Subscriber installation for binaries and tests.
//!
//! Diagnostics go to stderr so stdout stays reserved for traversal results.
//! `RUST_LOG` takes precedence over the verbosity passed in.

use crate::verbosity::Verbosity;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the filter for `verbosity`, preferring `RUST_LOG` when set.
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Installs a global stderr subscriber at the given verbosity.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left untouched.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{Verbosity, init_tracing};
///
/// init_tracing(Verbosity::from_count(2));
/// logging::trace_walk!("now visible");
/// ```
pub fn init_tracing(verbosity: Verbosity) -> bool {
    init_tracing_with_filter(env_filter(verbosity))
}

/// Installs a global stderr subscriber using a caller-supplied filter layer.
pub fn init_tracing_with_filter<F>(filter: F) -> bool
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_falls_back_to_verbosity_directive() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = env_filter(Verbosity::Debug);
        assert_eq!(filter.to_string().to_ascii_lowercase(), "fsvisit=debug");
    }

    #[test]
    fn second_initialisation_is_rejected() {
        let _ = init_tracing(Verbosity::Quiet);
        assert!(!init_tracing(Verbosity::Trace));
    }
}
