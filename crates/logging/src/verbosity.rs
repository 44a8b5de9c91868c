//! Mapping from `-v` counts to tracing levels.

use std::fmt;
use tracing::level_filters::LevelFilter;

/// Verbosity selected on the command line.
///
/// Each `-v` raises the level by one step: warnings only by default, then
/// info, debug, and trace. Counts beyond three saturate at trace.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Quiet,
    /// Informational messages, including cancellation.
    Info,
    /// Per-directory traversal messages.
    Debug,
    /// Per-entry filter and notification messages.
    Trace,
}

impl Verbosity {
    /// Converts a repeated-flag count into a verbosity.
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the most verbose level that should be emitted.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Default directive string applied when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(self) -> String {
        let level = self.level_filter().to_string().to_ascii_lowercase();
        format!("fsvisit={level}")
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quiet => "quiet",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_map_to_increasing_levels() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Quiet);
        assert_eq!(Verbosity::from_count(1), Verbosity::Info);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(3), Verbosity::Trace);
        assert_eq!(Verbosity::from_count(200), Verbosity::Trace);
    }

    #[test]
    fn level_filters_match_verbosity() {
        assert_eq!(Verbosity::Quiet.level_filter(), LevelFilter::WARN);
        assert_eq!(Verbosity::Info.level_filter(), LevelFilter::INFO);
        assert_eq!(Verbosity::Debug.level_filter(), LevelFilter::DEBUG);
        assert_eq!(Verbosity::Trace.level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn directive_scopes_to_fsvisit_targets() {
        assert_eq!(Verbosity::Debug.directive(), "fsvisit=debug");
        assert_eq!(Verbosity::Quiet.directive(), "fsvisit=warn");
        assert_eq!(Verbosity::from_count(9).directive(), "fsvisit=trace");
    }

    #[test]
    fn display_names() {
        assert_eq!(Verbosity::Trace.to_string(), "trace");
        assert_eq!(Verbosity::default().to_string(), "quiet");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&Verbosity::Debug).expect("serialize");
        assert_eq!(json, "\"Debug\"");
        let back: Verbosity = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Verbosity::Debug);
    }
}
