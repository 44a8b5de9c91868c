use crate::error::BoxError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Fallible predicate deciding whether a visited path is a match.
pub(crate) type FilterFn = Arc<dyn Fn(&Path) -> Result<bool, BoxError> + Send + Sync>;

/// Wraps an infallible predicate so it can be stored as a [`FilterFn`].
pub(crate) fn infallible<F>(filter: F) -> FilterFn
where
    F: Fn(&Path) -> bool + Send + Sync + 'static,
{
    Arc::new(move |path: &Path| Ok(filter(path)))
}

/// Error produced when a glob pattern cannot be compiled.
#[derive(Debug, thiserror::Error)]
#[error("failed to compile filter pattern '{pattern}': {source}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: globset::Error,
}

impl PatternError {
    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Glob-based filter predicate.
///
/// Patterns without a `/` are matched against the final path component, so
/// `*.rs` matches `src/lib.rs`. Patterns containing `/` are matched against the
/// whole path as visited. A path matches when any pattern matches.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use visitor::GlobFilter;
///
/// let filter = GlobFilter::new(["*.txt", "**/cache/*"])?;
/// assert!(filter.is_match(Path::new("notes/todo.txt")));
/// assert!(filter.is_match(Path::new("build/cache/blob")));
/// assert!(!filter.is_match(Path::new("src/main.rs")));
/// # Ok::<(), visitor::PatternError>(())
/// ```
#[derive(Clone)]
pub struct GlobFilter {
    names: GlobSet,
    paths: GlobSet,
    patterns: Vec<String>,
}

impl GlobFilter {
    /// Compiles the given patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = GlobSetBuilder::new();
        let mut paths = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| PatternError {
                pattern: pattern.to_owned(),
                source,
            })?;
            if pattern.contains('/') {
                paths.add(glob);
            } else {
                names.add(glob);
            }
            kept.push(pattern.to_owned());
        }
        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|source| PatternError {
                pattern: kept.join(","),
                source,
            })
        };
        let names = build(names)?;
        let paths = build(paths)?;
        Ok(Self {
            names,
            paths,
            patterns: kept,
        })
    }

    /// Returns the patterns this filter was built from.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Reports whether `path` matches any pattern.
    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        let by_name = path
            .file_name()
            .is_some_and(|name| self.names.is_match(Path::new(name)));
        let matched = by_name || self.paths.is_match(path);
        logging::trace_filter!("{:?} -> {}", path, matched);
        matched
    }
}

impl fmt::Debug for GlobFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobFilter")
            .field("patterns", &self.patterns)
            .finish()
    }
}
