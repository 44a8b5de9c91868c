use crate::cancel::CancellationToken;
use crate::error::BoxError;
use crate::filter::{self, FilterFn};
use crate::provider::{DirectoryProvider, FsProvider};
use crate::visitor::Visitor;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Configures a [`Visitor`].
///
/// The cancellation token is mandatory. Without an explicit filter the
/// visitor matches nothing, so only the unfiltered notifications fire. Unless
/// a custom [`DirectoryProvider`] is installed, listings come from an
/// [`FsProvider`] configured through [`follow_symlinks`](Self::follow_symlinks)
/// and [`sorted`](Self::sorted).
///
/// # Examples
///
/// ```
/// use visitor::{CancellationToken, VisitorBuilder};
///
/// let visitor = VisitorBuilder::new(CancellationToken::new())
///     .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
///     .sorted(true)
///     .build();
/// assert!(!visitor.token().is_cancelled());
/// ```
pub struct VisitorBuilder {
    token: CancellationToken,
    filter: FilterFn,
    fs: FsProvider,
    provider: Option<Box<dyn DirectoryProvider>>,
}

impl VisitorBuilder {
    /// Creates a builder bound to the supplied cancellation token.
    #[must_use]
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            filter: filter::infallible(|_| false),
            fs: FsProvider::new(),
            provider: None,
        }
    }

    /// Sets the predicate deciding which paths trigger filtered notifications.
    #[must_use]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.filter = filter::infallible(filter);
        self
    }

    /// Sets a predicate that may fail. A failure aborts the traversal with
    /// [`VisitErrorKind::FilterFailure`](crate::VisitErrorKind::FilterFailure).
    #[must_use]
    pub fn try_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.filter = Arc::new(filter);
        self
    }

    /// Replaces the filesystem with a custom listing source.
    #[must_use]
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: DirectoryProvider + 'static,
    {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Configures whether symlinks to directories are descended into.
    ///
    /// Enabled by default. When disabled, such links are skipped entirely.
    ///
    /// Ignored when a custom provider is installed.
    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.fs = self.fs.follow_symlinks(follow);
        self
    }

    /// Configures whether directory listings are sorted by name.
    ///
    /// Ignored when a custom provider is installed.
    #[must_use]
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.fs = self.fs.sorted(sorted);
        self
    }

    /// Builds the [`Visitor`].
    #[must_use]
    pub fn build(self) -> Visitor {
        let provider: Box<dyn DirectoryProvider> = match self.provider {
            Some(provider) => provider,
            None => Box::new(self.fs),
        };
        Visitor::from_parts(self.token, self.filter, provider)
    }
}

impl fmt::Debug for VisitorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorBuilder")
            .field("token", &self.token)
            .field("fs", &self.fs)
            .field("custom_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_builder() {
        let builder = VisitorBuilder::new(CancellationToken::new());
        let debug = format!("{builder:?}");
        assert!(debug.contains("VisitorBuilder"));
        assert!(debug.contains("custom_provider: false"));
    }

    #[test]
    fn build_shares_token_with_caller() {
        let token = CancellationToken::new();
        let visitor = VisitorBuilder::new(token.clone()).build();
        assert!(visitor.token().same_as(&token));
    }

    #[test]
    fn builder_chain() {
        let builder = VisitorBuilder::new(CancellationToken::new())
            .filter(|_| true)
            .follow_symlinks(false)
            .sorted(false);
        let debug = format!("{builder:?}");
        assert!(debug.contains("follow_symlinks: false"));
        assert!(debug.contains("sorted: false"));
    }

    #[test]
    fn custom_provider_is_recorded() {
        struct Empty;
        impl DirectoryProvider for Empty {
            fn files(&self, _dir: &Path) -> std::io::Result<Vec<std::path::PathBuf>> {
                Ok(Vec::new())
            }
            fn subdirectories(&self, _dir: &Path) -> std::io::Result<Vec<std::path::PathBuf>> {
                Ok(Vec::new())
            }
        }

        let builder = VisitorBuilder::new(CancellationToken::new()).provider(Empty);
        assert!(format!("{builder:?}").contains("custom_provider: true"));
        let visitor = builder.build();
        assert!(visitor.enumerate_files_in("anywhere").expect("walk").is_empty());
    }
}
