use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Source of directory listings consumed by a traversal.
///
/// Each call lists the entries directly under `dir` and returns their full
/// paths (`dir` joined with the entry name). The traversal preserves whatever
/// order the provider returns.
pub trait DirectoryProvider: Send + Sync {
    /// Lists the non-directory entries directly under `dir`.
    fn files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Lists the subdirectories directly under `dir`.
    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`DirectoryProvider`] backed by [`std::fs::read_dir`].
///
/// By default entries are sorted lexicographically by name so traversal order
/// is stable across platforms, and symbolic links are classified by their
/// target: a link to a directory is a subdirectory and is descended into.
/// Links whose target cannot be read are listed as files.
#[derive(Clone, Copy, Debug)]
pub struct FsProvider {
    follow_symlinks: bool,
    sorted: bool,
}

impl Default for FsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FsProvider {
    /// Creates a provider that sorts entries and follows symlinks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            follow_symlinks: true,
            sorted: true,
        }
    }

    /// Controls whether symlinks to directories are descended into.
    ///
    /// When disabled, such links are left out of both listings; they are
    /// never reported as files. Cycles are not detected when enabled.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Controls whether entries are sorted by name or kept in `read_dir` order.
    #[must_use]
    pub const fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    fn list(&self, dir: &Path, want_dirs: bool) -> io::Result<Vec<PathBuf>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let is_dir = if file_type.is_symlink() {
                let target_is_dir = fs::metadata(entry.path()).is_ok_and(|target| target.is_dir());
                if target_is_dir && !self.follow_symlinks {
                    logging::trace_walk!("skipping directory link {:?}", entry.path());
                    continue;
                }
                target_is_dir
            } else {
                file_type.is_dir()
            };
            if is_dir == want_dirs {
                names.push(entry.file_name());
            }
        }
        if self.sorted {
            names.sort();
        }
        logging::trace_walk!(
            "listed {} {} in {:?}",
            names.len(),
            if want_dirs { "subdirectories" } else { "files" },
            dir
        );
        Ok(names.into_iter().map(|name| dir.join(name)).collect())
    }
}

impl DirectoryProvider for FsProvider {
    fn files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.list(dir, false)
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.list(dir, true)
    }
}
