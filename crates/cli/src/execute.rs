use crate::error::CliError;
use crate::options::ParsedArgs;
use logging::trace_cli;
use std::io::Write;
use std::iter;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use visitor::{CancellationToken, EventKind, GlobFilter, Outcome, Visitor};

/// Notifications captured by listeners and replayed to stderr between steps.
#[derive(Clone, Default)]
struct EventLog {
    pending: Arc<Mutex<Vec<(EventKind, PathBuf)>>>,
}

impl EventLog {
    fn attach(visitor: &Visitor) -> Self {
        let log = Self::default();
        for kind in EventKind::ALL {
            let pending = Arc::clone(&log.pending);
            visitor.on(kind, move |path| {
                pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((kind, path.to_path_buf()));
            });
        }
        log
    }

    fn drain_into<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let events = mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
        for (kind, path) in events {
            writeln!(out, "{kind}: {}", path.display())?;
        }
        Ok(())
    }
}

/// Tracks which produced files were accepted by the filter.
///
/// A file's filtered notification always fires after its found notification
/// and before the file is produced, so remembering the most recent match is
/// enough to classify the next produced file.
#[derive(Clone, Default)]
struct MatchTracker {
    last: Arc<Mutex<Option<PathBuf>>>,
}

impl MatchTracker {
    fn attach(visitor: &Visitor) -> Self {
        let tracker = Self::default();
        let last = Arc::clone(&tracker.last);
        visitor.on(EventKind::FilteredFileFound, move |path| {
            *last.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_path_buf());
        });
        tracker
    }

    fn accepted(&self, path: &Path) -> bool {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some_and(|matched| matched == path)
    }
}

/// Cancels the walk when the file after the `limit`-th one is found.
fn install_limit(visitor: &Visitor, limit: usize) {
    let token = visitor.token().clone();
    let seen = AtomicUsize::new(0);
    visitor.on(EventKind::FileFound, move |path| {
        if seen.fetch_add(1, Ordering::Relaxed) >= limit && !token.is_cancelled() {
            trace_cli!("limit of {limit} files reached at {}", path.display());
            token.cancel();
        }
    });
}

/// Drains the walk, keeping the paths selected by `keep`.
///
/// Nothing is kept when the walk fails, so a failed run prints no paths.
fn buffer_output<I, F>(items: I, mut keep: F) -> Result<Vec<PathBuf>, CliError>
where
    I: IntoIterator<Item = Result<PathBuf, CliError>>,
    F: FnMut(&Path) -> bool,
{
    let mut kept = Vec::new();
    for item in items {
        let path = item?;
        if keep(&path) {
            kept.push(path);
        }
    }
    Ok(kept)
}

pub(crate) fn execute<Out, Err>(
    parsed: &ParsedArgs,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError>
where
    Out: Write,
    Err: Write,
{
    let filter = GlobFilter::new(&parsed.patterns)?;
    let visitor = Visitor::builder(CancellationToken::new())
        .filter(move |path| filter.is_match(path))
        .follow_symlinks(!parsed.no_follow_symlinks)
        .sorted(!parsed.unsorted)
        .build();

    let events = parsed.events.then(|| EventLog::attach(&visitor));
    let matches = MatchTracker::attach(&visitor);
    if let Some(limit) = parsed.limit {
        install_limit(&visitor, limit);
    }

    let root = parsed.root.clone().unwrap_or_else(|| PathBuf::from("."));
    trace_cli!("walking {}", root.display());

    let mut traversal = visitor.walk(&root)?;
    let mut matched = 0usize;
    let steps = iter::from_fn(|| {
        let item = traversal.next();
        if let Some(log) = &events {
            if let Err(error) = log.drain_into(stderr) {
                return Some(Err(CliError::from(error)));
            }
        }
        item.map(|result| result.map_err(CliError::from))
    });
    let output = buffer_output(steps, |path| {
        let accepted = matches.accepted(path);
        matched += usize::from(accepted);
        !parsed.count && (!parsed.matches_only || accepted)
    })?;

    for path in &output {
        writeln!(stdout, "{}", path.display())?;
    }

    if parsed.count {
        write!(
            stdout,
            "{} files, {} directories, {} matched",
            traversal.files_produced(),
            traversal.directories_found(),
            matched,
        )?;
        if traversal.outcome() == Outcome::Cancelled {
            write!(stdout, " (cancelled)")?;
        }
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_error() -> CliError {
        let visitor = Visitor::new(CancellationToken::new(), |_| false);
        visitor.walk("").expect_err("empty root").into()
    }

    #[test]
    fn failed_walk_keeps_no_paths() {
        let items = vec![
            Ok(PathBuf::from("root/a.txt")),
            Err(walk_error()),
            Ok(PathBuf::from("root/b.txt")),
        ];
        let mut seen = Vec::new();
        let result = buffer_output(items, |path| {
            seen.push(path.to_path_buf());
            true
        });
        assert!(matches!(result, Err(CliError::Visit(_))));
        assert_eq!(seen, vec![PathBuf::from("root/a.txt")]);
    }

    #[test]
    fn successful_walk_keeps_selected_paths_in_order() {
        let items = ["root/a.rs", "root/b.txt", "root/sub/c.rs"]
            .into_iter()
            .map(|name| Ok(PathBuf::from(name)));
        let kept = buffer_output(items, |path| {
            path.extension().is_some_and(|ext| ext == "rs")
        })
        .expect("no failure");
        assert_eq!(
            kept,
            vec![PathBuf::from("root/a.rs"), PathBuf::from("root/sub/c.rs")]
        );
    }
}
