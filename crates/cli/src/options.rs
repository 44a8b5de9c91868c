use crate::command::clap_command;
use std::ffi::OsString;
use std::path::PathBuf;

/// Options extracted from the command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedArgs {
    /// `--help` was requested.
    pub show_help: bool,
    /// `--version` was requested.
    pub show_version: bool,
    /// Glob patterns selecting filtered paths, in command-line order.
    pub patterns: Vec<String>,
    /// Print only files accepted by the patterns.
    pub matches_only: bool,
    /// Stop after this many files have been produced.
    pub limit: Option<usize>,
    /// Echo every notification to stderr.
    pub events: bool,
    /// Print a summary instead of paths.
    pub count: bool,
    /// Skip symlinked directories instead of descending into them.
    pub no_follow_symlinks: bool,
    /// Keep the raw listing order.
    pub unsorted: bool,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// Directory to walk; `None` means the current directory.
    pub root: Option<PathBuf>,
}

/// Parses command-line arguments, including the program name in position zero.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(crate::PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let patterns = matches
        .remove_many::<String>("pattern")
        .map(Iterator::collect)
        .unwrap_or_default();

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        patterns,
        matches_only: matches.get_flag("matches-only"),
        limit: matches.remove_one::<usize>("limit"),
        events: matches.get_flag("events"),
        count: matches.get_flag("count"),
        no_follow_symlinks: matches.get_flag("no-follow-symlinks"),
        unsorted: matches.get_flag("unsorted"),
        verbosity: matches.get_count("verbose"),
        root: matches.remove_one::<OsString>("root").map(PathBuf::from),
    })
}
