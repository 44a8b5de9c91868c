use clap::builder::OsStringValueParser;
use clap::{Arg, ArgAction, Command, value_parser};

/// Program name used in usage and version output.
pub const PROGRAM_NAME: &str = "fsvisit";

pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .about("Walk a directory tree depth-first, files before subdirectories.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .short('p')
                .value_name("GLOB")
                .help("Report paths matching GLOB as filtered (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("matches-only")
                .long("matches-only")
                .short('m')
                .help("Print only files accepted by --pattern.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .short('n')
                .value_name("COUNT")
                .help("Cancel the walk after COUNT files.")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("events")
                .long("events")
                .short('e')
                .help("Print every notification to stderr.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('c')
                .help("Print a summary line instead of file paths.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-follow-symlinks")
                .long("no-follow-symlinks")
                .short('P')
                .help("Skip symlinked directories instead of descending into them.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("unsorted")
                .long("unsorted")
                .help("Keep the filesystem's listing order instead of sorting by name.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output (repeatable).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Directory to walk. Defaults to the current directory.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
}
