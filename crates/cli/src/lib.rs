#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `cli` implements the `fsvisit` command-line front end on top of the
//! [`visitor`] crate. It parses arguments with `clap`, builds a visitor whose
//! filter is a set of glob patterns, attaches listeners for the requested
//! reporting, and writes the produced files to the supplied writer once the
//! walk has succeeded.
//!
//! # Design
//!
//! [`run`] accepts the argument iterator and the output handles explicitly so
//! integration tests can drive it with in-memory buffers. It returns the
//! process status rather than exiting; [`run_with`] and [`exit_code_from`]
//! convert that status into a [`std::process::ExitCode`] for the binary.
//!
//! `--limit` is a file-found listener that cancels the visitor's token, and
//! `--events` is a listener per notification kind whose records are replayed
//! to stderr between traversal steps.
//!
//! # Exit status
//!
//! | status | meaning |
//! |--------|---------|
//! | 0 | the walk finished or was cancelled by `--limit` |
//! | 1 | usage error, bad pattern, or unwritable output |
//! | 2 | the visitor rejected an argument such as an empty root |
//! | 3 | a directory could not be listed |
//! | 4 | the filter failed |
//!
//! Paths are written only once the walk has ended without error. A non-zero
//! status from a failed walk is never accompanied by a partial listing on
//! stdout; `--events` output on stderr is still emitted as the walk runs.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["fsvisit", "--version"], &mut stdout, &mut stderr);
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("fsvisit "));
//! ```

mod command;
mod error;
mod execute;
mod options;

#[cfg(test)]
mod tests;

use logging::{Verbosity, init_tracing};
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

pub use command::PROGRAM_NAME;
pub use error::{
    CliError, EXIT_FILESYSTEM, EXIT_FILTER, EXIT_INVALID_ARGUMENT, EXIT_USAGE, MAX_EXIT_CODE,
};
pub use options::{ParsedArgs, parse_args};

/// Version reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the command line and returns the process status.
///
/// The first argument is the program name. Results go to `stdout`;
/// diagnostics, `--events` output and errors go to `stderr`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let _ = write!(stderr, "{error}");
            return EXIT_USAGE;
        }
    };

    if parsed.show_help {
        let help = command::clap_command().render_help();
        return match write!(stdout, "{help}") {
            Ok(()) => 0,
            Err(_) => EXIT_USAGE,
        };
    }

    if parsed.show_version {
        return match writeln!(stdout, "{PROGRAM_NAME} {VERSION}") {
            Ok(()) => 0,
            Err(_) => EXIT_USAGE,
        };
    }

    init_tracing(Verbosity::from_count(parsed.verbosity));

    match execute::execute(&parsed, stdout, stderr) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}

/// Runs the command line and converts the status for `main`.
pub fn run_with<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    exit_code_from(run(arguments, stdout, stderr))
}

/// Clamps a status into the range accepted by [`ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
