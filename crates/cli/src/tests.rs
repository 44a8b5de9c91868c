use super::*;
use std::fs;
use std::path::Path;

fn fixture() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::write(root.join("b.txt"), b"b").expect("write b");
    fs::write(root.join("a.rs"), b"a").expect("write a");
    fs::create_dir(root.join("src")).expect("create src");
    fs::write(root.join("src").join("lib.rs"), b"lib").expect("write lib");
    fs::create_dir(root.join("docs")).expect("create docs");
    fs::write(root.join("docs").join("guide.md"), b"guide").expect("write guide");
    temp
}

fn run_capture<const N: usize>(args: [&str; N]) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(args, &mut stdout, &mut stderr);
    (
        status,
        String::from_utf8(stdout).expect("utf8 stdout"),
        String::from_utf8(stderr).expect("utf8 stderr"),
    )
}

fn lines(root: &Path, relative: &[&str]) -> String {
    relative
        .iter()
        .map(|name| format!("{}\n", root.join(name).display()))
        .collect()
}

#[test]
fn prints_files_before_subdirectories_in_name_order() {
    let temp = fixture();
    let root = temp.path().to_str().expect("utf8 root");
    let (status, stdout, stderr) = run_capture(["fsvisit", root]);
    assert_eq!(status, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        lines(temp.path(), &["a.rs", "b.txt", "docs/guide.md", "src/lib.rs"])
    );
}

#[test]
fn matches_only_prints_filtered_files() {
    let temp = fixture();
    let root = temp.path().to_str().expect("utf8 root");
    let (status, stdout, _) = run_capture(["fsvisit", "--matches-only", "-p", "*.rs", root]);
    assert_eq!(status, 0);
    assert_eq!(stdout, lines(temp.path(), &["a.rs", "src/lib.rs"]));
}

#[test]
fn limit_cancels_after_the_requested_number_of_files() {
    let temp = fixture();
    let root = temp.path().to_str().expect("utf8 root");
    let (status, stdout, _) = run_capture(["fsvisit", "--limit", "3", root]);
    assert_eq!(status, 0);
    assert_eq!(stdout, lines(temp.path(), &["a.rs", "b.txt", "docs/guide.md"]));
}

#[test]
fn count_reports_summary_and_cancellation() {
    let temp = fixture();
    let root = temp.path().to_str().expect("utf8 root");

    let (status, stdout, _) = run_capture(["fsvisit", "--count", "-p", "*.md", root]);
    assert_eq!(status, 0);
    assert_eq!(stdout, "4 files, 2 directories, 1 matched\n");

    let (status, stdout, _) = run_capture(["fsvisit", "--count", "--limit", "1", root]);
    assert_eq!(status, 0);
    assert_eq!(stdout, "1 files, 0 directories, 0 matched (cancelled)\n");
}

#[test]
fn events_are_written_to_stderr_in_notification_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("one.md"), b"1").expect("write");
    fs::create_dir(temp.path().join("sub")).expect("mkdir");
    let root = temp.path().to_str().expect("utf8 root");

    let (status, stdout, stderr) = run_capture(["fsvisit", "--events", "-p", "*.md", root]);
    assert_eq!(status, 0);
    assert_eq!(stdout, lines(temp.path(), &["one.md"]));

    let file = temp.path().join("one.md");
    let sub = temp.path().join("sub");
    let expected = format!(
        "started: {root}\n\
         file-found: {file}\n\
         filtered-file-found: {file}\n\
         directory-found: {sub}\n\
         finished: {root}\n",
        root = temp.path().display(),
        file = file.display(),
        sub = sub.display(),
    );
    assert_eq!(stderr, expected);
}

#[test]
fn invalid_pattern_is_a_usage_error() {
    let (status, stdout, stderr) = run_capture(["fsvisit", "-p", "a[b", "."]);
    assert_eq!(status, EXIT_USAGE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("a[b"), "stderr: {stderr}");
}

#[test]
fn empty_root_is_an_invalid_argument() {
    let (status, _, stderr) = run_capture(["fsvisit", ""]);
    assert_eq!(status, EXIT_INVALID_ARGUMENT);
    assert!(stderr.contains("must not be empty"), "stderr: {stderr}");
}

#[test]
fn missing_root_is_a_filesystem_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing");
    let missing = missing.to_str().expect("utf8 path");
    let (status, stdout, stderr) = run_capture(["fsvisit", missing]);
    assert_eq!(status, EXIT_FILESYSTEM);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("fsvisit: failed to list directory"), "stderr: {stderr}");
}

#[test]
fn unknown_option_is_a_usage_error() {
    let (status, stdout, stderr) = run_capture(["fsvisit", "--no-such-flag"]);
    assert_eq!(status, EXIT_USAGE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--no-such-flag"));
}

#[test]
fn help_and_version_go_to_stdout() {
    let (status, stdout, _) = run_capture(["fsvisit", "--help"]);
    assert_eq!(status, 0);
    assert!(stdout.contains("Usage: fsvisit"));

    let (status, stdout, _) = run_capture(["fsvisit", "-V"]);
    assert_eq!(status, 0);
    assert_eq!(stdout, format!("fsvisit {VERSION}\n"));
}

#[test]
fn exit_codes_are_clamped() {
    assert_eq!(exit_code_from(-4), ExitCode::from(0));
    assert_eq!(exit_code_from(3), ExitCode::from(3));
    assert_eq!(exit_code_from(1024), ExitCode::from(255));
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_walked_unless_disabled() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    let target = temp.path().join("target");
    fs::create_dir(&root).expect("create root");
    fs::create_dir(&target).expect("create target");
    fs::write(target.join("inner.txt"), b"inner").expect("write inner");
    symlink(&target, root.join("link")).expect("symlink");
    let root_arg = root.to_str().expect("utf8 root");

    let (status, stdout, _) = run_capture(["fsvisit", root_arg]);
    assert_eq!(status, 0);
    assert_eq!(stdout, lines(&root, &["link/inner.txt"]));

    let (status, stdout, _) = run_capture(["fsvisit", "--no-follow-symlinks", root_arg]);
    assert_eq!(status, 0);
    assert!(stdout.is_empty(), "stdout: {stdout}");
}
