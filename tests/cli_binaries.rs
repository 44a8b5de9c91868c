use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn fsvisit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fsvisit"))
}

fn tree() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("notes.md"), b"notes").expect("write notes");
    fs::create_dir(temp.path().join("src")).expect("create src");
    fs::write(temp.path().join("src").join("main.rs"), b"fn main() {}").expect("write main");
    temp
}

#[test]
fn help_lists_usage_on_stdout() {
    fsvisit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: fsvisit"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn walks_the_given_root() {
    let temp = tree();
    let expected = format!(
        "{}\n{}\n",
        temp.path().join("notes.md").display(),
        temp.path().join("src").join("main.rs").display()
    );
    fsvisit()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn defaults_to_the_current_directory() {
    let temp = tree();
    fsvisit()
        .current_dir(temp.path())
        .args(["--matches-only", "--pattern", "*.rs"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("main.rs\n"))
        .stdout(predicate::str::contains("notes.md").not());
}

#[test]
fn missing_root_exits_with_filesystem_status() {
    let temp = tempfile::tempdir().expect("tempdir");
    fsvisit()
        .arg(temp.path().join("absent"))
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to list directory"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    fsvisit()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--definitely-not-a-flag"));
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let temp = tree();
    fsvisit()
        .env_remove("RUST_LOG")
        .args(["-vvv", "--count"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout("2 files, 1 directories, 0 matched\n")
        .stderr(predicate::str::contains("fsvisit::walk"));
}
