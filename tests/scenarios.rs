//! End-to-end scenarios driven against the built `tinysh` binary over
//! stdin/stdout, using `-c` for single-line scenarios and piped stdin for
//! the handful that need more than one line (history, cd-then-pwd).

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn tinysh() -> Command {
    Command::cargo_bin("tinysh").unwrap()
}

#[test]
fn single_and_double_quote_concatenation() {
    tinysh()
        .args(["-c", r#"echo 'hello'"world"' shell'"#])
        .assert()
        .success()
        .stdout("helloworld shell\n");
}

#[test]
fn backslash_in_double_quotes_escapes_only_the_special_set() {
    tinysh()
        .args(["-c", r#"echo "a\"b\\c\$d\`e""#])
        .assert()
        .success()
        .stdout("a\"b\\c$d`e\n");
}

#[test]
fn type_reports_builtin_before_scanning_path() {
    tinysh()
        .args(["-c", "type echo"])
        .assert()
        .success()
        .stdout("echo is a shell builtin\n");
}

#[test]
fn type_falls_back_to_path_for_externals() {
    tinysh()
        .args(["-c", "type ls"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ls is "));
}

#[test]
fn type_reports_not_found_for_unknown_commands() {
    tinysh()
        .args(["-c", "type definitely-not-a-real-command-xyz"])
        .assert()
        .stdout("definitely-not-a-real-command-xyz: not found\n");
}

#[test]
fn stdout_redirection_append_accumulates_across_invocations() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    tinysh()
        .args(["-c", &format!("echo first >> {}", path.display())])
        .assert()
        .success();
    tinysh()
        .args(["-c", &format!("echo second >> {}", path.display())])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}

#[test]
fn pipeline_with_a_builtin_head_feeds_an_external_tail() {
    tinysh()
        .args(["-c", "echo one two three | wc -w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn cd_into_a_relative_directory_then_pwd_reports_it() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();

    let mut cmd = tinysh();
    cmd.current_dir(dir.path())
        .write_stdin("cd nested\npwd\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("nested"));
}

#[test]
fn unterminated_quote_is_reported_and_session_continues() {
    let mut cmd = tinysh();
    cmd.write_stdin("echo 'oops\necho still here\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("still here"))
        .stderr(predicate::str::contains("unterminated quote"));
}

#[test]
fn exit_builtin_sets_the_process_exit_code() {
    tinysh().args(["-c", "exit 7"]).assert().code(7);
}
