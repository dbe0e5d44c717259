//! Integration tests for basic stdin/file -> stdout operation.

use predicates::prelude::*;

use crate::{NETWORK_ENTRY, logsift};

#[test]
fn empty_stdin_exits_zero() {
    logsift().write_stdin("").assert().success().stdout("");
}

#[test]
fn single_entry_outputs_formatted() {
    logsift()
        .arg("--color=never")
        .write_stdin(NETWORK_ENTRY)
        .assert()
        .success()
        .stdout("2024-01-01T00:00:00Z I  NETWORK  [conn1] listening on port\n");
}

#[test]
fn plain_text_passes_through_unchanged() {
    let input = "line one\n\nline three\n";
    logsift()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("line one\n\nline three\n");
}

#[test]
fn reads_from_file_argument() {
    logsift()
        .arg("--color=never")
        .arg("tests/fixtures/resmoke_job.log")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I  CONTROL  [initandlisten] Build Info{\"buildInfo\":{\"version\":\"7.0.0\"}}",
        ))
        .stdout(predicate::str::contains(
            "d20001| 2024-01-01T00:00:02.000+00:00 I  NETWORK  [listener] Waiting for connections on 20001",
        ));
}

#[test]
fn dash_reads_stdin() {
    logsift()
        .arg("--color=never")
        .arg("-")
        .write_stdin("from stdin")
        .assert()
        .success()
        .stdout("from stdin\n");
}

#[test]
fn missing_input_file_exits_two() {
    logsift()
        .arg("/nonexistent/job0.log")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("logsift: I/O error"));
}

#[test]
fn invalid_utf8_is_replaced() {
    logsift()
        .arg("--color=never")
        .write_stdin(b"bad \xff byte\n".as_slice())
        .assert()
        .success()
        .stdout("bad \u{fffd} byte\n");
}

#[test]
fn line_numbers_flag() {
    let input: String = (0..10).map(|i| format!("l{i}\n")).collect();
    let output = logsift()
        .arg("--color=never")
        .arg("--line-numbers")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "0  l0");
    assert_eq!(lines[9], "9  l9");
}
