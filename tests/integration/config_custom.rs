//! Integration tests for the config file and its interaction with flags.

use std::io::Write;

use predicates::prelude::*;

use crate::logsift;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn config_file_enables_line_numbers() {
    let file = config_file("line_numbers = true\ncolor = \"never\"\n");
    logsift()
        .arg("--config")
        .arg(file.path())
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("0  a\n1  b\n");
}

#[test]
fn cli_color_overrides_config_file() {
    let file = config_file("color = \"never\"\n");
    let output = logsift()
        .arg("--config")
        .arg(file.path())
        .arg("--color=always")
        .write_stdin(" d1| x")
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("\x1b["));
}

#[test]
fn xdg_config_home_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("logsift")).unwrap();
    std::fs::write(dir.path().join("logsift/config.toml"), "line_numbers = true\n").unwrap();
    logsift()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("--color=never")
        .write_stdin("only")
        .assert()
        .success()
        .stdout("0  only\n");
}

#[test]
fn invalid_config_exits_one() {
    let file = config_file("mode = \"staging\"\n");
    logsift()
        .arg("--config")
        .arg(file.path())
        .write_stdin("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file error"));
}

#[test]
fn missing_config_file_exits_one() {
    logsift()
        .arg("--config=/nonexistent/logsift.toml")
        .write_stdin("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read config file"));
}
