//! Integration tests for color control: `NO_COLOR`, `FORCE_COLOR`, `--color`, `TERM`.

use crate::logsift;

const INPUT: &str = " d20021| hello";

#[test]
fn color_never_disables_ansi() {
    let output = logsift()
        .arg("--color=never")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("\x1b["),
        "Should not contain ANSI escapes with --color=never"
    );
}

#[test]
fn color_always_enables_ansi() {
    let output = logsift()
        .arg("--color=always")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("\x1b["),
        "Should contain ANSI escapes with --color=always"
    );
}

#[test]
fn piped_output_auto_disables_colors() {
    let output = logsift().write_stdin(INPUT).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn force_color_enables_ansi_when_piped() {
    let output = logsift()
        .env("FORCE_COLOR", "1")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b["));
}

#[test]
fn force_color_zero_and_no_color_keep_plain() {
    for (key, value) in [("FORCE_COLOR", "0"), ("NO_COLOR", "1")] {
        let output = logsift()
            .env("FORCE_COLOR", "1")
            .env(key, value)
            .write_stdin(INPUT)
            .output()
            .unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains("\x1b["), "{key}={value}");
    }
}

#[test]
fn color_always_overrides_no_color() {
    let output = logsift()
        .env("NO_COLOR", "1")
        .arg("--color=always")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b["));
}

#[test]
fn lines_without_identity_stay_plain() {
    let output = logsift()
        .arg("--color=always")
        .write_stdin("no identity here")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "no identity here\n");
}
