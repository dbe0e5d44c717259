//! Integration tests for `--json` output.

use serde_json::{Value, json};

use crate::logsift;

fn run_json(args: &[&str], input: &str) -> Value {
    let output = logsift()
        .arg("--json")
        .args(args)
        .write_stdin(input.to_string())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn fixture_result_shape() {
    let input = std::fs::read_to_string("tests/fixtures/resmoke_job.log").unwrap();
    let result = run_json(&[], &input);

    assert_eq!(result["isDone"], json!(true));
    let lines = result["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 10);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line["lineNumber"], json!(i));
    }

    assert_eq!(
        lines[6]["gitRef"],
        json!(
            "https://github.com/mongodb/mongo/blob/0123456789abcdef/src/mongo/db/repl/oplog.cpp:1234"
        )
    );
    assert_eq!(lines[1]["port"], json!(":primary]"));
    assert_eq!(lines[7]["port"], json!(":secondary1]"));
    assert!(lines[0].get("port").is_none());
}

#[test]
fn color_map_in_first_seen_order() {
    let input = std::fs::read_to_string("tests/fixtures/resmoke_job.log").unwrap();
    let result = run_json(&[], &input);
    assert_eq!(
        result["colorMap"],
        json!({
            ":primary]": "#5aae61",
            "20000": "#9970ab",
            "20001": "#bf812d",
            ":secondary1]": "#2166ac",
        })
    );
    // `Value` sorts keys, so check insertion order in the raw output.
    let raw = String::from_utf8(
        logsift()
            .arg("--json")
            .write_stdin(input)
            .output()
            .unwrap()
            .stdout,
    )
    .unwrap();
    let color_map = &raw[raw.find(r#""colorMap""#).unwrap()..];
    let primary = color_map.find(r#"":primary]""#).unwrap();
    let port = color_map.find(r#""20000""#).unwrap();
    let secondary = color_map.find(r#"":secondary1]""#).unwrap();
    assert!(primary < port && port < secondary, "{color_map}");
}

#[test]
fn diagnostics_reported() {
    let input = std::fs::read_to_string("tests/fixtures/resmoke_job.log").unwrap();
    let result = run_json(&[], &input);
    assert_eq!(
        result["diagnostics"][0]["lineNumber"],
        json!(8),
        "{}",
        result["diagnostics"]
    );
    assert_eq!(result["diagnostics"][0]["kind"]["type"], json!("malformedEntry"));
}

#[test]
fn production_flag_keeps_events_empty() {
    let result = run_json(&["--production"], "x");
    assert_eq!(result["events"], json!([]));
    assert_eq!(result["isDone"], json!(true));
}
