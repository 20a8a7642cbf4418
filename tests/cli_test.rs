//! CLI end-to-end tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn verex() -> Command {
    Command::new(assert_cmd::cargo_bin!("verex"))
}

const OR_CHAIN: &str = r#"[
    {"op": "start_of_line"},
    {"op": "then", "value": "abc"},
    {"op": "or", "value": "def"}
]"#;

#[test]
fn test_help() {
    verex().arg("--help").assert().success();
}

#[test]
fn test_version() {
    verex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("verex"));
}

#[test]
fn test_no_command_prints_usage() {
    verex()
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage: verex <COMMAND>"));
}

#[test]
fn test_build() {
    verex()
        .args(["build", "--chain", OR_CHAIN])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pattern": "^(?:(?:abc)|(?:def))""#))
        .stdout(predicate::str::contains(r#""flags": "gm""#))
        .stdout(predicate::str::contains(r#""valid": true"#))
        .stdout(predicate::str::contains(r#""engine": "regex""#));
}

#[test]
fn test_build_invalid_pattern_reports_error() {
    verex()
        .args(["build", "--chain", r#"[{"op": "begin_capture"}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""valid": false"#))
        .stdout(predicate::str::contains(r#""open_captures": 1"#))
        .stdout(predicate::str::contains(r#""error""#));
}

#[test]
fn test_build_text_format() {
    verex()
        .args(["build", "-c", OR_CHAIN, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expression: /^(?:(?:abc)|(?:def))/gm"))
        .stdout(predicate::str::contains("Compiles with regex"));
}

#[test]
fn test_match() {
    verex()
        .args(["test", "--chain", OR_CHAIN, "defzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""matched": true"#))
        .stdout(predicate::str::contains(r#""text": "def""#));
}

#[test]
fn test_no_match() {
    verex()
        .args(["test", "--chain", OR_CHAIN, "xyzabc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""matched": false"#))
        .stdout(predicate::str::contains(r#""match_count": 0"#));
}

#[test]
fn test_capture_groups() {
    let chain = r#"[
        {"op": "find", "value": "foo"},
        {"op": "begin_capture"},
        {"op": "then", "value": "bar"},
        {"op": "end_capture"},
        {"op": "then", "value": "baz"}
    ]"#;

    verex()
        .args(["test", "-c", chain, "foobarbaz", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Match 1: \"foobarbaz\" [0..9]"))
        .stdout(predicate::str::contains("Group 1: \"bar\""));
}

#[test]
fn test_replace_global_and_first() {
    let all = r#"[{"op": "find", "value": "foo"}]"#;
    let first = r#"[{"op": "find", "value": "foo"}, {"op": "stop_at_first"}]"#;

    verex()
        .args(["replace", "-c", all, "foofoofoo", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result": "barbarbar""#))
        .stdout(predicate::str::contains(r#""global": true"#))
        .stdout(predicate::str::contains(r#""replacements_made": 3"#));

    verex()
        .args(["replace", "-c", first, "foofoofoo", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result": "barfoofoo""#))
        .stdout(predicate::str::contains(r#""global": false"#))
        .stdout(predicate::str::contains(r#""replacements_made": 1"#));
}

#[test]
fn test_replace_without_match_counts_zero() {
    let chain = r#"[{"op": "find", "value": "xyz"}]"#;

    verex()
        .args(["replace", "-c", chain, "foofoofoo", "bar", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result:   foofoofoo"))
        .stdout(predicate::str::contains("0 replacements made (every match)"));
}

#[test]
fn test_chain_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("chain.json");
    fs::write(&file_path, OR_CHAIN).unwrap();

    verex()
        .args(["test", "--file", file_path.to_str().unwrap(), "abczzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""matched": true"#));
}

#[test]
fn test_missing_chain_file() {
    verex()
        .args(["build", "--file", "/nonexistent/chain.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("COMMAND_ERROR"))
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_missing_chain() {
    verex()
        .args(["build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No chain given"));
}

#[test]
fn test_invalid_chain_json() {
    verex()
        .args(["build", "-c", r#"[{"op": "teleport"}]"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chain"));
}

#[test]
fn test_forced_regex_engine_rejects_lookahead() {
    let chain = r#"[{"op": "not", "value": "foo"}]"#;

    verex()
        .args(["test", "-c", chain, "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""engine": "fancy-regex""#));

    verex()
        .args(["test", "-c", chain, "bar", "--engine", "regex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("COMMAND_ERROR"));
}
