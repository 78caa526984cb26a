//! CLI integration tests
//!
//! These tests verify the commands end to end, including:
//! - init: Creates the config file, --force behavior
//! - check: Exit codes, output formats, context flags
//! - batch: File and stdin input, malformed records
//! - list: Output formats
//!
//! Exit codes are checked by calling the command functions directly; printed
//! output is checked by running the binary in a temporary directory.

mod common;

use assert_cmd::Command;
use common::fixture_path;
use fieldrules::cli;
use fieldrules::cli::check::CheckArgs;
use fieldrules::cli::common::{EXIT_ERROR, EXIT_INVALID, EXIT_PARSE_ERROR, EXIT_SUCCESS};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECT_CONFIG: &str = r#"
[fieldrules]
version = "1"
rule_tables = ["tables"]

[messages.EMAIL]
format = "{name} needs an @ and a domain"
minMax = "Use {data-min} to {data-max} characters"

[messages.LOYALTY_NUMBER]
format = "Loyalty numbers look like LY12345678"

[output]
color = "never"
"#;

const LOYALTY_TABLE: &str = r#"
[table]
version = "1"

[[category]]
name = "LOYALTY_NUMBER"

[[category.rule]]
key = "format"
pattern = '^LY[0-9]{8}$'
description = "Loyalty numbers start with LY"
"#;

/// Temporary project with a config file and one extra rule table
fn setup_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("fieldrules.toml"), PROJECT_CONFIG).unwrap();
    fs::create_dir(temp_dir.path().join("tables")).unwrap();
    fs::write(
        temp_dir.path().join("tables/loyalty.toml"),
        LOYALTY_TABLE,
    )
    .unwrap();
    temp_dir
}

fn config_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("fieldrules.toml")
}

fn check_args(category: &str, value: &str) -> CheckArgs {
    CheckArgs {
        category: category.to_string(),
        value: value.to_string(),
        mode: None,
        props: Vec::new(),
        data: Vec::new(),
        format: Some(cli::OutputFormat::Jsonl),
    }
}

fn fieldrules(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fieldrules").unwrap();
    cmd.current_dir(dir).env_remove("FIELDRULES_LOG");
    cmd
}

// ============================================================================
// INIT COMMAND TESTS
// ============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    fieldrules(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created fieldrules.toml."));

    let content = fs::read_to_string(temp_dir.path().join("fieldrules.toml")).unwrap();
    assert!(content.contains("[fieldrules]"));
    assert!(content.contains("version = \"1\""));
}

#[test]
fn test_init_keeps_existing_config_without_force() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(config_path(&temp_dir)).unwrap(),
        PROJECT_CONFIG
    );

    fieldrules(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
    assert_ne!(
        fs::read_to_string(config_path(&temp_dir)).unwrap(),
        PROJECT_CONFIG
    );
}

// ============================================================================
// CHECK COMMAND TESTS
// ============================================================================

#[test]
fn test_check_exit_codes() {
    let temp_dir = setup_project();
    let config = config_path(&temp_dir);

    assert_eq!(
        cli::check::run_check(&config, None, &check_args("EMAIL", "a@b.co")),
        EXIT_SUCCESS
    );
    assert_eq!(
        cli::check::run_check(&config, None, &check_args("PASSWORD", "abcdefgh")),
        EXIT_INVALID
    );
    assert_eq!(
        cli::check::run_check(&config, None, &check_args("NOT_A_CATEGORY", "x")),
        EXIT_ERROR
    );
    assert_eq!(
        cli::check::run_check(&config, None, &check_args("LOYALTY_NUMBER", "LY12345678")),
        EXIT_SUCCESS
    );
}

#[test]
fn test_check_config_errors() {
    let args = check_args("EMAIL", "a@b.co");

    assert_eq!(
        cli::check::run_check(&fixture_path("config/invalid_syntax.toml"), None, &args),
        EXIT_PARSE_ERROR
    );
    assert_eq!(
        cli::check::run_check(&fixture_path("config/invalid_version.toml"), None, &args),
        EXIT_ERROR
    );
    assert_eq!(
        cli::check::run_check(&fixture_path("config/unknown_message_rule.toml"), None, &args),
        EXIT_ERROR
    );
}

#[test]
fn test_check_human_output() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .args(["check", "EMAIL", "a@b.co"])
        .assert()
        .code(EXIT_SUCCESS)
        .stdout(predicate::str::contains("EMAIL \"a@b.co\" is valid"));

    fieldrules(temp_dir.path())
        .args(["check", "PASSWORD", "abcdefgh"])
        .assert()
        .code(EXIT_INVALID)
        .stdout(predicate::str::contains("failed 3 rule(s)"))
        .stdout(predicate::str::contains("capitalAlpha"));
}

#[test]
fn test_check_fail_fast_flag() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .args(["check", "PASSWORD", "abcdefgh", "--mode", "fail-fast"])
        .assert()
        .code(EXIT_INVALID)
        .stdout(predicate::str::contains("failed 1 rule(s)"));
}

#[test]
fn test_check_messages_use_context_flags() {
    let temp_dir = setup_project();

    let output = fieldrules(temp_dir.path())
        .args([
            "check", "EMAIL", "abc@", "--format", "jsonl", "--prop", "name=Email", "--data",
            "min=6", "--data", "max=256",
        ])
        .assert()
        .code(EXIT_INVALID)
        .get_output()
        .stdout
        .clone();

    let line: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(line["type"], "result");
    assert_eq!(line["category"], "EMAIL");
    assert_eq!(line["is_valid"], false);
    assert_eq!(
        line["failed_rule_keys"],
        serde_json::json!(["format", "minMax"])
    );
    assert_eq!(
        line["messages"],
        serde_json::json!(["Email needs an @ and a domain", "Use 6 to 256 characters"])
    );
}

#[test]
fn test_check_unknown_category_message() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .args(["check", "NOT_A_CATEGORY", "x"])
        .assert()
        .code(EXIT_ERROR)
        .stderr(predicate::str::contains("Unknown field category 'NOT_A_CATEGORY'"));
}

#[test]
fn test_check_without_config_uses_builtin_rules() {
    let temp_dir = TempDir::new().unwrap();

    fieldrules(temp_dir.path())
        .args(["check", "CC_CVV", "123"])
        .assert()
        .code(EXIT_SUCCESS)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_debug_logging_goes_to_stderr() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .env("FIELDRULES_LOG", "debug")
        .args(["check", "CC_CVV", "123", "--format", "jsonl"])
        .assert()
        .code(EXIT_SUCCESS)
        .stderr(predicate::str::contains("rule registry built"))
        .stdout(predicate::str::contains("rule registry built").not());
}

// ============================================================================
// BATCH COMMAND TESTS
// ============================================================================

const BATCH_INPUT: &str = r#"{"id":"cvv","category":"CC_CVV","value":"123"}
{"id":"gift","category":"GIFT_AMOUNT","value":3}

{"id":"missing","category":"NOT_A_CATEGORY","value":"x"}
"#;

#[test]
fn test_batch_exit_codes() {
    let temp_dir = setup_project();
    let config = config_path(&temp_dir);
    let all_valid = temp_dir.path().join("valid.jsonl");
    fs::write(
        &all_valid,
        "{\"category\":\"EMAIL\",\"value\":\"a@b.co\"}\n{\"category\":\"LOYALTY_NUMBER\",\"value\":\"LY00000001\"}\n",
    )
    .unwrap();
    let mixed = temp_dir.path().join("mixed.jsonl");
    fs::write(&mixed, BATCH_INPUT).unwrap();

    let run = |input: &Path| {
        cli::batch::run_batch(
            &config,
            None,
            &input.to_string_lossy(),
            None,
            Some(cli::OutputFormat::Jsonl),
        )
    };

    assert_eq!(run(&all_valid), EXIT_SUCCESS);
    assert_eq!(run(&mixed), EXIT_INVALID);
    assert_eq!(run(&temp_dir.path().join("absent.jsonl")), EXIT_ERROR);
}

#[test]
fn test_batch_from_file_jsonl() {
    let temp_dir = setup_project();
    fs::write(temp_dir.path().join("records.jsonl"), BATCH_INPUT).unwrap();

    let output = fieldrules(temp_dir.path())
        .args(["batch", "records.jsonl", "--format", "jsonl"])
        .assert()
        .code(EXIT_INVALID)
        .get_output()
        .stdout
        .clone();

    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);

    assert_eq!(lines[0]["id"], "cvv");
    assert_eq!(lines[0]["is_valid"], true);

    assert_eq!(lines[1]["id"], "gift");
    assert_eq!(lines[1]["failed_rule_keys"], serde_json::json!(["min"]));

    assert_eq!(lines[2]["type"], "error");
    assert_eq!(lines[2]["index"], 2);

    assert_eq!(lines[3]["type"], "status");
    assert_eq!(lines[3]["passed"], false);
    assert_eq!(lines[3]["records_checked"], 3);
    assert_eq!(lines[3]["valid"], 1);
    assert_eq!(lines[3]["invalid"], 1);
    assert_eq!(lines[3]["errored"], 1);
}

#[test]
fn test_batch_from_stdin_human() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .args(["batch", "-"])
        .write_stdin(BATCH_INPUT)
        .assert()
        .code(EXIT_INVALID)
        .stdout(predicate::str::contains("#0 (cvv) CC_CVV"))
        .stdout(predicate::str::contains("#1 (gift) GIFT_AMOUNT: min"))
        .stdout(predicate::str::contains("Unknown field category 'NOT_A_CATEGORY'"))
        .stdout(predicate::str::contains(
            "3 record(s) checked: 1 valid, 1 invalid, 1 error(s)",
        ));
}

#[test]
fn test_batch_malformed_line() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .args(["batch", "-"])
        .write_stdin("{\"category\":\"CC_CVV\",\"value\":\"123\"}\nnot json\n")
        .assert()
        .code(EXIT_ERROR)
        .stderr(predicate::str::contains("line 2"));
}

// ============================================================================
// LIST COMMAND TESTS
// ============================================================================

#[test]
fn test_list_exit_codes() {
    let temp_dir = setup_project();

    assert_eq!(cli::list::run_list(&config_path(&temp_dir), None), EXIT_SUCCESS);
    assert_eq!(
        cli::list::run_list(&fixture_path("config/invalid_syntax.toml"), None),
        EXIT_PARSE_ERROR
    );
}

#[test]
fn test_list_human() {
    let temp_dir = setup_project();

    fieldrules(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Field categories (23):"))
        .stdout(predicate::str::contains("GIFT_AMOUNT (1 rule)"))
        .stdout(predicate::str::contains("LOYALTY_NUMBER (1 rule)"));
}

#[test]
fn test_list_jsonl() {
    let temp_dir = TempDir::new().unwrap();

    let output = fieldrules(temp_dir.path())
        .args(["list", "--format", "jsonl"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 22);
    assert!(lines.iter().any(|line| line["category"] == "EMAIL"));
}
