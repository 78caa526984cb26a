//! Integration tests for configuration parsing
//!
//! This module contains integration tests that verify:
//! - Config loading from files
//! - Defaults when sections or the whole file are missing
//! - Rejection of invalid versions, syntax and message targets

mod common;

use common::{builtin_registry, fixture_path};
use fieldrules::config::{ColorOption, Config, OutputFormat};
use fieldrules::{ConfigError, EvaluationMode, MissingKeyPolicy, RuleRegistry};

#[test]
fn test_config_load_valid_minimal() {
    let config = assert_ok!(Config::load(fixture_path("config/valid_minimal.toml")));

    assert_eq!(config.fieldrules.version, "1");
    assert!(config.fieldrules.include_builtin);
    assert!(config.fieldrules.rule_tables.is_empty());
    assert_eq!(config.evaluation.mode, EvaluationMode::CollectAll);
    assert_eq!(
        config.evaluation.missing_placeholder,
        MissingKeyPolicy::Legacy
    );
    assert!(config.messages.is_empty());
    assert_eq!(config.output.format, OutputFormat::Human);
    assert_eq!(config.output.color, ColorOption::Auto);
}

#[test]
fn test_config_load_valid_full() {
    let config = assert_ok!(Config::load(fixture_path("config/valid_full.toml")));

    assert_eq!(config.fieldrules.rule_tables.len(), 2);
    assert_eq!(config.evaluation.mode, EvaluationMode::FailFast);
    assert_eq!(config.evaluation.missing_placeholder, MissingKeyPolicy::Empty);
    assert_eq!(config.messages.len(), 2);
    assert_eq!(config.output.format, OutputFormat::Jsonl);
    assert_eq!(config.output.color, ColorOption::Never);

    let email = assert_some!(config.messages.get("EMAIL"));
    assert_eq!(
        email.get("minMax").map(String::as_str),
        Some("Use {data-min} to {data-max} characters")
    );
}

#[test]
fn test_config_load_invalid_version() {
    let err = Config::load(fixture_path("config/invalid_version.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("Unsupported configuration version"));
}

#[test]
fn test_config_load_invalid_syntax() {
    let err = Config::load(fixture_path("config/invalid_syntax.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_missing_file() {
    let path = fixture_path("config/does_not_exist.toml");
    assert!(matches!(Config::load(&path), Err(ConfigError::Io(_))));
    assert_eq!(assert_ok!(Config::load_or_default(&path)), Config::default());
}

#[test]
fn test_unknown_message_rule_is_rejected() {
    let config = assert_ok!(Config::load(fixture_path("config/unknown_message_rule.toml")));
    let err = config.validate_messages(&builtin_registry()).unwrap_err();
    assert!(err.to_string().contains("EMAIL.doesNotExist"));
}

#[test]
fn test_messages_for_custom_table_need_that_table() {
    let config = assert_ok!(Config::load(fixture_path("config/valid_full.toml")));

    // LOYALTY_NUMBER only exists once the extra table is loaded
    let err = config.validate_messages(&builtin_registry()).unwrap_err();
    assert!(err.to_string().contains("LOYALTY_NUMBER"));

    let registry = assert_ok!(RuleRegistry::build_from_config(
        &config,
        &fixture_path("config")
    ));
    assert_ok!(config.validate_messages(&registry));
}

#[test]
fn test_invalid_enum_values_are_parse_errors() {
    let result = Config::parse(
        r#"
[fieldrules]
version = "1"

[evaluation]
mode = "sometimes"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_message_category_name() {
    let result = Config::parse(
        r#"
[fieldrules]
version = "1"

[messages.email]
format = "lowercase categories are not category names"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
