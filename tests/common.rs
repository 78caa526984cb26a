//! Test utilities for fieldrules integration tests

#![allow(dead_code)]

use fieldrules::{EvaluationMode, FieldValue, RuleRegistry, ValidationResult};
use std::path::PathBuf;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Path to a file under tests/fixtures
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// Registry holding only the embedded table
pub fn builtin_registry() -> RuleRegistry {
    assert_ok!(RuleRegistry::builtin(), "embedded rule table must load")
}

/// Evaluate `value` in collect-all mode and return the failed keys
pub fn failed_keys(registry: &RuleRegistry, category: &str, value: &str) -> Vec<String> {
    let rule_set = assert_ok!(registry.get_rule_set(category));
    keys(&fieldrules::evaluate(
        rule_set,
        &FieldValue::from(value),
        EvaluationMode::CollectAll,
    ))
}

/// Failed rule keys of a result as owned strings
pub fn keys(result: &ValidationResult) -> Vec<String> {
    result
        .failed_rule_keys()
        .iter()
        .map(|k| k.to_string())
        .collect()
}
