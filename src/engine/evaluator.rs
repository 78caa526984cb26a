#![forbid(unsafe_code)]

//! Rule evaluation
//!
//! Evaluation runs a value against a rule set in declaration order. It is a
//! pure function of the rule set, the value and the mode: nothing is
//! mutated, and a failing rule is an ordinary result rather than an error.

use crate::error::ValidationError;
use crate::rules::{RuleRegistry, RuleSet};
use crate::types::{EvaluationMode, FieldValue, RuleKey};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of evaluating one value against one rule set
///
/// The value is valid exactly when no rule failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    failed_rule_keys: Vec<RuleKey>,
}

impl ValidationResult {
    /// A result with no failures
    pub fn valid() -> Self {
        Self::default()
    }

    /// A result with the given failures, in order
    pub fn with_failures(failed_rule_keys: Vec<RuleKey>) -> Self {
        Self { failed_rule_keys }
    }

    pub fn is_valid(&self) -> bool {
        self.failed_rule_keys.is_empty()
    }

    /// Keys of the failed rules in declaration order
    pub fn failed_rule_keys(&self) -> &[RuleKey] {
        &self.failed_rule_keys
    }

    /// The first failed rule, if any
    pub fn first_failure(&self) -> Option<&RuleKey> {
        self.failed_rule_keys.first()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("failed_rule_keys", &self.failed_rule_keys)?;
        state.end()
    }
}

/// Evaluate `value` against every rule of `rule_set`
///
/// Non-text values are coerced to text first. In
/// [`EvaluationMode::FailFast`] evaluation stops at the first failing rule,
/// so at most one key is reported; in [`EvaluationMode::CollectAll`] every
/// failing key is reported in declaration order.
pub fn evaluate(rule_set: &RuleSet, value: &FieldValue, mode: EvaluationMode) -> ValidationResult {
    let text = value.as_text();
    let mut failed_rule_keys = Vec::new();

    for rule in rule_set.iter() {
        if rule.check(&text) {
            continue;
        }
        failed_rule_keys.push(rule.key().clone());
        if mode == EvaluationMode::FailFast {
            break;
        }
    }

    ValidationResult { failed_rule_keys }
}

/// Evaluate `value` against the rule set registered for `category`
///
/// # Errors
///
/// Returns `ValidationError::CategoryNotFound` if the category is not
/// registered. An unknown category is never treated as valid.
pub fn evaluate_category(
    registry: &RuleRegistry,
    category: &str,
    value: &FieldValue,
    mode: EvaluationMode,
) -> Result<ValidationResult, ValidationError> {
    let rule_set = registry.get_rule_set(category)?;
    Ok(evaluate(rule_set, value, mode))
}
