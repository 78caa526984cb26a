#![forbid(unsafe_code)]

//! Validation facade
//!
//! [`Validator`] ties the registry, the evaluator and the message formatter
//! together: it looks up a category, evaluates the value and turns every
//! failed rule into a formatted message.

use crate::engine::{ValidationResult, evaluate};
use crate::error::ValidationError;
use crate::message::{FieldContext, MessageFormatter, MissingKeyPolicy, TemplateSource};
use crate::rules::{RuleRegistry, RuleSet, registry};
use crate::types::{EvaluationMode, FieldValue};
use serde::Serialize;

/// Result of validating one field: the raw outcome plus one message per
/// failed rule, in the same order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub result: ValidationResult,
    pub messages: Vec<String>,
}

impl FieldReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }
}

/// Entry point for validating field values against a registry
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r RuleRegistry,
    formatter: MessageFormatter,
}

impl<'r> Validator<'r> {
    /// Validator using the legacy missing-placeholder policy
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            formatter: MessageFormatter::default(),
        }
    }

    /// Use `policy` for placeholders with no value in the field context
    pub fn with_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.formatter = MessageFormatter::new(policy);
        self
    }

    pub fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    /// Evaluate a value without producing messages
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CategoryNotFound` for an unknown category.
    pub fn evaluate(
        &self,
        category: &str,
        value: &FieldValue,
        mode: EvaluationMode,
    ) -> Result<ValidationResult, ValidationError> {
        let rule_set = self.registry.get_rule_set(category)?;
        Ok(evaluate(rule_set, value, mode))
    }

    /// Evaluate a value and format a message for each failed rule
    ///
    /// Templates come from `templates`. A rule with no template uses its
    /// description, or its key when the description is empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CategoryNotFound` for an unknown category,
    /// and `ValidationError::MalformedTemplate` when the strict policy is
    /// in effect and a template references a value the context lacks.
    pub fn validate_field(
        &self,
        category: &str,
        value: &FieldValue,
        context: &FieldContext,
        mode: EvaluationMode,
        templates: &dyn TemplateSource,
    ) -> Result<FieldReport, ValidationError> {
        let rule_set = self.registry.get_rule_set(category)?;
        let result = evaluate(rule_set, value, mode);

        let messages = result
            .failed_rule_keys()
            .iter()
            .map(|key| {
                let template = templates
                    .template(category, key.as_str())
                    .unwrap_or_else(|| fallback_template(rule_set, key.as_str()));
                self.formatter.format(&template, context)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FieldReport { result, messages })
    }
}

impl Validator<'static> {
    /// Validator over the process-wide registry
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RegistryNotInstalled` if
    /// [`registry::install`] has not completed yet.
    pub fn global() -> Result<Self, ValidationError> {
        registry::global()
            .map(Validator::new)
            .ok_or(ValidationError::RegistryNotInstalled)
    }
}

fn fallback_template(rule_set: &RuleSet, key: &str) -> String {
    match rule_set.get(key) {
        Some(rule) if !rule.description().is_empty() => rule.description().to_string(),
        _ => key.to_string(),
    }
}
