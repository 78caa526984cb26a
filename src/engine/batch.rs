#![forbid(unsafe_code)]

//! Parallel validation of many field records
//!
//! The registry is read-only after construction, so records are validated
//! independently on the rayon pool and collected back in input order.

use crate::error::ValidationError;
use crate::message::{FieldContext, TemplateSource};
use crate::types::{EvaluationMode, FieldValue};
use crate::validator::{FieldReport, Validator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One field to validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Caller-chosen identifier echoed back in the outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub value: FieldValue,
    #[serde(default)]
    pub context: FieldContext,
    /// Overrides the batch default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<EvaluationMode>,
}

impl FieldRecord {
    pub fn new(category: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            id: None,
            category: category.into(),
            value: value.into(),
            context: FieldContext::default(),
            mode: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_context(mut self, context: FieldContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Outcome for a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Position of the record in the input
    pub index: usize,
    pub id: Option<String>,
    pub category: String,
    pub report: Result<FieldReport, ValidationError>,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(&self.report, Ok(report) if report.is_valid())
    }
}

/// Result of validating a batch of records
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// One outcome per record, in input order
    pub outcomes: Vec<RecordOutcome>,
    pub records_checked: usize,
    pub valid: usize,
    pub invalid: usize,
    pub errored: usize,
}

impl BatchResult {
    /// True if every record was valid
    pub fn all_valid(&self) -> bool {
        self.invalid == 0 && self.errored == 0
    }
}

/// Validates records in parallel against one registry
pub struct BatchValidator<'r> {
    validator: Validator<'r>,
    default_mode: EvaluationMode,
}

impl<'r> BatchValidator<'r> {
    pub fn new(validator: Validator<'r>, default_mode: EvaluationMode) -> Self {
        Self {
            validator,
            default_mode,
        }
    }

    /// Validate every record and collect the outcomes in input order
    ///
    /// A record with an unknown category is reported as an errored outcome;
    /// it does not stop the rest of the batch.
    pub fn run(&self, records: &[FieldRecord], templates: &dyn TemplateSource) -> BatchResult {
        let outcomes: Vec<RecordOutcome> = records
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.run_record(index, record, templates))
            .collect();

        let mut result = BatchResult {
            records_checked: outcomes.len(),
            ..BatchResult::default()
        };
        for outcome in &outcomes {
            match &outcome.report {
                Ok(report) if report.is_valid() => result.valid += 1,
                Ok(_) => result.invalid += 1,
                Err(_) => result.errored += 1,
            }
        }
        result.outcomes = outcomes;

        tracing::info!(
            records = result.records_checked,
            valid = result.valid,
            invalid = result.invalid,
            errored = result.errored,
            "batch validation finished"
        );

        result
    }

    fn run_record(
        &self,
        index: usize,
        record: &FieldRecord,
        templates: &dyn TemplateSource,
    ) -> RecordOutcome {
        let mode = record.mode.unwrap_or(self.default_mode);
        let report = self.validator.validate_field(
            &record.category,
            &record.value,
            &record.context,
            mode,
            templates,
        );

        if let Err(e) = &report {
            tracing::debug!(index, category = %record.category, error = %e, "record not validated");
        }

        RecordOutcome {
            index,
            id: record.id.clone(),
            category: record.category.clone(),
            report,
        }
    }
}
