#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Every line is one JSON object with a `type` field. A batch is written
//! as one record per input, in input order, followed by one status record.

use crate::engine::{BatchResult, RecordOutcome};
use crate::validator::FieldReport;
use serde::Serialize;

/// JSONL output formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a single field report as one line
    pub fn format_report(&self, category: &str, report: &FieldReport) -> String {
        let record = ResultRecord {
            record_type: "result",
            index: None,
            id: None,
            category,
            is_valid: report.is_valid(),
            failed_rule_keys: report
                .result
                .failed_rule_keys()
                .iter()
                .map(|k| k.as_str())
                .collect(),
            messages: &report.messages,
        };
        to_line(&record)
    }

    /// Format a batch: one record per outcome, then a status record
    pub fn format_batch(&self, result: &BatchResult) -> String {
        let mut output = String::new();

        for outcome in &result.outcomes {
            output.push_str(&self.format_outcome(outcome));
        }

        let status = StatusRecord {
            record_type: "status",
            passed: result.all_valid(),
            records_checked: result.records_checked as u64,
            valid: result.valid as u64,
            invalid: result.invalid as u64,
            errored: result.errored as u64,
        };
        output.push_str(&to_line(&status));

        output
    }

    fn format_outcome(&self, outcome: &RecordOutcome) -> String {
        match &outcome.report {
            Ok(report) => to_line(&ResultRecord {
                record_type: "result",
                index: Some(outcome.index),
                id: outcome.id.as_deref(),
                category: &outcome.category,
                is_valid: report.is_valid(),
                failed_rule_keys: report
                    .result
                    .failed_rule_keys()
                    .iter()
                    .map(|k| k.as_str())
                    .collect(),
                messages: &report.messages,
            }),
            Err(e) => to_line(&ErrorRecord {
                record_type: "error",
                index: outcome.index,
                id: outcome.id.as_deref(),
                category: &outcome.category,
                message: e.to_string(),
            }),
        }
    }
}

fn to_line<T: Serialize>(record: &T) -> String {
    match serde_json::to_string(record) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize output record");
            String::new()
        }
    }
}

/// Validation result record
#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    category: &'a str,
    is_valid: bool,
    failed_rule_keys: Vec<&'a str>,
    messages: &'a [String],
}

/// Record for an input that could not be validated
#[derive(Debug, Serialize)]
struct ErrorRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    category: &'a str,
    message: String,
}

/// Batch status record
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    records_checked: u64,
    valid: u64,
    invalid: u64,
    errored: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BatchValidator, FieldRecord, ValidationResult};
    use crate::message::NoTemplates;
    use crate::rules::RuleRegistry;
    use crate::types::{EvaluationMode, RuleKey};
    use crate::validator::Validator;
    use serde_json::Value;

    fn parse_lines(output: &str) -> Vec<Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_format_report() {
        let report = FieldReport {
            result: ValidationResult::with_failures(vec![RuleKey::new("validMonth").unwrap()]),
            messages: vec!["Enter a month".to_string()],
        };
        let output = JsonlFormatter::new().format_report("CC_EXPIRATION", &report);
        assert!(output.ends_with('\n'));

        let lines = parse_lines(&output);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["type"], "result");
        assert_eq!(lines[0]["category"], "CC_EXPIRATION");
        assert_eq!(lines[0]["is_valid"], false);
        assert_eq!(lines[0]["failed_rule_keys"][0], "validMonth");
        assert_eq!(lines[0]["messages"][0], "Enter a month");
        assert!(lines[0].get("index").is_none());
    }

    #[test]
    fn test_format_batch() {
        let registry = RuleRegistry::builtin().unwrap();
        let result = BatchValidator::new(Validator::new(&registry), EvaluationMode::CollectAll)
            .run(
                &[
                    FieldRecord::new("STATE", "NY").with_id("a"),
                    FieldRecord::new("MISSING", "x").with_id("b"),
                ],
                &NoTemplates,
            );

        let lines = parse_lines(&JsonlFormatter::new().format_batch(&result));
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0]["type"], "result");
        assert_eq!(lines[0]["index"], 0);
        assert_eq!(lines[0]["id"], "a");
        assert_eq!(lines[0]["is_valid"], true);

        assert_eq!(lines[1]["type"], "error");
        assert_eq!(lines[1]["id"], "b");
        assert_eq!(lines[1]["message"], "Unknown field category 'MISSING'");

        assert_eq!(lines[2]["type"], "status");
        assert_eq!(lines[2]["passed"], false);
        assert_eq!(lines[2]["records_checked"], 2);
        assert_eq!(lines[2]["errored"], 1);
    }
}
