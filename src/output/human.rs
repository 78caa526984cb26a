#![forbid(unsafe_code)]

//! Human-readable output with optional color
//!
//! Written through `termcolor` so the same code serves colored terminals,
//! plain pipes and in-memory buffers in tests.

use crate::engine::{BatchResult, RecordOutcome};
use crate::types::FieldValue;
use crate::validator::FieldReport;
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter for validation results
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write the report for a single field
    pub fn write_report(
        &self,
        out: &mut dyn WriteColor,
        category: &str,
        value: &FieldValue,
        report: &FieldReport,
    ) -> io::Result<()> {
        self.write_status(out, report.is_valid())?;
        write!(out, " {} ", category)?;
        write_dimmed(out, &format!("{:?}", value.as_text()))?;

        if report.is_valid() {
            writeln!(out, " is valid")?;
            return Ok(());
        }

        let failed = report.result.failed_rule_keys();
        writeln!(out, " failed {} rule(s)", failed.len())?;
        for (key, message) in failed.iter().zip(&report.messages) {
            write!(out, "  ")?;
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{}", key)?;
            out.reset()?;
            writeln!(out, ": {}", message)?;
        }
        Ok(())
    }

    /// Write one line per record followed by a summary
    pub fn write_batch(&self, out: &mut dyn WriteColor, result: &BatchResult) -> io::Result<()> {
        for outcome in &result.outcomes {
            self.write_outcome(out, outcome)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} record(s) checked: {} valid, {} invalid, {} error(s)",
            result.records_checked, result.valid, result.invalid, result.errored
        )?;
        Ok(())
    }

    fn write_outcome(&self, out: &mut dyn WriteColor, outcome: &RecordOutcome) -> io::Result<()> {
        let label = match &outcome.id {
            Some(id) => format!("#{} ({})", outcome.index, id),
            None => format!("#{}", outcome.index),
        };

        match &outcome.report {
            Ok(report) => {
                self.write_status(out, report.is_valid())?;
                write!(out, " {} {}", label, outcome.category)?;
                if report.is_valid() {
                    writeln!(out)?;
                } else {
                    let keys: Vec<&str> = report
                        .result
                        .failed_rule_keys()
                        .iter()
                        .map(|k| k.as_str())
                        .collect();
                    writeln!(out, ": {}", keys.join(", "))?;
                    for message in &report.messages {
                        writeln!(out, "    {}", message)?;
                    }
                }
            }
            Err(e) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
                write!(out, "!")?;
                out.reset()?;
                writeln!(out, " {} {}: {}", label, outcome.category, e)?;
            }
        }
        Ok(())
    }

    fn write_status(&self, out: &mut dyn WriteColor, valid: bool) -> io::Result<()> {
        let (icon, color) = if valid {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(out, "{}", icon)?;
        out.reset()
    }
}

fn write_dimmed(out: &mut dyn WriteColor, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_dimmed(true))?;
    write!(out, "{}", text)?;
    out.reset()
}
