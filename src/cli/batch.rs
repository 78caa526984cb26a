//! Batch command implementation
//!
//! `fieldrules batch <FILE|->` reads one JSON field record per line and
//! validates all of them in parallel. Blank lines are skipped. The exit code
//! is 1 if any record is invalid or names an unknown category.

use crate::cli::args::{ColorChoice, Mode, OutputFormat};
use crate::cli::common::{CommandError, EXIT_INVALID, EXIT_SUCCESS, load_session};
use crate::engine::{BatchValidator, FieldRecord};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Run the batch command and return the process exit code
pub fn run_batch(
    config_path: &Path,
    color: Option<ColorChoice>,
    input: &str,
    mode: Option<Mode>,
    format: Option<OutputFormat>,
) -> i32 {
    match run_batch_inner(config_path, color, input, mode, format) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_INVALID,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_batch_inner(
    config_path: &Path,
    color: Option<ColorChoice>,
    input: &str,
    mode: Option<Mode>,
    format: Option<OutputFormat>,
) -> Result<bool, CommandError> {
    let session = load_session(config_path)?;

    let records = if input == "-" {
        read_records(io::stdin().lock())?
    } else {
        read_records(BufReader::new(File::open(input)?))?
    };

    let batch = BatchValidator::new(session.validator(), session.mode(mode));
    let result = batch.run(&records, &session.catalog());

    match session.format(format) {
        OutputFormat::Human => {
            let mut stdout = session.stdout(color);
            HumanFormatter::new().write_batch(&mut stdout, &result)?;
            stdout.flush()?;
        }
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format_batch(&result)),
    }

    Ok(result.all_valid())
}

/// Parse JSONL field records
///
/// # Errors
///
/// Returns `CommandError::Input` naming the first line (1-based) that is not
/// a valid record, or `CommandError::Io` if reading fails.
pub(crate) fn read_records(reader: impl BufRead) -> Result<Vec<FieldRecord>, CommandError> {
    let mut records = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| CommandError::Input {
            line: number + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}
