//! Check command implementation
//!
//! `fieldrules check <CATEGORY> <VALUE>` validates one value and prints the
//! failed rules with their formatted messages. Exit code 0 means valid and
//! 1 means at least one rule failed.

use crate::cli::args::{ColorChoice, Mode, OutputFormat};
use crate::cli::common::{CommandError, EXIT_INVALID, EXIT_SUCCESS, load_session};
use crate::message::FieldContext;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::types::FieldValue;
use std::io::Write;
use std::path::Path;

/// Arguments of the check command
#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub category: String,
    pub value: String,
    pub mode: Option<Mode>,
    pub props: Vec<(String, String)>,
    pub data: Vec<(String, String)>,
    pub format: Option<OutputFormat>,
}

impl CheckArgs {
    fn context(&self) -> FieldContext {
        FieldContext {
            properties: self.props.iter().cloned().collect(),
            data: self.data.iter().cloned().collect(),
        }
    }
}

/// Run the check command and return the process exit code
pub fn run_check(config_path: &Path, color: Option<ColorChoice>, args: &CheckArgs) -> i32 {
    match run_check_inner(config_path, color, args) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_INVALID,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_check_inner(
    config_path: &Path,
    color: Option<ColorChoice>,
    args: &CheckArgs,
) -> Result<bool, CommandError> {
    let session = load_session(config_path)?;
    let value = FieldValue::from(args.value.as_str());

    let report = session.validator().validate_field(
        &args.category,
        &value,
        &args.context(),
        session.mode(args.mode),
        &session.catalog(),
    )?;

    match session.format(args.format) {
        OutputFormat::Human => {
            let mut stdout = session.stdout(color);
            HumanFormatter::new().write_report(&mut stdout, &args.category, &value, &report)?;
            stdout.flush()?;
        }
        OutputFormat::Jsonl => {
            print!(
                "{}",
                JsonlFormatter::new().format_report(&args.category, &report)
            );
        }
    }

    Ok(report.is_valid())
}
