//! List command implementation
//!
//! `fieldrules list` shows every loaded field category with its rules in
//! evaluation order.

use crate::cli::args::OutputFormat;
use crate::cli::common::{CommandError, EXIT_SUCCESS, build_registry};
use crate::config::Config;
use crate::output::{CategoryListing, ListingHumanFormatter, ListingJsonlFormatter};
use std::path::Path;

/// Run the list command and return the process exit code
pub fn run_list(config_path: &Path, format: Option<OutputFormat>) -> i32 {
    match run_list_inner(config_path, format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_list_inner(config_path: &Path, format: Option<OutputFormat>) -> Result<(), CommandError> {
    let config = Config::load_or_default(config_path)?;
    let registry = build_registry(&config, config_path)?;
    let listings = CategoryListing::from_registry(&registry);

    let output = match format.unwrap_or_else(|| config.output.format.into()) {
        OutputFormat::Human => ListingHumanFormatter::new().format(&listings),
        OutputFormat::Jsonl => ListingJsonlFormatter::new().format(&listings),
    };
    print!("{}", output);

    Ok(())
}
