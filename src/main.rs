//! Fieldrules CLI entry point

use clap::Parser;
use fieldrules::cli::check::CheckArgs;
use fieldrules::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use fieldrules::cli::init::InitOutcome;
use fieldrules::cli::{Command, args::Cli};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Init { force } => match fieldrules::cli::init::run_init(&cli.config, force) {
            Ok(InitOutcome::Skipped) => {
                println!(
                    "{} already exists. Use --force to overwrite it.",
                    cli.config.display()
                );
                EXIT_SUCCESS
            }
            Ok(_) => {
                println!("Created {}.", cli.config.display());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Check {
            category,
            value,
            mode,
            props,
            data,
            format,
        } => {
            let args = CheckArgs {
                category,
                value,
                mode,
                props,
                data,
                format,
            };
            fieldrules::cli::check::run_check(&cli.config, cli.color, &args)
        }
        Command::Batch {
            input,
            mode,
            format,
        } => fieldrules::cli::batch::run_batch(&cli.config, cli.color, &input, mode, format),
        Command::List { format } => fieldrules::cli::list::run_list(&cli.config, format),
    };

    process::exit(exit_code);
}

/// Log to stderr, filtered by `FIELDRULES_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FIELDRULES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
