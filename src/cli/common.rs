//! Common helper functions shared across CLI commands
//!
//! Every command that validates runs the same start-up sequence: load
//! fieldrules.toml, build the registry from the tables it names and check
//! the message templates against the registry.

use crate::cli::args::{ColorChoice, Mode, OutputFormat};
use crate::config::Config;
use crate::error::{ConfigError, RuleError, ValidationError};
use crate::message::MessageCatalog;
use crate::rules::RuleRegistry;
use crate::types::EvaluationMode;
use crate::validator::Validator;
use std::io::IsTerminal;
use std::path::Path;
use termcolor::StandardStream;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Errors shared by the validating commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid record on line {line}: {message}")]
    Input { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Exit code for this error; TOML syntax errors get their own code
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Loaded configuration plus the registry built from it
pub(crate) struct Session {
    pub config: Config,
    pub registry: RuleRegistry,
}

impl Session {
    /// Validator configured with the missing-placeholder policy from the config
    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.registry).with_policy(self.config.evaluation.missing_placeholder)
    }

    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::from_config(&self.config)
    }

    /// The command-line mode if given, otherwise the configured one
    pub fn mode(&self, mode: Option<Mode>) -> EvaluationMode {
        mode.map(EvaluationMode::from)
            .unwrap_or(self.config.evaluation.mode)
    }

    /// The command-line format if given, otherwise the configured one
    pub fn format(&self, format: Option<OutputFormat>) -> OutputFormat {
        format.unwrap_or_else(|| self.config.output.format.into())
    }

    /// Stdout stream honoring the command-line color choice, then the config
    pub fn stdout(&self, color: Option<ColorChoice>) -> StandardStream {
        let choice = color.unwrap_or_else(|| self.config.output.color.into());
        StandardStream::stdout(termcolor_choice(choice))
    }
}

/// Load configuration and build the registry it describes
///
/// A missing configuration file falls back to defaults (builtin table only).
///
/// # Errors
///
/// Returns `CommandError::Config` for an unreadable or invalid configuration,
/// including message templates for unknown rules, and `CommandError::Rule`
/// if a rule table cannot be loaded.
pub(crate) fn load_session(config_path: &Path) -> Result<Session, CommandError> {
    let config = Config::load_or_default(config_path)?;
    let registry = build_registry(&config, config_path)?;
    config.validate_messages(&registry)?;
    Ok(Session { config, registry })
}

/// Build the rule registry for a configuration
///
/// Relative rule table paths are resolved against the directory holding the
/// configuration file.
pub(crate) fn build_registry(config: &Config, config_path: &Path) -> Result<RuleRegistry, RuleError> {
    let base_dir = config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    RuleRegistry::build_from_config(config, base_dir)
}

/// Map the CLI color choice to termcolor, disabling color off a terminal
pub(crate) fn termcolor_choice(choice: ColorChoice) -> termcolor::ColorChoice {
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}
