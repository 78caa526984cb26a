//! Parsing and validation for fieldrules.toml configuration files

use crate::error::ConfigError;
use crate::message::MissingKeyPolicy;
use crate::rules::RuleRegistry;
use crate::types::{Category, EvaluationMode, RuleKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "fieldrules.toml";

/// Main configuration struct for fieldrules.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fieldrules metadata and rule table sources
    pub fieldrules: FieldRulesMeta,

    /// Evaluation defaults
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Message templates, keyed by category then rule key
    #[serde(default)]
    pub messages: HashMap<Category, HashMap<RuleKey, String>>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "configuration file not found, using built-in defaults"
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fieldrules.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.fieldrules.version
            )));
        }

        if !self.fieldrules.include_builtin && self.fieldrules.rule_tables.is_empty() {
            return Err(ConfigError::Validation(
                "No rule tables configured. Set include_builtin = true or list rule_tables."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Check that every message template targets a registered rule
    ///
    /// Runs once the registry has been built, since custom rule tables are
    /// only known then.
    pub fn validate_messages(&self, registry: &RuleRegistry) -> Result<(), ConfigError> {
        for (category, templates) in &self.messages {
            let rule_set = registry.get_rule_set(category.as_str()).map_err(|_| {
                ConfigError::Validation(format!(
                    "Messages configured for unknown category '{}'",
                    category
                ))
            })?;

            for key in templates.keys() {
                if rule_set.get(key.as_str()).is_none() {
                    return Err(ConfigError::Validation(format!(
                        "Message configured for unknown rule '{}.{}'",
                        category, key
                    )));
                }
            }
        }
        Ok(())
    }

    /// Rule table paths, resolved relative to `base_dir`
    pub fn rule_table_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.fieldrules
            .rule_tables
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                }
            })
            .collect()
    }
}

/// Fieldrules metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRulesMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Load the embedded field validation table
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Additional rule table files or directories of `.toml` tables
    #[serde(default)]
    pub rule_tables: Vec<PathBuf>,
}

impl Default for FieldRulesMeta {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            include_builtin: true,
            rule_tables: Vec::new(),
        }
    }
}

fn default_include_builtin() -> bool {
    true
}

/// Evaluation defaults section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Evaluation mode used when a call does not specify one
    #[serde(default)]
    pub mode: EvaluationMode,

    /// What to substitute for a placeholder with no value
    #[serde(default)]
    pub missing_placeholder: MissingKeyPolicy,
}

/// Output configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
