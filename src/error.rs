//! Error types for fieldrules
//!
//! Errors are split by when they can happen: configuration and rule-table
//! errors are raised while the registry is being built and are fatal for
//! that initialization, while validation errors are returned per call.

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but is semantically invalid
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule table and registry construction errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Invalid rule or table definition
    #[error("Invalid rule definition: {0}")]
    InvalidDefinition(String),

    /// Invalid regex pattern
    #[error("Invalid regex pattern for {category}.{key}: {message}")]
    InvalidRegex {
        category: String,
        key: String,
        message: String,
    },

    /// Rule table declares a version this build does not understand
    #[error("Unsupported rule table version '{0}'. Expected '1'")]
    UnsupportedVersion(String),

    /// The same field category was registered twice
    #[error("Duplicate field category '{0}'")]
    DuplicateCategory(String),

    /// The same rule key appears twice within one category
    #[error("Duplicate rule key '{key}' in category '{category}'")]
    DuplicateRuleKey { category: String, key: String },

    /// The process-wide registry was already installed
    #[error("The global rule registry is already installed")]
    AlreadyInstalled,
}

/// Per-call validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Requested field category is not registered
    #[error("Unknown field category '{0}'")]
    CategoryNotFound(String),

    /// A message template references a key missing from the field context
    #[error("Template placeholder '{placeholder}' has no value in the field context")]
    MalformedTemplate { placeholder: String },

    /// `Validator::global` was called before a registry was installed
    #[error("No global rule registry has been installed")]
    RegistryNotInstalled,
}

/// Top-level error type for fieldrules
#[derive(Debug, thiserror::Error)]
pub enum FieldRulesError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
