#![forbid(unsafe_code)]

//! Fieldrules: ordered validation rules for form fields
//!
//! A field category (`EMAIL`, `PASSWORD`, ...) owns an ordered set of named
//! rules, each a regex pattern or a small predicate. Validating a value runs
//! those rules in order, either stopping at the first failure or collecting
//! all of them, and turns each failed rule into a message by substituting
//! `{name}` and `{data-name}` placeholders from the field's attributes.
//!
//! ```
//! use fieldrules::{EvaluationMode, FieldContext, FieldValue, NoTemplates, RuleRegistry, Validator};
//!
//! let registry = RuleRegistry::builtin()?;
//! let report = Validator::new(&registry).validate_field(
//!     "PASSWORD",
//!     &FieldValue::from("abcdefgh"),
//!     &FieldContext::new(),
//!     EvaluationMode::CollectAll,
//!     &NoTemplates,
//! )?;
//! assert!(!report.is_valid());
//! assert_eq!(report.result.failed_rule_keys().len(), 3);
//! # Ok::<(), fieldrules::FieldRulesError>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod message;
pub mod output;
pub mod rules;
pub mod types;
pub mod validator;

// Re-export error types for convenient access
pub use error::{ConfigError, FieldRulesError, RuleError, ValidationError};

// Re-export the core API
pub use engine::{BatchResult, BatchValidator, FieldRecord, ValidationResult, evaluate};
pub use message::{FieldContext, MessageCatalog, MissingKeyPolicy, NoTemplates, TemplateSource};
pub use rules::{RuleRegistry, RuleSet};
pub use types::{Category, EvaluationMode, FieldValue, RuleKey};
pub use validator::{FieldReport, Validator};
