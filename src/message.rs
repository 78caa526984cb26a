#![forbid(unsafe_code)]

//! Error message templates and their formatting

mod catalog;
mod template;

pub use catalog::{MessageCatalog, NoTemplates, TemplateSource};
pub use template::{
    FieldContext, LEGACY_MISSING_TEXT, MessageFormatter, MissingKeyPolicy, PLACEHOLDER_PATTERN,
    format_message, placeholders,
};
