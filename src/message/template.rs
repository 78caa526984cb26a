#![forbid(unsafe_code)]

//! Message template formatting
//!
//! Templates reference values from the failing field with `{name}` (a
//! direct property of the field) or `{data-name}` (a custom data attribute).
//! Whitespace inside the braces is ignored.

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::LazyLock;

/// Regex pattern matching `{name}` and `{data-name}` placeholders.
pub const PLACEHOLDER_PATTERN: &str = r"\{\s*(data-)?([A-Za-z][A-Za-z0-9_]*)\s*\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Text substituted for a missing value under [`MissingKeyPolicy::Legacy`]
pub const LEGACY_MISSING_TEXT: &str = "undefined";

/// What to substitute when a placeholder has no value in the context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// The literal text `undefined`, as the legacy form scripts produced
    #[default]
    Legacy,
    /// An empty string
    Empty,
    /// Fail with `ValidationError::MalformedTemplate`
    Strict,
}

/// Attribute values of the field a message is about
///
/// `properties` mirrors the field element's own properties (`name`, `id`,
/// `maxLength`, ...) and `data` its custom `data-*` attributes, keyed
/// without the `data-` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldContext {
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl FieldContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a direct property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Add a data attribute (name without the `data-` prefix)
    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn data(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }
}

/// Formats message templates against a field context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFormatter {
    policy: MissingKeyPolicy,
}

impl MessageFormatter {
    pub fn new(policy: MissingKeyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    /// Replace every placeholder in `template`, left to right
    ///
    /// Substituted values are not scanned again, so a value that itself
    /// looks like a placeholder is inserted verbatim.
    ///
    /// # Errors
    ///
    /// Only under [`MissingKeyPolicy::Strict`]: returns
    /// `ValidationError::MalformedTemplate` naming the first placeholder
    /// with no value.
    pub fn format(&self, template: &str, context: &FieldContext) -> Result<String, ValidationError> {
        substitute(template, context, |placeholder| match self.policy {
            MissingKeyPolicy::Legacy => Ok(LEGACY_MISSING_TEXT),
            MissingKeyPolicy::Empty => Ok(""),
            MissingKeyPolicy::Strict => Err(ValidationError::MalformedTemplate {
                placeholder: placeholder.to_string(),
            }),
        })
    }
}

/// Format a template with the legacy missing-value behavior
///
/// Never fails: a missing value becomes the text `undefined`.
pub fn format_message(template: &str, context: &FieldContext) -> String {
    match substitute(template, context, |_| {
        Ok::<_, Infallible>(LEGACY_MISSING_TEXT)
    }) {
        Ok(message) => message,
        Err(never) => match never {},
    }
}

fn substitute<E>(
    template: &str,
    context: &FieldContext,
    mut on_missing: impl FnMut(&str) -> Result<&'static str, E>,
) -> Result<String, E> {
    let mut output = String::with_capacity(template.len());
    let mut last_end = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let name = &caps[2];
        let value = if caps.get(1).is_some() {
            context.data(name)
        } else {
            context.property(name)
        };

        output.push_str(&template[last_end..whole.start()]);
        match value {
            Some(value) => output.push_str(value),
            None => output.push_str(on_missing(whole.as_str())?),
        }
        last_end = whole.end();
    }

    output.push_str(&template[last_end..]);
    Ok(output)
}

/// Placeholder tokens of a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .find_iter(template)
        .map(|m| m.as_str())
        .collect()
}
