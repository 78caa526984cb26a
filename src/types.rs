#![forbid(unsafe_code)]

//! Core domain types for fieldrules
//!
//! This module defines the fundamental types shared by the registry, the
//! evaluator and the message formatter.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// A validated field category name
///
/// Category names are non-empty and contain only ASCII uppercase letters,
/// digits and underscores (e.g. `EMAIL`, `STREET_ADDR_1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Creates a new Category, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return None;
        }
        Some(Category(name))
    }

    /// Returns the category name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::new(value.clone()).ok_or_else(|| format!("Invalid field category: {}", value))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

/// A validated rule key, unique within its category
///
/// Rule keys must be non-empty and contain only ASCII alphanumeric
/// characters, hyphens, and underscores (e.g. `minMax`, `hasAtSymbol`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleKey(String);

impl RuleKey {
    /// Creates a new RuleKey, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() {
            return None;
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(RuleKey(key))
    }

    /// Returns the rule key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for RuleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RuleKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleKey::new(value.clone()).ok_or_else(|| format!("Invalid rule key: {}", value))
    }
}

impl From<RuleKey> for String {
    fn from(key: RuleKey) -> Self {
        key.0
    }
}

/// How a rule set is evaluated against a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Stop at the first failing rule
    FailFast,
    /// Evaluate every rule and report all failures in declaration order
    #[default]
    CollectAll,
}

/// The kind of matcher a rule uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Pattern,
    Predicate,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Pattern => "pattern",
            RuleKind::Predicate => "predicate",
        }
    }
}

/// A raw field value as supplied by the caller
///
/// Rules always see the text form of a value; non-text values are coerced
/// before matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Returns the text the rules are evaluated against
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
            FieldValue::Float(f) => number_text(*f),
        }
    }
}

/// Text of a float in the ECMAScript Number-to-String form
///
/// Shortest round-trip digits, plain notation for magnitudes in
/// `[1e-6, 1e21)` and `d.ddde+N` exponent notation outside it. Negative
/// zero prints as `0`.
fn number_text(f: f64) -> Cow<'static, str> {
    if f.is_nan() {
        return Cow::Borrowed("NaN");
    }
    if f.is_infinite() {
        return Cow::Borrowed(if f > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if f == 0.0 {
        return Cow::Borrowed("0");
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return Cow::Owned(f.to_string());
    }

    let exponent_form = format!("{:e}", f);
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            Cow::Owned(format!("{}e+{}", mantissa, exponent))
        }
        _ => Cow::Owned(exponent_form),
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}
