#![forbid(unsafe_code)]

//! Regex-based rule implementation
//!
//! This module provides PatternRule, which passes a value when its compiled
//! regular expression finds a match. Patterns are used exactly as written:
//! anchoring is part of the pattern, and several legacy patterns are
//! deliberately unanchored (EMAIL `hasAtSymbol`, PASSWORD `number`).

use crate::error::RuleError;
use crate::rules::Rule;
use crate::types::{Category, RuleKey, RuleKind};
use regex::{Regex, RegexBuilder};

/// Compiled size limit for a single pattern.
///
/// Counted repetitions of Unicode classes (`[^\n\r]{0,500}`) expand into large
/// programs.
const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

/// A rule that passes when a regular expression matches the value
pub struct PatternRule {
    key: RuleKey,
    description: String,
    pattern: Regex,
}

impl std::fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("key", &self.key)
            .field("description", &self.description)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl PatternRule {
    /// Compile a PatternRule
    ///
    /// `category` is only used to give compile errors a location.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn new(
        category: &Category,
        key: RuleKey,
        description: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, RuleError> {
        let pattern = RegexBuilder::new(pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| RuleError::InvalidRegex {
                category: category.as_str().to_string(),
                key: key.as_str().to_string(),
                message: e.to_string(),
            })?;

        Ok(PatternRule {
            key,
            description: description.into(),
            pattern,
        })
    }

    /// Returns the regex source
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for PatternRule {
    fn key(&self) -> &RuleKey {
        &self.key
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Pattern
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn matcher(&self) -> String {
        self.pattern.as_str().to_string()
    }

    fn check(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}
