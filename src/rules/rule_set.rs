#![forbid(unsafe_code)]

//! Ordered rule sets keyed by field category

use crate::error::RuleError;
use crate::rules::Rule;
use crate::types::{Category, RuleKey};

/// The ordered rules for one field category
///
/// Rules keep their declaration order and keys are unique within the set.
#[derive(Debug)]
pub struct RuleSet {
    category: Category,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Create an empty rule set for a category
    pub fn new(category: Category) -> Self {
        Self {
            category,
            rules: Vec::new(),
        }
    }

    /// Append a rule
    ///
    /// # Errors
    ///
    /// Returns `RuleError::DuplicateRuleKey` if a rule with the same key is
    /// already in the set.
    pub fn push(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError> {
        if self.get(rule.key().as_str()).is_some() {
            return Err(RuleError::DuplicateRuleKey {
                category: self.category.as_str().to_string(),
                key: rule.key().as_str().to_string(),
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Append a rule, builder style
    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Result<Self, RuleError> {
        self.push(rule)?;
        Ok(self)
    }

    /// Returns the category this set belongs to
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Look up a rule by key
    pub fn get(&self, key: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.key().as_str() == key)
            .map(|boxed| boxed.as_ref())
    }

    /// Iterate over rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|boxed| boxed.as_ref())
    }

    /// Rule keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &RuleKey> {
        self.rules.iter().map(|rule| rule.key())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
