#![forbid(unsafe_code)]

//! Message template lookup
//!
//! UI copy belongs to the presentation layer. The engine asks a
//! [`TemplateSource`] for the template of each failed rule and only formats
//! what it is given.

use crate::config::Config;
use crate::types::{Category, RuleKey};
use std::collections::HashMap;

/// Supplies message templates for failed rules
///
/// Implemented for closures `Fn(&str, &str) -> Option<String>` taking the
/// category and the rule key.
pub trait TemplateSource: Sync {
    /// Template for `rule_key` in `category`, if the source has one
    fn template(&self, category: &str, rule_key: &str) -> Option<String>;
}

impl<F> TemplateSource for F
where
    F: Fn(&str, &str) -> Option<String> + Sync,
{
    fn template(&self, category: &str, rule_key: &str) -> Option<String> {
        self(category, rule_key)
    }
}

/// A source with no templates; every message falls back to the rule description
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateSource for NoTemplates {
    fn template(&self, _category: &str, _rule_key: &str) -> Option<String> {
        None
    }
}

/// Templates held in memory, keyed by category then rule key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<Category, HashMap<RuleKey, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog built from the `[messages]` tables of a configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            templates: config.messages.clone(),
        }
    }

    /// Add or replace a template
    pub fn insert(&mut self, category: Category, rule_key: RuleKey, template: impl Into<String>) {
        self.templates
            .entry(category)
            .or_default()
            .insert(rule_key, template.into());
    }

    /// Add a template, builder style
    pub fn with_template(
        mut self,
        category: Category,
        rule_key: RuleKey,
        template: impl Into<String>,
    ) -> Self {
        self.insert(category, rule_key, template);
        self
    }

    /// Number of templates across all categories
    pub fn len(&self) -> usize {
        self.templates.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateSource for MessageCatalog {
    fn template(&self, category: &str, rule_key: &str) -> Option<String> {
        self.templates
            .get(category)
            .and_then(|rules| rules.get(rule_key))
            .cloned()
    }
}
