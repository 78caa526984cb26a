#![forbid(unsafe_code)]

//! Rule table definitions
//!
//! A rule table is a versioned TOML document declaring field categories and
//! their ordered rules:
//!
//! ```toml
//! [table]
//! version = "1"
//! name = "field-validation"
//!
//! [[category]]
//! name = "GIFT_AMOUNT"
//!
//! [[category.rule]]
//! key = "min"
//! description = "The minimum gift amount is $5"
//! predicate = { type = "min_integer", min = 5 }
//! ```

use crate::error::RuleError;
use crate::rules::{PatternRule, Predicate, PredicateRule, Rule, RuleSet};
use crate::types::{Category, RuleKey};
use serde::Deserialize;
use std::path::Path;

/// The only rule table version this build understands
pub const SUPPORTED_TABLE_VERSION: &str = "1";

/// TOML structure for a rule table file
#[derive(Debug, Deserialize)]
pub struct RuleTable {
    table: TableSection,
    #[serde(default, rename = "category")]
    categories: Vec<CategoryDefinition>,
}

#[derive(Debug, Deserialize)]
struct TableSection {
    version: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryDefinition {
    name: String,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleDefinition>,
}

#[derive(Debug, Deserialize)]
struct RuleDefinition {
    key: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    predicate: Option<Predicate>,
}

impl RuleTable {
    /// Parse a rule table from TOML content
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidDefinition` if the TOML is malformed and
    /// `RuleError::UnsupportedVersion` if the table version is not `"1"`.
    pub fn from_toml(content: &str) -> Result<Self, RuleError> {
        let table: RuleTable = toml::from_str(content).map_err(|e| {
            RuleError::InvalidDefinition(format!("Failed to parse rule table: {}", e))
        })?;

        if table.table.version != SUPPORTED_TABLE_VERSION {
            return Err(RuleError::UnsupportedVersion(table.table.version));
        }

        Ok(table)
    }

    /// Parse a rule table from a TOML file path
    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuleError::InvalidDefinition(format!(
                "Failed to read rule table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Returns the table name, if declared
    pub fn name(&self) -> Option<&str> {
        self.table.name.as_deref()
    }

    /// Number of categories declared in this table
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Compile every category into a RuleSet, in declaration order
    ///
    /// # Errors
    ///
    /// Fails on the first invalid category name, rule key, rule matcher,
    /// regex, or duplicate rule key.
    pub fn into_rule_sets(self) -> Result<Vec<RuleSet>, RuleError> {
        self.categories
            .into_iter()
            .map(CategoryDefinition::compile)
            .collect()
    }
}

impl CategoryDefinition {
    fn compile(self) -> Result<RuleSet, RuleError> {
        let category = Category::new(self.name.clone()).ok_or_else(|| {
            RuleError::InvalidDefinition(format!("Invalid field category name: {}", self.name))
        })?;

        let mut rule_set = RuleSet::new(category.clone());
        for definition in self.rules {
            rule_set.push(definition.compile(&category)?)?;
        }
        Ok(rule_set)
    }
}

impl RuleDefinition {
    fn compile(self, category: &Category) -> Result<Box<dyn Rule>, RuleError> {
        let key = RuleKey::new(self.key.clone()).ok_or_else(|| {
            RuleError::InvalidDefinition(format!(
                "Invalid rule key '{}' in category {}",
                self.key, category
            ))
        })?;

        match (self.pattern, self.predicate) {
            (Some(pattern), None) => Ok(Box::new(PatternRule::new(
                category,
                key,
                self.description,
                &pattern,
            )?)),
            (None, Some(predicate)) => Ok(Box::new(PredicateRule::new(
                key,
                self.description,
                predicate,
            ))),
            (Some(_), Some(_)) => Err(RuleError::InvalidDefinition(format!(
                "Rule {}.{} declares both a pattern and a predicate",
                category, key
            ))),
            (None, None) => Err(RuleError::InvalidDefinition(format!(
                "Rule {}.{} declares neither a pattern nor a predicate",
                category, key
            ))),
        }
    }
}
