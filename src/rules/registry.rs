#![forbid(unsafe_code)]

//! Rule registry mapping field categories to rule sets
//!
//! The RuleRegistry is responsible for:
//! - Loading the embedded field validation table
//! - Loading additional rule tables from files and directories
//! - Rejecting duplicate categories at load time
//! - Providing access to rule sets by category name
//!
//! A registry is built once and is read-only afterwards. Code that needs a
//! process-wide registry publishes one with [`install`] before any lookup.

use crate::config::Config;
use crate::error::{RuleError, ValidationError};
use crate::rules::{RuleSet, RuleTable, builtin};
use crate::types::Category;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();

/// Publish `registry` as the process-wide registry
///
/// This is the initialization barrier: it succeeds exactly once, and every
/// later [`global`] call observes the fully built registry.
///
/// # Errors
///
/// Returns `RuleError::AlreadyInstalled` if a registry was installed before.
pub fn install(registry: RuleRegistry) -> Result<&'static RuleRegistry, RuleError> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| RuleError::AlreadyInstalled)?;
    tracing::debug!("global rule registry installed");
    GLOBAL_REGISTRY.get().ok_or(RuleError::AlreadyInstalled)
}

/// The process-wide registry, if one has been installed
pub fn global() -> Option<&'static RuleRegistry> {
    GLOBAL_REGISTRY.get()
}

/// Registry for storing and looking up rule sets
///
/// The registry holds one RuleSet per field category, keyed by category.
pub struct RuleRegistry {
    rule_sets: HashMap<Category, RuleSet>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            rule_sets: HashMap::new(),
        }
    }

    /// Create a registry holding the embedded field validation table
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the embedded table is invalid.
    pub fn builtin() -> Result<Self, RuleError> {
        let mut registry = Self::new();
        registry.load_builtin()?;
        Ok(registry)
    }

    /// Build a registry from configuration
    ///
    /// This method:
    /// 1. Loads the embedded table (unless disabled)
    /// 2. Loads each configured rule table file or directory, in order
    ///
    /// Relative table paths are resolved against `base_dir`.
    pub fn build_from_config(config: &Config, base_dir: &Path) -> Result<Self, RuleError> {
        let mut registry = Self::new();

        if config.fieldrules.include_builtin {
            registry.load_builtin()?;
        }

        for path in config.rule_table_paths(base_dir) {
            if path.is_dir() {
                registry.load_tables_from_dir(&path)?;
            } else {
                registry.load_table_file(&path)?;
            }
        }

        tracing::debug!(categories = registry.len(), "rule registry built");
        Ok(registry)
    }

    /// Load the embedded field validation table
    pub fn load_builtin(&mut self) -> Result<usize, RuleError> {
        let table = RuleTable::from_toml(builtin::BUILTIN_RULE_TABLE)?;
        self.load_table(table)
    }

    /// Register every category of a parsed rule table
    ///
    /// Returns the number of categories added.
    pub fn load_table(&mut self, table: RuleTable) -> Result<usize, RuleError> {
        let name = table.name().unwrap_or("<unnamed>").to_string();
        let rule_sets = table.into_rule_sets()?;
        let count = rule_sets.len();

        for rule_set in rule_sets {
            self.register(rule_set)?;
        }

        tracing::debug!(table = %name, categories = count, "loaded rule table");
        Ok(count)
    }

    /// Load a single rule table file
    pub fn load_table_file(&mut self, path: &Path) -> Result<usize, RuleError> {
        let table = RuleTable::from_path(path)?;
        self.load_table(table)
    }

    /// Load every `.toml` rule table in a directory
    ///
    /// Files are loaded in file name order so duplicate-category errors are
    /// reproducible. Subdirectories are not visited. A missing directory is
    /// logged and skipped.
    pub fn load_tables_from_dir(&mut self, dir: &Path) -> Result<usize, RuleError> {
        if !dir.exists() {
            tracing::warn!(dir = %dir.display(), "rule table directory does not exist");
            return Ok(0);
        }

        if !dir.is_dir() {
            return Err(RuleError::InvalidDefinition(format!(
                "Path is not a directory: {}",
                dir.display()
            )));
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            RuleError::InvalidDefinition(format!(
                "Failed to read directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                RuleError::InvalidDefinition(format!(
                    "Failed to read directory entry in {}: {}",
                    dir.display(),
                    e
                ))
            })?;

            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut total = 0;
        for path in paths {
            total += self.load_table_file(&path)?;
        }
        Ok(total)
    }

    /// Register a rule set under its category
    ///
    /// # Errors
    ///
    /// Returns `RuleError::DuplicateCategory` if the category is already
    /// registered; the existing rule set is left untouched.
    pub fn register(&mut self, rule_set: RuleSet) -> Result<(), RuleError> {
        let category = rule_set.category().clone();
        if self.rule_sets.contains_key(&category) {
            return Err(RuleError::DuplicateCategory(category.as_str().to_string()));
        }
        self.rule_sets.insert(category, rule_set);
        Ok(())
    }

    /// Get the rule set for a category
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CategoryNotFound` if no rule set is
    /// registered under `category`.
    pub fn get_rule_set(&self, category: &str) -> Result<&RuleSet, ValidationError> {
        self.rule_sets
            .get(category)
            .ok_or_else(|| ValidationError::CategoryNotFound(category.to_string()))
    }

    /// Check whether a category is registered
    pub fn contains(&self, category: &str) -> bool {
        self.rule_sets.contains_key(category)
    }

    /// Iterate over all rule sets, in no particular order
    pub fn iter_rule_sets(&self) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.values()
    }

    /// All registered categories, sorted by name
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.rule_sets.keys().collect();
        categories.sort();
        categories
    }

    /// Get the number of categories in the registry
    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("categories", &self.categories())
            .finish()
    }
}
