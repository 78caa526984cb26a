#![forbid(unsafe_code)]

//! Rule listing formatters
//!
//! Renders the categories of a registry and their ordered rules for the
//! `fieldrules list` command, in human-readable or JSONL form.

use crate::rules::{RuleRegistry, RuleSet};
use serde::Serialize;

/// One rule as shown in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    pub key: String,
    pub kind: &'static str,
    pub description: String,
    pub matcher: String,
}

/// A category and its rules in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    pub category: String,
    pub rules: Vec<RuleEntry>,
}

impl CategoryListing {
    pub fn from_rule_set(rule_set: &RuleSet) -> Self {
        Self {
            category: rule_set.category().to_string(),
            rules: rule_set
                .iter()
                .map(|rule| RuleEntry {
                    key: rule.key().to_string(),
                    kind: rule.kind().as_str(),
                    description: rule.description().to_string(),
                    matcher: rule.matcher(),
                })
                .collect(),
        }
    }

    /// Listings for every category of `registry`, sorted by category name
    pub fn from_registry(registry: &RuleRegistry) -> Vec<Self> {
        registry
            .categories()
            .into_iter()
            .filter_map(|category| registry.get_rule_set(category.as_str()).ok())
            .map(Self::from_rule_set)
            .collect()
    }
}

/// Human-readable formatter for rule listings
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingHumanFormatter;

impl ListingHumanFormatter {
    pub fn new() -> Self {
        ListingHumanFormatter
    }

    pub fn format(&self, listings: &[CategoryListing]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Field categories ({}):\n", listings.len()));

        for listing in listings {
            output.push('\n');
            output.push_str(&format!(
                "{} ({} rule{})\n",
                listing.category,
                listing.rules.len(),
                if listing.rules.len() == 1 { "" } else { "s" }
            ));
            for (position, rule) in listing.rules.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} [{}] {}\n",
                    position + 1,
                    rule.key,
                    rule.kind,
                    rule.matcher
                ));
                if !rule.description.is_empty() {
                    output.push_str(&format!("     {}\n", rule.description));
                }
            }
        }

        output
    }
}

/// JSONL formatter for rule listings, one line per category
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingJsonlFormatter;

impl ListingJsonlFormatter {
    pub fn new() -> Self {
        ListingJsonlFormatter
    }

    pub fn format(&self, listings: &[CategoryListing]) -> String {
        let mut output = String::new();

        for listing in listings {
            match serde_json::to_string(listing) {
                Ok(json) => {
                    output.push_str(&json);
                    output.push('\n');
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize category listing"),
            }
        }

        output
    }
}
