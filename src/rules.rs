#![forbid(unsafe_code)]

//! Rule definitions, rule sets and the registry

pub mod builtin;
mod pattern_rule;
mod predicate_rule;
pub mod registry;
mod rule;
mod rule_set;
mod table;

// Re-export core types
pub use pattern_rule::PatternRule;
pub use predicate_rule::{CharClass, Predicate, PredicateRule, parse_leading_integer};
pub use registry::RuleRegistry;
pub use rule::Rule;
pub use rule_set::RuleSet;
pub use table::{RuleTable, SUPPORTED_TABLE_VERSION};
