#![forbid(unsafe_code)]

//! Core Rule trait for defining named pass/fail checks

use crate::types::{RuleKey, RuleKind};
use std::fmt;

/// Trait that all rules must implement
///
/// A rule is a single named check applied to the text form of a field
/// value. Rules are immutable once constructed and never see anything but
/// the value, so checking is a pure function.
/// The trait is `Send + Sync` so a registry can be shared across threads.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Returns the key of this rule, unique within its category
    fn key(&self) -> &RuleKey;

    /// Returns whether this rule is a pattern or a predicate
    fn kind(&self) -> RuleKind;

    /// Returns a human-readable description of what this rule checks
    fn description(&self) -> &str;

    /// Returns a printable form of the matcher (the regex source or the
    /// predicate definition)
    fn matcher(&self) -> String;

    /// Returns true if `value` satisfies this rule
    fn check(&self, value: &str) -> bool;
}
