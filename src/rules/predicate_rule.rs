#![forbid(unsafe_code)]

//! Predicate-based rule implementation
//!
//! Predicates cover checks that a single regular expression cannot express
//! with the `regex` crate: numeric comparisons on a leniently parsed integer,
//! and "contains each of these character classes" checks that the legacy
//! tables wrote with lookaheads.

use crate::rules::Rule;
use crate::types::{RuleKey, RuleKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character classes a `contains_all` predicate can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// ASCII digit
    Digit,
    /// A literal space character
    Space,
    /// ASCII letter or Latin-1 accented letter (`À-Ö`, `Ø-ö`, `ø-ÿ`)
    Letter,
}

impl CharClass {
    fn contains(&self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Space => c == ' ',
            CharClass::Letter => {
                c.is_ascii_alphabetic()
                    || ('À'..='Ö').contains(&c)
                    || ('Ø'..='ö').contains(&c)
                    || ('ø'..='ÿ').contains(&c)
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            CharClass::Digit => "digit",
            CharClass::Space => "space",
            CharClass::Letter => "letter",
        }
    }
}

/// Predicate logic a rule can apply to a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Leading integer of the value is at least `min`
    MinInteger { min: i64 },

    /// Value is a month number no greater than 12
    ///
    /// Two-or-more character input must be greater than zero (so `00` fails),
    /// a single character is not checked against zero.
    CalendarMonth,

    /// Value contains no forbidden character and at least one character of
    /// every required class
    ContainsAll {
        require: Vec<CharClass>,
        #[serde(default)]
        forbidden: String,
    },
}

impl Predicate {
    /// Apply the predicate to the text form of a value
    pub fn test(&self, value: &str) -> bool {
        match self {
            Predicate::MinInteger { min } => {
                parse_leading_integer(value).is_some_and(|n| n >= *min)
            }
            Predicate::CalendarMonth => {
                let Some(month) = parse_leading_integer(value) else {
                    return false;
                };
                let is_not_zero = if value.chars().count() > 1 {
                    month > 0
                } else {
                    true
                };
                is_not_zero && month <= 12
            }
            Predicate::ContainsAll { require, forbidden } => {
                if value.chars().any(|c| forbidden.contains(c)) {
                    return false;
                }
                require
                    .iter()
                    .all(|class| value.chars().any(|c| class.contains(c)))
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::MinInteger { min } => write!(f, "integer >= {}", min),
            Predicate::CalendarMonth => write!(f, "calendar month (1-12)"),
            Predicate::ContainsAll { require, forbidden } => {
                let classes: Vec<&str> = require.iter().map(CharClass::as_str).collect();
                write!(f, "contains {}", classes.join(" + "))?;
                if !forbidden.is_empty() {
                    write!(f, ", none of {}", forbidden)?;
                }
                Ok(())
            }
        }
    }
}

/// Parse the leading integer of a string the way legacy form scripts did
///
/// Leading whitespace is skipped and an optional sign is accepted. A `0x` or
/// `0X` prefix switches to hexadecimal; otherwise digits are decimal. Parsing
/// stops at the first character that is not a digit of the radix. Returns
/// None when no digit is found. Magnitudes beyond `i64` saturate.
pub fn parse_leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(None, |acc: Option<i64>, digit| {
            Some(
                acc.unwrap_or(0)
                    .saturating_mul(i64::from(radix))
                    .saturating_add(i64::from(digit)),
            )
        })?;

    Some(if negative { -magnitude } else { magnitude })
}

/// A rule that passes when its predicate holds for the value
#[derive(Debug)]
pub struct PredicateRule {
    key: RuleKey,
    description: String,
    predicate: Predicate,
}

impl PredicateRule {
    /// Creates a new PredicateRule
    pub fn new(key: RuleKey, description: impl Into<String>, predicate: Predicate) -> Self {
        PredicateRule {
            key,
            description: description.into(),
            predicate,
        }
    }

    /// Returns the predicate this rule applies
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl Rule for PredicateRule {
    fn key(&self) -> &RuleKey {
        &self.key
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Predicate
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn matcher(&self) -> String {
        self.predicate.to_string()
    }

    fn check(&self, value: &str) -> bool {
        self.predicate.test(value)
    }
}
