#![forbid(unsafe_code)]

//! Built-in rule table embedded at compile time
//!
//! The field validation table is compiled into the binary using
//! `include_str!` so the library works without external rule files.

/// Embedded field validation rule table
pub const BUILTIN_RULE_TABLE: &str =
    include_str!("../../builtin-rules/field-validation.toml");

/// Field categories defined by the embedded table
pub const BUILTIN_CATEGORIES: &[&str] = &[
    "FIRST_NAME",
    "MIDDLE_NAME",
    "LAST_NAME",
    "PHONE",
    "EMAIL",
    "USERNAME",
    "PASSWORD",
    "STREET_ADDR_1",
    "STREET_ADDR_2",
    "CITY",
    "STATE",
    "POSTAL_CODE",
    "COUNTRY",
    "PLEDGE_ID",
    "CURRENCY",
    "GIFT_AMOUNT",
    "CC_NUMBER",
    "CC_NAME",
    "CC_EXPIRATION",
    "CC_CVV",
    "CANCEL_REASON",
    "CANCEL_COMMENT",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;
    use crate::types::RuleKey;

    fn keys(category: &str) -> Vec<String> {
        let sets = RuleTable::from_toml(BUILTIN_RULE_TABLE)
            .unwrap()
            .into_rule_sets()
            .unwrap();
        let set = sets
            .iter()
            .find(|set| set.category().as_str() == category)
            .unwrap_or_else(|| panic!("missing category {}", category));
        set.keys().map(RuleKey::as_str).map(String::from).collect()
    }

    #[test]
    fn test_builtin_table_compiles() {
        let table = RuleTable::from_toml(BUILTIN_RULE_TABLE).unwrap();
        assert_eq!(table.name(), Some("field-validation"));
        let sets = table.into_rule_sets().unwrap();

        let names: Vec<&str> = sets.iter().map(|s| s.category().as_str()).collect();
        assert_eq!(names, BUILTIN_CATEGORIES);
        assert!(sets.iter().all(|set| !set.is_empty()));
    }

    #[test]
    fn test_builtin_rule_order() {
        assert_eq!(keys("EMAIL"), vec!["format", "hasAtSymbol", "minMax"]);
        assert_eq!(
            keys("PASSWORD"),
            vec![
                "capitalAlpha",
                "format",
                "lowercaseAlpha",
                "minMax",
                "number",
                "specialCharacter"
            ]
        );
        assert_eq!(keys("CC_EXPIRATION"), vec!["format", "validMonth"]);
        assert_eq!(keys("GIFT_AMOUNT"), vec!["min"]);
        assert_eq!(
            keys("STREET_ADDR_1"),
            vec!["format", "illegalChar", "minMax"]
        );
    }
}
