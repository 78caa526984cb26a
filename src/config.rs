//! Configuration file parsing and validation

pub mod fieldrules_toml;

pub use fieldrules_toml::{
    CONFIG_FILE_NAME, ColorOption, Config, EvaluationConfig, FieldRulesMeta, OutputConfig,
    OutputFormat,
};
