//! Initialize a fieldrules project
//!
//! Writes a starter fieldrules.toml with every section present and the
//! optional settings commented out.

use std::fs;
use std::path::Path;

/// Default content for fieldrules.toml
pub const DEFAULT_FIELDRULES_TOML: &str = r#"[fieldrules]
version = "1"

# Load the embedded field validation table
include_builtin = true

# Additional rule table files, or directories of .toml tables,
# relative to this file
# rule_tables = ["rules/"]

[evaluation]
# "collect_all" reports every failed rule, "fail_fast" only the first
mode = "collect_all"

# Text for a template placeholder with no value:
# "legacy" (undefined), "empty", or "strict" (error)
missing_placeholder = "legacy"

# Message templates per category and rule key. {name} reads a field
# property and {data-name} a data attribute.
# [messages.PASSWORD]
# capitalAlpha = "{name} needs a capital letter"
# minMax = "Use {data-min} to {data-max} characters"

[output]
format = "human"
color = "auto"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What init did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    Skipped,
}

/// Write the starter configuration to `path`
///
/// An existing file is left alone unless `force` is set.
///
/// # Errors
///
/// Returns `InitError::Path` if `path` is a directory and `InitError::Io` if
/// the file cannot be written.
pub fn run_init(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    if path.is_dir() {
        return Err(InitError::Path(format!(
            "'{}' is a directory",
            path.display()
        )));
    }

    let outcome = match (path.exists(), force) {
        (true, false) => return Ok(InitOutcome::Skipped),
        (true, true) => InitOutcome::Overwritten,
        (false, _) => InitOutcome::Created,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_FIELDRULES_TOML)?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(DEFAULT_FIELDRULES_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fieldrules.toml");

        assert_eq!(run_init(&path, false).unwrap(), InitOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_FIELDRULES_TOML);
    }

    #[test]
    fn test_init_skips_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fieldrules.toml");
        fs::write(&path, "custom").unwrap();

        assert_eq!(run_init(&path, false).unwrap(), InitOutcome::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");

        assert_eq!(run_init(&path, true).unwrap(), InitOutcome::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_FIELDRULES_TOML);
    }

    #[test]
    fn test_init_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config/forms/fieldrules.toml");

        assert_eq!(run_init(&path, false).unwrap(), InitOutcome::Created);
        assert!(path.exists());
    }

    #[test]
    fn test_init_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            run_init(temp_dir.path(), true),
            Err(InitError::Path(_))
        ));
    }
}
