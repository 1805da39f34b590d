//! Application settings loading from config.toml
//!
//! This module provides functionality to load backend settings from a TOML
//! configuration file. Missing file or missing keys fall back to defaults, so
//! a bare checkout runs without any configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default number of orders per search result page.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Settings structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Number of orders per search result page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Optional database URL override (otherwise `DATABASE_URL` / built-in default)
    #[serde(default)]
    pub database_url: Option<String>,
}

const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            database_url: None,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml), falling back to
/// defaults when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new("config.toml").exists() {
        load_settings("config.toml")
    } else {
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            page_size = 50
            database_url = "sqlite::memory:"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.database_url.as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert!(settings.database_url.is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result: std::result::Result<Settings, _> = toml::from_str("page_size = \"many\"");
        assert!(result.is_err());
    }
}
