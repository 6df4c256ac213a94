//! User-level configuration for indent-detective
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/indent-detective/config.toml

use super::project_config::IndentDefaults;
use super::IndentValue;
use crate::error::{DetectError, DetectResult};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable overriding the default indentation
pub const DEFAULT_INDENT_ENV: &str = "INDENT_DETECTIVE_DEFAULT";

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub defaults: IndentDefaults,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/indent-detective/config.toml)
    pub fn load() -> DetectResult<Self> {
        let mut config = match Self::user_config_path().filter(|p| p.exists()) {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|source| {
                    DetectError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                toml::from_str::<UserConfig>(&content)
                    .map_err(|source| DetectError::Config { path, source })?
            }
            None => UserConfig::default(),
        };

        if let Ok(value) = std::env::var(DEFAULT_INDENT_ENV) {
            config.defaults.indent = Some(IndentValue::Name(value));
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("indent-detective").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parsing() {
        let config: UserConfig = toml::from_str("[defaults]\nindent = \"tabs\"\n").unwrap();
        assert_eq!(
            config.defaults.indent,
            Some(IndentValue::Name("tabs".to_string()))
        );
    }

    #[test]
    fn test_toml_parsing_minimal() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.defaults.indent.is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(toml::from_str::<UserConfig>("[defaults\nindent = ").is_err());
    }

    #[test]
    fn test_user_config_path() {
        if let Some(p) = UserConfig::user_config_path() {
            assert!(p.ends_with("indent-detective/config.toml"));
        }
    }
}
