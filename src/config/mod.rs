//! Configuration module for indent-detective
//!
//! This module handles:
//! - Project-level configuration (indent-detective.toml)
//! - User-level defaults (~/.config/indent-detective/config.toml)
//! - Per-path manual overrides and exclusions

mod project_config;
mod user_config;

pub use project_config::{
    load_config, load_project_config, load_toml_config, ExcludeConfig, IndentDefaults,
    IndentValue, ProjectConfig, CONFIG_FILE_NAME,
};
pub use user_config::{UserConfig, DEFAULT_INDENT_ENV};
