//! Project-level configuration support
//!
//! Loads per-project configuration from `indent-detective.toml` in the
//! scanned root.
//!
//! # Configuration Format
//!
//! ```toml
//! # indent-detective.toml
//!
//! [defaults]
//! indent = 4            # settings before detection: "tabs" or a width
//!
//! [overrides]           # manual indentation by path pattern
//! "vendor/**" = "tabs"
//! "*.py" = 4
//! "vendor/py/**" = "auto"
//!
//! [exclude]
//! paths = ["generated/", "third_party/"]
//! ```
//!
//! When several override patterns match a path the longest pattern wins, so
//! a more specific `"auto"` can re-enable detection under an overridden tree.

use super::UserConfig;
use crate::error::{DetectError, DetectResult};
use crate::settings::{IndentChoice, IndentSettings};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// File name looked up in the scanned root
pub const CONFIG_FILE_NAME: &str = "indent-detective.toml";

/// An indentation in config: a bare width or a name like `"tabs"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IndentValue {
    Width(usize),
    Name(String),
}

impl IndentValue {
    pub fn choice(&self) -> DetectResult<IndentChoice> {
        match self {
            IndentValue::Width(n) => n.to_string().parse(),
            IndentValue::Name(name) => name.parse(),
        }
    }
}

/// Project-level configuration loaded from indent-detective.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Settings documents start with
    #[serde(default)]
    pub defaults: IndentDefaults,

    /// Path pattern to manual indentation
    #[serde(default)]
    pub overrides: BTreeMap<String, IndentValue>,

    /// Path exclusion patterns
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct IndentDefaults {
    /// Default indentation (`"tabs"` or a width); detection still wins
    #[serde(default)]
    pub indent: Option<IndentValue>,
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Paths/patterns to skip
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Load project configuration from the scanned root.
///
/// Returns default configuration if no config file is found or it fails to
/// parse (the failure is logged).
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let toml_path = root.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("{}", e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Project config merged over the user config
pub fn load_config(root: &Path) -> ProjectConfig {
    let mut config = load_project_config(root);
    match UserConfig::load() {
        Ok(user) => config.merge_user(user),
        Err(e) => warn!("Ignoring user config: {}", e),
    }
    config
}

/// Load configuration from a TOML file
pub fn load_toml_config(path: &Path) -> DetectResult<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| DetectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| DetectError::Config {
        path: path.to_path_buf(),
        source,
    })
}

impl ProjectConfig {
    /// Settings a document has before (or without) a usable verdict
    pub fn default_settings(&self) -> IndentSettings {
        let base = IndentSettings::default();
        let Some(value) = &self.defaults.indent else {
            return base;
        };
        match value.choice() {
            Ok(IndentChoice::Spaces(n)) => IndentSettings::spaces(n),
            Ok(IndentChoice::Tabs) => base.tabs(),
            Ok(IndentChoice::Automatic) => base,
            Err(e) => {
                warn!("defaults.indent: {}", e);
                base
            }
        }
    }

    /// Manual indentation configured for a path relative to the root.
    ///
    /// `None` means detect automatically.
    pub fn override_for(&self, path: &Path) -> Option<IndentChoice> {
        let path_str = normalize_path(path);

        let (pattern, value) = self
            .overrides
            .iter()
            .filter(|(pattern, _)| glob_match(pattern, &path_str))
            .max_by_key(|(pattern, _)| pattern.len())?;

        match value.choice() {
            Ok(IndentChoice::Automatic) => None,
            Ok(choice) => {
                debug!("{} matches override '{}' ({})", path_str, pattern, choice);
                Some(choice)
            }
            Err(e) => {
                warn!("overrides.\"{}\": {}", pattern, e);
                None
            }
        }
    }

    /// Check if a path (relative to the root) should be skipped
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = normalize_path(path);
        self.exclude
            .paths
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }

    /// Fill unset values from the user config
    pub fn merge_user(&mut self, user: UserConfig) {
        if self.defaults.indent.is_none() {
            self.defaults.indent = user.defaults.indent;
        }
    }
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Simple glob pattern matching on `/`-separated relative paths.
///
/// Matches only ever stop at segment boundaries: `vendor/**` covers
/// `vendor/x.c` but not `vendored/x.c`. A `*` never crosses a `/`, and a
/// `*` pattern without any `/` is matched against the file name.
fn glob_match(pattern: &str, path: &str) -> bool {
    // Handle **/X/** patterns (match if path contains X as a directory)
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let middle = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return path.contains(&format!("/{}/", middle))
            || path.starts_with(&format!("{}/", middle));
    }

    // Handle ** (match any path segments)
    if let Some((prefix, suffix)) = pattern.split_once("**") {
        let prefix = prefix.trim_end_matches('/');
        let suffix = suffix.trim_start_matches('/');

        let rest = if prefix.is_empty() {
            path
        } else if let Some(rest) = path.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
            rest
        } else {
            return false;
        };
        if suffix.is_empty() {
            return true;
        }

        // The suffix has to match the trailing segments exactly
        let depth = suffix.split('/').count();
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.len() < depth {
            return false;
        }
        let tail = segments[segments.len() - depth..].join("/");
        return glob_match(suffix, &tail);
    }

    // Handle single * (match within segment)
    if pattern.contains('*') {
        if !pattern.contains('/') {
            let name = path.rsplit('/').next().unwrap_or(path);
            return segment_match(pattern, name);
        }
        let pattern_segments: Vec<&str> = pattern.split('/').collect();
        let path_segments: Vec<&str> = path.split('/').collect();
        return pattern_segments.len() == path_segments.len()
            && pattern_segments
                .iter()
                .zip(&path_segments)
                .all(|(p, s)| segment_match(p, s));
    }

    // Exact match or directory prefix
    let dir = pattern.trim_end_matches('/');
    path == dir || path.starts_with(&format!("{}/", dir))
}

/// Match one path segment against a pattern with at most one `*`
fn segment_match(pattern: &str, segment: &str) -> bool {
    match pattern.split_once('*') {
        Some((head, tail)) => {
            segment.len() >= head.len() + tail.len()
                && segment.starts_with(head)
                && segment.ends_with(tail)
        }
        None => pattern == segment,
    }
}
