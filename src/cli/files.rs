//! Source file discovery for the detect and watch commands

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use indent_detective::classify::SUPPORTED_EXTENSIONS;
use indent_detective::config::ProjectConfig;
use std::path::{Path, PathBuf};

/// Custom ignore file honoured next to .gitignore
pub const IGNORE_FILE_NAME: &str = ".indentdetectiveignore";

/// Collect all source files under `root`, respecting .gitignore,
/// `.indentdetectiveignore` and `[exclude]` patterns
pub fn collect_source_files(root: &Path, config: &ProjectConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let mut files = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !is_supported(path) {
            continue;
        }

        let rel = relative_to(path, root);
        if config.should_exclude(rel) {
            tracing::debug!("Excluded by config: {}", rel.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    tracing::debug!("Found {} source files under {}", files.len(), root.display());
    Ok(files)
}

/// Whether the file has an extension we scan
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// `path` relative to `root`, or `path` itself when it lies elsewhere
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Forward-slash form used in reports
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Canonicalize a user-supplied path with a readable error
pub fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))
}
