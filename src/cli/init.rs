//! Init command - write an example indent-detective.toml

use anyhow::{Context, Result};
use console::style;
use indent_detective::config::CONFIG_FILE_NAME;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r#"# indent-detective configuration

[defaults]
# Indentation assumed until a file gives enough evidence: "tabs" or a width
# (2, 3, 4, 6, 8)
indent = 2

[overrides]
# Manual indentation by path pattern. The longest matching pattern wins;
# "auto" turns detection back on below a broader pattern.
# "vendor/**" = "tabs"
# "*.py" = 4
# "vendor/python/**" = "auto"

[exclude]
# Paths never scanned (in addition to .gitignore and .indentdetectiveignore)
paths = []
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(CONFIG_FILE_NAME).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Detect indentation", style("indent-detective detect .").cyan());
    println!("  {} Follow edits live", style("indent-detective watch").cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indent_detective::config::load_toml_config;
    use indent_detective::settings::IndentSettings;

    #[test]
    fn test_example_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        let config = load_toml_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.default_settings(), IndentSettings::spaces(2));
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_existing_config_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[defaults]\nindent = 8\n").unwrap();
        run(dir.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[defaults]\nindent = 8\n"
        );
    }
}
