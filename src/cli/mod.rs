//! CLI command definitions and handlers

mod detect;
mod files;
mod init;
mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indent_detective::settings::IndentChoice;
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// indent-detective - infer tabs vs. spaces and indent width from source
#[derive(Parser, Debug)]
#[command(name = "indent-detective")]
#[command(
    version,
    about = "Infer whether source files indent with tabs or 2, 3, 4, 6 or 8 spaces",
    long_about = "indent-detective looks at the first 100 lines of each file, skips blank lines \
and lines inside comments, strings and docstrings, and votes on the most common change in \
indentation between consecutive code lines.\n\n\
Run without a subcommand to detect the current directory:\n  \
indent-detective .",
    after_help = "\
Examples:
  indent-detective .                          Detect every file under the current directory
  indent-detective detect src/lib.rs          Detect a single file
  indent-detective detect . --format json     JSON output for scripting
  indent-detective watch                      Re-detect files as they are saved
  indent-detective init                       Write an example indent-detective.toml"
)]
pub struct Cli {
    /// Path to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect indentation of files and directories
    #[command(after_help = "\
Examples:
  indent-detective detect .                         Detect a whole tree
  indent-detective detect a.py b.go                 Detect specific files
  indent-detective detect . --format json           JSON output
  indent-detective detect . --indent-default tabs   Assume tabs where nothing is detected")]
    Detect {
        /// Files or directories (default: PATH)
        paths: Vec<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Settings assumed before detection: "tabs" or a width (2, 3, 4, 6, 8)
        #[arg(long)]
        indent_default: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Watch for file changes and re-detect
    Watch,

    /// Initialize an indent-detective.toml config file with example settings
    Init,

    /// List the manual indentation choices
    Choices,

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => detect::run(
            &cli.path,
            &[],
            detect::DetectOptions {
                format: "text",
                indent_default: None,
                output: None,
                workers: cli.workers,
            },
        ),

        Some(Commands::Detect {
            ref paths,
            ref format,
            ref indent_default,
            ref output,
        }) => detect::run(
            &cli.path,
            paths,
            detect::DetectOptions {
                format,
                indent_default: indent_default.as_deref(),
                output: output.as_deref(),
                workers: cli.workers,
            },
        ),

        Some(Commands::Watch) => watch::run(&cli.path),

        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Choices) => {
            for choice in IndentChoice::all() {
                println!("{}", choice);
            }
            Ok(())
        }

        Some(Commands::Version) => {
            println!("indent-detective {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
