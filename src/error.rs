//! Library error type
//!
//! Inference itself never fails. These cover the work around it: reading
//! files, setting up grammars, and parsing configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No grammar bundled for {language}")]
    NoGrammar { language: &'static str },

    #[error("Failed to load {language} grammar: {message}")]
    Grammar {
        language: &'static str,
        message: String,
    },

    #[error("Failed to parse {language} source")]
    Parse { language: &'static str },

    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid indent '{0}' (expected auto, tabs, or one of 2, 3, 4, 6, 8)")]
    InvalidIndent(String),
}

pub type DetectResult<T> = Result<T, DetectError>;
