//! Indentation inference for source files
//!
//! Looks at the first [`SAMPLE_LINES`] lines of a document, skips anything
//! that is not code (blank lines, comments, strings, docstrings), and votes
//! on the most common change in leading spaces between consecutive code
//! lines. A tab-indented code line settles the question immediately.
//!
//! ```
//! use indent_detective::{infer, Verdict};
//!
//! let lines = ["fn main() {", "    let x = 1;", "}"];
//! let verdict = infer(lines, &|_row: usize, text: &str| !text.trim().is_empty());
//! assert_eq!(verdict, Verdict::Spaces(4));
//! ```
//!
//! Hosts keep per-document state in a [`Session`], which also remembers
//! manual choices made through the selector ([`IndentChoice`]).

pub mod classify;
pub mod config;
pub mod detect;
pub mod document;
pub mod error;
pub mod models;
pub mod reporters;
pub mod session;
pub mod settings;

pub use classify::{Language, LineClassifier};
pub use detect::{infer, infer_detailed, Inference, Verdict, SAMPLE_LINES};
pub use document::Document;
pub use error::{DetectError, DetectResult};
pub use session::Session;
pub use settings::{IndentChoice, IndentSettings, POSSIBLE_INDENTATIONS};
