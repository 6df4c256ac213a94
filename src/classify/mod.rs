//! Line classification
//!
//! The inferencer only counts "code" lines. Which lines are code is answered
//! by a [`LineClassifier`]: blank lines never are, and neither are lines
//! whose scope stack has a comment, docstring, or string in it.
//!
//! - [`ScopeClassifier`] builds scope stacks from a tree-sitter parse.
//! - [`BlankLineClassifier`] is the fallback for languages without a grammar.
//! - Any `Fn(usize, &str) -> bool` closure is a classifier too.

mod language;
mod scopes;

pub use language::{Language, SUPPORTED_EXTENSIONS};
pub use scopes::ScopeClassifier;

use crate::error::DetectResult;

/// Scope name fragments that disqualify a line from voting
pub const NON_CODE_SCOPES: &[&str] = &["comment", "docstring", "string"];

/// Decides whether a row of a document is code
pub trait LineClassifier {
    /// `row` is the zero-based row of `text` in the document
    fn is_code_line(&self, row: usize, text: &str) -> bool;
}

impl<F> LineClassifier for F
where
    F: Fn(usize, &str) -> bool,
{
    fn is_code_line(&self, row: usize, text: &str) -> bool {
        self(row, text)
    }
}

/// Empty or whitespace-only
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Whether a scope identifier marks a comment, docstring, or string
pub fn scope_disqualifies(scope: &str) -> bool {
    NON_CODE_SCOPES.iter().any(|marker| scope.contains(marker))
}

/// Treats every non-blank line as code
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLineClassifier;

impl LineClassifier for BlankLineClassifier {
    fn is_code_line(&self, _row: usize, text: &str) -> bool {
        !is_blank(text)
    }
}

/// Best available classifier for a document: scope-aware when a grammar is
/// bundled for `language`, blank-line only otherwise.
pub fn classifier_for(language: Language, source: &str) -> DetectResult<Box<dyn LineClassifier>> {
    if language.has_grammar() {
        Ok(Box::new(ScopeClassifier::parse(language, source)?))
    } else {
        tracing::debug!("No grammar for {}, using blank-line classification", language);
        Ok(Box::new(BlankLineClassifier))
    }
}
