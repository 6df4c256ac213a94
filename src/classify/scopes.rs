//! Scope-aware line classification backed by tree-sitter
//!
//! For every row we take the innermost syntax node at the row's first
//! non-whitespace column and record the kinds of it and all its ancestors.
//! That stack plays the role of an editor's scope descriptor: a row whose
//! stack contains a comment, docstring, or string kind is not code.
//!
//! Only the row's leading token counts, so a line that opens with an inline
//! comment (`/* x */ int y;`) is classified as a comment even though code
//! follows it. Only the first [`SAMPLE_LINES`] rows are recorded.

use super::{is_blank, scope_disqualifies, Language, LineClassifier};
use crate::detect::SAMPLE_LINES;
use crate::error::{DetectError, DetectResult};
use tree_sitter::{Node, Parser, Point};

/// Synthetic scope pushed for Python docstrings
const DOCSTRING: &str = "docstring";

/// Per-row scope stacks for one document
#[derive(Debug, Clone)]
pub struct ScopeClassifier {
    rows: Vec<Vec<&'static str>>,
}

impl ScopeClassifier {
    /// Parse `source` and record the scope stack of every row
    pub fn parse(language: Language, source: &str) -> DetectResult<Self> {
        let grammar = language.grammar().ok_or(DetectError::NoGrammar {
            language: language.as_str(),
        })?;

        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| DetectError::Grammar {
                language: language.as_str(),
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(DetectError::Parse {
            language: language.as_str(),
        })?;
        let root = tree.root_node();

        let rows = source
            .split('\n')
            .take(SAMPLE_LINES)
            .enumerate()
            .map(|(row, line)| {
                let Some(column) = line.find(|c: char| !c.is_whitespace()) else {
                    return Vec::new();
                };
                let point = Point::new(row, column);
                match root.descendant_for_point_range(point, point) {
                    Some(node) => scope_stack(node, language),
                    None => Vec::new(),
                }
            })
            .collect();

        Ok(Self { rows })
    }

    /// Scope names at a row, innermost first (empty for blank or unknown rows)
    pub fn scopes_at(&self, row: usize) -> &[&'static str] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows recorded (at most [`SAMPLE_LINES`])
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl LineClassifier for ScopeClassifier {
    fn is_code_line(&self, row: usize, text: &str) -> bool {
        if is_blank(text) {
            return false;
        }
        !self.scopes_at(row).iter().any(|scope| scope_disqualifies(scope))
    }
}

fn scope_stack(node: Node<'_>, language: Language) -> Vec<&'static str> {
    let mut scopes = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current {
        scopes.push(n.kind());
        if language == Language::Python && is_python_docstring(&n) {
            scopes.push(DOCSTRING);
        }
        current = n.parent();
    }
    scopes
}

/// A string that is the whole of an expression statement
fn is_python_docstring(node: &Node<'_>) -> bool {
    node.kind() == "string"
        && node
            .parent()
            .is_some_and(|p| p.kind() == "expression_statement" && p.named_child_count() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_rows(language: Language, source: &str) -> Vec<usize> {
        let classifier = ScopeClassifier::parse(language, source).unwrap();
        source
            .split('\n')
            .enumerate()
            .filter(|(row, line)| classifier.is_code_line(*row, line))
            .map(|(row, _)| row)
            .collect()
    }

    #[test]
    fn test_python_comments_and_docstrings() {
        let source = r#"def greet(name):
    """Say hello.

        Indented docstring body.
    """
    # a comment
    message = "hi " + name
    return message
"#;
        assert_eq!(code_rows(Language::Python, source), vec![0, 6, 7]);

        let classifier = ScopeClassifier::parse(Language::Python, source).unwrap();
        assert!(classifier.scopes_at(1).contains(&"docstring"));
        assert!(classifier.scopes_at(5).contains(&"comment"));
        assert!(classifier.scopes_at(2).is_empty());
    }

    #[test]
    fn test_python_multiline_string_body() {
        let source = "query = \"\"\"\n      SELECT *\n  FROM t\n\"\"\"\nrun(query)\n";
        assert_eq!(code_rows(Language::Python, source), vec![0, 4]);
    }

    #[test]
    fn test_rust_block_comment_body() {
        let source = "/*\n   * header\n   */\nfn main() {\n    let x = 1;\n    // note\n}\n";
        assert_eq!(code_rows(Language::Rust, source), vec![3, 4, 6]);
    }

    #[test]
    fn test_javascript_template_literal() {
        let source = "const s = `\n        inside\n`;\nfoo(s);\n";
        assert_eq!(code_rows(Language::JavaScript, source), vec![0, 3]);
    }

    #[test]
    fn test_go_raw_string() {
        let source = "package main\n\nvar usage = `\n  -h  help\n`\n\nfunc main() {\n\tprintln(usage)\n}\n";
        assert_eq!(code_rows(Language::Go, source), vec![0, 2, 6, 7, 8]);
    }

    #[test]
    fn test_row_count_includes_trailing_line() {
        let classifier = ScopeClassifier::parse(Language::C, "int x;\n").unwrap();
        assert_eq!(classifier.row_count(), 2);
        assert!(classifier.scopes_at(99).is_empty());
    }

    #[test]
    fn test_leading_inline_comment_disqualifies_row() {
        let source = "int main() {\n  /* x */ int y;\n  int z;\n}\n";
        let classifier = ScopeClassifier::parse(Language::C, source).unwrap();
        assert!(classifier.scopes_at(1).contains(&"comment"));
        assert_eq!(code_rows(Language::C, source), vec![0, 2, 3]);
    }

    #[test]
    fn test_only_sampled_rows_are_recorded() {
        let source = "x = 1\n".repeat(500);
        let classifier = ScopeClassifier::parse(Language::Python, &source).unwrap();
        assert_eq!(classifier.row_count(), SAMPLE_LINES);
        assert!(classifier.scopes_at(SAMPLE_LINES - 1).contains(&"module"));
        assert!(classifier.scopes_at(SAMPLE_LINES).is_empty());
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        assert!(matches!(
            ScopeClassifier::parse(Language::Unknown, "x"),
            Err(DetectError::NoGrammar { .. })
        ));
    }
}
