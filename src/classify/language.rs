//! Source languages and their bundled grammars

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    TypeScript,
    Tsx,
    JavaScript,
    Rust,
    Go,
    Java,
    CSharp,
    C,
    Cpp,
    Kotlin,
    Ruby,
    Php,
    Swift,
    Unknown,
}

/// Extensions the CLI picks up when walking a tree
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "py", "pyi", // Python
    "ts", "mts", "cts", "tsx", // TypeScript
    "js", "jsx", "mjs", "cjs", // JavaScript
    "rs",   // Rust
    "go",   // Go
    "java", // Java
    "cs",   // C#
    "c", "h", // C
    "cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h++", // C++
    "kt", "kts", // Kotlin
    "rb",  // Ruby
    "php", // PHP
    "swift", // Swift
];

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "py" | "pyi" => Language::Python,
            "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "rs" => Language::Rust,
            "go" => Language::Go,
            "java" => Language::Java,
            "cs" => Language::CSharp,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h++" => Language::Cpp,
            "kt" | "kts" => Language::Kotlin,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "swift" => Language::Swift,
            _ => Language::Unknown,
        }
    }

    /// Language for a file, looking at `source` to tell C++ headers from C ones
    pub fn detect(path: &Path, source: &str) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if ext != "h" {
            return Self::from_extension(ext);
        }

        let sample = &source[..floor_char_boundary(source, 16 * 1024)];
        let cpp_markers = [
            "class ",
            "namespace ",
            "template<",
            "template <",
            "typename ",
            "constexpr",
            "std::",
        ];

        if cpp_markers.iter().any(|m| sample.contains(m)) {
            Language::Cpp
        } else {
            Language::C
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
            Language::JavaScript => "JavaScript",
            Language::Rust => "Rust",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Kotlin => "Kotlin",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Unknown => "Unknown",
        }
    }

    /// tree-sitter grammar for this language, if one is bundled
    pub fn grammar(&self) -> Option<tree_sitter::Language> {
        let language: tree_sitter::Language = match self {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::Kotlin
            | Language::Ruby
            | Language::Php
            | Language::Swift
            | Language::Unknown => return None,
        };
        Some(language)
    }

    pub fn has_grammar(&self) -> bool {
        !matches!(
            self,
            Language::Kotlin
                | Language::Ruby
                | Language::Php
                | Language::Swift
                | Language::Unknown
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("tsx"), Language::Tsx);
        assert_eq!(Language::from_extension("mjs"), Language::JavaScript);
        assert_eq!(Language::from_extension("hpp"), Language::Cpp);
        assert_eq!(Language::from_extension("rb"), Language::Ruby);
        assert_eq!(Language::from_extension("txt"), Language::Unknown);
    }

    #[test]
    fn test_header_detection() {
        let header = PathBuf::from("vec.h");
        assert_eq!(Language::detect(&header, "int add(int a, int b);\n"), Language::C);
        assert_eq!(
            Language::detect(&header, "namespace util {\nclass Vec {};\n}\n"),
            Language::Cpp
        );
    }

    #[test]
    fn test_every_supported_extension_is_known() {
        for ext in SUPPORTED_EXTENSIONS {
            assert_ne!(Language::from_extension(ext), Language::Unknown, "{}", ext);
        }
    }

    #[test]
    fn test_grammar_matches_has_grammar() {
        for lang in [
            Language::Python,
            Language::TypeScript,
            Language::Tsx,
            Language::JavaScript,
            Language::Rust,
            Language::Go,
            Language::Java,
            Language::CSharp,
            Language::C,
            Language::Cpp,
            Language::Kotlin,
            Language::Ruby,
            Language::Php,
            Language::Swift,
            Language::Unknown,
        ] {
            assert_eq!(lang.grammar().is_some(), lang.has_grammar(), "{}", lang);
        }
    }
}
