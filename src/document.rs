//! Documents loaded from disk

use crate::classify::{classifier_for, Language, LineClassifier};
use crate::detect::{infer_detailed, Inference};
use crate::error::{DetectError, DetectResult};
use std::path::{Path, PathBuf};

/// A source file's text and language
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub language: Language,
    source: String,
}

impl Document {
    /// Read a file. Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> DetectResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| DetectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::from_source(path, source))
    }

    pub fn from_source(path: &Path, source: impl Into<String>) -> Self {
        let source = source.into();
        let language = Language::detect(path, &source);
        Self {
            path: path.to_path_buf(),
            language,
            source,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Lines in order, without their terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.lines()
    }

    /// Classifier matching this document's language
    pub fn classifier(&self) -> DetectResult<Box<dyn LineClassifier>> {
        classifier_for(self.language, &self.source)
    }

    pub fn detect(&self) -> DetectResult<Inference> {
        let classifier = self.classifier()?;
        Ok(infer_detailed(self.lines(), classifier.as_ref()))
    }
}
