//! Report data models
//!
//! What the CLI collects per file and renders through the reporters.

use crate::classify::Language;
use crate::detect::{Bucket, Inference, Verdict};
use crate::settings::IndentSettings;
use serde::Serialize;
use std::collections::BTreeMap;

/// Detection result for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the scanned root
    pub path: String,
    pub language: Language,
    /// Raw verdict (before validation; `Unknown` for manual files)
    pub verdict: Verdict,
    /// Settings after applying the verdict or the manual choice
    pub settings: IndentSettings,
    /// Status text for `settings`
    pub status: String,
    /// Indentation came from a manual override
    pub manual: bool,
    pub lines_scanned: usize,
    pub histogram: Vec<Bucket>,
}

impl FileReport {
    pub fn detected(
        path: impl Into<String>,
        language: Language,
        inference: &Inference,
        settings: IndentSettings,
    ) -> Self {
        Self {
            path: path.into(),
            language,
            verdict: inference.verdict,
            status: settings.to_string(),
            settings,
            manual: false,
            lines_scanned: inference.lines_scanned,
            histogram: inference.histogram.buckets().to_vec(),
        }
    }

    pub fn manual(path: impl Into<String>, language: Language, settings: IndentSettings) -> Self {
        Self {
            path: path.into(),
            language,
            verdict: Verdict::Unknown,
            status: settings.to_string(),
            settings,
            manual: true,
            lines_scanned: 0,
            histogram: Vec::new(),
        }
    }
}

/// A file that could not be read or parsed
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    pub path: String,
    pub message: String,
}

/// Verdict counts across a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub tabs: usize,
    /// Width to number of files
    pub spaces: BTreeMap<usize, usize>,
    pub unknown: usize,
    pub manual: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_files(files: &[FileReport], errors: &[FileError]) -> Self {
        let mut summary = Summary {
            total_files: files.len(),
            errors: errors.len(),
            ..Default::default()
        };
        for file in files {
            if file.manual {
                summary.manual += 1;
                continue;
            }
            match file.verdict {
                Verdict::Tabs => summary.tabs += 1,
                Verdict::Spaces(n) => *summary.spaces.entry(n).or_insert(0) += 1,
                Verdict::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}

/// Everything one detection run produced
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub files: Vec<FileReport>,
    pub errors: Vec<FileError>,
    pub summary: Summary,
}

impl DetectionReport {
    /// Files and errors are sorted by path
    pub fn new(mut files: Vec<FileReport>, mut errors: Vec<FileError>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        errors.sort_by(|a, b| a.path.cmp(&b.path));
        let summary = Summary::from_files(&files, &errors);
        Self {
            files,
            errors,
            summary,
        }
    }
}
