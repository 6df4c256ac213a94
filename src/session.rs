//! Per-document detection state owned by the host
//!
//! Tracks each open document's indent settings and whether the user picked
//! an indentation by hand. Manually set documents are left alone by
//! [`Session::run`] until [`IndentChoice::Automatic`] is chosen or the
//! document is closed.

use crate::classify::LineClassifier;
use crate::detect::{infer, Verdict};
use crate::settings::{IndentChoice, IndentSettings};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
struct DocumentState {
    settings: IndentSettings,
    manual: bool,
}

/// Documents keyed by identity `K` (the CLI uses canonical paths)
#[derive(Debug, Clone)]
pub struct Session<K> {
    defaults: IndentSettings,
    documents: HashMap<K, DocumentState>,
}

impl<K: Eq + Hash + Clone> Session<K> {
    /// New documents start out with `defaults`
    pub fn new(defaults: IndentSettings) -> Self {
        Self {
            defaults,
            documents: HashMap::new(),
        }
    }

    /// Detect and apply indentation for a document.
    ///
    /// Returns `None` without touching anything if the document is manually
    /// overridden, otherwise the verdict (which was applied if valid).
    pub fn run<I, S, C>(&mut self, id: &K, lines: I, classifier: &C) -> Option<Verdict>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: LineClassifier + ?Sized,
    {
        if self.is_manual(id) {
            return None;
        }

        let verdict = infer(lines, classifier);
        let state = self.state_mut(id);
        if state.settings.apply(verdict) {
            tracing::debug!("Indentation set to {}", state.settings);
        }
        Some(verdict)
    }

    /// Apply a selector choice.
    ///
    /// `Automatic` clears the override and detects again from `lines`; any
    /// other choice is applied as-is and marks the document manual.
    pub fn choose<I, S, C>(
        &mut self,
        id: &K,
        choice: IndentChoice,
        lines: I,
        classifier: &C,
    ) -> IndentSettings
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: LineClassifier + ?Sized,
    {
        match choice.verdict() {
            None => {
                self.state_mut(id).manual = false;
                self.run(id, lines, classifier);
            }
            Some(verdict) => {
                let state = self.state_mut(id);
                state.settings.apply(verdict);
                state.manual = true;
            }
        }
        self.settings(id)
    }

    /// Forget a document. Returns whether it was known.
    pub fn close(&mut self, id: &K) -> bool {
        self.documents.remove(id).is_some()
    }

    /// Forget every document
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn settings(&self, id: &K) -> IndentSettings {
        self.documents
            .get(id)
            .map_or(self.defaults, |state| state.settings)
    }

    pub fn is_manual(&self, id: &K) -> bool {
        self.documents.get(id).is_some_and(|state| state.manual)
    }

    /// Status bar text for a document
    pub fn status_text(&self, id: &K) -> String {
        self.settings(id).to_string()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn state_mut(&mut self, id: &K) -> &mut DocumentState {
        let defaults = self.defaults;
        self.documents
            .entry(id.clone())
            .or_insert(DocumentState {
                settings: defaults,
                manual: false,
            })
    }
}

impl<K: Eq + Hash + Clone> Default for Session<K> {
    fn default() -> Self {
        Self::new(IndentSettings::default())
    }
}
