//! `indent-detective watch` - live re-detection on file changes
//!
//! Keeps a [`Session`] of every source file under the root and re-runs
//! detection when a file is saved, printing settings that changed.

use super::files::{self, canonical};
use anyhow::Result;
use console::style;
use indent_detective::classify::LineClassifier;
use indent_detective::config::{load_config, ProjectConfig, CONFIG_FILE_NAME};
use indent_detective::document::Document;
use indent_detective::session::Session;
use indent_detective::settings::IndentSettings;
use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, warn};

/// Quiet period before a burst of edits is re-detected
const DEBOUNCE: Duration = Duration::from_millis(500);

/// What happened to a file after a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
enum Change {
    Detected { before: IndentSettings, after: IndentSettings, manual: bool },
    Unchanged(IndentSettings),
    Closed,
}

/// Reads the config for a root
type ConfigLoader = fn(&Path) -> ProjectConfig;

/// Session plus the config it was seeded from
struct WatchState {
    root: PathBuf,
    loader: ConfigLoader,
    config: ProjectConfig,
    session: Session<PathBuf>,
}

impl WatchState {
    /// Project config merged with the user's
    fn new(root: &Path) -> Self {
        Self::with_loader(root, load_config)
    }

    fn with_loader(root: &Path, loader: ConfigLoader) -> Self {
        let config = loader(root);
        let session = Session::new(config.default_settings());
        Self {
            root: root.to_path_buf(),
            loader,
            config,
            session,
        }
    }

    /// Detect every file in the tree. Returns the number tracked.
    fn prime(&mut self) -> Result<usize> {
        for path in files::collect_source_files(&self.root, &self.config)? {
            self.refresh(&path);
        }
        Ok(self.session.len())
    }

    /// Re-read config and start over
    fn reload(&mut self) -> Result<usize> {
        *self = Self::with_loader(&self.root, self.loader);
        self.prime()
    }

    fn wants(&self, path: &Path) -> bool {
        let rel = files::relative_to(path, &self.root);
        files::is_supported(path) && !is_ignored_path(rel) && !self.config.should_exclude(rel)
    }

    fn refresh(&mut self, path: &Path) -> Option<Change> {
        let key = path.to_path_buf();

        if !path.exists() {
            return self.session.close(&key).then_some(Change::Closed);
        }

        let doc = match Document::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };
        let classifier = match doc.classifier() {
            Ok(classifier) => classifier,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };

        let before = self.session.settings(&key);
        let rel = files::relative_to(path, &self.root);
        let after = self.apply(&key, rel, &doc, classifier.as_ref());

        if before == after {
            Some(Change::Unchanged(after))
        } else {
            Some(Change::Detected {
                before,
                after,
                manual: self.session.is_manual(&key),
            })
        }
    }

    fn apply(
        &mut self,
        key: &PathBuf,
        rel: &Path,
        doc: &Document,
        classifier: &dyn LineClassifier,
    ) -> IndentSettings {
        match self.config.override_for(rel) {
            Some(choice) => self.session.choose(key, choice, doc.lines(), classifier),
            None => {
                if let Some(verdict) = self.session.run(key, doc.lines(), classifier) {
                    debug!("{}: {}", rel.display(), verdict);
                }
                self.session.settings(key)
            }
        }
    }
}

pub fn run(path: &Path) -> Result<()> {
    let root = canonical(path)?;

    println!(
        "\n{} Watching {} for changes...\n",
        style("●").bold(),
        style(root.display()).cyan()
    );

    let mut state = WatchState::new(&root);
    let tracked = state.prime()?;
    println!("  {} Tracking {} files", style("→").dim(), tracked);
    println!("  {} Press Ctrl+C to stop\n", style("→").dim());

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let _ = tx.send(events);
            }
            Err(errors) => {
                for error in errors {
                    warn!("Watch error: {}", error);
                }
            }
        }
    })?;
    debouncer.watch(&root, RecursiveMode::Recursive)?;

    let config_path = root.join(CONFIG_FILE_NAME);

    for events in rx {
        let changed: BTreeSet<PathBuf> = events
            .iter()
            .flat_map(|event| event.paths.iter())
            .cloned()
            .collect();

        if changed.contains(&config_path) {
            let tracked = state.reload()?;
            println!(
                "{} {} reloaded, tracking {} files",
                style("→").dim(),
                style(CONFIG_FILE_NAME).cyan(),
                tracked
            );
            continue;
        }

        for file in changed.iter() {
            if !state.wants(file) {
                continue;
            }
            if let Some(change) = state.refresh(file) {
                print_change(files::relative_to(file, &root), &change);
            }
        }
    }

    Ok(())
}

/// Build dirs and VCS metadata never hold files worth tracking
fn is_ignored_path(rel: &Path) -> bool {
    rel.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        name.starts_with('.')
            || matches!(
                name.as_ref(),
                "target" | "node_modules" | "__pycache__" | "dist" | "build"
            )
    })
}

fn print_change(rel: &Path, change: &Change) {
    let shown = files::display_path(rel);
    match change {
        Change::Detected {
            before,
            after,
            manual,
        } => {
            let tag = if *manual { " (manual)" } else { "" };
            println!(
                "{} {}  {} {} {}{}",
                style("→").dim(),
                style(shown).cyan().bold(),
                style(before).dim(),
                style("→").dim(),
                style(after).green(),
                style(tag).dim()
            );
        }
        Change::Unchanged(settings) => {
            println!(
                "{} {}  {}",
                style("→").dim(),
                style(shown).dim(),
                style(format!("{} (no change)", settings)).dim()
            );
        }
        Change::Closed => {
            println!(
                "{} {}  {}",
                style("→").dim(),
                style(shown).dim(),
                style("removed").yellow()
            );
        }
    }
}
