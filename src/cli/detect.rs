//! `indent-detective detect` - infer indentation for files and trees

use super::files::{self, canonical};
use anyhow::{Context, Result};
use indent_detective::classify::Language;
use indent_detective::config::{load_config, ProjectConfig};
use indent_detective::detect::Inference;
use indent_detective::document::Document;
use indent_detective::error::DetectResult;
use indent_detective::models::{DetectionReport, FileError, FileReport};
use indent_detective::reporters::{self, OutputFormat};
use indent_detective::settings::{IndentChoice, IndentSettings};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// One file to detect, with everything resolved from config
#[derive(Debug, Clone)]
struct Job {
    path: PathBuf,
    shown: String,
    defaults: IndentSettings,
    choice: Option<IndentChoice>,
}

pub struct DetectOptions<'a> {
    pub format: &'a str,
    pub indent_default: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub workers: usize,
}

pub fn run(root: &Path, paths: &[PathBuf], options: DetectOptions<'_>) -> Result<()> {
    let format = OutputFormat::from_str(options.format)?;
    let indent_default = options
        .indent_default
        .map(IndentChoice::from_str)
        .transpose()
        .context("Invalid --indent-default")?;

    let inputs: Vec<PathBuf> = if paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        paths.to_vec()
    };

    let jobs = plan_jobs(root, &inputs, indent_default)?;
    debug!("Detecting indentation in {} files", jobs.len());

    let report = detect_all(jobs, options.workers)?;

    let color = options.output.is_none()
        && format == OutputFormat::Text
        && console::colors_enabled();
    let rendered = reporters::report_with_format(&report, format, color)?;

    match options.output {
        Some(out) => {
            std::fs::write(out, &rendered)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!(
                "{} Report written to {}",
                console::style("✓").green(),
                console::style(out.display()).cyan()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Resolve inputs into jobs. Directories are walked with their own config;
/// loose files use the config found at `root`.
fn plan_jobs(
    root: &Path,
    inputs: &[PathBuf],
    indent_default: Option<IndentChoice>,
) -> Result<Vec<Job>> {
    let single_dir = inputs.len() == 1 && inputs[0].is_dir();
    let mut root_config: Option<ProjectConfig> = None;
    let mut jobs = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let dir = canonical(input)?;
            let config = load_config(&dir);
            let defaults = defaults_for(&config, indent_default);

            for path in files::collect_source_files(&dir, &config)? {
                let rel = files::relative_to(&path, &dir);
                let shown = if single_dir {
                    files::display_path(rel)
                } else {
                    files::display_path(&input.join(rel))
                };
                jobs.push(Job {
                    choice: config.override_for(rel),
                    path,
                    shown,
                    defaults,
                });
            }
        } else if input.is_file() {
            let config = root_config.get_or_insert_with(|| load_config(root));
            let rel = match (canonical(input), canonical(root)) {
                (Ok(file), Ok(base)) => files::relative_to(&file, &base).to_path_buf(),
                _ => input.clone(),
            };
            jobs.push(Job {
                path: input.clone(),
                shown: files::display_path(input),
                defaults: defaults_for(config, indent_default),
                choice: config.override_for(&rel),
            });
        } else {
            anyhow::bail!("Path does not exist: {}", input.display());
        }
    }

    Ok(jobs)
}

fn defaults_for(config: &ProjectConfig, indent_default: Option<IndentChoice>) -> IndentSettings {
    let base = config.default_settings();
    match indent_default {
        Some(IndentChoice::Spaces(n)) => IndentSettings::spaces(n),
        Some(IndentChoice::Tabs) => base.tabs(),
        Some(IndentChoice::Automatic) | None => base,
    }
}

/// Run every job on a bounded rayon pool
fn detect_all(jobs: Vec<Job>, workers: usize) -> Result<DetectionReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let results: Vec<Result<FileReport, FileError>> =
        pool.install(|| jobs.par_iter().map(detect_one).collect());

    let mut reports = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(error) => errors.push(error),
        }
    }

    Ok(DetectionReport::new(reports, errors))
}

fn detect_one(job: &Job) -> Result<FileReport, FileError> {
    if let Some(verdict) = job.choice.and_then(|c| c.verdict()) {
        let mut settings = job.defaults;
        settings.apply(verdict);
        let language = Language::detect(&job.path, "");
        debug!("{}: manual {}", job.shown, settings);
        return Ok(FileReport::manual(&job.shown, language, settings));
    }

    let (language, inference) = load_and_detect(&job.path).map_err(|e| {
        warn!("Skipping {}: {}", job.shown, e);
        FileError {
            path: job.shown.clone(),
            message: e.to_string(),
        }
    })?;

    let mut settings = job.defaults;
    if !settings.apply(inference.verdict) {
        debug!(
            "{}: keeping {} (verdict {})",
            job.shown, settings, inference.verdict
        );
    }

    Ok(FileReport::detected(&job.shown, language, &inference, settings))
}

fn load_and_detect(path: &Path) -> DetectResult<(Language, Inference)> {
    let doc = Document::load(path)?;
    let inference = doc.detect()?;
    Ok((doc.language, inference))
}
