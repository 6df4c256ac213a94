//! Text (terminal) reporter with colors and formatting

use crate::detect::Verdict;
use crate::models::{DetectionReport, FileReport};
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";

/// ANSI codes, or empty strings when color is off
struct Palette {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                reset: RESET,
                bold: BOLD,
                dim: DIM,
                red: RED,
            }
        } else {
            Self {
                reset: "",
                bold: "",
                dim: "",
                red: "",
            }
        }
    }

    fn verdict(&self, file: &FileReport) -> &'static str {
        if self.reset.is_empty() {
            return "";
        }
        if file.manual {
            return CYAN;
        }
        match file.verdict {
            Verdict::Tabs | Verdict::Spaces(_) => GREEN,
            Verdict::Unknown => YELLOW,
        }
    }
}

/// Render report as formatted terminal output
pub fn render(report: &DetectionReport, color: bool) -> Result<String> {
    let p = Palette::new(color);
    let mut out = String::new();

    let width = report
        .files
        .iter()
        .map(|f| f.path.chars().count())
        .max()
        .unwrap_or(0);

    for file in &report.files {
        let vc = p.verdict(file);
        let source = if file.manual {
            "manual".to_string()
        } else if file.verdict.is_unknown() {
            "default".to_string()
        } else {
            format!("{} lines", file.lines_scanned)
        };
        out.push_str(&format!(
            "{:<width$}  {vc}{}{}  {}({}){}\n",
            file.path,
            file.status,
            p.reset,
            p.dim,
            source,
            p.reset,
        ));
    }

    for error in &report.errors {
        out.push_str(&format!(
            "{}{}{}  {}\n",
            p.red, error.path, p.reset, error.message
        ));
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\n{}Summary{}: {} files",
        p.bold, p.reset, s.total_files
    ));
    let mut parts = Vec::new();
    for (width, count) in &s.spaces {
        parts.push(format!("{} x {} Spaces", count, width));
    }
    if s.tabs > 0 {
        parts.push(format!("{} x Tabs", s.tabs));
    }
    if s.manual > 0 {
        parts.push(format!("{} manual", s.manual));
    }
    if s.unknown > 0 {
        parts.push(format!("{} undetected", s.unknown));
    }
    if s.errors > 0 {
        parts.push(format!("{} errors", s.errors));
    }
    if !parts.is_empty() {
        out.push_str(&format!("  {}{}{}", p.dim, parts.join(", "), p.reset));
    }
    out.push('\n');

    Ok(out)
}
