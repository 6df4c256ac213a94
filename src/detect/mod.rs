//! Indentation inference
//!
//! Scans the first [`SAMPLE_LINES`] lines of a document and votes on the
//! indentation step size from the changes in leading whitespace between
//! consecutive code lines.
//!
//! # How voting works
//!
//! ```text
//! indent   0   4   8   8   4   0
//! diff         4   4   0   4   4
//! vote        +4  +4  +4  +4  +4     -> Spaces(4)
//! ```
//!
//! - A change of N spaces (in either direction) votes for N.
//! - An unchanged line re-votes for the last non-zero change.
//! - A tab-indented code line ends the scan with [`Verdict::Tabs`].
//!
//! Which lines count as code is decided by a [`LineClassifier`]; the
//! inferencer itself never looks at comments or strings.

use crate::classify::LineClassifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading lines of a document that are ever examined
pub const SAMPLE_LINES: usize = 100;

/// Detected indentation style of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Indented with tab characters
    Tabs,
    /// Indented with spaces, `n` per level. Not validated against
    /// [`crate::settings::POSSIBLE_INDENTATIONS`]; that is up to the caller.
    Spaces(usize),
    /// No step size was ever observed
    Unknown,
}

impl Verdict {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Verdict::Unknown)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Tabs => f.write_str("Tabs"),
            Verdict::Spaces(n) => write!(f, "{} Spaces", n),
            Verdict::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Leading indentation of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentMeasurement {
    /// Line starts with one or more tab characters
    Tab,
    /// Number of leading space characters (may be 0)
    Spaces(usize),
}

/// Measure the leading indentation of a line
pub fn measure(text: &str) -> IndentMeasurement {
    if text.starts_with('\t') {
        IndentMeasurement::Tab
    } else {
        IndentMeasurement::Spaces(text.bytes().take_while(|&b| b == b' ').count())
    }
}

/// One histogram bucket: a step size and how many times it was voted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub step: usize,
    pub count: usize,
}

/// Votes per step size, kept in first-seen order
///
/// The leader is tracked as votes arrive and only changes hands on a
/// strictly greater count, so among tied buckets the one that reached the
/// winning count first keeps the lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffHistogram {
    buckets: Vec<Bucket>,
    leader: Option<usize>,
}

impl DiffHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one vote for `step`. Zero is never a bucket key.
    pub fn record(&mut self, step: usize) {
        if step == 0 {
            return;
        }

        let idx = match self.buckets.iter().position(|b| b.step == step) {
            Some(idx) => idx,
            None => {
                self.buckets.push(Bucket { step, count: 0 });
                self.buckets.len() - 1
            }
        };
        self.buckets[idx].count += 1;

        let count = self.buckets[idx].count;
        let takes_lead = match self.leader {
            Some(leader) => leader == idx || count > self.buckets[leader].count,
            None => true,
        };
        if takes_lead {
            self.leader = Some(idx);
        }
    }

    /// Step size with the most votes, if any vote was cast
    pub fn winner(&self) -> Option<usize> {
        self.leader.map(|idx| self.buckets[idx].step)
    }

    /// Vote count for a step size (0 if never seen)
    pub fn count(&self, step: usize) -> usize {
        self.buckets
            .iter()
            .find(|b| b.step == step)
            .map_or(0, |b| b.count)
    }

    /// Buckets in the order they were first created
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Verdict plus the evidence it was drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub verdict: Verdict,
    /// Code lines examined before the scan ended
    pub lines_scanned: usize,
    pub histogram: DiffHistogram,
}

/// Infer the indentation style of a document.
///
/// `lines` are the document's lines in order; only the first
/// [`SAMPLE_LINES`] are looked at. `classifier` decides which of them are
/// code. Never fails: no evidence yields [`Verdict::Unknown`].
pub fn infer<I, S, C>(lines: I, classifier: &C) -> Verdict
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    C: LineClassifier + ?Sized,
{
    infer_detailed(lines, classifier).verdict
}

/// Same as [`infer`], also returning the histogram and line count
pub fn infer_detailed<I, S, C>(lines: I, classifier: &C) -> Inference
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    C: LineClassifier + ?Sized,
{
    let mut histogram = DiffHistogram::new();
    let mut previous_indent = 0usize;
    let mut previous_diff = 0usize;
    let mut lines_scanned = 0usize;

    for (row, line) in lines.into_iter().take(SAMPLE_LINES).enumerate() {
        let text = line.as_ref();
        if !classifier.is_code_line(row, text) {
            continue;
        }
        lines_scanned += 1;

        let indent = match measure(text) {
            IndentMeasurement::Tab => {
                return Inference {
                    verdict: Verdict::Tabs,
                    lines_scanned,
                    histogram,
                };
            }
            IndentMeasurement::Spaces(n) => n,
        };

        let diff = indent.abs_diff(previous_indent);
        if diff == 0 {
            if previous_diff != 0 {
                histogram.record(previous_diff);
            }
        } else {
            histogram.record(diff);
            previous_diff = diff;
        }

        previous_indent = indent;
    }

    let verdict = histogram
        .winner()
        .map_or(Verdict::Unknown, Verdict::Spaces);

    Inference {
        verdict,
        lines_scanned,
        histogram,
    }
}

#[cfg(test)]
mod tests;
