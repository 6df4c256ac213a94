//! JSON reporter
//!
//! Outputs the full DetectionReport as pretty-printed JSON for piping to jq
//! or editor integrations.

use crate::models::DetectionReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &DetectionReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
