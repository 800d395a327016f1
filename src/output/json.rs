use anyhow::{Context, Result};

use super::ScanReport;

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format(report: &ScanReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize scan report to JSON")
    }
}
