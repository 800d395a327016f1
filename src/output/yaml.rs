use anyhow::{Context, Result};

use super::ScanReport;

pub struct YamlFormatter;

impl YamlFormatter {
    pub fn format(report: &ScanReport) -> Result<String> {
        serde_yaml::to_string(report).context("Failed to serialize scan report to YAML")
    }
}
