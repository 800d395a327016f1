mod json;
mod table;
mod text;
mod yaml;

pub use json::JsonFormatter;
pub use table::TableFormatter;
pub use text::TextFormatter;
pub use yaml::YamlFormatter;

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Aggregated scan response: namespace -> resource kind -> unused names
///
/// The JSON shape `{"<namespace>": {"ConfigMap": ["<name>", ...]}}` with
/// two-space indentation is consumed downstream; keep it stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl ScanReport {
    /// Record the unused names of one namespace
    pub fn record(&mut self, namespace: &str, kind: &str, names: Vec<String>) {
        self.0
            .entry(namespace.to_string())
            .or_default()
            .insert(kind.to_string(), names);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate namespaces in sorted order with their kind -> names maps
    pub fn namespaces(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Vec<String>>)> {
        self.0.iter()
    }

    /// Total number of unused objects across all namespaces
    pub fn unused_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|kinds| kinds.values())
            .map(Vec::len)
            .sum()
    }

    pub fn format(&self, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(TextFormatter::format(self)),
            OutputFormat::Table => Ok(TableFormatter::format(self)),
            OutputFormat::Json => JsonFormatter::format(self),
            OutputFormat::Yaml => YamlFormatter::format(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let mut report = ScanReport::default();
        report.record("ns1", "ConfigMap", vec!["cm-a".to_string(), "cm-b".to_string()]);
        report.record("ns2", "ConfigMap", Vec::new());

        assert!(!report.is_empty());
        assert_eq!(report.unused_count(), 2);
        assert_eq!(report.namespaces().count(), 2);
    }

    #[test]
    fn test_namespaces_sorted() {
        let mut report = ScanReport::default();
        report.record("zeta", "ConfigMap", Vec::new());
        report.record("alpha", "ConfigMap", Vec::new());

        let order: Vec<&String> = report.namespaces().map(|(ns, _)| ns).collect();
        assert_eq!(order, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_empty_report() {
        let report = ScanReport::default();
        assert!(report.is_empty());
        assert_eq!(report.unused_count(), 0);
    }
}
