use super::ScanReport;

pub struct TextFormatter;

impl TextFormatter {
    pub fn format(report: &ScanReport) -> String {
        let mut blocks = Vec::new();

        for (namespace, kinds) in report.namespaces() {
            for (kind, names) in kinds {
                if names.is_empty() {
                    blocks.push(format!(
                        "No unused {}s found in namespace \"{}\"",
                        kind, namespace
                    ));
                    continue;
                }

                let mut block = format!("Unused {}s in namespace \"{}\":\n", kind, namespace);
                for name in names {
                    block.push_str(&format!("  - {}\n", name));
                }
                blocks.push(block.trim_end().to_string());
            }
        }

        blocks.join("\n\n")
    }
}
