use comfy_table::{Table, presets::ASCII_BORDERS_ONLY_CONDENSED};

use super::ScanReport;

pub struct TableFormatter;

impl TableFormatter {
    pub fn format(report: &ScanReport) -> String {
        let count = report.unused_count();
        if count == 0 {
            return "(0 unused)".to_string();
        }

        let mut table = Table::new();
        // ASCII_BORDERS_ONLY_CONDENSED is close to psql style
        table.load_preset(ASCII_BORDERS_ONLY_CONDENSED);
        table.set_header(vec!["Namespace", "Kind", "Name"]);

        for (namespace, kinds) in report.namespaces() {
            for (kind, names) in kinds {
                for name in names {
                    table.add_row(vec![namespace.as_str(), kind.as_str(), name.as_str()]);
                }
            }
        }

        format!("{}\n({} unused)", table, count)
    }
}
