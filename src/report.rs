/*!
 * Reporting functionality for treedoc
 *
 * Prints a summary of a finished run using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::aggregate::ContentStats;
use crate::types::SkippedDir;

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Main document path
    pub output_file: String,
    /// Tree file path
    pub tree_file: String,
    /// Time taken for traversal and writing
    pub duration: Duration,
    /// Per-outcome file counts
    pub stats: ContentStats,
    /// Subtrees that could not be listed
    pub skipped: Vec<SkippedDir>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Two plain lines with the output paths
    Plain,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
            ReportFormat::Plain => format!(
                "DONE: {}\nTREE: {}",
                report.output_file, report.tree_file
            ),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.stats;
        let mut rows = vec![
            SummaryRow {
                key: "📄 Document".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "🌳 Tree".to_string(),
                value: report.tree_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📂 Files Listed".to_string(),
                value: self.format_number(stats.files()),
            },
            SummaryRow {
                key: "📝 Text Files".to_string(),
                value: format!(
                    "{} ({} lines)",
                    self.format_number(stats.text),
                    self.format_number(stats.total_lines)
                ),
            },
            SummaryRow {
                key: "🔒 Exist-only Files".to_string(),
                value: self.format_number(stats.existence_only),
            },
            SummaryRow {
                key: "🖼️ Binary Files".to_string(),
                value: self.format_number(stats.binary),
            },
        ];

        if stats.too_large > 0 {
            rows.push(SummaryRow {
                key: "📦 Over Size Limit".to_string(),
                value: self.format_number(stats.too_large),
            });
        }
        if stats.unreadable > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Unreadable".to_string(),
                value: self.format_number(stats.unreadable),
            });
        }
        rows.push(SummaryRow {
            key: "🚫 Skipped Subtrees".to_string(),
            value: self.format_number(report.skipped.len()),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_skipped_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SkippedRow {
            #[tabled(rename = "Directory")]
            path: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let rows: Vec<SkippedRow> = report
            .skipped
            .iter()
            .map(|s| SkippedRow {
                path: s.path.display().to_string(),
                reason: s.reason.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let summary = format!(
            "✅  DOCUMENTATION COMPLETE\n{}",
            self.create_summary_table(report)
        );

        if report.skipped.is_empty() {
            return summary;
        }

        format!(
            "⚠️  SKIPPED SUBTREES\n{}\n\n{}",
            self.create_skipped_table(report),
            summary
        )
    }
}
