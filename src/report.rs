/*!
 * Reporting functionality for copycode
 *
 * Summarises what ended up in the copied document using tabled tables.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::Document;
use crate::utils::format_file_size;

/// Files listed individually before the table switches to the largest ones
const MAX_LISTED_FILES: usize = 15;

/// Information about one copied file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Display name used in the document
    pub name: String,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Statistics for one copy operation
#[derive(Debug, Clone)]
pub struct CopyReport {
    /// Selected path
    pub target: String,
    /// Where the document went
    pub destination: String,
    /// Time taken to scan, read and deliver
    pub duration: Duration,
    /// Size of the rendered document in bytes
    pub document_bytes: u64,
    /// Files that made it into the document, in document order
    pub files: Vec<FileReportInfo>,
    /// Files left out because they could not be read as text
    pub skipped: usize,
}

impl CopyReport {
    /// Collect per-file statistics from a document
    pub fn from_document(
        document: &Document,
        target: impl Into<String>,
        destination: impl Into<String>,
        duration: Duration,
        document_bytes: u64,
    ) -> Self {
        let files = document
            .files
            .iter()
            .map(|block| FileReportInfo {
                name: block.name.clone(),
                lines: block.content.lines().count(),
                chars: block.content.chars().count(),
            })
            .collect();

        Self {
            target: target.into(),
            destination: destination.into(),
            duration,
            document_bytes,
            files,
            skipped: document.skipped.len(),
        }
    }

    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    pub fn total_chars(&self) -> usize {
        self.files.iter().map(|f| f.chars).sum()
    }
}

/// Rough token estimate used for LLM context sizing
pub fn estimate_tokens(chars: usize) -> usize {
    chars / 4
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Keep the tail of a long path, which carries the file name
fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max_len - 3)).collect();
    format!("...{}", tail)
}

/// Report generator for copy results
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Generate the report text
    pub fn generate_report(&self, report: &CopyReport) -> String {
        let files_title = if report.files.len() > MAX_LISTED_FILES {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "COPIED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "SUMMARY",
            self.create_summary_table(report)
        )
    }

    /// Print the report to stderr, leaving stdout to the document
    pub fn print_report(&self, report: &CopyReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "Target",
                value: report.target.clone(),
            },
            SummaryRow {
                key: "Destination",
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Copied",
                value: format_number(report.files.len()),
            },
            SummaryRow {
                key: "Files Skipped",
                value: format_number(report.skipped),
            },
            SummaryRow {
                key: "Total Lines",
                value: format_number(report.total_lines()),
            },
            SummaryRow {
                key: "Document Size",
                value: format_file_size(report.document_bytes),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    format_number(estimate_tokens(report.total_chars()))
                ),
            },
        ];

        styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<&FileReportInfo> = report.files.iter().collect();
        if files.len() > MAX_LISTED_FILES {
            files.sort_by(|a, b| b.chars.cmp(&a.chars));
            files.truncate(10);
        }

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|info| FileRow {
                path: truncate_path(&info.name, 60),
                lines: format_number(info.lines),
                tokens: format_number(estimate_tokens(info.chars)),
            })
            .collect();

        styled(Table::new(rows))
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}
