//! Console rendering of the analysis report.

use crate::models::AnalysisReport;
use std::fmt::Write;

/// Render the report as the lines printed by `analyze`.
///
/// ```text
/// Most common keywords in titles of the most popular articles:
/// data: 4
/// ...
///
/// Average claps by publication:
/// Towards Data Science: 812.50
/// ...
/// ```
pub fn format_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    writeln!(out, "Most common keywords in titles of the most popular articles:").unwrap();
    for keyword in &report.top_keywords {
        writeln!(out, "{}: {}", keyword.word, keyword.count).unwrap();
    }

    writeln!(out, "\nAverage claps by publication:").unwrap();
    for entry in &report.publication_popularity {
        writeln!(out, "{}: {:.2}", entry.publication, entry.mean_claps).unwrap();
    }
    out
}
