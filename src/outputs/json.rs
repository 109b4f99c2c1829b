//! JSON export of the analysis report.
//!
//! The `analyze` command prints its report to the console and, when asked,
//! also writes the same [`AnalysisReport`] as pretty-printed JSON so other
//! tools can consume it.

use crate::models::AnalysisReport;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `report` to `path` as JSON, creating the parent directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &AnalysisReport, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    ensure_parent_dir(path).await?;
    fs::write(path, json).await?;
    info!("Wrote analysis report JSON");
    Ok(())
}
