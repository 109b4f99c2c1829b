//! CSV persistence of the article table.
//!
//! The table is a plain CSV file with the header
//! `id,publication,date,title,claps` and one row per [`ArticleRecord`].
//! Writing always replaces the whole file.

use crate::models::ArticleRecord;
use crate::utils::ensure_parent_dir;
use csv::{ReaderBuilder, WriterBuilder};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Column names, in file order.
pub const HEADER: [&str; 5] = ["id", "publication", "date", "title", "claps"];

/// Serialize records to CSV bytes. An empty table still gets its header.
pub fn to_csv(records: &[ArticleRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

/// Parse CSV text into records.
pub fn from_csv(data: &str) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ArticleRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Write the table to `path`, creating the parent directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_table(path: &Path, records: &[ArticleRecord]) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path).await?;
    let bytes = to_csv(records)?;
    fs::write(path, bytes).await?;
    info!(rows = records.len(), "Wrote article table");
    Ok(())
}

/// Load the table from `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_table(path: &Path) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let data = fs::read_to_string(path).await?;
    let records = from_csv(&data)?;
    info!(rows = records.len(), "Loaded article table");
    Ok(records)
}
