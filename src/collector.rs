//! Accumulates extracted articles into the flat article table.
//!
//! The collector owns the defaulting policy: a card without a title is stored
//! under [`NO_TITLE`], and a missing or unparseable claps count becomes `0`.
//! Identifiers are assigned sequentially from 1 in insertion order.

use crate::models::{ArticleRecord, ExtractedArticle, NO_TITLE};
use crate::outputs::table;
use crate::utils::{ClapsScaling, parse_claps};
use chrono::NaiveDate;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Default)]
pub struct RecordCollector {
    records: Vec<ArticleRecord>,
    scaling: ClapsScaling,
}

impl RecordCollector {
    pub fn new(scaling: ClapsScaling) -> Self {
        Self {
            records: Vec::new(),
            scaling,
        }
    }

    /// Append one article and return the stored record.
    pub fn push(
        &mut self,
        publication: &str,
        date: NaiveDate,
        article: ExtractedArticle,
    ) -> &ArticleRecord {
        let record = ArticleRecord {
            id: self.records.len() as u64 + 1,
            publication: publication.to_string(),
            date,
            title: article.title.unwrap_or_else(|| NO_TITLE.to_string()),
            claps: parse_claps(article.claps_text.as_deref(), self.scaling).unwrap_or(0),
        };
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Overwrite the table at `path` with the collected records.
    #[instrument(level = "info", skip_all, fields(path = %path.display(), count = self.records.len()))]
    pub async fn persist(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        table::write_table(path, &self.records).await?;
        info!("Persisted article table");
        Ok(())
    }
}
