//! Data models for scraped articles and analysis results.
//!
//! - [`ExtractedArticle`]: raw fields pulled from one archive card
//! - [`ArticleRecord`]: one row of the persisted article table
//! - [`KeywordCount`], [`PublicationClaps`], [`MonthlyClaps`]: aggregation
//!   results
//! - [`AnalysisReport`]: everything the `analyze` command reports

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Title stored when an archive card has no title element.
pub const NO_TITLE: &str = "No Title Found";

/// Fields extracted from one article card, before any defaulting.
///
/// `None` means the element was not present in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: Option<String>,
    pub claps_text: Option<String>,
}

/// A single article row, as persisted in the CSV table.
///
/// Field order matches the table header: `id,publication,date,title,claps`.
/// `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Sequential identifier, starting at 1 within a scrape run.
    pub id: u64,
    /// Configured publication name.
    pub publication: String,
    /// Archive date the article was listed under.
    pub date: NaiveDate,
    /// Article headline, or [`NO_TITLE`].
    pub title: String,
    /// Clap count, 0 when missing or unparseable.
    pub claps: u64,
}

/// Occurrences of one keyword across the most-clapped titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Mean claps for one publication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationClaps {
    pub publication: String,
    pub mean_claps: f64,
    pub articles: usize,
}

/// Mean claps for one calendar month (1 = January).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyClaps {
    pub month: u32,
    pub mean_claps: f64,
    pub articles: usize,
}

/// Output of the `analyze` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_articles: usize,
    pub top_keywords: Vec<KeywordCount>,
    pub publication_popularity: Vec<PublicationClaps>,
}
