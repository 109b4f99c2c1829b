//! Aggregations over the article table.
//!
//! All queries are pure functions of the records slice, so running them
//! twice over the same table yields the same output. Ties are resolved by
//! table order: among equally clapped articles, equally frequent keywords, or
//! equally popular publications, whichever appears first in the table wins.

use crate::models::{AnalysisReport, ArticleRecord, KeywordCount, MonthlyClaps, PublicationClaps};
use crate::utils::clean_and_split;
use chrono::Datelike;
use itertools::Itertools;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, instrument};

/// Number of most-clapped articles whose titles are mined for keywords.
pub const DEFAULT_TOP_ARTICLES: usize = 10;
/// Number of keywords reported.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// The `n` most clapped records, highest first. Returns every record when
/// the table has fewer than `n` rows.
pub fn top_articles(records: &[ArticleRecord], n: usize) -> Vec<&ArticleRecord> {
    records
        .iter()
        .sorted_by(|a, b| b.claps.cmp(&a.claps))
        .take(n)
        .collect()
}

/// Most frequent title keywords among the `top_articles_n` most clapped
/// records.
#[instrument(level = "debug", skip(records), fields(rows = records.len()))]
pub fn top_keywords(records: &[ArticleRecord], top_articles_n: usize, top_words: usize) -> Vec<KeywordCount> {
    let mut counts: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in top_articles(records, top_articles_n) {
        for word in clean_and_split(&record.title) {
            match index.get(&word) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push(KeywordCount { word, count: 1 });
                }
            }
        }
    }

    debug!(distinct = counts.len(), "Counted title keywords");
    counts
        .into_iter()
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .take(top_words)
        .collect()
}

/// Running mean of claps for one group.
#[derive(Debug, Default, Clone, Copy)]
struct ClapsMean {
    total: u128,
    count: usize,
}

impl ClapsMean {
    fn add(&mut self, claps: u64) {
        self.total += claps as u128;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }
}

/// Group records by `key`, keeping groups in order of first appearance.
fn mean_claps_by<K, F>(records: &[ArticleRecord], key: F) -> Vec<(K, ClapsMean)>
where
    K: Eq + Hash + Clone,
    F: Fn(&ArticleRecord) -> K,
{
    let mut groups: Vec<(K, ClapsMean)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let k = key(record);
        let i = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, ClapsMean::default()));
            groups.len() - 1
        });
        groups[i].1.add(record.claps);
    }
    groups
}

/// Mean claps per publication, most popular first.
pub fn publication_popularity(records: &[ArticleRecord]) -> Vec<PublicationClaps> {
    mean_claps_by(records, |r| r.publication.clone())
        .into_iter()
        .map(|(publication, mean)| PublicationClaps {
            publication,
            mean_claps: mean.mean(),
            articles: mean.count,
        })
        .sorted_by(|a, b| b.mean_claps.total_cmp(&a.mean_claps))
        .collect()
}

/// Mean claps per calendar month, January first. Months without any
/// records are omitted.
pub fn monthly_claps(records: &[ArticleRecord]) -> Vec<MonthlyClaps> {
    mean_claps_by(records, |r| r.date.month())
        .into_iter()
        .map(|(month, mean)| MonthlyClaps {
            month,
            mean_claps: mean.mean(),
            articles: mean.count,
        })
        .sorted_by_key(|m| m.month)
        .collect()
}

/// Run the keyword and publication queries together.
#[instrument(level = "info", skip(records), fields(rows = records.len()))]
pub fn analyze(records: &[ArticleRecord], top_articles_n: usize, top_words: usize) -> AnalysisReport {
    AnalysisReport {
        total_articles: records.len(),
        top_keywords: top_keywords(records, top_articles_n, top_words),
        publication_popularity: publication_popularity(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u64, publication: &str, month: u32, title: &str, claps: u64) -> ArticleRecord {
        ArticleRecord {
            id,
            publication: publication.to_string(),
            date: NaiveDate::from_ymd_opt(2023, month, 10).unwrap(),
            title: title.to_string(),
            claps,
        }
    }

    fn table() -> Vec<ArticleRecord> {
        vec![
            record(1, "Towards Data Science", 1, "Data Science for Beginners", 500),
            record(2, "UX Collective", 1, "The Art of Design", 100),
            record(3, "Towards Data Science", 2, "Deep Learning with Data", 1500),
            record(4, "Better Humans", 3, "No Title Found", 0),
            record(5, "UX Collective", 3, "Design Systems in Practice", 300),
        ]
    }

    #[test]
    fn test_top_articles_orders_by_claps() {
        let records = table();
        let top: Vec<u64> = top_articles(&records, 3).iter().map(|r| r.id).collect();
        assert_eq!(top, vec![3, 1, 5]);
    }

    #[test]
    fn test_top_articles_small_table_returns_all() {
        let records = table();
        assert_eq!(top_articles(&records, 10).len(), 5);
        assert!(top_articles(&[], 10).is_empty());
    }

    #[test]
    fn test_top_articles_ties_keep_table_order() {
        let records = vec![
            record(1, "A", 1, "first", 10),
            record(2, "A", 1, "second", 20),
            record(3, "A", 1, "third", 10),
        ];
        let top: Vec<u64> = top_articles(&records, 3).iter().map(|r| r.id).collect();
        assert_eq!(top, vec![2, 1, 3]);
    }

    #[test]
    fn test_top_keywords_counts_and_orders() {
        let keywords = top_keywords(&table(), 10, 10);
        assert_eq!(keywords[0], KeywordCount { word: "data".to_string(), count: 2 });
        assert_eq!(keywords[1], KeywordCount { word: "design".to_string(), count: 2 });
        // Remaining words appear once; first-encountered order follows claps order.
        let rest: Vec<&str> = keywords[2..].iter().map(|k| k.word.as_str()).collect();
        assert_eq!(rest, vec!["deep", "learning", "science", "beginners", "systems", "practice", "art"]);
        assert!(keywords.iter().all(|k| k.word != "the" && k.word != "found"));
    }

    #[test]
    fn test_top_keywords_limits() {
        let keywords = top_keywords(&table(), 1, 2);
        assert_eq!(
            keywords,
            vec![
                KeywordCount { word: "deep".to_string(), count: 1 },
                KeywordCount { word: "learning".to_string(), count: 1 },
            ]
        );
        assert!(top_keywords(&[], 10, 10).is_empty());
    }

    #[test]
    fn test_top_keywords_is_idempotent() {
        let records = table();
        assert_eq!(top_keywords(&records, 10, 10), top_keywords(&records, 10, 10));
    }

    #[test]
    fn test_publication_popularity() {
        let popularity = publication_popularity(&table());
        let names: Vec<&str> = popularity.iter().map(|p| p.publication.as_str()).collect();
        assert_eq!(names, vec!["Towards Data Science", "UX Collective", "Better Humans"]);
        assert_eq!(popularity[0].mean_claps, 1000.0);
        assert_eq!(popularity[0].articles, 2);
        assert_eq!(popularity[1].mean_claps, 200.0);
        assert_eq!(popularity[2].mean_claps, 0.0);
    }

    #[test]
    fn test_monthly_claps() {
        let mut records = table();
        records.push(record(6, "Better Humans", 12, "Winter habits", 90));
        records.insert(0, record(7, "Better Humans", 12, "Holiday focus", 10));
        let monthly = monthly_claps(&records);
        let months: Vec<u32> = monthly.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![1, 2, 3, 12]);
        assert_eq!(monthly[0].mean_claps, 300.0);
        assert_eq!(monthly[1].mean_claps, 1500.0);
        assert_eq!(monthly[2].mean_claps, 150.0);
        assert_eq!(monthly[3].mean_claps, 50.0);
        assert_eq!(monthly[3].articles, 2);
    }

    #[test]
    fn test_analyze_report() {
        let report = analyze(&table(), DEFAULT_TOP_ARTICLES, DEFAULT_TOP_WORDS);
        assert_eq!(report.total_articles, 5);
        assert_eq!(report.top_keywords.len(), 9);
        assert_eq!(report.publication_popularity.len(), 3);
    }
}
