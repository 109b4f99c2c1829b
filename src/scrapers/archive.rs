//! Medium publication archive scraper.
//!
//! Every publication exposes a daily archive page listing the stories
//! published that day as "chromeless" cards. Each card carries the story
//! title in an `h3` and the clap count in a `multirecommend` block.
//!
//! # Flow
//!
//! For each sampled day-of-year, the day is converted to a calendar date,
//! every configured publication's archive URL for that date is fetched one at
//! a time, and each card found becomes one [`ArticleRecord`](crate::models::ArticleRecord). Pages that fail
//! to load or answer with anything but `200 OK` are skipped.

use crate::calendar::to_date;
use crate::collector::RecordCollector;
use crate::config::PublicationConfig;
use crate::fetch::PageFetcher;
use crate::models::ExtractedArticle;
use crate::utils::{ClapsScaling, truncate_for_log};
use chrono::Datelike;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

static CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"div[class="cardChromeless u-marginTop20 u-paddingTop10 u-paddingBottom15 u-paddingLeft20 u-paddingRight20"]"#,
    )
    .unwrap()
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"h3[class="graf graf--h3 graf-after--figure graf--title"]"#).unwrap()
});

static CLAPS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[class="multirecommend js-actionMultirecommend u-flexCenter"]"#).unwrap()
});

/// Counters reported at the end of a scrape run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Pages that answered `200 OK` and were parsed.
    pub pages_fetched: usize,
    /// Pages skipped because of a transport error or non-200 status.
    pub pages_skipped: usize,
    /// Article records produced.
    pub articles: usize,
}

/// Concatenated text of an element and all its descendants.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Extract every article card from an archive page.
///
/// Titles are trimmed; a title element with no text counts as missing. The
/// claps text is returned untouched for the collector to parse.
pub fn extract_articles(html: &str) -> Vec<ExtractedArticle> {
    let document = Html::parse_document(html);
    document
        .select(&CARD_SELECTOR)
        .map(|card| {
            let title = card
                .select(&TITLE_SELECTOR)
                .next()
                .map(|el| element_text(el).trim().to_string())
                .filter(|t| !t.is_empty());
            let claps_text = card.select(&CLAPS_SELECTOR).next().map(element_text);
            ExtractedArticle { title, claps_text }
        })
        .collect()
}

/// Fetch one archive page and extract its cards.
///
/// Returns `None` when the page is skipped.
#[instrument(level = "debug", skip_all, fields(%url))]
async fn fetch_archive_page<F: PageFetcher>(fetcher: &F, url: &Url) -> Option<Vec<ExtractedArticle>> {
    match fetcher.fetch(url).await {
        Ok(page) if page.is_ok() => {
            let articles = extract_articles(&page.body);
            debug!(count = articles.len(), "Parsed archive page");
            Some(articles)
        }
        Ok(page) => {
            debug!(status = page.status, "Archive page not available; skipping");
            None
        }
        Err(e) => {
            warn!(error = %e, "Archive fetch failed; skipping");
            None
        }
    }
}

/// Scrape the archive pages of every configured publication for each day in
/// `days`, collecting the results into `collector`.
///
/// Requests are issued sequentially, day by day, in configuration order.
///
/// # Errors
///
/// Fails only on a day outside `year` or a template that does not expand
/// into a URL; page-level failures are counted in the summary and skipped.
#[instrument(level = "info", skip_all, fields(%year, days = days.len()))]
pub async fn scrape_archive<F: PageFetcher>(
    fetcher: &F,
    config: &PublicationConfig,
    year: i32,
    days: &[u32],
    collector: &mut RecordCollector,
) -> Result<ScrapeSummary, Box<dyn Error>> {
    let mut summary = ScrapeSummary::default();
    let total_days = days.len();

    for (i, &day) in days.iter().enumerate() {
        let date = to_date(day, year)?;
        let mut pages = Vec::with_capacity(config.publications.len());
        for publication in &config.publications {
            let url = publication.archive_url(year, date.month(), date.day())?;
            pages.push((publication.name.as_str(), url));
        }

        let results: Vec<(&str, Option<Vec<ExtractedArticle>>)> = stream::iter(pages)
            .then(|(name, url)| async move { (name, fetch_archive_page(fetcher, &url).await) })
            .collect()
            .await;

        let before = collector.len();
        for (name, articles) in results {
            match articles {
                Some(articles) => {
                    summary.pages_fetched += 1;
                    for article in articles {
                        let record = collector.push(name, date, article);
                        debug!(
                            id = record.id,
                            publication = %record.publication,
                            claps = record.claps,
                            title = %truncate_for_log(&record.title, 80),
                            "Collected article"
                        );
                    }
                }
                None => summary.pages_skipped += 1,
            }
        }

        info!(
            progress = %format!("{}/{}", i + 1, total_days),
            %date,
            articles = collector.len() - before,
            "Processed archive day"
        );
    }

    summary.articles = collector.len();
    info!(
        pages_fetched = summary.pages_fetched,
        pages_skipped = summary.pages_skipped,
        articles = summary.articles,
        "Archive scrape complete"
    );
    Ok(summary)
}

/// Convenience wrapper that scrapes into a fresh collector.
pub async fn scrape_to_collector<F: PageFetcher>(
    fetcher: &F,
    config: &PublicationConfig,
    year: i32,
    days: &[u32],
    scaling: ClapsScaling,
) -> Result<(RecordCollector, ScrapeSummary), Box<dyn Error>> {
    let mut collector = RecordCollector::new(scaling);
    let summary = scrape_archive(fetcher, config, year, days, &mut collector).await?;
    Ok((collector, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Publication;
    use crate::fetch::FetchedPage;
    use crate::models::NO_TITLE;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const CARD_CLASS: &str =
        "cardChromeless u-marginTop20 u-paddingTop10 u-paddingBottom15 u-paddingLeft20 u-paddingRight20";
    const TITLE_CLASS: &str = "graf graf--h3 graf-after--figure graf--title";
    const CLAPS_CLASS: &str = "multirecommend js-actionMultirecommend u-flexCenter";

    fn card(title: Option<&str>, claps: Option<&str>) -> String {
        let title = title
            .map(|t| format!(r#"<h3 class="{TITLE_CLASS}">{t}</h3>"#))
            .unwrap_or_default();
        let claps = claps
            .map(|c| format!(r#"<div class="{CLAPS_CLASS}"><button>{c}</button></div>"#))
            .unwrap_or_default();
        format!(r#"<div class="{CARD_CLASS}"><figure></figure>{title}<p>teaser</p>{claps}</div>"#)
    }

    fn page(cards: &[String]) -> String {
        format!(
            "<html><body><div class=\"streamItem\">{}</div></body></html>",
            cards.join("\n")
        )
    }

    /// Serves canned pages by URL and records every request.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, FetchedPage>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn with_page(mut self, url: &str, status: u16, body: String) -> Self {
            self.pages.insert(url.to_string(), FetchedPage { status, body });
            self
        }
    }

    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, Box<dyn Error>> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.get(url.as_str()) {
                Some(page) => Ok(page.clone()),
                None => Err(format!("connection refused: {url}").into()),
            }
        }
    }

    fn config() -> PublicationConfig {
        PublicationConfig {
            publications: vec![
                Publication::new("Alpha", "https://alpha.example/archive/{year}/{month}/{day}"),
                Publication::new("Beta", "https://beta.example/archive/{year}/{month}/{day}"),
            ],
        }
    }

    #[test]
    fn test_extract_articles_reads_cards() {
        let html = page(&[
            card(Some("Learning Rust the Hard Way"), Some("\n  1.5K\n")),
            card(Some("Second Story"), Some("42")),
        ]);
        let articles = extract_articles(&html);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Learning Rust the Hard Way"));
        assert_eq!(articles[0].claps_text.as_deref(), Some("\n  1.5K\n"));
        assert_eq!(articles[1].claps_text.as_deref(), Some("42"));
    }

    #[test]
    fn test_extract_articles_missing_elements() {
        let html = page(&[card(None, None), card(Some("   "), Some("7"))]);
        let articles = extract_articles(&html);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0], ExtractedArticle::default());
        assert_eq!(articles[1].title, None);
        assert_eq!(articles[1].claps_text.as_deref(), Some("7"));
    }

    #[test]
    fn test_extract_articles_requires_exact_class_string() {
        let html = r#"<div class="cardChromeless u-marginTop20"><h3>Not a card</h3></div>"#;
        assert!(extract_articles(html).is_empty());
        assert!(extract_articles("").is_empty());
    }

    #[test]
    fn test_extract_articles_title_with_nested_markup() {
        let html = page(&[card(Some("Why <em>Data</em> Matters"), None)]);
        let articles = extract_articles(&html);
        assert_eq!(articles[0].title.as_deref(), Some("Why Data Matters"));
    }

    #[tokio::test]
    async fn test_scrape_archive_collects_and_skips() {
        let fetcher = FakeFetcher::default()
            .with_page(
                "https://alpha.example/archive/2024/02/29",
                200,
                page(&[card(Some("Leap Day"), Some("2K")), card(None, None)]),
            )
            .with_page("https://beta.example/archive/2024/02/29", 404, String::new())
            .with_page(
                "https://alpha.example/archive/2024/01/01",
                200,
                page(&[card(Some("New Year"), Some("300"))]),
            );

        let (collector, summary) =
            scrape_to_collector(&fetcher, &config(), 2024, &[60, 1], ClapsScaling::Textual)
                .await
                .unwrap();

        assert_eq!(
            summary,
            ScrapeSummary {
                pages_fetched: 2,
                pages_skipped: 2,
                articles: 3
            }
        );

        let records = collector.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].publication, "Alpha");
        assert_eq!(records[0].title, "Leap Day");
        assert_eq!(records[0].claps, 2000);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(records[1].title, NO_TITLE);
        assert_eq!(records[1].claps, 0);
        assert_eq!(records[2].id, 3);
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn test_scrape_archive_requests_in_order() {
        let fetcher = FakeFetcher::default();
        let (collector, summary) =
            scrape_to_collector(&fetcher, &config(), 2023, &[32, 365], ClapsScaling::Textual)
                .await
                .unwrap();

        assert!(collector.is_empty());
        assert_eq!(summary.pages_skipped, 4);
        assert_eq!(
            *fetcher.requested.borrow(),
            vec![
                "https://alpha.example/archive/2023/02/01",
                "https://beta.example/archive/2023/02/01",
                "https://alpha.example/archive/2023/12/31",
                "https://beta.example/archive/2023/12/31",
            ]
        );
    }

    #[tokio::test]
    async fn test_scrape_archive_rejects_day_outside_year() {
        let fetcher = FakeFetcher::default();
        let result =
            scrape_to_collector(&fetcher, &config(), 2023, &[366], ClapsScaling::Textual).await;
        assert!(result.is_err());
        assert!(fetcher.requested.borrow().is_empty());
    }
}
