//! HTTP page fetching behind a small trait.
//!
//! The scraper only needs "give me the status and body of this URL", so that
//! capability is expressed as [`PageFetcher`]:
//! - [`HttpFetcher`]: the real implementation on top of `reqwest`
//! - test code substitutes an in-memory fetcher serving canned archive pages
//!
//! There is no retry or backoff; a failed request is the caller's to skip.

use reqwest::Client;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

/// Default `User-Agent` header sent with archive requests.
pub const DEFAULT_USER_AGENT: &str = concat!("medium_claps/", env!("CARGO_PKG_VERSION"));

/// Status code and decoded body of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// Only `200 OK` pages are parsed for articles.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for fetching a single page.
///
/// Implementors return the response status even when it is not a success;
/// an `Err` is reserved for transport failures (DNS, TLS, connection reset,
/// body decoding).
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, Box<dyn Error>>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Build a fetcher. `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            timeout,
        })
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_page_is_ok() {
        let ok = FetchedPage {
            status: 200,
            body: String::new(),
        };
        let missing = FetchedPage {
            status: 404,
            body: String::new(),
        };
        let redirect = FetchedPage {
            status: 301,
            body: String::new(),
        };
        assert!(ok.is_ok());
        assert!(!missing.is_ok());
        assert!(!redirect.is_ok());
    }

    #[test]
    fn test_http_fetcher_debug_hides_client() {
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5)), DEFAULT_USER_AGENT).unwrap();
        let debug = format!("{:?}", fetcher);
        assert!(debug.contains("HttpFetcher"));
        assert!(debug.contains("5s"));
    }

    #[test]
    fn test_default_user_agent_has_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("medium_claps/"));
    }
}
