//! Archive scrapers.
//!
//! # Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Medium publication archives | [`archive`] | HTML scraping | One page per publication per day |
//!
//! Scrapers take their publication list and their [`PageFetcher`](crate::fetch::PageFetcher)
//! as arguments, fetch pages one at a time, and skip pages that fail to
//! load instead of failing the run.

pub mod archive;
