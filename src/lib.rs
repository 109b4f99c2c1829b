//! Scrape Medium publication archives and report clap statistics.
//!
//! The binary in `main.rs` wires these modules into the `scrape`, `analyze`
//! and `chart` commands; see [`cli`] for the available options.

pub mod analysis;
pub mod calendar;
pub mod cli;
pub mod collector;
pub mod config;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
