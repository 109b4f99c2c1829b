//! Command-line interface definitions.
//!
//! The binary runs one of three independent steps per invocation:
//! `scrape` builds the article table, `analyze` and `chart` read it.
//! Every path option can also be supplied through an environment variable.

use crate::analysis::{DEFAULT_TOP_ARTICLES, DEFAULT_TOP_WORDS};
use crate::fetch::DEFAULT_USER_AGENT;
use crate::utils::ClapsScaling;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape 50 random days of 2023 into data/medium_data.csv
/// medium_claps scrape
///
/// # Reproducible sample of 20 days with a custom publication list
/// medium_claps scrape --year 2024 --days 20 --seed 7 --config publications.yaml
///
/// # Keyword and publication statistics, also saved as JSON
/// medium_claps analyze --json-output reports/analysis.json
///
/// # Monthly chart as SVG
/// medium_claps chart --output reports/monthly.svg
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the persisted article table
    #[arg(
        short,
        long,
        global = true,
        env = "MEDIUM_CLAPS_DATA",
        default_value = "data/medium_data.csv"
    )]
    pub data_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape publication archives for a random sample of days
    Scrape(ScrapeArgs),
    /// Print top title keywords and average claps per publication
    Analyze(AnalyzeArgs),
    /// Render average claps per month as a bar chart
    Chart(ChartArgs),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Year whose archive pages are sampled
    #[arg(short, long, default_value_t = 2023)]
    pub year: i32,

    /// Number of distinct days to sample (capped at the length of the year)
    #[arg(long, default_value_t = 50)]
    pub days: usize,

    /// Seed for the day sampler; omit for a fresh random sample
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML file listing publications and their archive URL templates
    #[arg(short, long, env = "MEDIUM_CLAPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// How a trailing `K` in clap counts is interpreted
    #[arg(long, value_enum, default_value_t = ClapsScaling::Textual)]
    pub claps_scaling: ClapsScaling,

    /// Per-request timeout in seconds; requests are unbounded when omitted
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with archive requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Number of most-clapped articles whose titles are mined for keywords
    #[arg(long, default_value_t = DEFAULT_TOP_ARTICLES)]
    pub top_articles: usize,

    /// Number of keywords to report
    #[arg(long, default_value_t = DEFAULT_TOP_WORDS)]
    pub top_words: usize,

    /// Also write the report as JSON to this path
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Write the chart as SVG to this path instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// SVG width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// SVG height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
