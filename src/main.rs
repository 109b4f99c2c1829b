//! # Medium Claps
//!
//! Collects article metadata (title, publication, claps, date) from the daily
//! archive pages of a set of Medium publications and reports simple
//! statistics over the resulting table.
//!
//! ## Usage
//!
//! ```sh
//! medium_claps scrape --year 2023 --days 50
//! medium_claps analyze
//! medium_claps chart --output monthly.svg
//! ```
//!
//! ## Architecture
//!
//! Two pipelines that only share the persisted CSV table:
//! 1. **Scrape**: sample days of the year, convert each to a calendar date,
//!    fetch every publication's archive page for it, and collect one record
//!    per article card into `data/medium_data.csv`
//! 2. **Analyze / Chart**: load the table, then report top title keywords and
//!    average claps per publication, or draw average claps per month

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use medium_claps::cli::{AnalyzeArgs, ChartArgs, Cli, Command, ScrapeArgs};
use medium_claps::config::PublicationConfig;
use medium_claps::fetch::HttpFetcher;
use medium_claps::outputs::{chart, json, report, table};
use medium_claps::utils::ensure_parent_dir;
use medium_claps::{analysis, calendar, scrapers};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let result = match args.command {
        Command::Scrape(ref scrape_args) => run_scrape(&args.data_file, scrape_args).await,
        Command::Analyze(ref analyze_args) => run_analyze(&args.data_file, analyze_args).await,
        Command::Chart(ref chart_args) => run_chart(&args.data_file, chart_args).await,
    };

    if let Err(ref e) = result {
        error!(error = %e, "Command failed");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    result
}

#[instrument(level = "info", skip_all, fields(data_file = %data_file.display(), year = args.year))]
async fn run_scrape(data_file: &Path, args: &ScrapeArgs) -> Result<(), Box<dyn Error>> {
    // Fail before any network traffic if the table cannot be written.
    ensure_parent_dir(data_file).await?;

    let config = PublicationConfig::load(args.config.as_deref()).await?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let days = calendar::select_days(&mut rng, args.year, args.days);
    if days.len() < args.days {
        warn!(
            requested = args.days,
            available = days.len(),
            "Requested more days than the year has; scraping every day"
        );
    }

    let fetcher = HttpFetcher::new(args.timeout_secs.map(Duration::from_secs), &args.user_agent)?;
    info!(
        days = days.len(),
        publications = config.publications.len(),
        claps_scaling = ?args.claps_scaling,
        "Starting archive scrape"
    );

    let (collector, summary) = scrapers::archive::scrape_to_collector(
        &fetcher,
        &config,
        args.year,
        &days,
        args.claps_scaling,
    )
    .await?;

    collector.persist(data_file).await?;
    info!(
        pages_fetched = summary.pages_fetched,
        pages_skipped = summary.pages_skipped,
        "Scrape finished"
    );
    println!("Scraped {} articles.", collector.len());
    Ok(())
}

#[instrument(level = "info", skip_all, fields(data_file = %data_file.display()))]
async fn run_analyze(data_file: &Path, args: &AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let records = table::read_table(data_file).await?;
    if records.is_empty() {
        warn!("Article table is empty");
    }

    let analysis_report = analysis::analyze(&records, args.top_articles, args.top_words);
    print!("{}", report::format_report(&analysis_report));

    if let Some(path) = &args.json_output {
        json::write_report(&analysis_report, path).await?;
    }
    Ok(())
}

#[instrument(level = "info", skip_all, fields(data_file = %data_file.display()))]
async fn run_chart(data_file: &Path, args: &ChartArgs) -> Result<(), Box<dyn Error>> {
    let records = table::read_table(data_file).await?;
    let monthly = analysis::monthly_claps(&records);
    debug!(months = monthly.len(), "Computed monthly claps");

    match &args.output {
        Some(path) => {
            chart::write_svg(&monthly, path, (args.width, args.height)).await?;
            println!("Wrote chart to {}", path.display());
        }
        None => print!("{}", chart::render_terminal(&monthly)),
    }
    Ok(())
}
