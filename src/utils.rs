//! Text helpers and file system checks shared by the scrape and analysis
//! pipelines.
//!
//! - Claps display strings ("2.5K") to integer counts
//! - Title tokenization for keyword statistics
//! - String truncation for logging
//! - Output directory validation

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Words dropped from titles before counting keywords.
pub const STOPWORDS: [&str; 14] = [
    "the", "in", "to", "of", "and", "a", "is", "for", "on", "with", "as", "no", "title", "found",
];

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// How a trailing `K` in a claps string is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClapsScaling {
    /// Replace every `K` with `000` before parsing, so `"1.2K"` reads as `1`.
    /// Matches tables produced by earlier scrapes.
    #[default]
    Textual,
    /// Multiply by 1000, so `"1.2K"` reads as `1200`.
    Multiply,
}

/// Parse a claps display string, returning `None` when it is absent, empty,
/// or not a non-negative number.
///
/// The string is trimmed first; archive markup wraps the count in
/// whitespace. With [`ClapsScaling::Textual`] the value is truncated toward
/// zero, with [`ClapsScaling::Multiply`] it is rounded after scaling.
pub fn parse_claps(input: Option<&str>, scaling: ClapsScaling) -> Option<u64> {
    let text = input?.trim();
    if text.is_empty() {
        return None;
    }

    let value = match scaling {
        ClapsScaling::Textual => text.replace('K', "000").parse::<f64>().ok()?.trunc(),
        ClapsScaling::Multiply => match text.strip_suffix('K') {
            Some(number) => (number.trim_end().parse::<f64>().ok()? * 1000.0).round(),
            None => text.parse::<f64>().ok()?.trunc(),
        },
    };

    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value as u64)
}

/// Convert a claps display string into a count, falling back to `0`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(get_claps(None), 0);
/// assert_eq!(get_claps(Some("2K")), 2000);
/// assert_eq!(get_claps(Some("abc")), 0);
/// ```
pub fn get_claps(input: Option<&str>) -> u64 {
    parse_claps(input, ClapsScaling::Textual).unwrap_or(0)
}

/// Lowercase a title, collapse non-word runs to spaces, split it into
/// words, and drop [`STOPWORDS`].
///
/// Token order follows the input and repeated words are kept.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     clean_and_split("The Best of Data Science, Found!"),
///     vec!["best", "data", "science"]
/// );
/// ```
pub fn clean_and_split(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the
/// number of dropped characters appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", kept, total - max)
    }
}

/// Ensure the directory that will hold `file` exists and is writable.
///
/// Creates the parent directory if needed, then writes and removes a probe
/// file. A path without a parent component is checked against the current
/// directory.
#[instrument(level = "info", skip_all, fields(file = %file.display()))]
pub async fn ensure_parent_dir(file: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    fs::create_dir_all(&dir).await?;

    // Plain std write keeps the error surface simple.
    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
