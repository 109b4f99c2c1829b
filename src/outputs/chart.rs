//! Seasonal bar chart of average claps per month.
//!
//! Two renderers share the same twelve-slot series:
//! - [`render_terminal`]: a text bar chart printed by `chart` by default
//! - [`write_svg`]: an SVG file drawn with `plotters` when an output path
//!   is given
//!
//! Every bar is annotated with its mean, to two decimals. Months without
//! any articles keep their slot but draw no bar.

use crate::models::MonthlyClaps;
use crate::utils::ensure_parent_dir;
use plotters::prelude::*;
use std::error::Error;
use std::fmt::Write;
use std::path::Path;
use tracing::{info, instrument};

pub const CHART_TITLE: &str = "Average Claps by Month";

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Width of the longest terminal bar, in characters.
const TERMINAL_BAR_WIDTH: usize = 40;

/// Spread monthly means over twelve slots, January first.
pub fn month_series(monthly: &[MonthlyClaps]) -> [Option<f64>; 12] {
    let mut series = [None; 12];
    for entry in monthly {
        if (1..=12).contains(&entry.month) {
            series[(entry.month - 1) as usize] = Some(entry.mean_claps);
        }
    }
    series
}

fn month_label(month: u32) -> &'static str {
    MONTH_LABELS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Render the chart as text, one line per month.
///
/// ```text
/// Average Claps by Month
/// Jan | ████████████████████                     512.00
/// Feb |                                          n/a
/// ```
pub fn render_terminal(monthly: &[MonthlyClaps]) -> String {
    let series = month_series(monthly);
    let max = series.iter().flatten().copied().fold(0.0_f64, f64::max);

    let mut out = String::new();
    writeln!(out, "{}", CHART_TITLE).unwrap();
    for (i, value) in series.iter().enumerate() {
        let label = MONTH_LABELS[i];
        match value {
            Some(v) => {
                let width = if max > 0.0 {
                    ((v / max) * TERMINAL_BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                writeln!(
                    out,
                    "{} | {:<bar$} {:.2}",
                    label,
                    "█".repeat(width),
                    v,
                    bar = TERMINAL_BAR_WIDTH
                )
                .unwrap();
            }
            None => {
                writeln!(out, "{} | {:<bar$} n/a", label, "", bar = TERMINAL_BAR_WIDTH).unwrap();
            }
        }
    }
    out
}

/// Draw the chart into an SVG file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_svg(
    monthly: &[MonthlyClaps],
    path: &Path,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path).await?;
    draw_svg(monthly, path, size)?;
    info!("Wrote chart SVG");
    Ok(())
}

fn draw_svg(monthly: &[MonthlyClaps], path: &Path, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let series = month_series(monthly);
    let max = series.iter().flatten().copied().fold(0.0_f64, f64::max);
    // Headroom for the value labels above the tallest bar.
    let y_top = if max > 0.0 { max * 1.15 } else { 1.0 };

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((1u32..12u32).into_segmented(), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(12)
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::Exact(m) | SegmentValue::CenterOf(m) => month_label(*m).to_string(),
            SegmentValue::Last => String::new(),
        })
        .x_desc("Month")
        .y_desc("Average Claps")
        .draw()?;

    let bars: Vec<(u32, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as u32 + 1, v)))
        .collect();

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(8)
            .data(bars.iter().copied()),
    )?;

    chart.draw_series(bars.iter().map(|&(month, value)| {
        Text::new(
            format!("{:.2}", value),
            (SegmentValue::CenterOf(month), value + y_top * 0.03),
            ("sans-serif", 14),
        )
    }))?;

    root.present()?;
    Ok(())
}
