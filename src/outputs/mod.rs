//! Output modules for the article table and the analysis results.
//!
//! # Submodules
//!
//! - [`table`]: Reads and writes the CSV article table
//! - [`report`]: Renders the analysis report for the console
//! - [`json`]: Writes the analysis report as JSON
//! - [`chart`]: Renders the monthly claps bar chart (terminal or SVG)
//!
//! # Output Structure
//!
//! ```text
//! data/
//! └── medium_data.csv     # id,publication,date,title,claps
//!
//! <json-output>           # analyze --json-output
//! <chart output>.svg      # chart --output
//! ```

pub mod chart;
pub mod json;
pub mod report;
pub mod table;
