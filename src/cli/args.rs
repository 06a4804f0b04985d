//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::Bucket;
use crate::report::{OpportunityFilter, DEFAULT_MAX_ROWS, DEFAULT_MIN_SCORE};

/// Upper bound for --max-rows
const MAX_ROWS_LIMIT: usize = 10_000;

/// QueryOpp - Prioritize search-query performance exports into action buckets
#[derive(Parser, Debug)]
#[command(name = "queryopp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV, Parquet or Excel export)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file path for the filtered, prioritized table (CSV or Parquet, by extension).
    /// Defaults to the input directory with an '_opportunities' suffix
    /// (e.g., export.csv → export_opportunities.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only keep keywords containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only keep one bucket: ignore, ranking, conversion, ppc, defend (or the full label)
    #[arg(short, long)]
    pub bucket: Option<Bucket>,

    /// Minimum opportunity score to keep (0.0 to 1.0)
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE, value_parser = validate_min_score)]
    pub min_score: f64,

    /// Maximum number of rows to show and export
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS, value_parser = validate_max_rows)]
    pub max_rows: usize,

    /// Number of top keywords listed with their suggested action
    #[arg(long, default_value = "12")]
    pub top: usize,

    /// Also write a JSON run summary (KPIs and top actions) to this path
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Skip interactive prompts (fail instead of asking for another file)
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Get the input path, if one was given.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path for `input`, deriving it if not explicitly provided.
    /// Parquet input stays Parquet; anything else is written as CSV.
    pub fn output_path(&self, input: &std::path::Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(input))
    }

    /// Build the row filter from the filtering flags
    pub fn filter(&self) -> OpportunityFilter {
        OpportunityFilter {
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            bucket: self.bucket,
            min_score: self.min_score,
            max_rows: self.max_rows,
        }
    }
}

/// `<dir>/<stem>_opportunities.<csv|parquet>` next to the input
pub fn derive_output_path(input: &std::path::Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("parquet") => "parquet",
        _ => "csv",
    };
    parent.join(format!("{}_opportunities.{}", stem, extension))
}

/// Validator for min_score parameter
fn validate_min_score(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("min_score must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for max_rows parameter
fn validate_max_rows(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid row count", s))?;

    if !(1..=MAX_ROWS_LIMIT).contains(&value) {
        Err(format!(
            "max_rows must be between 1 and {}, got {}",
            MAX_ROWS_LIMIT, value
        ))
    } else {
        Ok(value)
    }
}
