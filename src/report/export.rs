//! Export of scored tables and run summaries

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

use super::opportunities::{ActionItem, OpportunityFilter};
use super::summary::RunSummary;

/// Save a table to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}

/// Metadata about the run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    /// QueryOpp version
    pub queryopp_version: String,
    /// Input file path
    pub input_file: String,
    /// Filter applied to the exported table
    pub filter: OpportunityFilter,
}

/// Complete JSON export of one run
#[derive(Serialize)]
pub struct RunExport<'a> {
    pub metadata: RunMetadata,
    pub summary: &'a RunSummary,
    pub top_actions: &'a [ActionItem],
}

/// Parameters describing the run for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub filter: &'a OpportunityFilter,
}

/// Write the run summary and top actions as pretty-printed JSON
pub fn export_run_summary(
    summary: &RunSummary,
    top_actions: &[ActionItem],
    params: &ExportParams,
    output_path: &Path,
) -> Result<()> {
    let export = RunExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            queryopp_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            filter: params.filter.clone(),
        },
        summary,
        top_actions,
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize run summary to JSON")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run summary: {}", output_path.display()))?;

    Ok(())
}
