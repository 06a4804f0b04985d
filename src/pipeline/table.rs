//! Raw table model - the export exactly as ingested

use polars::prelude::*;

use super::error::PipelineError;
use super::headers::{clean_headers, disambiguate_delta, unique_frame_names};

/// One export as delivered by the ingestion layer.
///
/// Headers are kept verbatim (padding, embedded newlines, duplicates and
/// blanks included) because a DataFrame cannot represent duplicate names.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<Option<String>>,
    columns: Vec<Series>,
}

impl RawTable {
    /// Build a raw table from parallel header and column lists
    pub fn new(headers: Vec<Option<String>>, columns: Vec<Series>) -> Result<Self, PipelineError> {
        if headers.len() != columns.len() {
            return Err(PipelineError::ShapeMismatch {
                message: format!(
                    "{} header(s) for {} column(s)",
                    headers.len(),
                    columns.len()
                ),
            });
        }

        if let Some(first) = columns.first() {
            let height = first.len();
            if let Some((idx, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
                return Err(PipelineError::ShapeMismatch {
                    message: format!(
                        "column {} has {} row(s), expected {}",
                        idx,
                        col.len(),
                        height
                    ),
                });
            }
        }

        Ok(Self { headers, columns })
    }

    /// Wrap an already-typed frame (its names are taken as raw headers)
    pub fn from_frame(df: DataFrame) -> Self {
        let columns: Vec<Series> = df
            .take_columns()
            .into_iter()
            .map(|c| c.take_materialized_series())
            .collect();
        let headers = columns
            .iter()
            .map(|s| Some(s.name().to_string()))
            .collect();
        Self { headers, columns }
    }

    pub fn headers(&self) -> &[Option<String>] {
        &self.headers
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Normalize headers and assemble the DataFrame the rest of the pipeline works on.
    ///
    /// Runs header cleaning, then `Delta` disambiguation, then makes any
    /// remaining repeats unique.
    pub fn into_frame(self) -> Result<DataFrame, PipelineError> {
        let mut names = clean_headers(&self.headers);
        disambiguate_delta(&mut names);
        let names = unique_frame_names(&names);

        let columns: Vec<Column> = self
            .columns
            .into_iter()
            .zip(names)
            .map(|(series, name)| Column::from(series.with_name(name.into())))
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}
