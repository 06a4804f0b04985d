//! Error types for the scoring pipeline.
//!
//! Cell-level parse failures and missing columns are not errors; they degrade
//! to missing values. Only structural problems with the table itself and the
//! "nothing left to score" condition are reported.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors surfaced by [`prepare_table`](super::prepare_table) and [`RawTable`](super::RawTable).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input had no rows, or no row carried a usable keyword.
    ///
    /// Callers should ask for a different export rather than render an
    /// empty result as a valid zero-opportunity table.
    #[error("no usable data: {total_rows} input row(s), none with a usable Keyword")]
    NoUsableData {
        /// Rows in the raw input before filtering
        total_rows: usize,
    },

    /// Header list and column list disagree, or columns differ in height.
    #[error("raw table shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Underlying DataFrame operation failed.
    #[error(transparent)]
    Frame(#[from] PolarsError),
}

impl PipelineError {
    /// Whether the caller should prompt for different input instead of failing
    pub fn is_no_usable_data(&self) -> bool {
        matches!(self, PipelineError::NoUsableData { .. })
    }
}
