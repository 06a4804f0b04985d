//! QueryOpp: Query Opportunity Analyzer Library
//!
//! Normalizes search-query performance exports, scores every keyword and
//! assigns it an action bucket with a recommended next step.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use pipeline::{prepare_table, Bucket, PipelineError, RawTable};
