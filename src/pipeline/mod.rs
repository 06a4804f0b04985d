//! Pipeline module - normalization and scoring of search-query exports

pub mod bucket;
pub mod coerce;
pub mod demand;
pub mod derived;
pub mod error;
pub mod headers;
pub mod keyword;
pub mod loader;
pub mod prepare;
pub mod schema;
pub mod score;
pub mod table;

pub use bucket::{classify, Bucket, BucketFeatures};
pub use coerce::*;
pub use demand::*;
pub use derived::*;
pub use error::PipelineError;
pub use headers::*;
pub use keyword::*;
pub use loader::*;
pub use prepare::*;
pub use score::*;
pub use table::RawTable;
