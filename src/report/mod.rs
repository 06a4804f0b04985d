//! Report module - summarizing, ranking and exporting scored queries

pub mod export;
pub mod opportunities;
pub mod summary;

pub use export::*;
pub use opportunities::*;
pub use summary::*;
