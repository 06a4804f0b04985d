//! Row filter - drop rows without a usable Keyword

use polars::prelude::*;
use tracing::{debug, warn};

use super::schema::KEYWORD;

/// Whether a trimmed keyword can identify a row
pub fn is_usable_keyword(keyword: Option<&str>) -> bool {
    match keyword.map(str::trim) {
        Some(k) => !k.is_empty() && k != "nan",
        None => false,
    }
}

/// Trim the Keyword column and keep only rows with a usable keyword.
///
/// A frame without a Keyword column keeps no rows. A non-string keyword
/// column is cast to its string form first.
pub fn filter_keywords(df: &DataFrame) -> PolarsResult<DataFrame> {
    let Ok(column) = df.column(KEYWORD) else {
        warn!("no '{}' column found, no row can be kept", KEYWORD);
        return Ok(df.clear());
    };

    let series = column.as_materialized_series();
    let text = match series.dtype() {
        DataType::String => series.clone(),
        _ => series.cast(&DataType::String)?,
    };

    let trimmed: Vec<Option<String>> = text
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect();
    let keep: Vec<bool> = trimmed
        .iter()
        .map(|k| is_usable_keyword(k.as_deref()))
        .collect();

    let mut out = df.clone();
    out.with_column(Column::new(KEYWORD.into(), trimmed))?;
    let out = out.filter(&BooleanChunked::from_slice("keep".into(), &keep))?;

    let dropped = df.height() - out.height();
    if dropped > 0 {
        debug!(dropped, kept = out.height(), "dropped rows without a usable keyword");
    }

    Ok(out)
}
