//! Numeric and percent coercion of raw export cells
//!
//! Exports mix plain numbers, thousands-separated strings ("1,234"), percent
//! strings ("3.2%"), fractions and blanks in the same column. Every cell maps
//! to either a finite `f64` or `None`; nothing here ever fails on cell content.

use polars::prelude::*;
use tracing::debug;

use super::schema::{percent_columns, COUNT_COLUMNS};

/// A single cell as it arrives from the ingestion layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCell<'a> {
    /// Null / absent cell
    Missing,
    /// Already-numeric cell (integers are widened to f64)
    Number(f64),
    /// Textual cell
    Text(&'a str),
}

/// Whether a percent-like column holds percent points or fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentScale {
    /// Values like 3.2 meaning 3.2% - divided by 100
    PercentPoints,
    /// Values like 0.032 - left unchanged
    Fraction,
    /// No finite value to decide on
    Empty,
}

/// Map one cell to a number or missing.
///
/// Non-finite results (`NaN`, `inf`) are treated as missing so they cannot
/// leak into aggregates downstream.
pub fn coerce_cell(cell: RawCell<'_>) -> Option<f64> {
    let value = match cell {
        RawCell::Missing => None,
        RawCell::Number(n) => Some(n),
        RawCell::Text(s) => coerce_str(s),
    }?;
    value.is_finite().then_some(value)
}

/// Parse a textual cell: percent suffix divides by 100, commas are thousands separators
pub fn coerce_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(prefix) = s.strip_suffix('%') {
        return parse_number(prefix).map(|v| v / 100.0);
    }

    parse_number(s)
}

fn parse_number(s: &str) -> Option<f64> {
    s.replace(',', "").trim().parse::<f64>().ok()
}

/// Coerce a whole column cell by cell (no percent heuristic)
pub fn coerce_column(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let series = column.as_materialized_series();
    let dtype = series.dtype();

    if dtype.is_primitive_numeric() || dtype.is_bool() {
        let floats = series.cast(&DataType::Float64)?;
        return Ok(floats
            .f64()?
            .into_iter()
            .map(|v| coerce_cell(v.map_or(RawCell::Missing, RawCell::Number)))
            .collect());
    }

    let text = if matches!(dtype, DataType::String) {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    Ok(text
        .str()?
        .into_iter()
        .map(|v| coerce_cell(v.map_or(RawCell::Missing, RawCell::Text)))
        .collect())
}

/// Median of the present values, if any
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Decide once per column whether values are percent points.
///
/// The median must be strictly greater than 1.0; a median of exactly 1.0 is
/// read as a fraction.
pub fn detect_percent_scale(values: &[Option<f64>]) -> PercentScale {
    match median(values) {
        None => PercentScale::Empty,
        Some(m) if m > 1.0 => PercentScale::PercentPoints,
        Some(_) => PercentScale::Fraction,
    }
}

/// Rescale a column to fractions according to its detected scale
pub fn to_fractions(values: Vec<Option<f64>>) -> (Vec<Option<f64>>, PercentScale) {
    let scale = detect_percent_scale(&values);
    let values = match scale {
        PercentScale::PercentPoints => values.into_iter().map(|v| v.map(|x| x / 100.0)).collect(),
        PercentScale::Fraction | PercentScale::Empty => values,
    };
    (values, scale)
}

/// Coerce a rate/share/delta column and express it as fractions
pub fn coerce_percent_column(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let (values, scale) = to_fractions(coerce_column(column)?);
    debug!(column = %column.name(), ?scale, "percent scale detected");
    Ok(values)
}

/// Replace every canonical numeric column present in the frame with its Float64 coercion.
pub fn coerce_canonical_columns(df: &mut DataFrame) -> PolarsResult<()> {
    for name in COUNT_COLUMNS {
        let values = match df.column(name) {
            Ok(column) => coerce_column(column)?,
            Err(_) => continue,
        };
        df.with_column(Column::new(name.into(), values))?;
    }

    for name in percent_columns() {
        let values = match df.column(name) {
            Ok(column) => coerce_percent_column(column)?,
            Err(_) => continue,
        };
        df.with_column(Column::new(name.into(), values))?;
    }

    Ok(())
}
