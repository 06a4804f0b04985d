//! Dataset loader for CSV, Parquet and Excel exports

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, DataType as Cell, Range, Reader};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use super::headers::clean_header;
use super::schema::*;
use super::table::RawTable;

/// Headers that identify the data sheet of a workbook, worth 3 points each
const SHEET_KEY_COLUMNS: [&str; 4] = [
    KEYWORD,
    PURCHASES_TOTAL_COUNT,
    CLICKS_TOTAL_COUNT,
    IMPRESSIONS_TOTAL_COUNT,
];

/// Load an export into a [`RawTable`], choosing the reader from the file extension.
///
/// CSV files are read header-less with every column as text, so duplicate
/// and blank header cells survive intact for the header normalizer. Excel
/// workbooks are read from the sheet whose headers look most like an export.
pub fn load_raw_table(path: &Path) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => load_csv(path),
        "parquet" => {
            let df = LazyFrame::scan_parquet(path, Default::default())
                .and_then(|lf| lf.collect())
                .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?;
            Ok(RawTable::from_frame(df))
        }
        "xlsx" | "xlsm" | "xls" | "xlsb" => load_workbook(path),
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet, xlsx, xls",
            extension
        ),
    }
}

fn load_csv(path: &Path) -> Result<RawTable> {
    let read = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish());

    let df = match read {
        Ok(df) => df,
        // a zero-byte file is an empty export, not a broken one
        Err(PolarsError::NoData(_)) => return Ok(RawTable::new(Vec::new(), Vec::new())?),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to load CSV file: {}", path.display()))
        }
    };

    if df.height() == 0 {
        return Ok(RawTable::new(Vec::new(), Vec::new())?);
    }

    let header_row = df.head(Some(1));
    let mut headers = Vec::with_capacity(df.width());
    for column in header_row.get_columns() {
        let cell = column
            .as_materialized_series()
            .str()
            .with_context(|| format!("Unexpected non-text header in {}", path.display()))?
            .get(0)
            .map(str::to_string);
        headers.push(cell);
    }

    if let Some(Some(first)) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    let body = df.slice(1, df.height() - 1);
    let columns: Vec<Series> = body
        .take_columns()
        .into_iter()
        .map(|c| c.take_materialized_series())
        .collect();

    Ok(RawTable::new(headers, columns)?)
}

fn load_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let mut best: Option<(String, Range<Cell>, u32)> = None;
    for sheet in workbook.sheet_names().to_vec() {
        let range = match workbook.worksheet_range(&sheet) {
            Some(range) => range
                .with_context(|| format!("Failed to read sheet '{}' of {}", sheet, path.display()))?,
            None => continue,
        };
        let score = sheet_score(&range);
        debug!(sheet = %sheet, score, "scored worksheet");

        if best.as_ref().map_or(true, |(_, _, top)| score > *top) {
            best = Some((sheet, range, score));
        }
    }

    let Some((sheet, range, _)) = best else {
        anyhow::bail!("Workbook has no worksheets: {}", path.display());
    };
    debug!(sheet = %sheet, "selected worksheet");

    table_from_range(&range)
}

/// How much a sheet's header row looks like a search-query export
fn sheet_score(range: &Range<Cell>) -> u32 {
    let headers: Vec<String> = match range.rows().next() {
        Some(row) => row.iter().map(|c| clean_header(cell_text(c).as_deref())).collect(),
        None => return 0,
    };
    let has = |name: &str| headers.iter().any(|h| h == name);

    let key = SHEET_KEY_COLUMNS.iter().filter(|c| has(c)).count() as u32;
    let rates = RATE_COLUMNS.iter().filter(|c| has(c)).count() as u32;
    key * 3 + rates
}

fn table_from_range(range: &Range<Cell>) -> Result<RawTable> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(RawTable::new(Vec::new(), Vec::new())?);
    };

    let headers: Vec<Option<String>> = header_row.iter().map(cell_text).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (column, cell) in cells.iter_mut().zip(row) {
            column.push(cell_text(cell));
        }
    }

    let columns = cells
        .into_iter()
        .enumerate()
        .map(|(j, values)| Series::new(format!("column_{}", j + 1).into(), values))
        .collect();

    Ok(RawTable::new(headers, columns)?)
}

/// Cell as text; empty cells are missing
fn cell_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        _ => Some(cell.to_string()),
    }
}
