//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use queryopp::RawTable;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Headers of the sample export, in export order
pub const SAMPLE_HEADERS: [&str; 11] = [
    "Keyword",
    "Impressions: Total Count",
    "Clicks: Total Count",
    "Purchases: Total Count",
    "Impressions - ASIN Share",
    "Clicks - ASIN Share",
    "Purchases - ASIN Share",
    "Our Click Through Rate",
    "Market Click Through Rate",
    "Our Conversion Rate",
    "Market Conversion Rate",
];

/// Build a raw table from text cells; an empty cell becomes a null
pub fn raw_table(headers: &[&str], rows: &[Vec<&str>]) -> RawTable {
    let headers: Vec<Option<String>> = headers.iter().map(|h| Some(h.to_string())).collect();
    let columns: Vec<Series> = (0..headers.len())
        .map(|j| {
            let values: Vec<Option<&str>> = rows
                .iter()
                .map(|row| Some(row[j]).filter(|s| !s.is_empty()))
                .collect();
            Series::new(format!("column_{}", j + 1).into(), values)
        })
        .collect();
    RawTable::new(headers, columns).unwrap()
}

/// A small export with one keyword per bucket plus two unusable rows
///
/// - `trail running shoes`: Ranking Opportunity (highest demand)
/// - `running shoes women`: Conversion Problem
/// - `waterproof trail shoes`: PPC Scaling Opportunity
/// - `brand x shoes`: Defend Position
/// - `shoe laces`: Ignore / Low Signal (tiny demand)
/// - a blank keyword and a literal `nan` keyword, both dropped
pub fn sample_export() -> RawTable {
    raw_table(
        &SAMPLE_HEADERS,
        &[
            vec!["trail running shoes", "100,000", "4,000", "300", "10%", "6%", "5%", "2%", "5%", "10%", "12%"],
            vec!["running shoes women", "50,000", "2,500", "150", "4%", "5%", "2%", "2%", "5%", "10%", "12%"],
            vec!["waterproof trail shoes", "20,000", "900", "80", "3%", "3%", "4%", "2%", "5%", "10%", "12%"],
            vec!["brand x shoes", "30,000", "1,200", "200", "12%", "15%", "18%", "2%", "5%", "10%", "12%"],
            vec!["shoe laces", "5", "1", "0", "1%", "0%", "0%", "2%", "5%", "10%", "12%"],
            vec!["   ", "999,999", "50", "5", "2%", "2%", "2%", "2%", "5%", "10%", "12%"],
            vec!["nan", "999,999", "50", "5", "2%", "2%", "2%", "2%", "5%", "10%", "12%"],
        ],
    )
}

/// Write raw CSV lines into a fresh temp directory
pub fn write_csv(name: &str, lines: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    (temp_dir, path)
}

/// Create a temporary directory with a Parquet file of the given frame
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("export.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Column as optional floats
pub fn f64_column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap_or_else(|_| panic!("missing column '{}'", name))
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Column as strings (nulls become empty strings)
pub fn str_column(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap_or_else(|_| panic!("missing column '{}'", name))
        .as_materialized_series()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

/// Index of the row whose keyword equals `keyword`
pub fn row_of(df: &DataFrame, keyword: &str) -> usize {
    str_column(df, "Keyword")
        .iter()
        .position(|k| k == keyword)
        .unwrap_or_else(|| panic!("keyword '{}' not in frame", keyword))
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
