//! Integration tests for the full normalization and scoring pipeline

use approx::assert_relative_eq;
use polars::prelude::*;
use queryopp::pipeline::schema::*;
use queryopp::pipeline::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_sample_export_gets_one_bucket_per_keyword() {
    let df = prepare_table(sample_export()).unwrap();

    assert_eq!(df.height(), 5, "blank and 'nan' keywords should be dropped");

    let buckets = str_column(&df, BUCKET);
    assert_eq!(buckets[row_of(&df, "trail running shoes")], "Ranking Opportunity");
    assert_eq!(buckets[row_of(&df, "running shoes women")], "Conversion Problem");
    assert_eq!(buckets[row_of(&df, "waterproof trail shoes")], "PPC Scaling Opportunity");
    assert_eq!(buckets[row_of(&df, "brand x shoes")], "Defend Position");
    assert_eq!(buckets[row_of(&df, "shoe laces")], "Ignore / Low Signal");
}

#[test]
fn test_derived_columns_are_appended_in_order() {
    let df = prepare_table(sample_export()).unwrap();
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    assert_eq!(&names[..SAMPLE_HEADERS.len()], &SAMPLE_HEADERS.map(String::from)[..]);
    assert_eq!(&names[SAMPLE_HEADERS.len()..], &DERIVED_COLUMNS.map(String::from)[..]);
}

#[test]
fn test_concrete_click_gap_scenario() {
    let raw = raw_table(
        &[
            "Keyword",
            "Impressions: Total Count",
            "Our Click Through Rate",
            "Market Click Through Rate",
            "Impressions - ASIN Share",
            "Clicks - ASIN Share",
        ],
        &[vec!["foo", "999", "2%", "5%", "10%", "6%"]],
    );

    let df = prepare_table(raw).unwrap();

    let click_gap = f64_column(&df, CLICK_GAP)[0].unwrap();
    assert_relative_eq!(click_gap, 0.03, epsilon = 1e-12);
    assert_eq!(f64_column(&df, DEMAND_SCORE)[0], Some(1.0));
    assert_eq!(str_column(&df, BUCKET)[0], "Ranking Opportunity");
    assert_eq!(
        str_column(&df, SUGGESTED_ACTION)[0],
        "Launch/expand Exact + POE rank; validate relevance; tighten top-of-search placements; add to PLO (title/bullets/back-end) if truly core."
    );
}

#[test]
fn test_scores_match_weighted_formula() {
    let df = prepare_table(sample_export()).unwrap();
    let scores = f64_column(&df, OPPORTUNITY_SCORE);

    // demand 1.0, click gap 0.03, conv gap 0.02, purchases-vs-clicks gap negative
    let top = scores[row_of(&df, "trail running shoes")].unwrap();
    assert_relative_eq!(top, 0.55 + 0.20 * 0.03 + 0.15 * 0.02, epsilon = 1e-9);

    // purchases share 18% vs clicks share 15% adds 0.10 * 0.03
    let defend = scores[row_of(&df, "brand x shoes")].unwrap();
    let demand = (30_001f64).ln() / (100_001f64).ln();
    assert_relative_eq!(
        defend,
        0.55 * demand + 0.20 * 0.03 + 0.15 * 0.02 + 0.10 * 0.03,
        epsilon = 1e-9
    );
}

#[test]
fn test_scores_are_never_negative_or_missing() {
    let df = prepare_table(sample_export()).unwrap();
    let scores = f64_column(&df, OPPORTUNITY_SCORE);

    assert!(scores.iter().all(|s| s.is_some_and(|v| v >= 0.0)));
}

#[test]
fn test_all_missing_row_scores_zero() {
    let raw = raw_table(&["Keyword", "Notes"], &[vec!["lonely keyword", "n/a"]]);

    let df = prepare_table(raw).unwrap();

    assert_eq!(f64_column(&df, OPPORTUNITY_SCORE), vec![Some(0.0)]);
    assert_eq!(f64_column(&df, DEMAND_SCORE), vec![Some(0.0)]);
    assert_eq!(f64_column(&df, MARKET_DEMAND), vec![None]);
    assert_eq!(f64_column(&df, CLICK_GAP), vec![None]);
    assert_eq!(str_column(&df, BUCKET), vec!["Ignore / Low Signal"]);
}

#[test]
fn test_max_demand_row_scores_exactly_one() {
    let df = prepare_table(sample_export()).unwrap();
    let demand = f64_column(&df, DEMAND_SCORE);

    assert_eq!(demand[row_of(&df, "trail running shoes")], Some(1.0));
    assert!(demand.iter().all(|d| d.is_some_and(|v| (0.0..=1.0).contains(&v))));
}

#[test]
fn test_zero_demand_everywhere_gives_zero_scores() {
    let raw = raw_table(
        &["Keyword", "Impressions: Total Count"],
        &[vec!["a", "0"], vec!["b", ""], vec!["c", "-10"]],
    );

    let df = prepare_table(raw).unwrap();

    assert_eq!(f64_column(&df, DEMAND_SCORE), vec![Some(0.0); 3]);
}

#[test]
fn test_demand_falls_back_to_total_clicks() {
    let raw = raw_table(
        &["Keyword", "Impressions: Total Count", "Clicks: Total Count"],
        &[vec!["a", "", "100"], vec!["b", "n/a", "10"]],
    );

    let df = prepare_table(raw).unwrap();

    assert_eq!(f64_column(&df, MARKET_DEMAND), vec![Some(100.0), Some(10.0)]);
    assert_eq!(f64_column(&df, DEMAND_SCORE)[0], Some(1.0));
}

#[test]
fn test_percent_points_column_is_rescaled() {
    let raw = raw_table(
        &["Keyword", "Our Conversion Rate", "Market Conversion Rate"],
        &[
            vec!["a", "3.2", "0.05"],
            vec!["b", "4", "0.04"],
            vec!["c", "1.5", "0.06"],
        ],
    );

    let df = prepare_table(raw).unwrap();

    let ours = f64_column(&df, OUR_CONVERSION_RATE);
    assert_relative_eq!(ours[0].unwrap(), 0.032, epsilon = 1e-12);
    assert_relative_eq!(ours[1].unwrap(), 0.04, epsilon = 1e-12);
    assert_relative_eq!(ours[2].unwrap(), 0.015, epsilon = 1e-12);

    // each column decides on its own
    assert_eq!(
        f64_column(&df, MARKET_CONVERSION_RATE),
        vec![Some(0.05), Some(0.04), Some(0.06)]
    );
}

#[test]
fn test_percent_median_exactly_one_is_not_rescaled() {
    let raw = raw_table(
        &["Keyword", "Clicks - ASIN Share"],
        &[vec!["a", "0.5"], vec!["b", "1"], vec!["c", "3"]],
    );

    let df = prepare_table(raw).unwrap();

    assert_eq!(
        f64_column(&df, CLICKS_SHARE),
        vec![Some(0.5), Some(1.0), Some(3.0)]
    );
}

#[test]
fn test_count_columns_skip_percent_heuristic() {
    let raw = raw_table(
        &["Keyword", "Clicks: ASIN Count"],
        &[vec!["a", "1,500"], vec!["b", "20"], vec!["c", "oops"]],
    );

    let df = prepare_table(raw).unwrap();

    assert_eq!(
        f64_column(&df, CLICKS_ASIN_COUNT),
        vec![Some(1500.0), Some(20.0), None]
    );
}

#[test]
fn test_duplicate_delta_columns_mapped_positionally() {
    let raw = raw_table(
        &["Keyword", "Delta", "Delta"],
        &[vec!["a", "0.5", "0.25"], vec!["b", "0.1", "0.2"]],
    );

    let df = prepare_table(raw).unwrap();
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    assert_eq!(&names[..3], &["Keyword", "Delta (CR)", "Delta (CTR)"]);
    assert_eq!(f64_column(&df, DELTA_CR), vec![Some(0.5), Some(0.1)]);
    assert_eq!(f64_column(&df, DELTA_CTR), vec![Some(0.25), Some(0.2)]);
}

#[test]
fn test_messy_headers_are_recognized() {
    let raw = raw_table(
        &["  Keyword ", "Impressions:\nTotal Count", "Clicks  -  ASIN Share", "Impressions -\r\n ASIN Share"],
        &[vec!["a", "10", "1%", "2%"]],
    );

    let df = prepare_table(raw).unwrap();

    assert_has_columns(&df, &[KEYWORD, IMPRESSIONS_TOTAL_COUNT, IMPRESSIONS_SHARE]);
    assert_eq!(f64_column(&df, IMPRESSIONS_TOTAL_COUNT), vec![Some(10.0)]);
    // collapsed to "Clicks - ASIN Share"
    assert_eq!(f64_column(&df, CLICKS_SHARE), vec![Some(0.01)]);
}

#[test]
fn test_unknown_columns_pass_through() {
    let raw = raw_table(
        &["Keyword", "Search Query Score", "Impressions: Total Count"],
        &[vec!["a", "12 (high)", "10"], vec!["b", "", "20"]],
    );

    let df = prepare_table(raw).unwrap();

    let passthrough = df.column("Search Query Score").unwrap();
    assert_eq!(passthrough.dtype(), &DataType::String);
    assert_eq!(str_column(&df, "Search Query Score"), vec!["12 (high)", ""]);
}

#[test]
fn test_keywords_are_trimmed() {
    let raw = raw_table(&["Keyword"], &[vec!["  padded keyword\t"]]);

    let df = prepare_table(raw).unwrap();

    assert_eq!(str_column(&df, KEYWORD), vec!["padded keyword"]);
}

#[test]
fn test_no_usable_keywords_is_reported() {
    let raw = raw_table(&["Keyword", "Impressions: Total Count"], &[vec![" ", "10"], vec!["nan", "20"]]);

    let err = prepare_table(raw).unwrap_err();

    assert!(err.is_no_usable_data(), "unexpected error: {}", err);
    assert!(matches!(err, PipelineError::NoUsableData { total_rows: 2 }));
}

#[test]
fn test_missing_keyword_column_is_no_usable_data() {
    let raw = raw_table(&["Impressions: Total Count"], &[vec!["10"]]);

    let err = prepare_table(raw).unwrap_err();

    assert!(err.is_no_usable_data());
}

#[test]
fn test_empty_input_is_no_usable_data() {
    let raw = raw_table(&["Keyword", "Impressions: Total Count"], &[]);

    let err = prepare_table(raw).unwrap_err();

    assert!(matches!(err, PipelineError::NoUsableData { total_rows: 0 }));
}

#[test]
fn test_pipeline_is_idempotent() {
    let raw = sample_export();

    let first = prepare_table(raw.clone()).unwrap();
    let second = prepare_table(raw).unwrap();

    assert!(first.equals_missing(&second));
}

#[test]
fn test_numeric_frame_input() {
    let df = df! {
        "Keyword" => ["alpha", "beta"],
        "Impressions: Total Count" => [100i64, 10],
        "Our Click Through Rate" => [2.0f64, 3.0],
        "Market Click Through Rate" => [4.0f64, 3.5],
    }
    .unwrap();

    let out = prepare_table(RawTable::from_frame(df)).unwrap();

    // percent points detected (median 2.5 and 3.75)
    let click_gap = f64_column(&out, CLICK_GAP);
    assert_relative_eq!(click_gap[0].unwrap(), 0.02, epsilon = 1e-12);
    assert_relative_eq!(click_gap[1].unwrap(), 0.005, epsilon = 1e-12);
}

#[test]
fn test_raw_table_rejects_mismatched_shape() {
    let columns = vec![
        Series::new("a".into(), ["x", "y"]),
        Series::new("b".into(), ["z"]),
    ];

    let err = RawTable::new(vec![Some("a".into()), Some("b".into())], columns).unwrap_err();
    assert!(matches!(err, PipelineError::ShapeMismatch { .. }));

    let err = RawTable::new(vec![Some("a".into())], vec![]).unwrap_err();
    assert!(matches!(err, PipelineError::ShapeMismatch { .. }));
}
