//! Pipeline orchestration - raw export in, enriched opportunity table out

use polars::prelude::*;
use tracing::info;

use super::bucket::{classify, Bucket, BucketFeatures};
use super::coerce::coerce_canonical_columns;
use super::demand::demand_scores;
use super::derived::{float_values, DerivedMetrics};
use super::error::PipelineError;
use super::keyword::filter_keywords;
use super::schema::*;
use super::score::opportunity_score;
use super::table::RawTable;

/// Run the full normalization and scoring pipeline on one export.
///
/// Stages run strictly in order: header cleaning and `Delta` disambiguation,
/// numeric/percent coercion, keyword row filter, derived gaps, demand
/// normalization, scoring, and bucket classification with its action text.
/// Non-canonical columns pass through untouched; derived columns are appended
/// (or replaced in place if the input already carries them).
///
/// # Errors
/// `PipelineError::NoUsableData` when the input is empty or no row has a
/// usable keyword.
pub fn prepare_table(raw: RawTable) -> Result<DataFrame, PipelineError> {
    let total_rows = raw.height();
    if total_rows == 0 {
        return Err(PipelineError::NoUsableData { total_rows });
    }

    let mut df = raw.into_frame()?;
    coerce_canonical_columns(&mut df)?;

    let mut df = filter_keywords(&df)?;
    if df.height() == 0 {
        return Err(PipelineError::NoUsableData { total_rows });
    }

    let derived = DerivedMetrics::compute(&df)?;
    let demand = demand_scores(&derived.market_demand);

    let scores: Vec<f64> = demand
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            opportunity_score(
                d,
                derived.click_gap[i],
                derived.conv_gap[i],
                derived.share_gap_purchases[i],
            )
        })
        .collect();

    let impressions_share = float_values(&df, IMPRESSIONS_SHARE)?;
    let clicks_share = float_values(&df, CLICKS_SHARE)?;
    let purchases_share = float_values(&df, PURCHASES_SHARE)?;

    let buckets: Vec<Bucket> = demand
        .iter()
        .enumerate()
        .map(|(i, &demand_score)| {
            classify(&BucketFeatures {
                demand_score,
                impressions_share: impressions_share[i],
                clicks_share: clicks_share[i],
                purchases_share: purchases_share[i],
            })
        })
        .collect();

    let labels: Vec<&str> = buckets.iter().map(Bucket::label).collect();
    let actions: Vec<&str> = buckets.iter().map(Bucket::suggested_action).collect();

    let mut columns = derived.into_columns();
    columns.push(Column::new(DEMAND_SCORE.into(), demand));
    columns.push(Column::new(OPPORTUNITY_SCORE.into(), scores));
    columns.push(Column::new(BUCKET.into(), labels));
    columns.push(Column::new(SUGGESTED_ACTION.into(), actions));

    for column in columns {
        df.with_column(column)?;
    }

    info!(
        total_rows,
        scored = df.height(),
        dropped = total_rows - df.height(),
        "scored keywords"
    );

    Ok(df)
}
