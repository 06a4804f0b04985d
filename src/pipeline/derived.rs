//! Derived gap and share-differential metrics
//!
//! All inputs are missing-safe: an absent column behaves like a column of
//! missing values, and any arithmetic touching a missing operand is missing.

use polars::prelude::*;
use tracing::debug;

use super::schema::*;

/// Which count column fed `Market_Demand`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandSource {
    ImpressionsTotal,
    ClicksTotal,
    /// Neither column present with data
    Unavailable,
}

/// Read a column as optional floats; an absent column yields all-missing
pub fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    match df.column(name) {
        Ok(column) => {
            let floats = column.as_materialized_series().cast(&DataType::Float64)?;
            Ok(floats.f64()?.into_iter().collect())
        }
        Err(_) => Ok(vec![None; df.height()]),
    }
}

/// Elementwise `lhs - rhs` with missing propagation
pub fn difference(lhs: &[Option<f64>], rhs: &[Option<f64>]) -> Vec<Option<f64>> {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        })
        .collect()
}

/// Pick the demand signal: total impressions unless entirely missing, then total clicks.
pub fn market_demand(
    impressions_total: Vec<Option<f64>>,
    clicks_total: Vec<Option<f64>>,
) -> (Vec<Option<f64>>, DemandSource) {
    if impressions_total.iter().any(Option::is_some) {
        (impressions_total, DemandSource::ImpressionsTotal)
    } else if clicks_total.iter().any(Option::is_some) {
        (clicks_total, DemandSource::ClicksTotal)
    } else {
        (clicks_total, DemandSource::Unavailable)
    }
}

/// Gap features for every row of a coerced, filtered frame
#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub market_demand: Vec<Option<f64>>,
    pub demand_source: DemandSource,
    /// Market CTR minus own CTR
    pub click_gap: Vec<Option<f64>>,
    /// Market CR minus own CR
    pub conv_gap: Vec<Option<f64>>,
    /// Clicks share minus impressions share
    pub share_gap_clicks: Vec<Option<f64>>,
    /// Purchases share minus clicks share
    pub share_gap_purchases: Vec<Option<f64>>,
}

impl DerivedMetrics {
    pub fn compute(df: &DataFrame) -> PolarsResult<Self> {
        let (market_demand, demand_source) = market_demand(
            float_values(df, IMPRESSIONS_TOTAL_COUNT)?,
            float_values(df, CLICKS_TOTAL_COUNT)?,
        );
        debug!(?demand_source, "market demand source");

        let impressions_share = float_values(df, IMPRESSIONS_SHARE)?;
        let clicks_share = float_values(df, CLICKS_SHARE)?;
        let purchases_share = float_values(df, PURCHASES_SHARE)?;

        Ok(Self {
            market_demand,
            demand_source,
            click_gap: difference(
                &float_values(df, MARKET_CLICK_THROUGH_RATE)?,
                &float_values(df, OUR_CLICK_THROUGH_RATE)?,
            ),
            conv_gap: difference(
                &float_values(df, MARKET_CONVERSION_RATE)?,
                &float_values(df, OUR_CONVERSION_RATE)?,
            ),
            share_gap_clicks: difference(&clicks_share, &impressions_share),
            share_gap_purchases: difference(&purchases_share, &clicks_share),
        })
    }

    /// Columns in output order
    pub fn into_columns(self) -> Vec<Column> {
        vec![
            Column::new(MARKET_DEMAND.into(), self.market_demand),
            Column::new(CLICK_GAP.into(), self.click_gap),
            Column::new(CONV_GAP.into(), self.conv_gap),
            Column::new(SHARE_GAP_CLICKS.into(), self.share_gap_clicks),
            Column::new(SHARE_GAP_PURCHASES.into(), self.share_gap_purchases),
        ]
    }
}
