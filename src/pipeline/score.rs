//! Opportunity scoring - one weighted composite per keyword

/// Weight of the normalized demand term
pub const DEMAND_WEIGHT: f64 = 0.55;
/// Weight of the positive click-through gap
pub const CLICK_GAP_WEIGHT: f64 = 0.20;
/// Weight of the positive conversion gap
pub const CONV_GAP_WEIGHT: f64 = 0.15;
/// Weight of the positive purchases-vs-clicks share gap
pub const SHARE_GAP_PURCHASES_WEIGHT: f64 = 0.10;

/// Positive part of an optional gap; missing counts as 0
pub fn positive_part(x: Option<f64>) -> f64 {
    match x {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

/// Score a single row.
///
/// Gaps are clamped below at 0 but not above. A non-finite result is
/// reported as 0 so the score is always defined.
pub fn opportunity_score(
    demand_score: f64,
    click_gap: Option<f64>,
    conv_gap: Option<f64>,
    share_gap_purchases: Option<f64>,
) -> f64 {
    let score = DEMAND_WEIGHT * demand_score
        + CLICK_GAP_WEIGHT * positive_part(click_gap)
        + CONV_GAP_WEIGHT * positive_part(conv_gap)
        + SHARE_GAP_PURCHASES_WEIGHT * positive_part(share_gap_purchases);

    if score.is_finite() {
        score
    } else {
        0.0
    }
}
