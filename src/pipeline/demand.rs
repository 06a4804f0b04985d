//! Demand normalization - log-compress and rescale market demand into [0, 1]

/// Normalize raw demand.
///
/// Missing and negative values count as zero. Each value becomes `ln(1 + d)`,
/// then everything is divided by the column maximum when that maximum is
/// positive; otherwise every score stays 0.
pub fn demand_scores(demand: &[Option<f64>]) -> Vec<f64> {
    let logged: Vec<f64> = demand
        .iter()
        .map(|d| d.unwrap_or(0.0).max(0.0).ln_1p())
        .collect();

    let max = logged.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        logged.into_iter().map(|v| v / max).collect()
    } else {
        logged
    }
}
