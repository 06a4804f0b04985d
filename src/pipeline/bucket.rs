//! Bucket classification and recommended actions
//!
//! The classifier is an ordered rule cascade evaluated on a single row's
//! features. Every rule that matches overwrites the previous result, so the
//! last matching rule wins. Rules are checked in declaration order, not by
//! specificity. Comparisons against a missing share never match.

use serde::Serialize;

/// Strategic posture assigned to a keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Bucket {
    #[default]
    #[serde(rename = "Ignore / Low Signal")]
    IgnoreLowSignal,
    #[serde(rename = "Ranking Opportunity")]
    RankingOpportunity,
    #[serde(rename = "Conversion Problem")]
    ConversionProblem,
    #[serde(rename = "PPC Scaling Opportunity")]
    PpcScalingOpportunity,
    #[serde(rename = "Defend Position")]
    DefendPosition,
}

impl Bucket {
    /// Every bucket, default first
    pub const ALL: [Bucket; 5] = [
        Bucket::IgnoreLowSignal,
        Bucket::RankingOpportunity,
        Bucket::ConversionProblem,
        Bucket::PpcScalingOpportunity,
        Bucket::DefendPosition,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::IgnoreLowSignal => "Ignore / Low Signal",
            Bucket::RankingOpportunity => "Ranking Opportunity",
            Bucket::ConversionProblem => "Conversion Problem",
            Bucket::PpcScalingOpportunity => "PPC Scaling Opportunity",
            Bucket::DefendPosition => "Defend Position",
        }
    }

    /// Fixed advisory text for this bucket
    pub fn suggested_action(&self) -> &'static str {
        match self {
            Bucket::RankingOpportunity => {
                "Launch/expand Exact + POE rank; validate relevance; tighten top-of-search placements; add to PLO (title/bullets/back-end) if truly core."
            }
            Bucket::ConversionProblem => {
                "Fix listing first (main image/value props/price/reviews); then isolate query in Exact to measure; avoid brute-force spend."
            }
            Bucket::PpcScalingOpportunity => {
                "Scale PPC deliberately: raise bids/budgets where CPS holds; broaden match types; add defense targets; watch TACoS."
            }
            Bucket::DefendPosition => {
                "Defend: maintain Exact + defense; cap waste; monitor share drops weekly."
            }
            Bucket::IgnoreLowSignal => {
                "Ignore for now, or investigate relevance if it keeps appearing."
            }
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Some(bucket) = Bucket::ALL
            .iter()
            .find(|b| b.label().to_lowercase() == wanted)
        {
            return Ok(*bucket);
        }

        match wanted.as_str() {
            "ignore" | "low-signal" => Ok(Bucket::IgnoreLowSignal),
            "ranking" => Ok(Bucket::RankingOpportunity),
            "conversion" => Ok(Bucket::ConversionProblem),
            "ppc" | "scaling" => Ok(Bucket::PpcScalingOpportunity),
            "defend" => Ok(Bucket::DefendPosition),
            _ => Err(format!(
                "Unknown bucket: '{}'. Use one of: ignore, ranking, conversion, ppc, defend.",
                s
            )),
        }
    }
}

/// The per-row inputs the cascade looks at
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketFeatures {
    pub demand_score: f64,
    pub impressions_share: Option<f64>,
    pub clicks_share: Option<f64>,
    pub purchases_share: Option<f64>,
}

type Rule = fn(&BucketFeatures) -> bool;

/// High demand, clicks under-captured relative to impression share
fn ranking_opportunity(f: &BucketFeatures) -> bool {
    match (f.impressions_share, f.clicks_share) {
        (Some(imp), Some(clk)) => f.demand_score > 0.55 && imp > 0.0 && clk < imp * 0.85,
        _ => false,
    }
}

/// Traffic earned, purchases lag disproportionately
fn conversion_problem(f: &BucketFeatures) -> bool {
    match (f.clicks_share, f.purchases_share) {
        (Some(clk), Some(pur)) => f.demand_score > 0.35 && clk > 0.0 && pur < clk * 0.75,
        _ => false,
    }
}

/// Converts at least as well as it clicks, but visibility is low
fn ppc_scaling_opportunity(f: &BucketFeatures) -> bool {
    match (f.impressions_share, f.clicks_share, f.purchases_share) {
        (Some(imp), Some(clk), Some(pur)) => {
            f.demand_score > 0.35 && pur >= clk * 0.95 && imp < 0.06
        }
        _ => false,
    }
}

/// Already strong on visibility and purchase capture
fn defend_position(f: &BucketFeatures) -> bool {
    match (f.impressions_share, f.purchases_share) {
        (Some(imp), Some(pur)) => imp >= 0.08 && pur >= 0.06,
        _ => false,
    }
}

/// Cascade order; later entries overwrite earlier ones
const RULES: [(Bucket, Rule); 4] = [
    (Bucket::RankingOpportunity, ranking_opportunity),
    (Bucket::ConversionProblem, conversion_problem),
    (Bucket::PpcScalingOpportunity, ppc_scaling_opportunity),
    (Bucket::DefendPosition, defend_position),
];

/// Classify one row: the last matching rule wins, default `IgnoreLowSignal`
pub fn classify(features: &BucketFeatures) -> Bucket {
    RULES
        .iter()
        .filter(|(_, rule)| rule(features))
        .map(|(bucket, _)| *bucket)
        .last()
        .unwrap_or_default()
}
