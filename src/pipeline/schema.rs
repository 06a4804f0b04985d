//! Canonical column vocabulary of a search-query performance export
//!
//! Column lookups are exact string matches against these names after the
//! header normalizer has run. Anything outside this vocabulary is passed
//! through untouched.

/// Identifying key of every row
pub const KEYWORD: &str = "Keyword";

pub const IMPRESSIONS_ASIN_COUNT: &str = "Impressions: ASIN Count";
pub const IMPRESSIONS_TOTAL_COUNT: &str = "Impressions: Total Count";
pub const CLICKS_ASIN_COUNT: &str = "Clicks: ASIN Count";
pub const CLICKS_TOTAL_COUNT: &str = "Clicks: Total Count";
pub const CART_ADDS_ASIN_COUNT: &str = "Cart Adds: ASIN Count";
pub const CART_ADDS_TOTAL_COUNT: &str = "Cart Adds: Total Count";
pub const PURCHASES_ASIN_COUNT: &str = "Purchases: ASIN Count";
pub const PURCHASES_TOTAL_COUNT: &str = "Purchases: Total Count";

pub const OUR_CONVERSION_RATE: &str = "Our Conversion Rate";
pub const MARKET_CONVERSION_RATE: &str = "Market Conversion Rate";
pub const OUR_CLICK_THROUGH_RATE: &str = "Our Click Through Rate";
pub const MARKET_CLICK_THROUGH_RATE: &str = "Market Click Through Rate";

pub const IMPRESSIONS_SHARE: &str = "Impressions - ASIN Share";
pub const CLICKS_SHARE: &str = "Clicks - ASIN Share";
pub const ADD_TO_CART_SHARE: &str = "Add to Cart - ASIN Share";
pub const PURCHASES_SHARE: &str = "Purchases - ASIN Share";

/// Literal header some exports use twice for the CR and CTR deltas
pub const DELTA: &str = "Delta";
pub const DELTA_CR: &str = "Delta (CR)";
pub const DELTA_CTR: &str = "Delta (CTR)";
pub const DELTA_IMPRESSIONS_TO_CLICKS: &str = "Delta - Impressions to Clicks";
pub const DELTA_CLICKS_TO_CART: &str = "Delta - Clicks to Add to Cart";
pub const DELTA_CART_TO_PURCHASES: &str = "Delta - Add to Cart to Purchases";

// Derived columns, appended in this order
pub const MARKET_DEMAND: &str = "Market_Demand";
pub const CLICK_GAP: &str = "ClickGap";
pub const CONV_GAP: &str = "ConvGap";
pub const SHARE_GAP_CLICKS: &str = "ShareGap_Clicks";
pub const SHARE_GAP_PURCHASES: &str = "ShareGap_Purchases";
pub const DEMAND_SCORE: &str = "DemandScore";
pub const OPPORTUNITY_SCORE: &str = "OpportunityScore";
pub const BUCKET: &str = "Bucket";
pub const SUGGESTED_ACTION: &str = "Suggested Action";

/// Plain count columns (value coercer only, no percent heuristic)
pub const COUNT_COLUMNS: [&str; 8] = [
    IMPRESSIONS_ASIN_COUNT,
    IMPRESSIONS_TOTAL_COUNT,
    CLICKS_ASIN_COUNT,
    CLICKS_TOTAL_COUNT,
    CART_ADDS_ASIN_COUNT,
    CART_ADDS_TOTAL_COUNT,
    PURCHASES_ASIN_COUNT,
    PURCHASES_TOTAL_COUNT,
];

/// Own and market conversion / click-through rates
pub const RATE_COLUMNS: [&str; 4] = [
    OUR_CONVERSION_RATE,
    MARKET_CONVERSION_RATE,
    OUR_CLICK_THROUGH_RATE,
    MARKET_CLICK_THROUGH_RATE,
];

/// ASIN share of each funnel stage
pub const SHARE_COLUMNS: [&str; 4] = [
    IMPRESSIONS_SHARE,
    CLICKS_SHARE,
    ADD_TO_CART_SHARE,
    PURCHASES_SHARE,
];

/// Rate and funnel deltas supplied by the export
pub const DELTA_COLUMNS: [&str; 5] = [
    DELTA_CR,
    DELTA_CTR,
    DELTA_IMPRESSIONS_TO_CLICKS,
    DELTA_CLICKS_TO_CART,
    DELTA_CART_TO_PURCHASES,
];

/// Every column that goes through the percent/fraction coercer
pub fn percent_columns() -> impl Iterator<Item = &'static str> {
    RATE_COLUMNS
        .into_iter()
        .chain(SHARE_COLUMNS)
        .chain(DELTA_COLUMNS)
}

/// Derived column names in the order they are appended
pub const DERIVED_COLUMNS: [&str; 9] = [
    MARKET_DEMAND,
    CLICK_GAP,
    CONV_GAP,
    SHARE_GAP_CLICKS,
    SHARE_GAP_PURCHASES,
    DEMAND_SCORE,
    OPPORTUNITY_SCORE,
    BUCKET,
    SUGGESTED_ACTION,
];
