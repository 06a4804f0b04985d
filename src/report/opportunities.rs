//! Filtering, ranking and display of scored opportunities

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::schema::*;
use crate::pipeline::{float_values, Bucket};

/// Default minimum opportunity score shown
pub const DEFAULT_MIN_SCORE: f64 = 0.15;

/// Default number of rows shown
pub const DEFAULT_MAX_ROWS: usize = 75;

/// Columns shown in the opportunities table, in order
const DISPLAY_COLUMNS: [&str; 14] = [
    KEYWORD,
    BUCKET,
    OPPORTUNITY_SCORE,
    IMPRESSIONS_TOTAL_COUNT,
    CLICKS_TOTAL_COUNT,
    PURCHASES_TOTAL_COUNT,
    IMPRESSIONS_SHARE,
    CLICKS_SHARE,
    PURCHASES_SHARE,
    OUR_CLICK_THROUGH_RATE,
    MARKET_CLICK_THROUGH_RATE,
    OUR_CONVERSION_RATE,
    MARKET_CONVERSION_RATE,
    SUGGESTED_ACTION,
];

/// Row selection applied to the enriched table before display/export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityFilter {
    /// Case-insensitive substring the keyword must contain
    pub search: Option<String>,
    /// Only keep this bucket
    pub bucket: Option<Bucket>,
    /// Minimum opportunity score (inclusive)
    pub min_score: f64,
    /// Maximum rows kept after sorting
    pub max_rows: usize,
}

impl Default for OpportunityFilter {
    fn default() -> Self {
        Self {
            search: None,
            bucket: None,
            min_score: DEFAULT_MIN_SCORE,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl OpportunityFilter {
    /// Keep matching rows, sort by score descending (ties keep input order), truncate.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let keywords = text_values(df, KEYWORD)?;
        let buckets = text_values(df, BUCKET)?;
        let scores = float_values(df, OPPORTUNITY_SCORE)?;
        let needle = self.search.as_ref().map(|s| s.to_lowercase());

        let keep: Vec<bool> = (0..df.height())
            .map(|i| {
                let search_ok = match &needle {
                    Some(needle) => keywords[i]
                        .as_deref()
                        .is_some_and(|k| k.to_lowercase().contains(needle.as_str())),
                    None => true,
                };
                let bucket_ok = match self.bucket {
                    Some(bucket) => buckets[i].as_deref() == Some(bucket.label()),
                    None => true,
                };
                let score_ok = scores[i].is_some_and(|s| s >= self.min_score);
                search_ok && bucket_ok && score_ok
            })
            .collect();

        let filtered = df.filter(&BooleanChunked::from_slice("keep".into(), &keep))?;
        let sorted = filtered.sort(
            [OPPORTUNITY_SCORE],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )?;

        Ok(sorted.head(Some(self.max_rows)))
    }
}

/// One entry of the "what to do next" list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    pub keyword: String,
    pub bucket: Bucket,
    pub score: f64,
    pub action: String,
}

/// The `n` highest-scoring keywords of the whole table with their actions
pub fn top_actions(df: &DataFrame, n: usize) -> Result<Vec<ActionItem>> {
    let filter = OpportunityFilter {
        min_score: 0.0,
        max_rows: n,
        ..Default::default()
    };
    let top = filter.apply(df)?;

    let keywords = text_values(&top, KEYWORD)?;
    let buckets = bucket_values(&top)?;
    let scores = float_values(&top, OPPORTUNITY_SCORE)?;

    Ok((0..top.height())
        .map(|i| {
            let bucket = buckets[i].unwrap_or_default();
            ActionItem {
                keyword: keywords[i].clone().unwrap_or_default(),
                bucket,
                score: scores[i].unwrap_or(0.0),
                action: bucket.suggested_action().to_string(),
            }
        })
        .collect())
}

/// Render the opportunities table
pub fn display_opportunities(df: &DataFrame) -> Result<()> {
    let present: Vec<&str> = DISPLAY_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.column(name).is_ok())
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        present
            .iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let rendered: Vec<Vec<String>> = present
        .iter()
        .map(|name| render_column(df, name))
        .collect::<Result<_>>()?;

    for row in 0..df.height() {
        let cells: Vec<Cell> = present
            .iter()
            .zip(&rendered)
            .map(|(name, values)| {
                let cell = Cell::new(&values[row]);
                match *name {
                    BUCKET => cell.fg(bucket_color(&values[row])),
                    KEYWORD | SUGGESTED_ACTION => cell,
                    _ => cell.set_alignment(CellAlignment::Right),
                }
            })
            .collect();
        table.add_row(cells);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    Ok(())
}

/// Print the numbered "what you do next" list
pub fn display_top_actions(items: &[ActionItem]) {
    for (rank, item) in items.iter().enumerate() {
        println!(
            "    {} {}  {}",
            style(format!("{:>2}.", rank + 1)).dim(),
            style(&item.keyword).white().bold(),
            style(format!("[{}]", item.bucket)).cyan()
        );
        println!(
            "        {} {}",
            style(format!("score {:.3}", item.score)).yellow(),
            item.action
        );
    }
}

/// Percentage with two decimals; missing renders blank
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => String::new(),
    }
}

fn render_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = match name {
        KEYWORD | BUCKET | SUGGESTED_ACTION => text_values(df, name)?
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect(),
        OPPORTUNITY_SCORE => float_values(df, name)?
            .into_iter()
            .map(|v| v.map(|s| format!("{:.3}", s)).unwrap_or_default())
            .collect(),
        IMPRESSIONS_TOTAL_COUNT | CLICKS_TOTAL_COUNT | PURCHASES_TOTAL_COUNT => {
            float_values(df, name)?
                .into_iter()
                .map(|v| v.map(|c| format!("{:.0}", c)).unwrap_or_default())
                .collect()
        }
        _ => float_values(df, name)?.into_iter().map(fmt_pct).collect(),
    };
    Ok(values)
}

fn bucket_color(label: &str) -> Color {
    match label.parse::<Bucket>() {
        Ok(Bucket::RankingOpportunity) => Color::Green,
        Ok(Bucket::ConversionProblem) => Color::Red,
        Ok(Bucket::PpcScalingOpportunity) => Color::Yellow,
        Ok(Bucket::DefendPosition) => Color::Cyan,
        _ => Color::White,
    }
}

/// Read a column as optional strings; an absent column yields all-missing
pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    let text = column
        .as_materialized_series()
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", name))?;
    Ok(text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Read the Bucket column back into the enum
pub(crate) fn bucket_values(df: &DataFrame) -> Result<Vec<Option<Bucket>>> {
    text_values(df, BUCKET)?
        .into_iter()
        .map(|label| match label {
            Some(label) => label
                .parse::<Bucket>()
                .map(Some)
                .map_err(|e| anyhow::anyhow!(e)),
            None => Ok(None),
        })
        .collect()
}
