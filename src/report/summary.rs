//! KPI summary of a scored export

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;
use serde::Serialize;

use super::opportunities::bucket_values;
use crate::pipeline::schema::OPPORTUNITY_SCORE;
use crate::pipeline::{float_values, Bucket};

/// Row count for one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub bucket: Bucket,
    pub count: usize,
}

/// Headline numbers of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_queries: usize,
    pub top_score: f64,
    /// One entry per bucket, zero counts included
    pub bucket_counts: Vec<BucketCount>,
}

impl RunSummary {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let buckets = bucket_values(df)?;
        let top_score = float_values(df, OPPORTUNITY_SCORE)?
            .into_iter()
            .flatten()
            .fold(0.0_f64, f64::max);

        let bucket_counts = Bucket::ALL
            .iter()
            .map(|bucket| BucketCount {
                bucket: *bucket,
                count: buckets.iter().filter(|b| **b == Some(*bucket)).count(),
            })
            .collect();

        Ok(Self {
            total_queries: df.height(),
            top_score,
            bucket_counts,
        })
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.bucket_counts
            .iter()
            .find(|c| c.bucket == bucket)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("QUERY SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
            Cell::new("Meaning").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🔎 Total queries"),
            Cell::new(self.total_queries).add_attribute(Attribute::Bold),
            Cell::new("Rows analyzed"),
        ]);

        let rows = [
            (Bucket::RankingOpportunity, "🚀 Ranking opps", "High demand, under-captured clicks", Color::Green),
            (Bucket::ConversionProblem, "🛠️  Conversion issues", "Traffic without purchases", Color::Red),
            (Bucket::PpcScalingOpportunity, "📈 PPC scale", "Good efficiency, low coverage", Color::Yellow),
            (Bucket::DefendPosition, "🛡️  Defend", "Strong visibility and purchase share", Color::Cyan),
            (Bucket::IgnoreLowSignal, "💤 Low signal", "Nothing actionable yet", Color::White),
        ];

        for (bucket, label, hint, color) in rows {
            let count = self.count(bucket);
            table.add_row(vec![
                Cell::new(label),
                Cell::new(count).fg(if count == 0 { Color::White } else { color }),
                Cell::new(hint),
            ]);
        }

        table.add_row(vec![
            Cell::new("⭐ Top score"),
            Cell::new(format!("{:.3}", self.top_score))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new("Highest opportunity score"),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
