use crate::domain::stock::{ScoredStock, StockSnapshot};
use crate::scoring::technical;
use crate::scoring::valuation::{quality_score, value_score, Fundamentals};
use std::cmp::Ordering;

pub const VALUE_WEIGHT: f64 = 0.4;
pub const QUALITY_WEIGHT: f64 = 0.2;
pub const TECH_WEIGHT: f64 = 0.4;

pub fn total_score(value: f64, quality: f64, tech: f64) -> f64 {
    value * VALUE_WEIGHT + quality * QUALITY_WEIGHT + tech * TECH_WEIGHT
}

pub fn score_stock(snapshot: StockSnapshot) -> ScoredStock {
    let fundamentals = Fundamentals::clean(&snapshot);
    let tech = technical::score(&snapshot);
    let value = value_score(&fundamentals);
    let quality = quality_score(&fundamentals);

    ScoredStock {
        sector: fundamentals.sector,
        category: fundamentals.category,
        value_score: value,
        quality_score: quality,
        tech_score: tech.tech_score,
        trend: tech.trend,
        total_score: total_score(value, quality, tech.tech_score),
        snapshot,
    }
}

/// Scores every snapshot and returns the table ranked by total score.
pub fn blend(snapshots: Vec<StockSnapshot>) -> Vec<ScoredStock> {
    rank(snapshots.into_iter().map(score_stock).collect())
}

/// Stable sort by descending total score; equal scores keep their input order, so ranking an
/// already ranked table is a no-op.
pub fn rank(mut table: Vec<ScoredStock>) -> Vec<ScoredStock> {
    table.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    table
}
