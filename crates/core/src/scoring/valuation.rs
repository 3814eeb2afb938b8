//! Sector-adjusted value score and a four-point quality checklist.

use crate::domain::stock::{SectorCategory, StockSnapshot};

/// Missing P/E, P/B and debt/equity read as "expensive / risky".
const MISSING_RATIO: f64 = 999.0;
const UNKNOWN_SECTOR: &str = "Unknown";

/// Snapshot fields the valuation rules read, after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Fundamentals {
    pub sector: String,
    pub category: SectorCategory,
    pub trailing_pe: f64,
    pub price_to_book: f64,
    pub roe: f64,
    pub debt_to_equity: f64,
    pub profit_margin: Option<f64>,
    pub peg_ratio: Option<f64>,
}

impl Fundamentals {
    pub fn clean(snapshot: &StockSnapshot) -> Self {
        let sector = snapshot
            .sector
            .clone()
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());
        let category = SectorCategory::classify(&sector);
        Self {
            sector,
            category,
            trailing_pe: snapshot.trailing_pe.unwrap_or(MISSING_RATIO),
            price_to_book: snapshot.price_to_book.unwrap_or(MISSING_RATIO),
            roe: snapshot.roe.unwrap_or(0.0),
            debt_to_equity: snapshot.debt_to_equity.unwrap_or(MISSING_RATIO),
            profit_margin: snapshot.profit_margin,
            peg_ratio: snapshot.peg_ratio,
        }
    }

    fn margin_above(&self, threshold: f64) -> bool {
        self.profit_margin.is_some_and(|m| m > threshold)
    }
}

pub type RuleTable = fn(&Fundamentals) -> f64;

/// Rule table per sector bucket. Each table awards at most 100 points.
pub fn rule_table(category: SectorCategory) -> RuleTable {
    match category {
        SectorCategory::Financial => financial_rules,
        SectorCategory::RealEstate => real_estate_rules,
        SectorCategory::Technology => technology_rules,
        SectorCategory::General => general_rules,
    }
}

// Banks are valued on book, not earnings; stability earns a flat 30.
fn financial_rules(f: &Fundamentals) -> f64 {
    let mut score = 30.0;
    if f.price_to_book < 1.5 {
        score += 40.0;
    } else if f.price_to_book < 2.5 {
        score += 20.0;
    }
    if f.roe > 0.12 {
        score += 30.0;
    }
    score
}

// Leverage is normal here, so the debt bar is high.
fn real_estate_rules(f: &Fundamentals) -> f64 {
    let mut score = 0.0;
    if f.trailing_pe < 20.0 {
        score += 40.0;
    }
    if f.debt_to_equity < 200.0 {
        score += 30.0;
    }
    if f.margin_above(0.10) {
        score += 30.0;
    }
    score
}

fn technology_rules(f: &Fundamentals) -> f64 {
    let mut score = 0.0;
    if f.trailing_pe < 25.0 {
        score += 30.0;
    }
    if f.debt_to_equity < 10.0 {
        score += 30.0;
    }
    if f.margin_above(0.15) {
        score += 40.0;
    }
    score
}

fn general_rules(f: &Fundamentals) -> f64 {
    let mut score = 0.0;
    if f.trailing_pe < 15.0 {
        score += 40.0;
    } else if f.trailing_pe < 25.0 {
        score += 20.0;
    }
    if f.debt_to_equity < 70.0 {
        score += 30.0;
    }
    if f.roe > 0.15 {
        score += 30.0;
    }
    score
}

pub fn value_score(f: &Fundamentals) -> f64 {
    rule_table(f.category)(f)
}

/// Piotroski-lite: positive ROE, positive margin, debt/equity under 100, PEG under 1.5.
/// Scaled from 0..=4 points to 0..=100.
pub fn quality_score(f: &Fundamentals) -> f64 {
    let checks = [
        f.roe > 0.0,
        f.margin_above(0.0),
        f.debt_to_equity < 100.0,
        f.peg_ratio.is_some_and(|p| p < 1.5),
    ];
    let points = checks.iter().filter(|c| **c).count();
    points as f64 / checks.len() as f64 * 100.0
}
