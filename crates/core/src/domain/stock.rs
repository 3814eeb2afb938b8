use serde::{Deserialize, Serialize};

/// Per-ticker fundamental and technical snapshot as supplied by the market data provider.
///
/// Every numeric field is optional; missing data is resolved by the engines that read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub ticker: String,
    pub sector: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub dma_50: Option<f64>,
    pub dma_200: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub roe: Option<f64>,
    pub profit_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub target_mean_price: Option<f64>,
}

impl StockSnapshot {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
    }

    /// Price usable for sizing an order: present, finite and strictly positive.
    pub fn tradable_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// Sector bucket that selects the valuation rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorCategory {
    Financial,
    RealEstate,
    Technology,
    General,
}

impl SectorCategory {
    /// Classifies a raw provider sector string. Order matters: "Financial Services" is a bank.
    pub fn classify(sector: &str) -> Self {
        let s = sector.to_lowercase();
        if s.contains("financial") || s.contains("bank") {
            Self::Financial
        } else if s.contains("real estate") || s.contains("construction") {
            Self::RealEstate
        } else if s.contains("technology") || s.contains("services") {
            Self::Technology
        } else {
            Self::General
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
}

/// A snapshot with its blended scores attached. All scores are on a 0..=100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStock {
    pub snapshot: StockSnapshot,
    /// Sector after cleaning (`"Unknown"` when the provider had none).
    pub sector: String,
    pub category: SectorCategory,
    pub value_score: f64,
    pub quality_score: f64,
    pub tech_score: f64,
    pub trend: Trend,
    pub total_score: f64,
}

impl ScoredStock {
    pub fn ticker(&self) -> &str {
        &self.snapshot.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sector_strings_once() {
        assert_eq!(SectorCategory::classify("Financial Services"), SectorCategory::Financial);
        assert_eq!(SectorCategory::classify("Private Sector Bank"), SectorCategory::Financial);
        assert_eq!(SectorCategory::classify("Real Estate"), SectorCategory::RealEstate);
        assert_eq!(SectorCategory::classify("Construction"), SectorCategory::RealEstate);
        assert_eq!(SectorCategory::classify("Technology"), SectorCategory::Technology);
        assert_eq!(SectorCategory::classify("Communication Services"), SectorCategory::Technology);
        assert_eq!(SectorCategory::classify("Industrials"), SectorCategory::General);
        assert_eq!(SectorCategory::classify("Unknown"), SectorCategory::General);
    }

    #[test]
    fn tradable_price_rejects_missing_and_non_positive() {
        let mut s = StockSnapshot::new("TCS.NS");
        assert_eq!(s.tradable_price(), None);
        s.price = Some(0.0);
        assert_eq!(s.tradable_price(), None);
        s.price = Some(f64::NAN);
        assert_eq!(s.tradable_price(), None);
        s.price = Some(3500.0);
        assert_eq!(s.tradable_price(), Some(3500.0));
    }
}
