use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Stock,
    MutualFund,
    Etf,
    Index,
}

impl AssetType {
    /// Maps the `Type` column of the holdings table. Anything unrecognised is a stock.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "MF" => Self::MutualFund,
            "ETF" => Self::Etf,
            "INDEX" => Self::Index,
            _ => Self::Stock,
        }
    }

    /// MF, ETF and Index holdings count towards the safety bucket.
    pub fn is_safety(&self) -> bool {
        !matches!(self, AssetType::Stock)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub shares: f64,
    pub avg_price: f64,
    pub asset_type: AssetType,
}

impl Holding {
    pub fn value(&self) -> f64 {
        self.shares * self.avg_price
    }
}

/// Read-only view of the user's existing portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holdings {
    items: Vec<Holding>,
}

impl Holdings {
    pub fn new(items: Vec<Holding>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holding> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Book value of everything held (shares × average price).
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(Holding::value).sum()
    }

    /// Book value per ticker; repeated rows for a ticker are summed.
    pub fn value_by_ticker(&self) -> BTreeMap<String, f64> {
        let mut out = BTreeMap::new();
        for h in &self.items {
            *out.entry(h.ticker.clone()).or_insert(0.0) += h.value();
        }
        out
    }

    pub fn safety_value(&self) -> f64 {
        self.items
            .iter()
            .filter(|h| h.asset_type.is_safety())
            .map(Holding::value)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(ticker: &str, shares: f64, avg: f64, t: &str) -> Holding {
        Holding {
            ticker: ticker.to_string(),
            shares,
            avg_price: avg,
            asset_type: AssetType::from_label(t),
        }
    }

    #[test]
    fn values_holdings_by_ticker_and_bucket() {
        let book = Holdings::new(vec![
            h("INFY.NS", 10.0, 1500.0, "Stock"),
            h("INFY.NS", 5.0, 1600.0, "Stock"),
            h("NIFTYBEES.NS", 100.0, 250.0, "ETF"),
            h("UTI Nifty 50", 40.0, 150.0, "MF"),
        ]);

        assert_eq!(book.total_value(), 15000.0 + 8000.0 + 25000.0 + 6000.0);
        assert_eq!(book.value_by_ticker().get("INFY.NS").copied(), Some(23000.0));
        assert_eq!(book.value_by_ticker().len(), 3);
        assert_eq!(book.safety_value(), 31000.0);
    }

    #[test]
    fn asset_labels_are_case_insensitive() {
        assert_eq!(AssetType::from_label(" mf "), AssetType::MutualFund);
        assert_eq!(AssetType::from_label("index"), AssetType::Index);
        assert_eq!(AssetType::from_label("Equity"), AssetType::Stock);
        assert!(!AssetType::Stock.is_safety());
        assert!(AssetType::Etf.is_safety());
    }
}
