use crate::domain::stock::StockSnapshot;
use crate::ingest::error::{FetchStage, ProviderError};
use crate::ingest::provider::{MarketDataProvider, NewsProvider};
use crate::ingest::types::{FinancialYear, FundamentalsPayload};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Offline provider backed by a single JSON document:
///
/// ```json
/// {
///   "fundamentals": { "TCS.NS": { "currentPrice": 3500, "sector": "Technology" } },
///   "history":      { "TCS.NS": [3400.0, 3420.5] },
///   "financials":   { "TCS.NS": [{ "fiscal_year": 2025, "total_revenue": 2.4e12, "net_income": 4.6e11 }] },
///   "news":         { "TCS.NS": ["TCS wins large deal"] }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureDataProvider {
    #[serde(default)]
    pub fundamentals: BTreeMap<String, FundamentalsPayload>,
    #[serde(default)]
    pub history: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub financials: BTreeMap<String, Vec<FinancialYear>>,
    #[serde(default)]
    pub news: BTreeMap<String, Vec<String>>,
}

impl FixtureDataProvider {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture file: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("invalid fixture file: {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("fixture is not valid JSON")
    }

    pub fn from_value(v: serde_json::Value) -> Result<Self> {
        serde_json::from_value(v).context("fixture has an unexpected shape")
    }

    /// Tickers with a fundamentals entry, in key order.
    pub fn tickers(&self) -> Vec<String> {
        self.fundamentals.keys().cloned().collect()
    }

    fn missing(&self, stage: FetchStage, ticker: &str) -> anyhow::Error {
        anyhow::Error::new(ProviderError::new(
            self.provider_name(),
            stage,
            ticker,
            "ticker not present in fixture",
        ))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for FixtureDataProvider {
    fn provider_name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<StockSnapshot> {
        let payload = self
            .fundamentals
            .get(ticker)
            .cloned()
            .ok_or_else(|| self.missing(FetchStage::Fundamentals, ticker))?;
        Ok(payload.into_snapshot(ticker))
    }

    async fn fetch_daily_closes(&self, ticker: &str) -> Result<Vec<f64>> {
        self.history
            .get(ticker)
            .cloned()
            .ok_or_else(|| self.missing(FetchStage::PriceHistory, ticker))
    }

    async fn fetch_annual_financials(&self, ticker: &str) -> Result<Vec<FinancialYear>> {
        self.financials
            .get(ticker)
            .cloned()
            .ok_or_else(|| self.missing(FetchStage::Financials, ticker))
    }
}

#[async_trait::async_trait]
impl NewsProvider for FixtureDataProvider {
    async fn fetch_headlines(&self, ticker: &str) -> Result<Vec<String>> {
        Ok(self.news.get(ticker).cloned().unwrap_or_default())
    }
}
