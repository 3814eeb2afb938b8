use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Fundamentals,
    PriceHistory,
    Financials,
    News,
}

impl FetchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStage::Fundamentals => "fundamentals",
            FetchStage::PriceHistory => "price_history",
            FetchStage::Financials => "financials",
            FetchStage::News => "news",
        }
    }
}

/// Per-ticker provider failure. Carried inside `anyhow::Error` and recovered with `downcast_ref`.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub provider: &'static str,
    pub stage: FetchStage,
    pub ticker: String,
    pub detail: String,
}

impl ProviderError {
    pub fn new(
        provider: &'static str,
        stage: FetchStage,
        ticker: &str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            stage,
            ticker: ticker.to_string(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provider error (provider={}, stage={}, ticker={}): {}",
            self.provider,
            self.stage.as_str(),
            self.ticker,
            self.detail
        )
    }
}

impl std::error::Error for ProviderError {}
