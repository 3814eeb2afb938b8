use crate::config::Settings;
use crate::domain::stock::StockSnapshot;
use crate::ingest::error::{FetchStage, ProviderError};
use crate::ingest::types::{
    FinancialYear, FinancialsResponse, FundamentalsPayload, NewsResponse, PriceHistoryResponse,
};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;
const HISTORY_PERIOD: &str = "3mo";

/// Fundamental snapshots and historical series for a single ticker.
///
/// Every call is per ticker and may fail independently; callers decide whether a failure
/// excludes the ticker or falls back to a neutral default.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_snapshot(&self, ticker: &str) -> Result<StockSnapshot>;

    /// Roughly three months of daily closes, oldest first.
    async fn fetch_daily_closes(&self, ticker: &str) -> Result<Vec<f64>>;

    /// Annual income statement lines, in any order.
    async fn fetch_annual_financials(&self, ticker: &str) -> Result<Vec<FinancialYear>>;
}

#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// Latest headlines first. No news is an empty list, not an error.
    async fn fetch_headlines(&self, ticker: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct HttpJsonDataProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    retries: u32,
}

impl HttpJsonDataProvider {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_data_provider_base_url()?.to_string();
        let api_key = settings.data_provider_api_key.clone();

        let timeout_secs = std::env::var("DATA_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("DATA_PROVIDER_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES)
            .max(1);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build data provider http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            retries,
        })
    }

    fn url(&self, resource: &str, ticker: &str) -> String {
        format!(
            "{}/v1/{}/{}",
            self.base_url.trim_end_matches('/'),
            resource,
            ticker.trim()
        )
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let res = self
            .http
            .get(url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .context("data provider request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read provider response")?;

        if !status.is_success() {
            anyhow::bail!("data provider HTTP {status}: {text}");
        }

        serde_json::from_str::<T>(&text)
            .with_context(|| format!("provider response is not the expected JSON: {text}"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        stage: FetchStage,
        ticker: &str,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(resource, ticker);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.get_once::<T>(&url, query).await {
                Ok(v) => return Ok(v),
                Err(err) => {
                    if attempt >= self.retries {
                        let diag = ProviderError::new(
                            self.provider_name(),
                            stage,
                            ticker,
                            format!("{err:#}"),
                        );
                        return Err(anyhow::Error::new(diag));
                    }
                    let backoff = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(
                        attempt,
                        ?backoff,
                        ticker,
                        stage = stage.as_str(),
                        error = %err,
                        "data provider fetch failed; retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for HttpJsonDataProvider {
    fn provider_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<StockSnapshot> {
        let payload: FundamentalsPayload = self
            .get_json(FetchStage::Fundamentals, ticker, "fundamentals", &[])
            .await?;
        Ok(payload.into_snapshot(ticker))
    }

    async fn fetch_daily_closes(&self, ticker: &str) -> Result<Vec<f64>> {
        let resp: PriceHistoryResponse = self
            .get_json(
                FetchStage::PriceHistory,
                ticker,
                "history",
                &[("period", HISTORY_PERIOD), ("interval", "1d")],
            )
            .await?;
        Ok(resp.closes())
    }

    async fn fetch_annual_financials(&self, ticker: &str) -> Result<Vec<FinancialYear>> {
        let resp: FinancialsResponse = self
            .get_json(FetchStage::Financials, ticker, "financials", &[("freq", "annual")])
            .await?;
        Ok(resp.years)
    }
}

#[async_trait::async_trait]
impl NewsProvider for HttpJsonDataProvider {
    async fn fetch_headlines(&self, ticker: &str) -> Result<Vec<String>> {
        let resp: NewsResponse = self
            .get_json(FetchStage::News, ticker, "news", &[])
            .await?;
        Ok(resp.headlines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(base_url: &str) -> Settings {
        Settings {
            data_provider_base_url: Some(base_url.to_string()),
            data_provider_api_key: Some("k".to_string()),
            sentry_dsn: None,
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
            starting_capital: 100_000.0,
        }
    }

    #[test]
    fn builds_resource_urls_without_double_slashes() {
        let p = HttpJsonDataProvider::from_settings(&settings("https://feed.example/")).unwrap();
        assert_eq!(
            p.url("fundamentals", "TCS.NS"),
            "https://feed.example/v1/fundamentals/TCS.NS"
        );
        assert_eq!(p.headers().unwrap().get("x-api-key").unwrap(), "k");
    }

    #[test]
    fn requires_base_url() {
        let mut s = settings("x");
        s.data_provider_base_url = None;
        assert!(HttpJsonDataProvider::from_settings(&s).is_err());
    }
}
