use crate::domain::stock::StockSnapshot;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Quote-summary payload keyed the way common equity data feeds key it.
///
/// Numbers may arrive as JSON numbers, numeric strings, `null` or garbage; anything that does
/// not coerce to a finite float becomes `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalsPayload {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(rename = "currentPrice", default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    #[serde(rename = "marketCap", default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(rename = "fiftyDayAverage", default, deserialize_with = "lenient_f64")]
    pub fifty_day_average: Option<f64>,
    #[serde(rename = "twoHundredDayAverage", default, deserialize_with = "lenient_f64")]
    pub two_hundred_day_average: Option<f64>,
    #[serde(rename = "trailingPE", default, deserialize_with = "lenient_f64")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", default, deserialize_with = "lenient_f64")]
    pub forward_pe: Option<f64>,
    #[serde(rename = "pegRatio", default, deserialize_with = "lenient_f64")]
    pub peg_ratio: Option<f64>,
    #[serde(rename = "priceToBook", default, deserialize_with = "lenient_f64")]
    pub price_to_book: Option<f64>,
    #[serde(rename = "returnOnEquity", default, deserialize_with = "lenient_f64")]
    pub return_on_equity: Option<f64>,
    #[serde(rename = "profitMargins", default, deserialize_with = "lenient_f64")]
    pub profit_margins: Option<f64>,
    #[serde(rename = "debtToEquity", default, deserialize_with = "lenient_f64")]
    pub debt_to_equity: Option<f64>,
    #[serde(rename = "currentRatio", default, deserialize_with = "lenient_f64")]
    pub current_ratio: Option<f64>,
    #[serde(rename = "dividendYield", default, deserialize_with = "lenient_f64")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "targetMeanPrice", default, deserialize_with = "lenient_f64")]
    pub target_mean_price: Option<f64>,
}

impl FundamentalsPayload {
    pub fn into_snapshot(self, ticker: &str) -> StockSnapshot {
        let peg_ratio = self
            .peg_ratio
            .or_else(|| derive_peg(self.trailing_pe, self.forward_pe));

        StockSnapshot {
            ticker: ticker.to_string(),
            sector: self
                .sector
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price: self.current_price,
            market_cap: self.market_cap,
            dma_50: self.fifty_day_average,
            dma_200: self.two_hundred_day_average,
            trailing_pe: self.trailing_pe,
            forward_pe: self.forward_pe,
            peg_ratio,
            price_to_book: self.price_to_book,
            roe: self.return_on_equity,
            profit_margin: self.profit_margins,
            debt_to_equity: self.debt_to_equity,
            current_ratio: self.current_ratio,
            dividend_yield: self.dividend_yield,
            target_mean_price: self.target_mean_price,
        }
    }
}

/// PEG from the implied earnings growth between trailing and forward P/E.
/// Only defined when forward < trailing and the implied growth exceeds 5%.
pub fn derive_peg(trailing_pe: Option<f64>, forward_pe: Option<f64>) -> Option<f64> {
    let (t, f) = (trailing_pe?, forward_pe?);
    if t <= 0.0 || f <= 0.0 || f >= t {
        return None;
    }
    let growth = t / f - 1.0;
    if growth > 0.05 {
        Some(t / (growth * 100.0))
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub bars: Vec<PriceBar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: chrono::NaiveDate,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close: Option<f64>,
}

impl PriceHistoryResponse {
    /// Closing prices oldest first, gaps dropped.
    pub fn closes(mut self) -> Vec<f64> {
        self.bars.sort_by_key(|b| b.date);
        self.bars.into_iter().filter_map(|b| b.close).collect()
    }
}

/// One fiscal year of the annual income statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialYear {
    pub fiscal_year: i32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_income: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialsResponse {
    #[serde(default)]
    pub years: Vec<FinancialYear>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: Option<String>,
}

impl NewsResponse {
    /// Headlines in feed order (latest first). Untitled items stay as blanks so the feed
    /// position of every item is kept.
    pub fn headlines(self) -> Vec<String> {
        self.items
            .into_iter()
            .map(|i| i.title.map(|t| t.trim().to_string()).unwrap_or_default())
            .collect()
    }
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coerce_f64))
}

pub fn coerce_f64(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numeric_strings_and_drops_garbage() {
        let payload: FundamentalsPayload = serde_json::from_value(json!({
            "sector": "Technology",
            "currentPrice": "3,512.5",
            "trailingPE": 28.4,
            "priceToBook": "NaN",
            "debtToEquity": null,
            "returnOnEquity": {"raw": 0.4},
        }))
        .unwrap();

        assert_eq!(payload.current_price, Some(3512.5));
        assert_eq!(payload.trailing_pe, Some(28.4));
        assert_eq!(payload.price_to_book, None);
        assert_eq!(payload.debt_to_equity, None);
        assert_eq!(payload.return_on_equity, None);
    }

    #[test]
    fn derives_peg_when_provider_omits_it() {
        let payload: FundamentalsPayload = serde_json::from_value(json!({
            "trailingPE": 30.0,
            "forwardPE": 20.0,
        }))
        .unwrap();
        let snap = payload.into_snapshot("TCS.NS");
        // growth = 30/20 - 1 = 50% -> 30 / 50
        assert!((snap.peg_ratio.unwrap() - 0.6).abs() < 1e-9);
        assert_eq!(snap.ticker, "TCS.NS");
    }

    #[test]
    fn peg_needs_meaningful_growth() {
        assert_eq!(derive_peg(Some(20.0), Some(19.5)), None);
        assert_eq!(derive_peg(Some(20.0), Some(25.0)), None);
        assert_eq!(derive_peg(None, Some(10.0)), None);
    }

    #[test]
    fn provider_peg_wins_over_derived() {
        let payload: FundamentalsPayload = serde_json::from_value(json!({
            "trailingPE": 30.0,
            "forwardPE": 20.0,
            "pegRatio": 2.2,
            "sector": "  "
        }))
        .unwrap();
        let snap = payload.into_snapshot("X.NS");
        assert_eq!(snap.peg_ratio, Some(2.2));
        assert_eq!(snap.sector, None);
    }

    #[test]
    fn history_closes_are_sorted_oldest_first() {
        let resp: PriceHistoryResponse = serde_json::from_value(json!({
            "bars": [
                {"date": "2026-01-07", "close": 103.0},
                {"date": "2026-01-05", "close": 101.0},
                {"date": "2026-01-06", "close": null},
            ]
        }))
        .unwrap();
        assert_eq!(resp.closes(), vec![101.0, 103.0]);
    }

    #[test]
    fn headlines_keep_feed_positions() {
        let resp: NewsResponse = serde_json::from_value(json!({
            "items": [{"title": " Record profit "}, {"title": ""}, {"publisher": "x"}]
        }))
        .unwrap();
        assert_eq!(
            resp.headlines(),
            vec!["Record profit".to_string(), String::new(), String::new()]
        );
    }
}
