//! Moving-average trend score and on-demand RSI.

use crate::domain::stock::{StockSnapshot, Trend};
use crate::ingest::{listed_symbol, MarketDataProvider};

pub const RSI_PERIOD: usize = 14;
pub const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechnicalScore {
    pub tech_score: f64,
    pub trend: Trend,
}

/// +50 above the 200-day average, +30 above the 50-day, +20 on a golden cross.
///
/// A missing 200-day average falls back to the price itself, which can never be an uptrend.
/// Any comparison with a missing operand earns nothing.
pub fn score(snapshot: &StockSnapshot) -> TechnicalScore {
    let price = snapshot.price;
    let dma_200 = snapshot.dma_200.or(price);
    let dma_50 = snapshot.dma_50;

    let above = |a: Option<f64>, b: Option<f64>| matches!((a, b), (Some(a), Some(b)) if a > b);

    let trend = if above(price, dma_200) {
        Trend::Uptrend
    } else {
        Trend::Downtrend
    };

    let mut tech_score = 0.0;
    if trend == Trend::Uptrend {
        tech_score += 50.0;
    }
    if above(price, dma_50) {
        tech_score += 30.0;
    }
    if above(dma_50, dma_200) {
        tech_score += 20.0;
    }

    TechnicalScore { tech_score, trend }
}

/// RSI over the last `period` price changes using simple means of gains and losses.
///
/// `None` when there are fewer than `period + 1` closes or the window is completely flat.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let window = &closes[closes.len() - period - 1..];
    let (gain, loss) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(g, l), d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        });
    let avg_gain = gain / period as f64;
    let avg_loss = loss / period as f64;

    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }
    let rs = avg_gain / avg_loss;
    let value = 100.0 - 100.0 / (1.0 + rs);
    value.is_finite().then_some(value)
}

/// Fetches ~3 months of closes for one ticker and returns its 14-period RSI.
/// Any fetch failure or short history reads as neutral 50.
pub async fn fetch_rsi<P>(provider: &P, ticker: &str) -> f64
where
    P: MarketDataProvider + ?Sized,
{
    let symbol = listed_symbol(ticker);
    match provider.fetch_daily_closes(&symbol).await {
        Ok(closes) => rsi(&closes, RSI_PERIOD).unwrap_or(NEUTRAL_RSI),
        Err(err) => {
            tracing::debug!(
                ticker = %symbol,
                error = %err,
                "price history unavailable; neutral RSI"
            );
            NEUTRAL_RSI
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixture::FixtureDataProvider;
    use serde_json::json;

    fn snap(price: Option<f64>, dma_50: Option<f64>, dma_200: Option<f64>) -> StockSnapshot {
        StockSnapshot {
            price,
            dma_50,
            dma_200,
            ..StockSnapshot::new("X.NS")
        }
    }

    #[test]
    fn full_uptrend_scores_100() {
        let t = score(&snap(Some(120.0), Some(110.0), Some(100.0)));
        assert_eq!(t.tech_score, 100.0);
        assert_eq!(t.trend, Trend::Uptrend);
    }

    #[test]
    fn below_both_averages_scores_0() {
        let t = score(&snap(Some(80.0), Some(90.0), Some(100.0)));
        assert_eq!(t.tech_score, 0.0);
        assert_eq!(t.trend, Trend::Downtrend);
    }

    #[test]
    fn golden_cross_without_price_strength() {
        let t = score(&snap(Some(90.0), Some(110.0), Some(100.0)));
        assert_eq!(t.tech_score, 20.0);
    }

    #[test]
    fn missing_averages_earn_nothing() {
        let t = score(&snap(Some(100.0), None, None));
        assert_eq!(t.tech_score, 0.0);
        assert_eq!(t.trend, Trend::Downtrend);

        let t = score(&snap(None, Some(1.0), Some(2.0)));
        assert_eq!(t.tech_score, 0.0);
    }

    #[test]
    fn rsi_needs_period_plus_one_closes() {
        let closes: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&closes, RSI_PERIOD), None);
    }

    #[test]
    fn rsi_of_monotonic_rise_is_100() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&closes, RSI_PERIOD), Some(100.0));
    }

    #[test]
    fn rsi_of_flat_series_is_undefined() {
        assert_eq!(rsi(&[100.0; 20], RSI_PERIOD), None);
    }

    #[test]
    fn rsi_balances_gains_and_losses() {
        // Alternating +1 / -1 over the window: equal mean gain and loss.
        let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 100.0 } else { 101.0 }).collect();
        let v = rsi(&closes, RSI_PERIOD).unwrap();
        assert!((v - 50.0).abs() < 1e-9);

        // Gains of 3 against losses of 1 -> RS 3 -> RSI 75.
        let mut closes = vec![100.0];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 3.0 } else { last - 1.0 });
        }
        let v = rsi(&closes, RSI_PERIOD).unwrap();
        assert!((v - 75.0).abs() < 1e-9, "{v}");
    }

    #[tokio::test]
    async fn fetch_rsi_fails_open() {
        let rising: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let p = FixtureDataProvider::from_value(json!({
            "history": {"UP.NS": rising, "SHORT.NS": [1.0, 2.0]}
        }))
        .unwrap();

        assert_eq!(fetch_rsi(&p, "UP").await, 100.0);
        assert_eq!(fetch_rsi(&p, "SHORT.NS").await, NEUTRAL_RSI);
        assert_eq!(fetch_rsi(&p, "NOPE.NS").await, NEUTRAL_RSI);
    }
}
