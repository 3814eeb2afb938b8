use crate::domain::recommendation::StockPick;
use crate::ingest::MarketDataProvider;
use crate::scoring::technical::fetch_rsi;

pub const OVERBOUGHT_RSI: f64 = 75.0;
pub const OVERSOLD_RSI: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiSignal {
    pub fn classify(rsi: f64) -> Self {
        if rsi > OVERBOUGHT_RSI {
            RsiSignal::Overbought
        } else if rsi < OVERSOLD_RSI {
            RsiSignal::Oversold
        } else {
            RsiSignal::Neutral
        }
    }

    pub fn admits(&self) -> bool {
        !matches!(self, RsiSignal::Overbought)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RsiSignal::Overbought => "Overbought",
            RsiSignal::Oversold => "Oversold",
            RsiSignal::Neutral => "Neutral",
        }
    }
}

/// Drops overbought picks. RSI is fetched only for the picks that reach this gate.
pub async fn filter_by_timing<P>(provider: &P, picks: Vec<StockPick>) -> Vec<StockPick>
where
    P: MarketDataProvider + ?Sized,
{
    tracing::info!(candidates = picks.len(), "rsi timing check");
    let mut kept = Vec::with_capacity(picks.len());

    for mut pick in picks {
        let rsi = fetch_rsi(provider, &pick.order.ticker).await;
        let signal = RsiSignal::classify(rsi);
        let note = format!("{} (RSI {rsi:.0})", signal.as_str());

        if signal.admits() {
            tracing::debug!(
                ticker = %pick.order.ticker,
                rsi,
                signal = signal.as_str(),
                "timing passed"
            );
            pick.rationale.push(note);
            kept.push(pick);
        } else {
            tracing::info!(ticker = %pick.order.ticker, rsi, "skipped as overbought");
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::StockOrder;
    use crate::ingest::fixture::FixtureDataProvider;
    use serde_json::json;

    fn pick(ticker: &str) -> StockPick {
        StockPick {
            order: StockOrder {
                ticker: ticker.to_string(),
                sector: "Industrials".to_string(),
                shares: 1,
                price: 100.0,
                est_cost: 100.0,
                allocation_pct: 1.0,
                total_score: 80.0,
            },
            rationale: Vec::new(),
        }
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(RsiSignal::classify(75.0), RsiSignal::Neutral);
        assert_eq!(RsiSignal::classify(75.1), RsiSignal::Overbought);
        assert_eq!(RsiSignal::classify(30.0), RsiSignal::Neutral);
        assert_eq!(RsiSignal::classify(29.9), RsiSignal::Oversold);
        assert!(RsiSignal::Oversold.admits());
        assert!(!RsiSignal::Overbought.admits());
    }

    #[tokio::test]
    async fn skips_overbought_and_keeps_missing_history() {
        let rising: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let falling: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        let p = FixtureDataProvider::from_value(json!({
            "history": {"UP.NS": rising, "DOWN.NS": falling}
        }))
        .unwrap();

        let kept = filter_by_timing(&p, vec![pick("UP.NS"), pick("DOWN"), pick("NONE.NS")]).await;
        let tickers: Vec<&str> = kept.iter().map(|p| p.order.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["DOWN", "NONE.NS"]);
        assert_eq!(kept[0].rationale, vec!["Oversold (RSI 0)".to_string()]);
        assert_eq!(kept[1].rationale, vec!["Neutral (RSI 50)".to_string()]);
    }
}
