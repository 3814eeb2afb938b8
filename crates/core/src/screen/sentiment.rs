use crate::domain::recommendation::StockPick;
use crate::ingest::{listed_symbol, NewsProvider};
use crate::screen::polarity::polarity;
use std::time::Duration;

pub const NEGATIVE_THRESHOLD: f64 = -0.15;
const POSITIVE_LABEL_ABOVE: f64 = 0.1;
const HEADLINES_PER_TICKER: usize = 5;

/// Mean polarity over the non-empty headlines among the latest five; `None` when there are none.
pub fn headline_score(headlines: &[String]) -> Option<f64> {
    let scores: Vec<f64> = headlines
        .iter()
        .take(HEADLINES_PER_TICKER)
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .map(polarity)
        .collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// News polarity for one ticker. No news and fetch failures both read as neutral 0.
pub async fn news_score<N>(news: &N, ticker: &str) -> f64
where
    N: NewsProvider + ?Sized,
{
    let symbol = listed_symbol(ticker);
    match news.fetch_headlines(&symbol).await {
        Ok(headlines) => headline_score(&headlines).unwrap_or_else(|| {
            tracing::debug!(ticker = %symbol, "no recent news; neutral");
            0.0
        }),
        Err(err) => {
            tracing::warn!(ticker = %symbol, error = %err, "news fetch failed; neutral");
            0.0
        }
    }
}

/// Drops picks with clearly negative news. Tickers are checked one at a time with `delay`
/// between requests.
pub async fn filter_by_sentiment<N>(
    news: &N,
    picks: Vec<StockPick>,
    delay: Duration,
) -> Vec<StockPick>
where
    N: NewsProvider + ?Sized,
{
    tracing::info!(candidates = picks.len(), "news sentiment check");
    let mut kept = Vec::with_capacity(picks.len());

    for (idx, mut pick) in picks.into_iter().enumerate() {
        if idx != 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let score = news_score(news, &pick.order.ticker).await;
        if score < NEGATIVE_THRESHOLD {
            tracing::info!(ticker = %pick.order.ticker, score, "blocked on negative sentiment");
            continue;
        }

        let label = if score > POSITIVE_LABEL_ABOVE {
            "Positive"
        } else {
            "Neutral"
        };
        tracing::debug!(ticker = %pick.order.ticker, score, label, "sentiment passed");
        pick.rationale.push(format!("News: {label} ({score:.2})"));
        kept.push(pick);
    }

    kept
}
