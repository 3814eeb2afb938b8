use crate::domain::stock::StockSnapshot;
use crate::ingest::error::ProviderError;
use crate::ingest::provider::MarketDataProvider;
use futures::stream::{self, StreamExt};

const PROGRESS_EVERY: usize = 50;
const MAX_LOGGED_FAILURES: usize = 10;

/// Fetches a snapshot per ticker with at most `concurrency` requests in flight.
///
/// Output keeps the input order. A ticker whose fetch fails is logged and omitted; it never
/// aborts the batch.
pub async fn load_snapshots<P>(
    provider: &P,
    tickers: &[String],
    concurrency: usize,
) -> Vec<StockSnapshot>
where
    P: MarketDataProvider + ?Sized,
{
    let total = tickers.len();
    tracing::info!(
        total,
        concurrency,
        provider = provider.provider_name(),
        "fetching fundamentals"
    );

    let results: Vec<_> = stream::iter(tickers.iter())
        .map(|ticker| async move { (ticker, provider.fetch_snapshot(ticker).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut out = Vec::with_capacity(results.len());
    let mut failures: usize = 0;
    for (idx, (ticker, res)) in results.into_iter().enumerate() {
        match res {
            Ok(snapshot) => out.push(snapshot),
            Err(err) => {
                failures += 1;
                if failures <= MAX_LOGGED_FAILURES {
                    let stage = err
                        .downcast_ref::<ProviderError>()
                        .map(|d| d.stage.as_str())
                        .unwrap_or("unknown");
                    tracing::warn!(
                        idx,
                        ticker = %ticker,
                        stage,
                        failure_count = failures,
                        error = %err,
                        "fundamentals fetch failed; skipping stock"
                    );
                }
            }
        }

        let n = idx + 1;
        if n == total || n % PROGRESS_EVERY == 0 {
            tracing::info!(
                processed = n,
                total,
                items = out.len(),
                failures,
                "fundamentals progress"
            );
        }
    }

    out
}
