use crate::domain::recommendation::StockPick;
use crate::ingest::types::FinancialYear;
use crate::ingest::{listed_symbol, MarketDataProvider};

const MIN_YEARS: usize = 3;
const MAX_REVENUE_DROP: f64 = -0.20;

#[derive(Debug, Clone, PartialEq)]
pub struct StabilityVerdict {
    pub stable: bool,
    pub note: String,
}

impl StabilityVerdict {
    fn pass(note: impl Into<String>) -> Self {
        Self {
            stable: true,
            note: note.into(),
        }
    }

    fn reject(note: impl Into<String>) -> Self {
        Self {
            stable: false,
            note: note.into(),
        }
    }
}

/// Checks annual financials for a recent loss or a revenue collapse.
///
/// Fewer than three fiscal years is not enough to judge and passes.
pub fn assess(years: &[FinancialYear]) -> StabilityVerdict {
    if years.is_empty() {
        return StabilityVerdict::pass("No historical data available (Neutral)");
    }
    if years.len() < MIN_YEARS {
        return StabilityVerdict::pass("Not enough history (Skipped)");
    }

    let mut years = years.to_vec();
    years.sort_by_key(|y| y.fiscal_year);
    let n = years.len();
    let latest = &years[n - 1];
    let prior = &years[n - 2];

    let recent_income = latest.net_income.or(prior.net_income);
    if matches!(recent_income, Some(income) if income < 0.0) {
        return StabilityVerdict::reject("Loss making in recent years");
    }

    if let (Some(latest_rev), Some(prev_rev)) = (latest.total_revenue, prior.total_revenue) {
        if prev_rev > 0.0 && (latest_rev - prev_rev) / prev_rev < MAX_REVENUE_DROP {
            return StabilityVerdict::reject("Revenue collapsed >20% last year");
        }
    }

    let growth_pct = match (years[0].total_revenue, latest.total_revenue) {
        (Some(old), Some(new)) if old != 0.0 => (new - old) / old * 100.0,
        _ => 0.0,
    };
    StabilityVerdict::pass(format!("Growing: {growth_pct:.1}% over {n} yrs"))
}

/// Keeps picks whose multi-year financials look stable. Fetches run one ticker at a time.
pub async fn filter_stable<P>(provider: &P, picks: Vec<StockPick>) -> Vec<StockPick>
where
    P: MarketDataProvider + ?Sized,
{
    tracing::info!(candidates = picks.len(), "history check");
    let mut kept = Vec::with_capacity(picks.len());

    for mut pick in picks {
        let symbol = listed_symbol(&pick.order.ticker);
        let verdict = match provider.fetch_annual_financials(&symbol).await {
            Ok(years) => assess(&years),
            Err(err) => {
                tracing::warn!(ticker = %symbol, error = %err, "financials fetch failed; passing");
                StabilityVerdict::pass("History check skipped")
            }
        };

        if verdict.stable {
            tracing::debug!(ticker = %pick.order.ticker, note = %verdict.note, "history passed");
            pick.rationale.push(verdict.note);
            kept.push(pick);
        } else {
            tracing::info!(ticker = %pick.order.ticker, note = %verdict.note, "history rejected");
        }
    }

    kept
}
