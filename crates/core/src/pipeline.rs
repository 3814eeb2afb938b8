//! End-to-end advisory run: profile planning, protection, funds, then the stock pipeline
//! (fetch, score, rank, allocate, screen, re-weight).

use crate::domain::holding::Holdings;
use crate::domain::profile::{AllocationPlan, UserProfile};
use crate::domain::recommendation::{
    FundRecommendation, InsuranceRecommendation, Recommendation, ReportRow, SellOrder, StockPick,
};
use crate::ingest::loader::load_snapshots;
use crate::ingest::{MarketDataProvider, NewsProvider};
use crate::planning::allocation::asset_allocation;
use crate::planning::funds::recommend_funds;
use crate::planning::health::{check_health, HealthReport};
use crate::planning::insurance::{total_premium, InsuranceAdvisor};
use crate::planning::round2;
use crate::portfolio::{review_for_sells, AllocationEngine, AllocationOptions};
use crate::scoring::rank::{blend, rank};
use crate::screen::{filter_by_sentiment, filter_by_timing, filter_stable};
use std::time::Duration;

const DEFAULT_TOP_N: usize = 15;
const DEFAULT_FETCH_CONCURRENCY: usize = 1;
const DEFAULT_SENTIMENT_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Candidates the allocation engine sizes positions for, before screening.
    pub top_n: usize,
    pub fetch_concurrency: usize,
    pub sentiment_delay: Duration,
    pub max_sector_weight: Option<f64>,
    /// Take the estimated insurance premiums out of the capital before allocating.
    pub deduct_insurance: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            sentiment_delay: Duration::from_millis(DEFAULT_SENTIMENT_DELAY_MS),
            max_sector_weight: None,
            deduct_insurance: false,
        }
    }
}

impl PipelineOptions {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset, unparsable and out-of-range values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            top_n: lookup("PIPELINE_TOP_N")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.top_n),
            fetch_concurrency: lookup("PIPELINE_FETCH_CONCURRENCY")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.fetch_concurrency),
            sentiment_delay: lookup("SENTIMENT_REQ_DELAY_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sentiment_delay),
            max_sector_weight: lookup("ALLOC_MAX_SECTOR_WEIGHT")
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|w| w.is_finite() && *w > 0.0 && *w <= 1.0),
            deduct_insurance: defaults.deduct_insurance,
        }
    }
}

/// Everything one run recommends, in the order it should be acted on.
#[derive(Debug, Clone)]
pub struct HolisticPlan {
    pub health: HealthReport,
    pub allocation: AllocationPlan,
    /// Capital left to invest after any premium deduction.
    pub capital: f64,
    pub premium_deducted: f64,
    pub stock_budget: f64,
    pub insurance: Vec<InsuranceRecommendation>,
    pub funds: Vec<FundRecommendation>,
    pub stocks: Vec<StockPick>,
    pub sells: Vec<SellOrder>,
}

impl HolisticPlan {
    /// Insurance first, then funds, then stocks.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.insurance
            .iter()
            .cloned()
            .map(Recommendation::Insurance)
            .chain(self.funds.iter().cloned().map(Recommendation::MutualFund))
            .chain(self.stocks.iter().cloned().map(Recommendation::Stock))
            .collect()
    }

    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.recommendations().iter().map(ReportRow::from).collect()
    }

    pub fn stock_spend(&self) -> f64 {
        self.stocks.iter().map(|p| p.order.est_cost).sum()
    }
}

pub struct Pipeline<'a> {
    market: &'a dyn MarketDataProvider,
    news: &'a dyn NewsProvider,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        market: &'a dyn MarketDataProvider,
        news: &'a dyn NewsProvider,
        options: PipelineOptions,
    ) -> Self {
        Self {
            market,
            news,
            options,
        }
    }

    pub async fn run(
        &self,
        profile: &UserProfile,
        holdings: &Holdings,
        universe: &[String],
        starting_capital: f64,
    ) -> HolisticPlan {
        let health = check_health(profile);
        for alert in &health.alerts {
            tracing::warn!(priority = ?alert.priority, "{}", alert.message);
        }

        let allocation = asset_allocation(profile);
        tracing::info!(
            age = profile.age,
            risk = profile.risk_appetite.as_str(),
            stocks = allocation.stocks,
            mutual_funds = allocation.mutual_funds,
            safe = allocation.safe_debt_gold,
            "asset allocation"
        );

        let insurance = InsuranceAdvisor::new(profile).recommendations();
        let mut capital = starting_capital.max(0.0);
        let mut premium_deducted = 0.0;
        if self.options.deduct_insurance && !insurance.is_empty() {
            premium_deducted = total_premium(&insurance).min(capital);
            capital -= premium_deducted;
            tracing::info!(premium_deducted, capital, "deducted insurance premiums");
        }

        let funds = recommend_funds(&allocation, capital);
        let stock_budget = capital * allocation.stocks / 100.0;

        let (stocks, sells) = if stock_budget > 0.0 {
            self.stock_pipeline(holdings, universe, stock_budget).await
        } else {
            tracing::warn!("no capital left for stocks");
            (Vec::new(), Vec::new())
        };

        HolisticPlan {
            health,
            allocation,
            capital,
            premium_deducted,
            stock_budget,
            insurance,
            funds,
            stocks,
            sells,
        }
    }

    async fn stock_pipeline(
        &self,
        holdings: &Holdings,
        universe: &[String],
        stock_budget: f64,
    ) -> (Vec<StockPick>, Vec<SellOrder>) {
        let snapshots = load_snapshots(self.market, universe, self.options.fetch_concurrency).await;
        if snapshots.is_empty() {
            tracing::warn!("no fundamentals loaded; skipping stocks");
            return (Vec::new(), Vec::new());
        }

        let ranked = rank(blend(snapshots));
        let sells = review_for_sells(holdings, &ranked);

        let engine = AllocationEngine::new(
            stock_budget,
            holdings,
            AllocationOptions {
                top_n: self.options.top_n,
                max_sector_weight: self.options.max_sector_weight,
            },
        );
        let outcome = engine.allocate(&ranked);
        tracing::info!(
            candidates = outcome.orders.len(),
            cost = outcome.total_cost(),
            unspent = outcome.unspent,
            "allocation done"
        );

        let picks: Vec<StockPick> = outcome
            .orders
            .into_iter()
            .map(|order| StockPick {
                order,
                rationale: Vec::new(),
            })
            .collect();

        let picks = filter_stable(self.market, picks).await;
        let picks = filter_by_timing(self.market, picks).await;
        let picks = filter_by_sentiment(self.news, picks, self.options.sentiment_delay).await;

        (reweight(picks, stock_budget), sells)
    }
}

/// Splits the stock budget equally over the surviving picks, buying whole shares only.
/// Picks whose equal share cannot buy a single unit are dropped.
pub fn reweight(picks: Vec<StockPick>, stock_budget: f64) -> Vec<StockPick> {
    if picks.is_empty() || stock_budget <= 0.0 {
        return Vec::new();
    }

    // Floored to paise so no equal share rounds above the budget.
    let per_pick = (stock_budget / picks.len() as f64 * 100.0).floor() / 100.0;
    picks
        .into_iter()
        .filter_map(|mut pick| {
            let price = pick.order.price;
            if !(price.is_finite() && price > 0.0) {
                return None;
            }
            let shares = (per_pick / price).floor() as u64;
            if shares == 0 {
                tracing::debug!(
                    ticker = %pick.order.ticker,
                    per_pick,
                    price,
                    "equal share too small; dropped"
                );
                return None;
            }
            pick.order.shares = shares;
            pick.order.est_cost = shares as f64 * price;
            pick.order.allocation_pct = round2(pick.order.est_cost / stock_budget * 100.0);
            Some(pick)
        })
        .collect()
}
