//! Greedy capital allocation over a ranked table.
//!
//! First tops up the safety bucket (index + gold ETFs) when existing MF/ETF/Index holdings
//! fall short of 20% of the combined pool, then walks the ranked table buying whole shares
//! until the remaining capital drops below the minimum ticket.

use crate::domain::holding::Holdings;
use crate::domain::recommendation::StockOrder;
use crate::domain::stock::ScoredStock;
use crate::planning::round2;
use std::collections::BTreeMap;

const SAFETY_TARGET_SHARE: f64 = 0.20;
const SAFETY_MIN_SHORTFALL: f64 = 5_000.0;
const MIN_TICKET: f64 = 2_000.0;
const HELD_ENOUGH_RATIO: f64 = 0.8;
const MAX_SHARE_OF_REMAINING: f64 = 3.0;

/// Listed proxy used to fill part of the safety bucket, at an assumed price.
struct SafetyProxy {
    ticker: &'static str,
    sector: &'static str,
    weight: f64,
    assumed_price: f64,
    min_amount: f64,
}

const SAFETY_PROXIES: [SafetyProxy; 2] = [
    SafetyProxy {
        ticker: "NIFTYBEES.NS",
        sector: "Index ETF",
        weight: 0.70,
        assumed_price: 270.0,
        min_amount: 260.0,
    },
    SafetyProxy {
        ticker: "GOLDBEES.NS",
        sector: "Commodity ETF",
        weight: 0.30,
        assumed_price: 62.0,
        min_amount: 60.0,
    },
];

#[derive(Debug, Clone)]
pub struct AllocationOptions {
    pub top_n: usize,
    /// Optional cap on any one sector's share of the budget (0..=1). A buy that would push
    /// its sector past the cap is skipped. `None` disables it.
    pub max_sector_weight: Option<f64>,
}

impl Default for AllocationOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            max_sector_weight: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub orders: Vec<StockOrder>,
    /// Capital set aside for the safety bucket (may exceed what whole ETF units cost).
    pub safety_reserved: f64,
    pub unspent: f64,
}

impl AllocationOutcome {
    pub fn total_cost(&self) -> f64 {
        self.orders.iter().map(|o| o.est_cost).sum()
    }
}

pub struct AllocationEngine<'a> {
    budget: f64,
    holdings: &'a Holdings,
    options: AllocationOptions,
}

impl<'a> AllocationEngine<'a> {
    pub fn new(budget: f64, holdings: &'a Holdings, options: AllocationOptions) -> Self {
        Self {
            budget: if budget.is_finite() { budget.max(0.0) } else { 0.0 },
            holdings,
            options,
        }
    }

    pub fn allocate(&self, ranked: &[ScoredStock]) -> AllocationOutcome {
        let current_value = self.holdings.total_value();
        let by_ticker = self.holdings.value_by_ticker();
        let pool = self.budget + current_value;
        let mut capital = self.budget;
        let mut orders = Vec::new();

        tracing::info!(
            existing = current_value,
            new_capital = self.budget,
            pool,
            "allocating portfolio"
        );

        let safety_reserved = self.top_up_safety(pool, capital, &mut orders);
        capital -= safety_reserved;

        let slots = (self.options.top_n + by_ticker.len()).max(1) as f64;
        let target_per_stock = (pool / slots).min(capital / MAX_SHARE_OF_REMAINING);
        let sector_cap = self
            .options
            .max_sector_weight
            .filter(|w| w.is_finite() && *w > 0.0)
            .map(|w| w * self.budget);
        let mut sector_spend: BTreeMap<String, f64> = BTreeMap::new();

        for stock in ranked {
            if capital < MIN_TICKET {
                break;
            }

            let ticker = stock.ticker();
            let existing = by_ticker.get(ticker).copied().unwrap_or(0.0);
            if existing > target_per_stock * HELD_ENOUGH_RATIO {
                tracing::debug!(ticker, existing, "already held near target; skipping");
                continue;
            }

            let Some(price) = stock.snapshot.tradable_price() else {
                tracing::debug!(ticker, "no usable price; skipping");
                continue;
            };

            let amount = (target_per_stock - existing).min(capital);
            if amount <= 0.0 {
                continue;
            }

            let shares = (amount / price).floor() as u64;
            if shares == 0 {
                continue;
            }
            let cost = shares as f64 * price;

            if let Some(cap) = sector_cap {
                let spent = sector_spend.get(&stock.sector).copied().unwrap_or(0.0);
                if spent + cost > cap {
                    tracing::debug!(
                        ticker,
                        sector = %stock.sector,
                        spent,
                        cost,
                        cap,
                        "sector cap reached; skipping"
                    );
                    continue;
                }
            }

            orders.push(StockOrder {
                ticker: ticker.to_string(),
                sector: stock.sector.clone(),
                shares,
                price,
                est_cost: cost,
                allocation_pct: round2(cost / capital * 100.0),
                total_score: stock.total_score,
            });
            *sector_spend.entry(stock.sector.clone()).or_insert(0.0) += cost;
            capital -= cost;
            tracing::debug!(ticker, sector = %stock.sector, shares, cost, "buy");
        }

        AllocationOutcome {
            orders,
            safety_reserved,
            unspent: capital,
        }
    }

    /// Returns the capital reserved for the safety bucket; never more than `capital`.
    fn top_up_safety(&self, pool: f64, capital: f64, orders: &mut Vec<StockOrder>) -> f64 {
        let shortfall = SAFETY_TARGET_SHARE * pool - self.holdings.safety_value();
        if shortfall <= SAFETY_MIN_SHORTFALL {
            return 0.0;
        }

        let reserved = shortfall.min(capital);
        tracing::info!(shortfall, reserved, "safety bucket short; adding index and gold ETFs");

        for proxy in &SAFETY_PROXIES {
            let amount = reserved * proxy.weight;
            if amount <= proxy.min_amount {
                continue;
            }
            let shares = (amount / proxy.assumed_price).floor() as u64;
            if shares == 0 {
                continue;
            }
            orders.push(StockOrder {
                ticker: proxy.ticker.to_string(),
                sector: proxy.sector.to_string(),
                shares,
                price: proxy.assumed_price,
                est_cost: shares as f64 * proxy.assumed_price,
                allocation_pct: 0.0,
                total_score: 0.0,
            });
        }

        reserved
    }
}
