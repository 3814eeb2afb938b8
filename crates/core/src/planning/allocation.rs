//! Profile-driven split of capital across direct stocks, mutual funds and safe assets.

use crate::domain::profile::{AllocationPlan, RiskAppetite, UserProfile};
use crate::planning::round1;

const MIN_EQUITY_PCT: i64 = 20;
const MAX_EQUITY_PCT: i64 = 90;

/// Rule of 100: equity = 100 − age, nudged ±10 by risk appetite and clamped to 20..=90.
pub fn asset_allocation(profile: &UserProfile) -> AllocationPlan {
    let risk_adjustment = match profile.risk_appetite {
        RiskAppetite::High => 10,
        RiskAppetite::Low => -10,
        RiskAppetite::Medium => 0,
    };
    let equity =
        (100 - i64::from(profile.age) + risk_adjustment).clamp(MIN_EQUITY_PCT, MAX_EQUITY_PCT);
    let equity_pct = equity as f64;
    let safe_pct = (100 - equity) as f64;

    let stock_share = match profile.risk_appetite {
        RiskAppetite::High => 0.70,
        RiskAppetite::Medium | RiskAppetite::Low => 0.40,
    };

    let stocks = round1(equity_pct * stock_share);
    AllocationPlan {
        stocks,
        // Derived from the rounded stock share so the equity portion stays exact.
        mutual_funds: round1(equity_pct - stocks),
        safe_debt_gold: round1(safe_pct),
    }
}
