use crate::domain::profile::AllocationPlan;
use crate::domain::recommendation::FundRecommendation;

/// Smallest bucket worth splitting into funds.
pub const MIN_BUCKET_CAPITAL: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundCategory {
    CoreEquity,
    Index,
    Aggressive,
    Debt,
    Hybrid,
    Gold,
}

#[derive(Debug, Clone, Copy)]
pub struct Fund {
    /// Name as shown in the report.
    pub name: &'static str,
    pub category: FundCategory,
}

pub const FUND_UNIVERSE: &[Fund] = &[
    Fund {
        name: "Parag Parikh Flexi Cap",
        category: FundCategory::CoreEquity,
    },
    Fund {
        name: "UTI Nifty 50 Index",
        category: FundCategory::Index,
    },
    Fund {
        name: "Quant Small Cap",
        category: FundCategory::Aggressive,
    },
    Fund {
        name: "SBI Liquid Fund",
        category: FundCategory::Debt,
    },
    Fund {
        name: "HDFC Balanced Advantage",
        category: FundCategory::Hybrid,
    },
    Fund {
        name: "Nippon Gold Fund",
        category: FundCategory::Gold,
    },
];

fn pick(category: FundCategory) -> Option<&'static Fund> {
    FUND_UNIVERSE.iter().find(|f| f.category == category)
}

/// Splits the mutual-fund bucket 50/50 into index and flexi-cap, and the safe bucket 80/20
/// into liquid debt and gold. Buckets under the minimum are skipped.
pub fn recommend_funds(plan: &AllocationPlan, capital: f64) -> Vec<FundRecommendation> {
    let mf_capital = capital * plan.mutual_funds / 100.0;
    let safe_capital = capital * plan.safe_debt_gold / 100.0;
    let mut out = Vec::new();

    if mf_capital >= MIN_BUCKET_CAPITAL {
        let amount = mf_capital / 2.0;
        push(&mut out, FundCategory::Index, "MF (Index)", amount);
        push(&mut out, FundCategory::CoreEquity, "MF (Flexi)", amount);
    } else {
        tracing::debug!(mf_capital, "mutual fund bucket below minimum; skipped");
    }

    if safe_capital >= MIN_BUCKET_CAPITAL {
        push(&mut out, FundCategory::Debt, "MF (Debt)", safe_capital * 0.80);
        push(&mut out, FundCategory::Gold, "MF (Gold)", safe_capital * 0.20);
    } else {
        tracing::debug!(safe_capital, "safe bucket below minimum; skipped");
    }

    out
}

fn push(out: &mut Vec<FundRecommendation>, category: FundCategory, fund_type: &str, amount: f64) {
    if let Some(fund) = pick(category) {
        out.push(FundRecommendation {
            name: fund.name.to_string(),
            fund_type: fund_type.to_string(),
            amount,
        });
    }
}
