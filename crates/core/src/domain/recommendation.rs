use serde::{Deserialize, Serialize};

/// A buy order produced by the allocation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockOrder {
    pub ticker: String,
    pub sector: String,
    pub shares: u64,
    pub price: f64,
    pub est_cost: f64,
    /// Share of the capital remaining at the time of the buy, in percent.
    pub allocation_pct: f64,
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellOrder {
    pub ticker: String,
    pub shares: f64,
    pub current_price: f64,
    pub reason: String,
    pub est_value: f64,
    pub pnl_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecommendation {
    pub name: String,
    pub fund_type: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsuranceKind {
    Term,
    Health,
    HealthAddOn,
}

impl InsuranceKind {
    pub fn label(&self) -> &'static str {
        match self {
            InsuranceKind::Term => "Term Insurance",
            InsuranceKind::Health => "Health Insurance",
            InsuranceKind::HealthAddOn => "Health Add-on",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    MustBuy,
    HighlyRecommended,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::MustBuy => "MUST BUY",
            Urgency::HighlyRecommended => "Highly Recommended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRecommendation {
    pub kind: InsuranceKind,
    pub urgency: Urgency,
    pub details: String,
    pub top_plans: [String; 2],
    /// Estimated annual premium in rupees.
    pub est_premium: f64,
}

/// A stock that survived every screen, with the notes each screen attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPick {
    pub order: StockOrder,
    pub rationale: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum Recommendation {
    Insurance(InsuranceRecommendation),
    MutualFund(FundRecommendation),
    Stock(StockPick),
}

impl Recommendation {
    pub fn category(&self) -> &'static str {
        match self {
            Recommendation::Insurance(_) => "Insurance",
            Recommendation::MutualFund(_) => "Mutual Fund",
            Recommendation::Stock(_) => "Stock",
        }
    }

    /// Ticker or product name the recommendation points at.
    pub fn subject(&self) -> &str {
        match self {
            Recommendation::Insurance(r) => &r.top_plans[0],
            Recommendation::MutualFund(r) => &r.name,
            Recommendation::Stock(r) => &r.order.ticker,
        }
    }

    /// Rupee amount involved: premium, lump sum, or order cost.
    pub fn amount(&self) -> f64 {
        match self {
            Recommendation::Insurance(r) => r.est_premium,
            Recommendation::MutualFund(r) => r.amount,
            Recommendation::Stock(r) => r.order.est_cost,
        }
    }

    pub fn rationale(&self) -> String {
        match self {
            Recommendation::Insurance(r) => {
                format!("{} {}: {}", r.urgency.label(), r.kind.label(), r.details)
            }
            Recommendation::MutualFund(r) => r.fund_type.clone(),
            Recommendation::Stock(r) => r.rationale.join("; "),
        }
    }
}

/// One line of the holistic report (`Ticker,Value,Category`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl From<&Recommendation> for ReportRow {
    fn from(rec: &Recommendation) -> Self {
        let value = match rec {
            Recommendation::Insurance(r) => r.details.clone(),
            other => format!("{:.2}", other.amount()),
        };
        Self {
            ticker: rec.subject().to_string(),
            value,
            category: rec.category().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_rows_use_details_for_insurance_and_amount_otherwise() {
        let ins = Recommendation::Insurance(InsuranceRecommendation {
            kind: InsuranceKind::Term,
            urgency: Urgency::MustBuy,
            details: "Buy Term Insurance of ₹1.8 Crores (15x Income)".to_string(),
            top_plans: ["Plan A".to_string(), "Plan B".to_string()],
            est_premium: 12000.0,
        });
        let row = ReportRow::from(&ins);
        assert_eq!(row.ticker, "Plan A");
        assert_eq!(row.value, "Buy Term Insurance of ₹1.8 Crores (15x Income)");
        assert_eq!(row.category, "Insurance");
        assert_eq!(
            ins.rationale(),
            "MUST BUY Term Insurance: Buy Term Insurance of ₹1.8 Crores (15x Income)"
        );

        let mf = Recommendation::MutualFund(FundRecommendation {
            name: "SBI Liquid Fund".to_string(),
            fund_type: "MF (Debt)".to_string(),
            amount: 8000.0,
        });
        let row = ReportRow::from(&mf);
        assert_eq!(row.value, "8000.00");
        assert_eq!(row.category, "Mutual Fund");
    }

    #[test]
    fn stock_rationale_joins_screen_notes() {
        let rec = Recommendation::Stock(StockPick {
            order: StockOrder {
                ticker: "TCS.NS".to_string(),
                sector: "Technology".to_string(),
                shares: 2,
                price: 3500.0,
                est_cost: 7000.0,
                allocation_pct: 10.0,
                total_score: 82.0,
            },
            rationale: vec!["Growing".to_string(), "Neutral RSI".to_string()],
        });
        assert_eq!(rec.rationale(), "Growing; Neutral RSI");
        assert_eq!(rec.amount(), 7000.0);
        assert_eq!(rec.subject(), "TCS.NS");
    }
}
