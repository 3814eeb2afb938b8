use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAppetite {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskAppetite {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAppetite::Low => "Low",
            RiskAppetite::Medium => "Medium",
            RiskAppetite::High => "High",
        }
    }
}

impl FromStr for RiskAppetite {
    type Err = anyhow::Error;

    /// Accepts the label (any case) or the menu choice `1`/`2`/`3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "1" => Ok(Self::Low),
            "medium" | "2" => Ok(Self::Medium),
            "high" | "3" => Ok(Self::High),
            other => anyhow::bail!("unknown risk appetite: {other}"),
        }
    }
}

/// Personal details every engine reads. Persisted as key-value JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(rename = "current_emergency_fund")]
    pub emergency_fund: f64,
    #[serde(deserialize_with = "lenient_risk")]
    pub risk_appetite: RiskAppetite,
    pub has_term_insurance: bool,
    pub has_health_insurance: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 30,
            monthly_income: 0.0,
            monthly_expenses: 0.0,
            emergency_fund: 0.0,
            risk_appetite: RiskAppetite::Medium,
            has_term_insurance: false,
            has_health_insurance: false,
        }
    }
}

impl UserProfile {
    pub fn annual_income(&self) -> f64 {
        self.monthly_income * 12.0
    }
}

fn lenient_risk<'de, D>(deserializer: D) -> Result<RiskAppetite, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.parse::<RiskAppetite>().ok())
        .unwrap_or_default())
}

/// Target split of investable capital, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    #[serde(rename = "Stocks")]
    pub stocks: f64,
    #[serde(rename = "Mutual_Funds")]
    pub mutual_funds: f64,
    #[serde(rename = "Safe_Debt_Gold")]
    pub safe_debt_gold: f64,
}

impl AllocationPlan {
    pub fn equity(&self) -> f64 {
        self.stocks + self.mutual_funds
    }

    pub fn total(&self) -> f64 {
        self.stocks + self.mutual_funds + self.safe_debt_gold
    }
}
