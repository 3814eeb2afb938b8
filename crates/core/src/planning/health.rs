use crate::domain::profile::UserProfile;
use serde::Serialize;

const EMERGENCY_FUND_MONTHS: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AlertPriority {
    Critical,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAlert {
    pub priority: AlertPriority,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub monthly_surplus: f64,
    pub alerts: Vec<HealthAlert>,
}

pub fn check_health(profile: &UserProfile) -> HealthReport {
    let mut alerts = Vec::new();
    let mut status = HealthStatus::Healthy;

    let required_fund = profile.monthly_expenses * EMERGENCY_FUND_MONTHS;
    if profile.emergency_fund < required_fund {
        let shortfall = required_fund - profile.emergency_fund;
        alerts.push(HealthAlert {
            priority: AlertPriority::Critical,
            message: format!(
                "Emergency Fund Low! You need 6 months expenses (₹{required_fund:.0}). Shortfall: ₹{shortfall:.0}"
            ),
        });
        status = HealthStatus::Critical;
    }

    if !profile.has_term_insurance {
        alerts.push(HealthAlert {
            priority: AlertPriority::High,
            message:
                "No Term Insurance found. Secure your family's future before aggressive investing."
                    .to_string(),
        });
    }

    if !profile.has_health_insurance {
        alerts.push(HealthAlert {
            priority: AlertPriority::High,
            message: "No Health Insurance found. One hospital bill can wipe out your portfolio."
                .to_string(),
        });
    }

    HealthReport {
        status,
        monthly_surplus: profile.monthly_income - profile.monthly_expenses,
        alerts,
    }
}
