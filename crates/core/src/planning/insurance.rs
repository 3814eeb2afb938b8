use crate::domain::profile::UserProfile;
use crate::domain::recommendation::{InsuranceKind, InsuranceRecommendation, Urgency};

const TERM_COVER_MULTIPLE: f64 = 15.0;
const BASE_HEALTH_COVER: f64 = 1_000_000.0;
const YOUNG_AGE_LIMIT: u32 = 30;
const SUPER_TOP_UP_PREMIUM: f64 = 3_000.0;

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverNeeds {
    pub term_cover: f64,
    pub health_cover: f64,
}

pub struct InsuranceAdvisor<'a> {
    profile: &'a UserProfile,
}

impl<'a> InsuranceAdvisor<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self { profile }
    }

    /// Term cover of 15× annual income; a flat ₹10 lakh health floor.
    pub fn needs(&self) -> CoverNeeds {
        CoverNeeds {
            term_cover: self.profile.annual_income() * TERM_COVER_MULTIPLE,
            health_cover: BASE_HEALTH_COVER,
        }
    }

    pub fn recommendations(&self) -> Vec<InsuranceRecommendation> {
        let needs = self.needs();
        let young = self.profile.age < YOUNG_AGE_LIMIT;
        let mut out = Vec::new();

        if !self.profile.has_term_insurance {
            out.push(InsuranceRecommendation {
                kind: InsuranceKind::Term,
                urgency: Urgency::MustBuy,
                details: format!(
                    "Buy Term Insurance of ₹{:.1} Crores (15x Income)",
                    needs.term_cover / CRORE
                ),
                top_plans: [
                    "ICICI Pru iProtect Smart (Claim Ratio: 99.2%)".to_string(),
                    "HDFC Life Click 2 Protect (Comprehensive)".to_string(),
                ],
                est_premium: if young { 12_000.0 } else { 25_000.0 },
            });
        }

        if !self.profile.has_health_insurance {
            out.push(InsuranceRecommendation {
                kind: InsuranceKind::Health,
                urgency: Urgency::MustBuy,
                details: format!("Buy Health Cover of ₹{:.0} Lakhs", needs.health_cover / LAKH),
                top_plans: [
                    "HDFC Ergo Optima Secure (2x Cover Benefit)".to_string(),
                    "Niva Bupa ReAssure 2.0 (Unlimited Refill)".to_string(),
                ],
                est_premium: if young { 15_000.0 } else { 25_000.0 },
            });
            out.push(InsuranceRecommendation {
                kind: InsuranceKind::HealthAddOn,
                urgency: Urgency::HighlyRecommended,
                details: "Buy Super Top-up of ₹50 Lakhs (Cheap Safety)".to_string(),
                top_plans: [
                    "Niva Bupa Health Recharge".to_string(),
                    "Care Enhance".to_string(),
                ],
                est_premium: SUPER_TOP_UP_PREMIUM,
            });
        }

        out
    }
}

/// Sum of estimated annual premiums, deducted from investable capital on request.
pub fn total_premium(recs: &[InsuranceRecommendation]) -> f64 {
    recs.iter().map(|r| r.est_premium).sum()
}
