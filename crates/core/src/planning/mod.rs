pub mod allocation;
pub mod funds;
pub mod health;
pub mod insurance;

/// Rounds to one decimal place, the precision allocation percentages are reported at.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
