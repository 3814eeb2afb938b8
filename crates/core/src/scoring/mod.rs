pub mod rank;
pub mod technical;
pub mod valuation;
