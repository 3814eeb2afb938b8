pub mod allocation;
pub mod review;

pub use allocation::{AllocationEngine, AllocationOptions, AllocationOutcome};
pub use review::review_for_sells;
