pub mod holding;
pub mod profile;
pub mod recommendation;
pub mod stock;
