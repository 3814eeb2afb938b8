//! Post-allocation screens. Each takes the surviving picks in rank order and returns the
//! subset that passes, appending a note to every pick it keeps.
//!
//! Screens fail open: a fetch error never rejects a pick.

pub mod history;
pub mod polarity;
pub mod sentiment;
pub mod timing;

pub use history::filter_stable;
pub use sentiment::filter_by_sentiment;
pub use timing::filter_by_timing;
