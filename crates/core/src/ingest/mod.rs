pub mod error;
pub mod fixture;
pub mod loader;
pub mod provider;
pub mod types;

pub use provider::{MarketDataProvider, NewsProvider};

/// Symbol as listed on the exchange; bare NSE codes get the `.NS` suffix.
pub fn listed_symbol(ticker: &str) -> String {
    let t = ticker.trim();
    if t.ends_with(".NS") || t.ends_with(".BO") {
        t.to_string()
    } else {
        format!("{t}.NS")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_bare_nse_codes_only() {
        assert_eq!(listed_symbol("RELIANCE"), "RELIANCE.NS");
        assert_eq!(listed_symbol("RELIANCE.NS"), "RELIANCE.NS");
        assert_eq!(listed_symbol("500325.BO"), "500325.BO");
        assert_eq!(listed_symbol(" TCS "), "TCS.NS");
    }
}
