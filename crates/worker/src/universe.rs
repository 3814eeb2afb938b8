use anyhow::Context;
use investor_core::ingest::listed_symbol;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Used when no universe file exists yet.
pub const FALLBACK_UNIVERSE: [&str; 3] = ["RELIANCE.NS", "TCS.NS", "HDFCBANK.NS"];

#[derive(Debug, Clone, Default)]
pub struct UniverseOptions {
    /// Keep only the first `limit` symbols. Handy for smoke runs against a live provider.
    pub limit: Option<usize>,
}

impl UniverseOptions {
    pub fn from_env() -> Self {
        let mut out = Self::default();
        if let Ok(s) = std::env::var("UNIVERSE_LIMIT") {
            if let Ok(n) = s.trim().parse::<usize>() {
                out.limit = Some(n);
            }
        }
        out
    }
}

#[derive(Debug, Deserialize)]
struct SymbolRow {
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
}

/// Exchange symbols from a CSV with a `Symbol` column, suffixed for NSE and de-duplicated.
pub fn parse_symbols<R: Read>(reader: R) -> anyhow::Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in rdr.deserialize::<SymbolRow>() {
        let row = row.context("malformed universe row")?;
        let Some(symbol) = row.symbol.filter(|s| !s.is_empty()) else {
            continue;
        };
        let symbol = listed_symbol(&symbol);
        if seen.insert(symbol.clone()) {
            out.push(symbol);
        }
    }
    Ok(out)
}

/// A missing file falls back to a few large caps; a file that cannot be read yields nothing.
pub fn load_universe(path: &Path, opts: &UniverseOptions) -> Vec<String> {
    let mut tickers = if !path.exists() {
        tracing::warn!(path = %path.display(), "universe file not found; using fallback list");
        FALLBACK_UNIVERSE.iter().map(|s| s.to_string()).collect()
    } else {
        match std::fs::File::open(path)
            .with_context(|| format!("failed to open universe: {}", path.display()))
            .and_then(parse_symbols)
        {
            Ok(t) => t,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "universe unreadable");
                Vec::new()
            }
        }
    };

    if let Some(limit) = opts.limit {
        tickers.truncate(limit);
    }
    tracing::info!(count = tickers.len(), "loaded universe");
    tickers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_and_dedupes_symbols() {
        let csv = "Company Name,Industry,Symbol,Series\n\
                   Reliance Industries,Oil Gas,RELIANCE,EQ\n\
                   Tata Consultancy,IT,TCS.NS,EQ\n\
                   Dup,IT,TCS,EQ\n\
                   Blank,IT,,EQ\n";
        let got = parse_symbols(csv.as_bytes()).unwrap();
        assert_eq!(got, vec!["RELIANCE.NS".to_string(), "TCS.NS".to_string()]);
    }

    #[test]
    fn missing_file_uses_fallback_and_limit_applies() {
        let path = std::env::temp_dir().join("investor-no-such-universe.csv");
        let all = load_universe(&path, &UniverseOptions::default());
        assert_eq!(all, FALLBACK_UNIVERSE.map(String::from).to_vec());

        let two = load_universe(&path, &UniverseOptions { limit: Some(2) });
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn file_without_symbol_column_is_empty() {
        let got = parse_symbols("Ticker\nTCS\n".as_bytes()).unwrap();
        assert!(got.is_empty());
    }
}
