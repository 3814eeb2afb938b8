//! Existing portfolio table: `Ticker,Shares,AvgPrice,Type`.
//!
//! Spreadsheet exports are often not UTF-8; undecodable input is retried as Windows-1252.

use crate::domain::holding::{AssetType, Holding, Holdings};
use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct HoldingRow {
    #[serde(rename = "Ticker", default)]
    ticker: Option<String>,
    #[serde(rename = "Shares", default)]
    shares: Option<String>,
    #[serde(rename = "AvgPrice", default)]
    avg_price: Option<String>,
    #[serde(rename = "Type", default)]
    asset_type: Option<String>,
}

/// Missing file is an empty portfolio.
pub fn load(path: &Path) -> anyhow::Result<Holdings> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no holdings file; assuming empty portfolio");
        return Ok(Holdings::default());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read holdings: {}", path.display()))?;
    let holdings = parse(&bytes)
        .with_context(|| format!("failed to parse holdings: {}", path.display()))?;
    tracing::info!(count = holdings.len(), "loaded existing holdings");
    Ok(holdings)
}

pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    tracing::debug!("holdings are not UTF-8; decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

/// Unparseable numbers read as 0. Rows without a ticker are skipped.
pub fn parse(bytes: &[u8]) -> anyhow::Result<Holdings> {
    let text = decode(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut items = Vec::new();
    for (line, row) in reader.deserialize::<HoldingRow>().enumerate() {
        let row = row.with_context(|| format!("malformed holdings row {}", line + 2))?;
        let Some(ticker) = row.ticker.filter(|t| !t.is_empty()) else {
            continue;
        };
        items.push(Holding {
            ticker,
            shares: parse_number(row.shares.as_deref()),
            avg_price: parse_number(row.avg_price.as_deref()),
            asset_type: AssetType::from_label(row.asset_type.as_deref().unwrap_or("")),
        });
    }

    Ok(Holdings::new(items))
}

fn parse_number(raw: Option<&str>) -> f64 {
    raw.map(|s| s.trim().trim_start_matches('₹').replace(',', ""))
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_coerces_numbers() {
        let csv = "Ticker,Shares,AvgPrice,Type\n\
                   TCS.NS, 10 ,\"3,500.50\",Stock\n\
                   NIFTYBEES.NS,100,250,ETF\n\
                   UTI Nifty,n/a,45,MF\n\
                   ,5,5,Stock\n";
        let h = parse(csv.as_bytes()).unwrap();
        assert_eq!(h.len(), 3);

        let items: Vec<&Holding> = h.iter().collect();
        assert_eq!(items[0].ticker, "TCS.NS");
        assert_eq!(items[0].shares, 10.0);
        assert_eq!(items[0].avg_price, 3500.5);
        assert_eq!(items[1].asset_type, AssetType::Etf);
        assert_eq!(items[2].shares, 0.0);
        assert_eq!(items[2].asset_type, AssetType::MutualFund);
        assert_eq!(h.safety_value(), 25_000.0);
    }

    #[test]
    fn missing_type_column_means_stock() {
        let h = parse(b"Ticker,Shares,AvgPrice\nINFY.NS,2,1500\n").unwrap();
        assert_eq!(h.iter().next().unwrap().asset_type, AssetType::Stock);
        assert_eq!(h.total_value(), 3000.0);
    }

    #[test]
    fn falls_back_to_windows_1252() {
        // 0x96 is an en dash in Windows-1252 and invalid as UTF-8.
        let bytes = b"Ticker,Shares,AvgPrice,Type\nM\x96M.NS,1,100,Stock\n";
        let h = parse(bytes).unwrap();
        assert_eq!(h.iter().next().unwrap().ticker, "M\u{2013}M.NS");
    }

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Ticker,Shares,AvgPrice,Type\nSBIN.NS,1,600,Stock\n");
        let h = parse(&bytes).unwrap();
        assert_eq!(h.iter().next().unwrap().ticker, "SBIN.NS");
    }

    #[test]
    fn missing_file_is_an_empty_portfolio() {
        let path = std::env::temp_dir().join("investor-no-such-holdings.csv");
        assert!(load(&path).unwrap().is_empty());
    }
}
