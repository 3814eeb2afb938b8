use crate::domain::holding::{AssetType, Holdings};
use crate::domain::recommendation::SellOrder;
use crate::domain::stock::ScoredStock;
use crate::planning::round2;
use crate::scoring::valuation::Fundamentals;
use std::collections::HashMap;

const WEAK_SCORE: f64 = 40.0;
const OVERVALUED_PE: f64 = 80.0;
const OVERVALUED_PEG: f64 = 4.0;

/// Flags directly held stocks that scored poorly or trade at a stretched valuation.
///
/// Only `Stock` holdings that appear in the scored table are reviewed; funds, ETFs and index
/// holdings are left alone. A holding without a usable live price is valued at its average price.
pub fn review_for_sells(holdings: &Holdings, scored: &[ScoredStock]) -> Vec<SellOrder> {
    let by_ticker: HashMap<&str, &ScoredStock> = scored.iter().map(|s| (s.ticker(), s)).collect();
    let mut sells = Vec::new();

    for holding in holdings.iter() {
        if holding.asset_type != AssetType::Stock {
            continue;
        }
        let Some(stock) = by_ticker.get(holding.ticker.as_str()) else {
            continue;
        };

        let Some(reason) = sell_reason(stock) else {
            continue;
        };

        let current_price = stock
            .snapshot
            .tradable_price()
            .unwrap_or(holding.avg_price);
        let pnl_pct = if holding.avg_price > 0.0 {
            round2((current_price - holding.avg_price) / holding.avg_price * 100.0)
        } else {
            0.0
        };

        tracing::info!(ticker = %holding.ticker, %reason, pnl_pct, "sell candidate");
        sells.push(SellOrder {
            ticker: holding.ticker.clone(),
            shares: holding.shares,
            current_price,
            reason,
            est_value: holding.shares * current_price,
            pnl_pct,
        });
    }

    sells
}

fn sell_reason(stock: &ScoredStock) -> Option<String> {
    if stock.total_score < WEAK_SCORE {
        return Some(format!(
            "Weak Fundamentals (Score: {}/100)",
            stock.total_score.round() as i64
        ));
    }

    let f = Fundamentals::clean(&stock.snapshot);
    match (f.trailing_pe, f.peg_ratio) {
        (pe, Some(peg)) if pe > OVERVALUED_PE && peg > OVERVALUED_PEG => {
            Some(format!("Overvalued (P/E {pe:.1}, PEG {peg:.1})"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::Holding;
    use crate::domain::stock::StockSnapshot;
    use crate::scoring::rank::score_stock;

    fn scored(
        ticker: &str,
        price: f64,
        total: f64,
        pe: Option<f64>,
        peg: Option<f64>,
    ) -> ScoredStock {
        let mut s = score_stock(StockSnapshot {
            price: Some(price),
            trailing_pe: pe,
            peg_ratio: peg,
            ..StockSnapshot::new(ticker)
        });
        s.total_score = total;
        s
    }

    fn holding(ticker: &str, shares: f64, avg: f64, asset_type: AssetType) -> Holding {
        Holding {
            ticker: ticker.to_string(),
            shares,
            avg_price: avg,
            asset_type,
        }
    }

    #[test]
    fn flags_weak_and_overvalued_stocks_only() {
        let holdings = Holdings::new(vec![
            holding("WEAK.NS", 10.0, 200.0, AssetType::Stock),
            holding("RICH.NS", 5.0, 1000.0, AssetType::Stock),
            holding("FINE.NS", 5.0, 100.0, AssetType::Stock),
            holding("NOTSCORED.NS", 5.0, 100.0, AssetType::Stock),
        ]);
        let table = vec![
            scored("WEAK.NS", 150.0, 35.4, None, None),
            scored("RICH.NS", 1200.0, 70.0, Some(95.0), Some(4.5)),
            scored("FINE.NS", 120.0, 70.0, Some(95.0), Some(3.0)),
        ];

        let sells = review_for_sells(&holdings, &table);
        assert_eq!(sells.len(), 2);

        assert_eq!(sells[0].ticker, "WEAK.NS");
        assert_eq!(sells[0].reason, "Weak Fundamentals (Score: 35/100)");
        assert_eq!(sells[0].est_value, 1500.0);
        assert_eq!(sells[0].pnl_pct, -25.0);

        assert_eq!(sells[1].ticker, "RICH.NS");
        assert!(sells[1].reason.starts_with("Overvalued"));
        assert_eq!(sells[1].pnl_pct, 20.0);
    }

    #[test]
    fn missing_pe_reads_as_stretched_valuation() {
        let holdings = Holdings::new(vec![
            holding("NOPE.NS", 2.0, 500.0, AssetType::Stock),
            holding("NOPEG.NS", 2.0, 500.0, AssetType::Stock),
        ]);
        let table = vec![
            scored("NOPE.NS", 500.0, 60.0, None, Some(5.0)),
            scored("NOPEG.NS", 500.0, 60.0, Some(120.0), None),
        ];

        let sells = review_for_sells(&holdings, &table);
        assert_eq!(sells.len(), 1);
        assert_eq!(sells[0].ticker, "NOPE.NS");
        assert_eq!(sells[0].reason, "Overvalued (P/E 999.0, PEG 5.0)");
    }

    #[test]
    fn funds_and_etfs_are_never_reviewed() {
        let holdings = Holdings::new(vec![
            holding("NIFTYBEES.NS", 100.0, 250.0, AssetType::Etf),
            holding("UTI", 10.0, 50.0, AssetType::MutualFund),
        ]);
        let table = vec![
            scored("NIFTYBEES.NS", 260.0, 10.0, None, None),
            scored("UTI", 55.0, 10.0, None, None),
        ];
        assert!(review_for_sells(&holdings, &table).is_empty());
    }

    #[test]
    fn zero_average_price_reports_flat_pnl() {
        let holdings = Holdings::new(vec![holding("GIFT.NS", 3.0, 0.0, AssetType::Stock)]);
        let table = vec![scored("GIFT.NS", 100.0, 20.0, None, None)];
        let sells = review_for_sells(&holdings, &table);
        assert_eq!(sells[0].pnl_pct, 0.0);
        assert_eq!(sells[0].est_value, 300.0);
    }
}
