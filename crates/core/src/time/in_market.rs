use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use std::collections::HashSet;

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

// NSE closes at 15:30 IST. Before the cutoff the latest complete session is the previous one.
const CLOSE_CUTOFF_HOUR_IST: u32 = 16;
const CLOSE_CUTOFF_MINUTE_IST: u32 = 0;

const HOLIDAY_YEARS: std::ops::RangeInclusive<i32> = 2024..=2030;

/// Date the report is stamped with: an explicit `YYYY-MM-DD`, or the latest NSE session that
/// has closed as of `now_utc`.
pub fn resolve_as_of_date(
    as_of_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = as_of_date_arg {
        return NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("as-of date must be YYYY-MM-DD (got {s})"));
    }

    let ist = chrono::FixedOffset::east_opt(IST_OFFSET_SECS).context("invalid IST offset")?;
    let now_ist = now_utc.with_timezone(&ist);

    let cutoff_reached =
        (now_ist.hour(), now_ist.minute()) >= (CLOSE_CUTOFF_HOUR_IST, CLOSE_CUTOFF_MINUTE_IST);
    let mut date = now_ist.date_naive();
    if !cutoff_reached {
        date = date - Duration::days(1);
    }

    let holidays = configured_holidays();
    while !is_trading_day(date, &holidays) {
        date = date - Duration::days(1);
    }

    Ok(date)
}

pub fn is_trading_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    !is_weekend(date) && !holidays.contains(&date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}

/// Republic Day, Independence Day and Gandhi Jayanti, plus anything listed in
/// `NSE_MARKET_HOLIDAYS="YYYY-MM-DD,YYYY-MM-DD"`.
pub fn configured_holidays() -> HashSet<NaiveDate> {
    let mut out = HashSet::new();
    for y in HOLIDAY_YEARS {
        for (m, d) in [(1, 26), (8, 15), (10, 2)] {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                out.insert(date);
            }
        }
    }

    if let Ok(s) = std::env::var("NSE_MARKET_HOLIDAYS") {
        out.extend(parse_holiday_list(&s));
    }

    out
}

fn parse_holiday_list(s: &str) -> Vec<NaiveDate> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(|p| match NaiveDate::parse_from_str(p, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                tracing::warn!(value = p, "ignoring malformed NSE_MARKET_HOLIDAYS entry");
                None
            }
        })
        .collect()
}
