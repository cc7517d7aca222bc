//! Utility functions for date keys and workout duration strings.

use chrono::{Datelike, NaiveDate};

/// Parse a `YYYY-MM-DD` date key.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// ISO (year, week number) of a `YYYY-MM-DD` date key.
pub fn iso_week_of(s: &str) -> Option<(i32, u32)> {
    parse_date(s).map(|d| {
        let w = d.iso_week();
        (w.year(), w.week())
    })
}

/// The date key one day before `s`.
pub fn previous_day(s: &str) -> Option<String> {
    parse_date(s)
        .and_then(|d| d.pred_opt())
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Minutes in an `H:MM` duration string.
///
/// Returns `None` for anything that is not two colon-separated integers,
/// or when the total does not fit in a `u32`.
pub fn duration_minutes(s: &str) -> Option<u32> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    h.checked_mul(60)?.checked_add(m)
}

/// Round to one decimal place, halves to even.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}
