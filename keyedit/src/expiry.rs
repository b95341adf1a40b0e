//! Expiration dates.

use chrono::{Days, Months, NaiveDate};

/// When a key should expire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expiry {
    /// The key never expires.
    #[default]
    Never,
    /// The key expires on the given day.
    Date(NaiveDate),
    /// The key expires a fixed interval from today.
    Interval(u32, IntervalUnit),
}

/// Units for a relative expiration interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalUnit {
    /// Calendar days.
    Days,
    /// Seven-day weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

/// Formats the day a key should expire the way the engine's validity prompt
/// expects it: `"YYYY-MM-DD"`, or `"0"` for a key that never expires.
///
/// Relative intervals are taken from `today`; callers pass the current local
/// date.
pub fn expiration_day(expiry: Expiry, today: NaiveDate) -> String {
    let day = match expiry {
        Expiry::Never => return "0".into(),
        Expiry::Date(date) => date,
        Expiry::Interval(n, IntervalUnit::Days) => add_days(today, n),
        Expiry::Interval(n, IntervalUnit::Weeks) => add_days(today, n * 7),
        Expiry::Interval(n, IntervalUnit::Months) => add_months(today, n),
        Expiry::Interval(n, IntervalUnit::Years) => add_months(today, n * 12),
    };
    day.format("%Y-%m-%d").to_string()
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
