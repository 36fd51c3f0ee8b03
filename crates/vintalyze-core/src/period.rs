//! Month-keyed histogram skeletons for review timelines.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::month::MonthKey;

/// Inclusive span between the earliest and latest of a set of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Computes the `[min, max]` span of `dates`.
///
/// An empty input yields the degenerate range `{ start: now, end: now }`.
#[must_use]
pub fn date_range(dates: &[DateTime<Utc>], now: DateTime<Utc>) -> DateRange {
    let start = dates.iter().min().copied();
    let end = dates.iter().max().copied();
    match (start, end) {
        (Some(start), Some(end)) => DateRange { start, end },
        _ => DateRange {
            start: now,
            end: now,
        },
    }
}

/// Builds one zero-initialized entry per month from `start`'s month to
/// `end`'s month inclusive.
///
/// Walks month keys rather than timestamps, so a start on the 31st never
/// skips a short month. Returns an empty map when `end` precedes `start`.
#[must_use]
pub fn month_period(start: DateTime<Utc>, end: DateTime<Utc>) -> BTreeMap<MonthKey, u32> {
    month_span(MonthKey::of(&start), MonthKey::of(&end))
}

/// Same as [`month_period`] but over month keys directly.
#[must_use]
pub fn month_span(first: MonthKey, last: MonthKey) -> BTreeMap<MonthKey, u32> {
    let mut period = BTreeMap::new();
    let mut current = first;
    while current <= last {
        period.insert(current, 0);
        current = current.next();
    }
    period
}

/// Fixed window of `months` months ending with `now`'s month.
///
/// `months == 0` yields an empty map.
#[must_use]
pub fn trailing_period(now: DateTime<Utc>, months: u32) -> BTreeMap<MonthKey, u32> {
    if months == 0 {
        return BTreeMap::new();
    }
    let last = MonthKey::of(&now);
    month_span(last.back(months - 1), last)
}
