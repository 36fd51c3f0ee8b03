//! Relative-date normalization: `"il y a 3 mois"` / `"3 months ago"` to an
//! absolute timestamp.
//!
//! Month and year offsets use calendar arithmetic (`Months`), so stepping back
//! from Jan 31 lands on the last valid day of the target month. Minutes, hours,
//! days and weeks are fixed durations.

use std::sync::LazyLock;

use chrono::{DateTime, Months, TimeDelta, Utc};
use regex::Regex;

/// `<magnitude> <unit>`, French or English, singular or plural.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d+|une?|an?|one)\s+(minutes?|heures?|hours?|jours?|days?|semaines?|weeks?|mois|months?|années?|ans?|years?)\b",
    )
    .expect("valid relative time regex")
});

/// Unit of a relative time expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "minute" | "minutes" => Some(Self::Minute),
            "heure" | "heures" | "hour" | "hours" => Some(Self::Hour),
            "jour" | "jours" | "day" | "days" => Some(Self::Day),
            "semaine" | "semaines" | "week" | "weeks" => Some(Self::Week),
            "mois" | "month" | "months" => Some(Self::Month),
            "an" | "ans" | "année" | "années" | "year" | "years" => Some(Self::Year),
            _ => None,
        }
    }
}

/// A parsed `<amount> <unit>` offset into the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub amount: u32,
    pub unit: TimeUnit,
}

impl RelativeTime {
    /// `now` minus this offset, or `None` if the result is out of range.
    #[must_use]
    pub fn before(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let amount = i64::from(self.amount);
        match self.unit {
            TimeUnit::Minute => now.checked_sub_signed(TimeDelta::try_minutes(amount)?),
            TimeUnit::Hour => now.checked_sub_signed(TimeDelta::try_hours(amount)?),
            TimeUnit::Day => now.checked_sub_signed(TimeDelta::try_days(amount)?),
            TimeUnit::Week => now.checked_sub_signed(TimeDelta::try_weeks(amount)?),
            TimeUnit::Month => now.checked_sub_months(Months::new(self.amount)),
            TimeUnit::Year => now.checked_sub_months(Months::new(self.amount.checked_mul(12)?)),
        }
    }
}

/// A relative time expression located inside a larger string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTimeMatch<'a> {
    pub time: RelativeTime,
    /// The matched `<amount> <unit>` slice.
    pub text: &'a str,
    /// Byte offset just past the match.
    pub end: usize,
}

/// Finds the first relative time expression in `text`.
#[must_use]
pub fn find_relative_time(text: &str) -> Option<RelativeTimeMatch<'_>> {
    for caps in RELATIVE_TIME_RE.captures_iter(text) {
        let (Some(whole), Some(amount), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let Some(amount) = parse_amount(amount.as_str()) else {
            continue;
        };
        let Some(unit) = TimeUnit::from_word(&unit.as_str().to_lowercase()) else {
            continue;
        };
        return Some(RelativeTimeMatch {
            time: RelativeTime { amount, unit },
            text: whole.as_str(),
            end: whole.end(),
        });
    }
    None
}

fn parse_amount(raw: &str) -> Option<u32> {
    match raw.to_lowercase().as_str() {
        "un" | "une" | "a" | "an" | "one" => Some(1),
        digits => digits.parse().ok(),
    }
}

/// Converts a relative time expression to an absolute timestamp.
///
/// Returns `None` when `relative` contains no recognizable `<amount> <unit>`
/// expression; callers skip that event rather than failing.
#[must_use]
pub fn normalize_relative_date(relative: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    find_relative_time(relative)?.time.before(now)
}
