//! Monthly sales timeline built from review dates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use vintalyze_core::{
    date_range, month_period, normalize_relative_date, trailing_period, Degradation, MonthKey,
    MonthlySales, ReviewEvent, TimelineMode,
};

/// Review counts per month plus the events that could not be dated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    /// Ascending and gap-free.
    pub monthly_sales: Vec<MonthlySales>,
    pub degradations: Vec<Degradation>,
}

/// Buckets review events into calendar months.
///
/// Events whose time text does not normalize are left out and reported as
/// [`Degradation::UnrecognizedDateExpression`]. In adaptive mode the series
/// spans the earliest to the latest dated review and is empty when no review
/// could be dated; in trailing mode it always covers the fixed window and
/// dates outside it are ignored.
///
/// No series reaches further back than `max_months` months, counting now's
/// month. Older reviews are reported as [`Degradation::DateBeyondTimeline`]
/// and a longer trailing window is shortened to the cap.
#[must_use]
pub fn build_timeline(
    events: &[ReviewEvent],
    now: DateTime<Utc>,
    mode: TimelineMode,
    max_months: u32,
) -> Timeline {
    let oldest = MonthKey::of(&now).back(max_months.saturating_sub(1));
    let mut degradations = Vec::new();
    let mut dates = Vec::with_capacity(events.len());
    for event in events {
        match normalize_relative_date(&event.relative_time, now) {
            Some(date) if MonthKey::of(&date) < oldest => {
                tracing::debug!(
                    reviewer = %event.reviewer,
                    text = %event.relative_time,
                    max_months,
                    "review date beyond timeline cap"
                );
                degradations.push(Degradation::DateBeyondTimeline {
                    text: event.relative_time.clone(),
                    max_months,
                });
            }
            Some(date) => dates.push(date),
            None => {
                tracing::debug!(
                    reviewer = %event.reviewer,
                    text = %event.relative_time,
                    "review date not recognized"
                );
                degradations.push(Degradation::UnrecognizedDateExpression {
                    text: event.relative_time.clone(),
                });
            }
        }
    }

    let mut skeleton: BTreeMap<MonthKey, u32> = match mode {
        TimelineMode::Adaptive if dates.is_empty() => BTreeMap::new(),
        TimelineMode::Adaptive => {
            let range = date_range(&dates, now);
            month_period(range.start, range.end)
        }
        TimelineMode::Trailing { months } => trailing_period(now, months.min(max_months)),
    };

    for date in &dates {
        if let Some(count) = skeleton.get_mut(&MonthKey::of(date)) {
            *count += 1;
        }
    }

    Timeline {
        monthly_sales: skeleton
            .into_iter()
            .map(|(month, count)| MonthlySales { month, count })
            .collect(),
        degradations,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const CAP: u32 = 120;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn event(reviewer: &str, time: &str) -> ReviewEvent {
        ReviewEvent {
            reviewer: reviewer.to_string(),
            relative_time: time.to_string(),
            comment: String::new(),
        }
    }

    fn as_pairs(timeline: &Timeline) -> Vec<(String, u32)> {
        timeline
            .monthly_sales
            .iter()
            .map(|m| (m.month.to_string(), m.count))
            .collect()
    }

    #[test]
    fn adaptive_spans_earliest_to_latest_review() {
        let events = vec![
            event("a", "2 mois"),
            event("b", "4 mois"),
            event("c", "2 months"),
            event("d", "3 jours"),
        ];
        let timeline = build_timeline(&events, now(), TimelineMode::Adaptive, CAP);
        assert_eq!(
            as_pairs(&timeline),
            vec![
                ("2024-02".to_string(), 1),
                ("2024-03".to_string(), 0),
                ("2024-04".to_string(), 2),
                ("2024-05".to_string(), 0),
                ("2024-06".to_string(), 1),
            ]
        );
        assert!(timeline.degradations.is_empty());
    }

    #[test]
    fn unrecognized_dates_are_reported_and_skipped() {
        let events = vec![event("a", "quelques instants"), event("b", "1 mois")];
        let timeline = build_timeline(&events, now(), TimelineMode::Adaptive, CAP);
        assert_eq!(as_pairs(&timeline), vec![("2024-05".to_string(), 1)]);
        assert_eq!(
            timeline.degradations,
            vec![Degradation::UnrecognizedDateExpression {
                text: "quelques instants".to_string()
            }]
        );
    }

    #[test]
    fn adaptive_without_dated_reviews_is_empty() {
        let timeline = build_timeline(&[], now(), TimelineMode::Adaptive, CAP);
        assert!(timeline.monthly_sales.is_empty());
    }

    #[test]
    fn trailing_window_covers_fixed_months() {
        let events = vec![event("a", "1 mois"), event("b", "2 ans")];
        let timeline = build_timeline(&events, now(), TimelineMode::Trailing { months: 3 }, CAP);
        assert_eq!(
            as_pairs(&timeline),
            vec![
                ("2024-04".to_string(), 0),
                ("2024-05".to_string(), 1),
                ("2024-06".to_string(), 0),
            ]
        );
    }

    #[test]
    fn trailing_window_without_reviews_is_all_zero() {
        let timeline = build_timeline(&[], now(), TimelineMode::Trailing { months: 12 }, CAP);
        assert_eq!(timeline.monthly_sales.len(), 12);
        assert!(timeline.monthly_sales.iter().all(|m| m.count == 0));
    }

    #[test]
    fn reviews_older_than_cap_are_reported_and_skipped() {
        let events = vec![event("a", "200000 ans"), event("b", "1 mois")];
        let timeline = build_timeline(&events, now(), TimelineMode::Adaptive, CAP);
        assert_eq!(as_pairs(&timeline), vec![("2024-05".to_string(), 1)]);
        assert_eq!(
            timeline.degradations,
            vec![Degradation::DateBeyondTimeline {
                text: "200000 ans".to_string(),
                max_months: CAP
            }]
        );
    }

    #[test]
    fn cap_boundary_month_is_kept() {
        // 119 months back from 2024-06 is 2014-07, the oldest month allowed.
        let events = vec![
            event("a", "119 mois"),
            event("b", "120 mois"),
            event("c", "3 jours"),
        ];
        let timeline = build_timeline(&events, now(), TimelineMode::Adaptive, CAP);
        assert_eq!(timeline.monthly_sales.len(), 120);
        assert_eq!(timeline.monthly_sales[0].month, MonthKey::new(2014, 7).unwrap());
        assert_eq!(timeline.monthly_sales[0].count, 1);
        assert_eq!(timeline.degradations.len(), 1);
    }

    #[test]
    fn trailing_window_is_shortened_to_cap() {
        let mode = TimelineMode::Trailing { months: u32::MAX };
        let timeline = build_timeline(&[], now(), mode, 24);
        assert_eq!(timeline.monthly_sales.len(), 24);
    }
}
