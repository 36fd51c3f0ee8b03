//! Side-by-side view of two independently enriched profiles.

use serde::Serialize;

use vintalyze_core::{month_span, EnrichedProfileRecord, MonthKey, MonthlySales};

/// One month of the joint timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparedMonth {
    pub month: MonthKey,
    pub first: u32,
    pub second: u32,
}

/// `second - first` for the headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDeltas {
    pub estimated_sales_high: i64,
    /// `None` unless both profiles show a rating.
    pub rating: Option<f64>,
    pub score_total: i16,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first_shop: String,
    pub second_shop: String,
    /// Gap-free over the union of both spans; empty if neither has months.
    pub timeline: Vec<ComparedMonth>,
    pub deltas: MetricDeltas,
}

/// Joins two enriched records. Neither record is modified.
#[must_use]
pub fn compare(first: &EnrichedProfileRecord, second: &EnrichedProfileRecord) -> Comparison {
    let ends: Vec<MonthKey> = [&first.monthly_sales, &second.monthly_sales]
        .into_iter()
        .flat_map(|series| [series.first(), series.last()])
        .flatten()
        .map(|m| m.month)
        .collect();

    let timeline = match (ends.iter().min(), ends.iter().max()) {
        (Some(&lo), Some(&hi)) => month_span(lo, hi)
            .into_keys()
            .map(|month| ComparedMonth {
                month,
                first: count_in(&first.monthly_sales, month),
                second: count_in(&second.monthly_sales, month),
            })
            .collect(),
        _ => Vec::new(),
    };

    let rating = match (first.profile.rating, second.profile.rating) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    };

    Comparison {
        first_shop: first.profile.shop_name.clone(),
        second_shop: second.profile.shop_name.clone(),
        timeline,
        deltas: MetricDeltas {
            estimated_sales_high: i64::from(second.estimated_sales_high)
                - i64::from(first.estimated_sales_high),
            rating,
            score_total: i16::from(second.performance_score.total)
                - i16::from(first.performance_score.total),
            engagement_rate: second.engagement_rate - first.engagement_rate,
        },
    }
}

fn count_in(series: &[MonthlySales], month: MonthKey) -> u32 {
    series
        .binary_search_by_key(&month, |m| m.month)
        .map_or(0, |i| series[i].count)
}
