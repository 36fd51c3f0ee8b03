//! Scalar metrics derived from a parsed profile.

use std::collections::BTreeSet;

use vintalyze_core::{
    Article, ArticleStats, MonthlySales, PerformanceScore, PerformanceStats, SalesBand,
    ScoreBreakdown, Trend,
};

use crate::stats::{coefficient_of_variation, mean, round1};

const RATING_WEIGHT: f64 = 0.30;
const SALES_WEIGHT: f64 = 0.30;
const ENGAGEMENT_WEIGHT: f64 = 0.20;
const CONSISTENCY_WEIGHT: f64 = 0.20;

/// Sub-score used when its input is missing or degenerate.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Estimated sales `(low, high)` for a review count.
///
/// `low = floor(0.9 n)` in both bands. The conservative band keeps `high = n`;
/// the symmetric band uses `high = ceil(1.1 n)`, saturating at `u32::MAX`.
/// A missing count estimates `(0, 0)`.
#[must_use]
pub fn estimate_sales(review_count: Option<u32>, band: SalesBand) -> (u32, u32) {
    let Some(n) = review_count else {
        return (0, 0);
    };
    let wide = u64::from(n);
    let low = u32::try_from(wide * 9 / 10).unwrap_or(n);
    let high = match band {
        SalesBand::Conservative => n,
        SalesBand::Symmetric => u32::try_from((wide * 11).div_ceil(10)).unwrap_or(u32::MAX),
    };
    (low, high)
}

/// Estimated sales per follower as a percentage, one decimal.
///
/// Returns `None` when the follower count is missing or zero.
#[must_use]
pub fn engagement_rate(estimated_sales_high: u32, follower_count: Option<u32>) -> Option<f64> {
    let followers = follower_count.filter(|&f| f > 0)?;
    Some(round1(
        f64::from(estimated_sales_high) / f64::from(followers) * 100.0,
    ))
}

/// Inputs of [`performance_score`].
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub rating: Option<f64>,
    pub estimated_sales_high: u32,
    pub follower_count: Option<u32>,
    pub monthly_sales: &'a [MonthlySales],
}

/// Weighted composite of rating, sales volume, engagement and consistency.
///
/// Missing rating, missing or zero followers, and an empty or all-zero
/// monthly series each score [`NEUTRAL_SCORE`] in their component.
#[must_use]
pub fn performance_score(inputs: &ScoreInputs<'_>) -> PerformanceScore {
    let rating = inputs
        .rating
        .map_or(NEUTRAL_SCORE, |r| r / 5.0 * 100.0);

    let sales = if inputs.estimated_sales_high == 0 {
        0.0
    } else {
        (f64::from(inputs.estimated_sales_high).log10() / 3.0 * 100.0).min(100.0)
    };

    let engagement = match inputs.follower_count {
        Some(f) if f > 0 => {
            (f64::from(inputs.estimated_sales_high) / f64::from(f) * 100.0).min(100.0)
        }
        _ => NEUTRAL_SCORE,
    };

    let counts: Vec<f64> = inputs
        .monthly_sales
        .iter()
        .map(|m| f64::from(m.count))
        .collect();
    let consistency = coefficient_of_variation(&counts)
        .map_or(NEUTRAL_SCORE, |cv| (100.0 - cv * 100.0).max(0.0));

    let total = rating.clamp(0.0, 100.0) * RATING_WEIGHT
        + sales.clamp(0.0, 100.0) * SALES_WEIGHT
        + engagement.clamp(0.0, 100.0) * ENGAGEMENT_WEIGHT
        + consistency.clamp(0.0, 100.0) * CONSISTENCY_WEIGHT;

    PerformanceScore {
        total: to_score(total),
        breakdown: ScoreBreakdown {
            rating: to_score(rating),
            sales: to_score(sales),
            engagement: to_score(engagement),
            consistency: to_score(consistency),
        },
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Average, best month, trend and forecast over the monthly series.
///
/// Returns `None` only for an empty series; an all-zero window yields a zero
/// average, a stable trend and a zero forecast.
#[must_use]
pub fn performance_stats(monthly_sales: &[MonthlySales]) -> Option<PerformanceStats> {
    let (first, last) = (monthly_sales.first()?, monthly_sales.last()?);

    let counts: Vec<f64> = monthly_sales.iter().map(|m| f64::from(m.count)).collect();
    let avg_monthly_sales = mean(&counts)?;

    let mut best_month = *first;
    for entry in monthly_sales {
        if entry.count > best_month.count {
            best_month = *entry;
        }
    }

    // Mean of consecutive differences telescopes to (last - first) / (n - 1).
    #[allow(clippy::cast_precision_loss)]
    let average_delta = if monthly_sales.len() < 2 {
        0.0
    } else {
        (f64::from(last.count) - f64::from(first.count)) / (monthly_sales.len() - 1) as f64
    };

    let trend = if average_delta > 0.0 {
        Trend::Positive
    } else if average_delta < 0.0 {
        Trend::Negative
    } else {
        Trend::Stable
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let next_month_forecast = (f64::from(last.count) + average_delta)
        .round()
        .clamp(0.0, f64::from(u32::MAX)) as u32;

    Some(PerformanceStats {
        avg_monthly_sales,
        best_month,
        trend,
        average_delta,
        next_month_forecast,
    })
}

/// Price range, listed value and brand set. `None` without articles.
///
/// `brands` is the page-wide brand set; brands carried by the articles
/// themselves are merged into it.
#[must_use]
pub fn article_stats(articles: &[Article], brands: &[String]) -> Option<ArticleStats> {
    if articles.is_empty() {
        return None;
    }
    let prices: Vec<f64> = articles.iter().map(|a| a.price).collect();
    let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let total_value: f64 = prices.iter().sum();
    let average_price = mean(&prices)?;

    let brands: Vec<String> = articles
        .iter()
        .filter_map(|a| a.brand.as_deref())
        .chain(brands.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    Some(ArticleStats {
        count: articles.len(),
        min_price,
        max_price,
        average_price,
        total_value,
        brands,
    })
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
