//! Profile records produced by the parser and the analytics pipeline.
//!
//! Both records are immutable values built fresh on every run; nothing here
//! holds references into the input text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Degradation;
use crate::month::MonthKey;

/// Country label used when a review cannot be attributed to a language.
pub const INTERNATIONAL: &str = "International";

/// One listed article: its price and, when shown, its brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub price: f64,
    pub brand: Option<String>,
}

/// One timestamped, attributed review extracted from the page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub reviewer: String,
    /// Time expression as it appeared on the page, e.g. `"2 mois"`.
    pub relative_time: String,
    /// Free-text comment; empty when the review had none.
    pub comment: String,
}

/// Result of parsing one profile page dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProfileRecord {
    pub shop_name: String,
    pub follower_count: Option<u32>,
    /// Defaults to `0` when the page shows no following count.
    pub following_count: u32,
    pub location: Option<String>,
    /// Average rating in `0.0..=5.0`.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub articles: Vec<Article>,
    /// Every brand named on the page, sorted and distinct; includes brands
    /// listed without a price.
    pub brands: Vec<String>,
    /// Reviews in page order, platform and seller entries excluded.
    pub review_events: Vec<ReviewEvent>,
}

impl RawProfileRecord {
    /// A record with only the shop name set.
    #[must_use]
    pub fn new(shop_name: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            follower_count: None,
            following_count: 0,
            location: None,
            rating: None,
            review_count: None,
            articles: Vec::new(),
            brands: Vec::new(),
            review_events: Vec::new(),
        }
    }
}

/// Review count attributed to one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: MonthKey,
    pub count: u32,
}

/// Share of classified reviews attributed to one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShare {
    pub country: String,
    pub count: u32,
    /// Percentage of classified reviews, rounded to one decimal.
    pub percentage: f64,
}

/// Sub-scores of the performance score, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rating: u8,
    pub sales: u8,
    pub engagement: u8,
    pub consistency: u8,
}

/// Weighted composite seller score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub total: u8,
    pub breakdown: ScoreBreakdown,
}

/// Direction of the monthly sales series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Positive => write!(f, "positive"),
            Trend::Negative => write!(f, "negative"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Summary statistics over the monthly sales series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub avg_monthly_sales: f64,
    /// Highest month; ties go to the earliest month.
    pub best_month: MonthlySales,
    pub trend: Trend,
    /// Average month-over-month change in count.
    pub average_delta: f64,
    pub next_month_forecast: u32,
}

/// Price and brand summary over the parsed articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleStats {
    pub count: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub average_price: f64,
    /// Sum of listed prices.
    pub total_value: f64,
    pub brands: Vec<String>,
}

/// A [`RawProfileRecord`] plus every derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProfileRecord {
    #[serde(flatten)]
    pub profile: RawProfileRecord,
    /// The "now" the relative dates were resolved against.
    pub analyzed_at: DateTime<Utc>,
    pub estimated_sales_low: u32,
    pub estimated_sales_high: u32,
    /// Gap-free, ascending, one entry per month.
    pub monthly_sales: Vec<MonthlySales>,
    /// Sorted by descending count, then country name.
    pub country_distribution: Vec<CountryShare>,
    /// Estimated sales per follower, as a percentage with one decimal.
    pub engagement_rate: f64,
    pub performance_score: PerformanceScore,
    pub performance_stats: Option<PerformanceStats>,
    pub article_stats: Option<ArticleStats>,
    /// Non-fatal conditions absorbed while deriving metrics.
    pub degradations: Vec<Degradation>,
}
