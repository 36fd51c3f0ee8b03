//! Derived metrics for parsed Vinted profiles.
//!
//! Takes a [`vintalyze_core::RawProfileRecord`] and a "now" timestamp and
//! produces an [`vintalyze_core::EnrichedProfileRecord`]: estimated sales,
//! monthly timeline, country distribution inferred from review language,
//! engagement, a weighted performance score and trend statistics. Also
//! hosts the two-profile comparison join and the export document.

pub mod classifier;
pub mod compare;
pub mod enrich;
pub mod geography;
pub mod metrics;
pub mod report;
pub mod timeline;

mod stats;

pub use classifier::{Classification, Classifier, KeywordClassifier};
pub use compare::{compare, ComparedMonth, Comparison, MetricDeltas};
pub use enrich::{enrich, Analyzer};
pub use geography::country_distribution;
pub use metrics::{
    article_stats, engagement_rate, estimate_sales, performance_score, performance_stats,
    ScoreInputs, NEUTRAL_SCORE,
};
pub use report::{ExportDocument, Table};
pub use timeline::{build_timeline, Timeline};
