//! Shared records, date helpers and configuration for Vintalyze.
//!
//! The parser and the analytics crates both build on the types here; nothing
//! in this crate performs I/O except [`load_languages`] and the env loaders.

pub mod app_config;
pub mod config;
pub mod dates;
pub mod error;
pub mod languages;
pub mod month;
pub mod period;
pub mod types;

pub use app_config::{
    AnalysisConfig, AppConfig, SalesBand, TimelineMode, DEFAULT_MAX_INPUT_BYTES,
    DEFAULT_MAX_TIMELINE_MONTHS, DEFAULT_PLATFORM_NAME, DEFAULT_TRAILING_MONTHS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use dates::{find_relative_time, normalize_relative_date, RelativeTime, TimeUnit};
pub use error::{ConfigError, Degradation};
pub use languages::{load_languages, LanguageEntry, LanguageTable};
pub use month::MonthKey;
pub use period::{date_range, month_period, month_span, trailing_period, DateRange};
pub use types::{
    Article, ArticleStats, CountryShare, EnrichedProfileRecord, MonthlySales, PerformanceScore,
    PerformanceStats, RawProfileRecord, ReviewEvent, ScoreBreakdown, Trend, INTERNATIONAL,
};
