use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read languages file {path}: {source}")]
    LanguagesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse languages file: {0}")]
    LanguagesFileParse(#[source] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// A non-fatal condition absorbed while deriving metrics.
///
/// These never abort a run; the affected value falls back to a neutral
/// default and the condition is recorded on the enriched record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// A review's time text matched no known unit; the review is left out of
    /// the monthly timeline.
    #[error("unrecognized date expression \"{text}\"")]
    UnrecognizedDateExpression { text: String },

    /// A review's date lies before the oldest month the timeline may cover;
    /// the review is left out of the monthly timeline.
    #[error("review date \"{text}\" is older than {max_months} months")]
    DateBeyondTimeline { text: String, max_months: u32 },

    /// A review comment matched no language keyword; counted as International
    /// (or the configured fallback language).
    #[error("could not classify the language of the review by {reviewer}")]
    UnclassifiableLanguage { reviewer: String },

    /// A statistic had a zero denominator and was replaced by its neutral default.
    #[error("degenerate statistic for {metric}; neutral default used")]
    DegenerateStatistics { metric: String },
}
