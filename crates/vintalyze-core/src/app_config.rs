use std::path::PathBuf;

/// Default upper bound on pasted input, in bytes.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1_048_576;

/// Default name of the platform's automated reviewer.
pub const DEFAULT_PLATFORM_NAME: &str = "Vinted";

/// Default length of the trailing timeline window.
pub const DEFAULT_TRAILING_MONTHS: u32 = 12;

/// Default cap on how many months back the timeline may reach.
pub const DEFAULT_MAX_TIMELINE_MONTHS: u32 = 120;

/// How the review count maps to an estimated sales range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalesBand {
    /// `low = floor(0.9 n)`, `high = n`.
    #[default]
    Conservative,
    /// `low = floor(0.9 n)`, `high = ceil(1.1 n)`.
    Symmetric,
}

impl std::fmt::Display for SalesBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalesBand::Conservative => write!(f, "conservative"),
            SalesBand::Symmetric => write!(f, "symmetric"),
        }
    }
}

/// Span covered by the monthly sales timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineMode {
    /// From the earliest to the latest dated review.
    #[default]
    Adaptive,
    /// A fixed window of `months` months ending with the current month.
    Trailing { months: u32 },
}

/// Settings the parser and the analytics pipeline read.
///
/// Plain value with sensible defaults; the library never reads the
/// environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub sales_band: SalesBand,
    pub timeline: TimelineMode,
    /// Language code used when no keyword matches. `None` means International.
    pub fallback_language: Option<String>,
    /// Reviewer identity of the platform's automated messages.
    pub platform_name: String,
    pub max_input_bytes: usize,
    /// Oldest month, counted back from now's month, a timeline may include.
    /// Reviews dated earlier are left out of the series.
    pub max_timeline_months: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sales_band: SalesBand::default(),
            timeline: TimelineMode::default(),
            fallback_language: None,
            platform_name: DEFAULT_PLATFORM_NAME.to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_timeline_months: DEFAULT_MAX_TIMELINE_MONTHS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Optional YAML keyword table replacing the built-in one.
    pub languages_path: Option<PathBuf>,
    pub analysis: AnalysisConfig,
}
