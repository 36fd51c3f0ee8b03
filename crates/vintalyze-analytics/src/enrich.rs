//! Raw profile to enriched profile.

use chrono::{DateTime, Utc};

use vintalyze_core::{
    AnalysisConfig, ConfigError, Degradation, EnrichedProfileRecord, LanguageTable,
    RawProfileRecord,
};

use crate::classifier::{Classifier, KeywordClassifier};
use crate::geography::country_distribution;
use crate::metrics::{
    article_stats, engagement_rate, estimate_sales, performance_score, performance_stats,
    ScoreInputs,
};
use crate::timeline::build_timeline;

/// Derives every metric of an [`EnrichedProfileRecord`].
///
/// Holds no state between calls; the same input and `now` always produce the
/// same record.
#[derive(Debug, Clone)]
pub struct Analyzer<C = KeywordClassifier> {
    config: AnalysisConfig,
    classifier: C,
}

impl Analyzer<KeywordClassifier> {
    /// Builds an analyzer classifying reviews against `table`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the configured fallback language
    /// is not in `table`.
    pub fn new(config: AnalysisConfig, table: &LanguageTable) -> Result<Self, ConfigError> {
        let classifier = KeywordClassifier::new(table, config.fallback_language.as_deref())?;
        Ok(Self { config, classifier })
    }
}

impl Default for Analyzer<KeywordClassifier> {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            classifier: KeywordClassifier::default(),
        }
    }
}

impl<C: Classifier> Analyzer<C> {
    #[must_use]
    pub fn with_classifier(config: AnalysisConfig, classifier: C) -> Self {
        Self { config, classifier }
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Enriches `raw` with metrics resolved against `now`.
    ///
    /// Never fails: unrecognized dates, unclassifiable comments and
    /// degenerate statistics fall back to neutral values and are listed in
    /// `degradations`.
    #[must_use]
    pub fn enrich(&self, raw: RawProfileRecord, now: DateTime<Utc>) -> EnrichedProfileRecord {
        let (estimated_sales_low, estimated_sales_high) =
            estimate_sales(raw.review_count, self.config.sales_band);

        let timeline = build_timeline(
            &raw.review_events,
            now,
            self.config.timeline,
            self.config.max_timeline_months,
        );
        let mut degradations = timeline.degradations;
        let monthly_sales = timeline.monthly_sales;

        let (country_distribution, language_degradations) =
            country_distribution(&raw.review_events, &self.classifier);
        degradations.extend(language_degradations);

        let engagement = engagement_rate(estimated_sales_high, raw.follower_count);
        if engagement.is_none() {
            degradations.push(degenerate("engagement_rate"));
        }

        let performance_score = performance_score(&ScoreInputs {
            rating: raw.rating,
            estimated_sales_high,
            follower_count: raw.follower_count,
            monthly_sales: &monthly_sales,
        });

        let performance_stats = performance_stats(&monthly_sales);
        if performance_stats.is_none() {
            degradations.push(degenerate("performance_stats"));
        }

        for degradation in &degradations {
            tracing::debug!(shop = %raw.shop_name, %degradation, "metric degraded");
        }

        tracing::info!(
            shop = %raw.shop_name,
            sales_low = estimated_sales_low,
            sales_high = estimated_sales_high,
            months = monthly_sales.len(),
            countries = country_distribution.len(),
            score = performance_score.total,
            degradations = degradations.len(),
            "enriched profile"
        );

        EnrichedProfileRecord {
            article_stats: article_stats(&raw.articles, &raw.brands),
            profile: raw,
            analyzed_at: now,
            estimated_sales_low,
            estimated_sales_high,
            monthly_sales,
            country_distribution,
            engagement_rate: engagement.unwrap_or(0.0),
            performance_score,
            performance_stats,
            degradations,
        }
    }
}

fn degenerate(metric: &str) -> Degradation {
    Degradation::DegenerateStatistics {
        metric: metric.to_string(),
    }
}

/// Enriches `raw` with the default configuration and built-in language table.
#[must_use]
pub fn enrich(raw: RawProfileRecord, now: DateTime<Utc>) -> EnrichedProfileRecord {
    Analyzer::<KeywordClassifier>::default().enrich(raw, now)
}
