//! Entry point: raw page dump to [`RawProfileRecord`].

use vintalyze_core::{AnalysisConfig, RawProfileRecord};

use crate::error::ParseError;
use crate::extract::{
    extract_articles, extract_brands, first_match, FOLLOWERS, FOLLOWING, LOCATION, RATING,
    SHOP_NAME,
};
use crate::reviews::extract_reviews;

/// Parses a profile page dump with default settings.
///
/// # Errors
///
/// See [`parse_profile_with`].
pub fn parse_profile(raw: &str) -> Result<RawProfileRecord, ParseError> {
    parse_profile_with(raw, &AnalysisConfig::default())
}

/// Parses a profile page dump.
///
/// Every field is located independently; a field that matches no pattern is
/// left unset and never aborts the parse. Only the shop name is required.
///
/// # Errors
///
/// - [`ParseError::InputTooLarge`] if `raw` exceeds `config.max_input_bytes`.
/// - [`ParseError::MissingRequiredField`] if no shop name can be located.
pub fn parse_profile_with(
    raw: &str,
    config: &AnalysisConfig,
) -> Result<RawProfileRecord, ParseError> {
    if raw.len() > config.max_input_bytes {
        tracing::warn!(
            size = raw.len(),
            limit = config.max_input_bytes,
            "rejecting oversized profile text"
        );
        return Err(ParseError::InputTooLarge {
            size: raw.len(),
            limit: config.max_input_bytes,
        });
    }

    let text = raw.replace("\r\n", "\n").replace('\r', "\n");

    let shop_name = first_match(&text, SHOP_NAME)
        .ok_or(ParseError::MissingRequiredField { field: "shop name" })?;

    let mut record = RawProfileRecord::new(shop_name);
    record.follower_count = first_match(&text, FOLLOWERS);
    record.following_count = first_match(&text, FOLLOWING).unwrap_or(0);
    record.location = first_match(&text, LOCATION);
    if let Some((rating, review_count)) = first_match(&text, RATING) {
        record.rating = Some(rating);
        record.review_count = Some(review_count);
    }
    record.articles = extract_articles(&text);
    record.brands = extract_brands(&text);
    record.review_events = extract_reviews(&text, &record.shop_name, &config.platform_name);

    tracing::info!(
        shop = %record.shop_name,
        followers = ?record.follower_count,
        rating = ?record.rating,
        review_count = ?record.review_count,
        articles = record.articles.len(),
        brands = record.brands.len(),
        reviews = record.review_events.len(),
        "parsed profile text"
    );

    Ok(record)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
