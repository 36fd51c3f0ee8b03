//! Field extractors for the profile page dump.
//!
//! Each field has an ordered list of candidate extractors; the first one that
//! returns `Some` wins. Adding a page layout means appending an extractor, not
//! branching inside one.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use vintalyze_core::Article;

/// A pure `text -> value` candidate for one field.
pub(crate) type Extractor<T> = fn(&str) -> Option<T>;

/// Runs `extractors` in order and returns the first hit.
pub(crate) fn first_match<T>(text: &str, extractors: &[Extractor<T>]) -> Option<T> {
    extractors.iter().find_map(|extract| extract(text))
}

static SHOP_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Boutique|Shop)[ \t]*:[ \t]*(\S+)").expect("valid shop label regex")
});

static SHOP_BEFORE_ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(\S+)\s*(?:À propos|A propos|About)\b")
        .expect("valid shop heading regex")
});

// Count alone on its line, label opening the next one.
static FOLLOWERS_NEXT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(\d+)[ \t]*\n[ \t]*(?i:abonnés?|followers?)\b")
        .expect("valid followers regex")
});

// The count must not be the tail of a decimal such as `4.6`.
static FOLLOWERS_SAME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\w.,])(\d+)[ \t]+(?i:abonnés?|followers?)\b")
        .expect("valid followers regex")
});

static FOLLOWING_NEXT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(\d+)[ \t]*\n[ \t]*(?i:abonnements?|following)\b")
        .expect("valid following regex")
});

static FOLLOWING_SAME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\w.,])(\d+)[ \t]+(?i:abonnements?|following)\b")
        .expect("valid following regex")
});

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:à propos|a propos|about)[ \t]*:[ \t]*([^\n]+)").expect("valid location regex")
});

static RATING_NEXT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*\n\s*\((\d+)\)").expect("valid rating regex")
});

static RATING_SAME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(\d(?:[.,]\d+)?)[ \t]*\((\d+)\)[ \t]*$").expect("valid rating regex")
});

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:prix|price)\s*:\s*(\d+(?:[.,]\d{1,2})?)\s*€")
        .expect("valid price regex")
});

static BRAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:marque|brand)[ \t]*:[ \t]*([^,\n]+?)[ \t]*(?:,|$)")
        .expect("valid brand regex")
});

/// Country names recognised inside a free-text location.
const KNOWN_COUNTRIES: &[&str] = &[
    "France",
    "Belgique",
    "Belgium",
    "Espagne",
    "Spain",
    "Italie",
    "Italy",
    "Allemagne",
    "Germany",
    "Pays-Bas",
    "Netherlands",
    "Portugal",
    "Luxembourg",
    "Suisse",
    "Switzerland",
    "Autriche",
    "Austria",
    "Royaume-Uni",
    "United Kingdom",
    "Irlande",
    "Ireland",
    "Pologne",
    "Poland",
    "Lituanie",
    "Lithuania",
    "Tchéquie",
    "Czechia",
    "Slovaquie",
    "Slovakia",
    "Hongrie",
    "Hungary",
    "Roumanie",
    "Romania",
    "Suède",
    "Sweden",
    "Danemark",
    "Denmark",
    "Finlande",
    "Finland",
    "Grèce",
    "Greece",
    "Croatie",
    "Croatia",
    "États-Unis",
    "United States",
    "Canada",
];

fn capture_str<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// First capture of `re` that parses as a count.
fn capture_count(re: &Regex, text: &str) -> Option<u32> {
    re.captures_iter(text)
        .find_map(|caps| caps.get(1)?.as_str().parse().ok())
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn shop_from_label(text: &str) -> Option<String> {
    capture_str(&SHOP_LABEL_RE, text).map(str::to_string)
}

fn shop_before_about(text: &str) -> Option<String> {
    capture_str(&SHOP_BEFORE_ABOUT_RE, text).map(str::to_string)
}

pub(crate) const SHOP_NAME: &[Extractor<String>] = &[shop_from_label, shop_before_about];

fn followers_next_line(text: &str) -> Option<u32> {
    capture_count(&FOLLOWERS_NEXT_LINE_RE, text)
}

fn followers_same_line(text: &str) -> Option<u32> {
    capture_count(&FOLLOWERS_SAME_LINE_RE, text)
}

pub(crate) const FOLLOWERS: &[Extractor<u32>] = &[followers_next_line, followers_same_line];

fn following_next_line(text: &str) -> Option<u32> {
    capture_count(&FOLLOWING_NEXT_LINE_RE, text)
}

fn following_same_line(text: &str) -> Option<u32> {
    capture_count(&FOLLOWING_SAME_LINE_RE, text)
}

pub(crate) const FOLLOWING: &[Extractor<u32>] = &[following_next_line, following_same_line];

fn location_after_about(text: &str) -> Option<String> {
    capture_str(&LOCATION_RE, text).map(normalize_location)
}

pub(crate) const LOCATION: &[Extractor<String>] = &[location_after_about];

/// Replaces a free-text location with the first known country it mentions,
/// or returns it unchanged.
pub(crate) fn normalize_location(raw: &str) -> String {
    let lower = raw.to_lowercase();
    KNOWN_COUNTRIES
        .iter()
        .find(|country| lower.contains(&country.to_lowercase()))
        .map_or_else(|| raw.to_string(), |country| (*country).to_string())
}

/// First `(rating, review_count)` pair with a rating in `0.0..=5.0`.
fn capture_rating(re: &Regex, text: &str) -> Option<(f64, u32)> {
    re.captures_iter(text).find_map(|caps| {
        let rating = parse_decimal(caps.get(1)?.as_str())?;
        let count = caps.get(2)?.as_str().parse::<u32>().ok()?;
        (0.0..=5.0).contains(&rating).then_some((rating, count))
    })
}

fn rating_next_line(text: &str) -> Option<(f64, u32)> {
    capture_rating(&RATING_NEXT_LINE_RE, text)
}

fn rating_same_line(text: &str) -> Option<(f64, u32)> {
    capture_rating(&RATING_SAME_LINE_RE, text)
}

pub(crate) const RATING: &[Extractor<(f64, u32)>] = &[rating_next_line, rating_same_line];

/// One article per line carrying a price.
///
/// The brand comes from the price line itself, or else from the nearest
/// brand-only line since the previous price.
pub(crate) fn extract_articles(text: &str) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut pending_brand: Option<&str> = None;
    for line in text.lines() {
        let brand = capture_str(&BRAND_RE, line);
        let price = PRICE_RE
            .captures(line)
            .and_then(|caps| parse_decimal(caps.get(1)?.as_str()));
        match price {
            Some(price) => {
                articles.push(Article {
                    price,
                    brand: brand.or(pending_brand).map(str::to_string),
                });
                pending_brand = None;
            }
            None if brand.is_some() => pending_brand = brand,
            None => {}
        }
    }
    articles
}

/// Every brand named on the page, with or without a price, sorted and
/// de-duplicated.
pub(crate) fn extract_brands(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| capture_str(&BRAND_RE, line))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_respects_order() {
        fn never(_: &str) -> Option<u32> {
            None
        }
        fn one(_: &str) -> Option<u32> {
            Some(1)
        }
        fn two(_: &str) -> Option<u32> {
            Some(2)
        }
        let ordered: [Extractor<u32>; 3] = [never, one, two];
        let misses: [Extractor<u32>; 1] = [never];
        assert_eq!(first_match("", &ordered), Some(1));
        assert_eq!(first_match("", &misses), None);
        assert_eq!(first_match::<u32>("", &[]), None);
    }

    #[test]
    fn shop_label_wins_over_heading() {
        let text = "Other\nÀ propos\nBoutique: RealShop";
        assert_eq!(first_match(text, SHOP_NAME).as_deref(), Some("RealShop"));
    }

    #[test]
    fn shop_from_token_before_about_heading() {
        assert_eq!(
            first_match("MyShop\nÀ propos", SHOP_NAME).as_deref(),
            Some("MyShop")
        );
        assert_eq!(
            first_match("junk line\nMyShop About", SHOP_NAME).as_deref(),
            Some("MyShop")
        );
    }

    #[test]
    fn shop_label_must_start_a_word() {
        assert_eq!(first_match("Workshop: X", SHOP_NAME), None);
        assert_eq!(
            first_match("Workshop: X\nShop: real", SHOP_NAME).as_deref(),
            Some("real")
        );
    }

    #[test]
    fn shop_heading_requires_single_token_line() {
        assert_eq!(first_match("Membre depuis 2020\nÀ propos", SHOP_NAME), None);
    }

    #[test]
    fn followers_on_next_line() {
        assert_eq!(first_match("42\nAbonnés", FOLLOWERS), Some(42));
        assert_eq!(first_match("42 \n  Abonnés", FOLLOWERS), Some(42));
        assert_eq!(first_match("1\nAbonné", FOLLOWERS), Some(1));
        assert_eq!(first_match("310\nFollowers", FOLLOWERS), Some(310));
    }

    #[test]
    fn followers_on_same_line() {
        assert_eq!(first_match("profil · 42 abonnés", FOLLOWERS), Some(42));
    }

    #[test]
    fn decimal_above_same_line_count_is_not_a_count() {
        assert_eq!(first_match("Boutique: s\n4.6\n128 abonnés", FOLLOWERS), Some(128));
        assert_eq!(first_match("note 4,6 followers", FOLLOWERS), None);
    }

    #[test]
    fn year_above_same_line_counts_is_not_a_count() {
        let text = "Boutique: s\nMembre depuis 2021\n128 abonnés\n3 abonnements";
        assert_eq!(first_match(text, FOLLOWERS), Some(128));
        assert_eq!(first_match(text, FOLLOWING), Some(3));
    }

    #[test]
    fn next_line_label_must_open_the_line() {
        assert_eq!(first_match("42\nmes Abonnés", FOLLOWERS), None);
        assert_eq!(first_match("total 42\nAbonnés", FOLLOWERS), None);
    }

    #[test]
    fn followers_and_following_are_distinct() {
        let text = "42\nAbonnés\n7\nAbonnements";
        assert_eq!(first_match(text, FOLLOWERS), Some(42));
        assert_eq!(first_match(text, FOLLOWING), Some(7));
    }

    #[test]
    fn following_absent_is_none() {
        assert_eq!(first_match("42\nAbonnés", FOLLOWING), None);
    }

    #[test]
    fn location_normalizes_to_known_country() {
        assert_eq!(
            first_match("À propos : Lyon, France", LOCATION).as_deref(),
            Some("France")
        );
        assert_eq!(
            first_match("About: Gent, belgium", LOCATION).as_deref(),
            Some("Belgium")
        );
    }

    #[test]
    fn location_keeps_unknown_text() {
        assert_eq!(
            first_match("À propos : Quelque part", LOCATION).as_deref(),
            Some("Quelque part")
        );
    }

    #[test]
    fn location_stays_on_label_line() {
        assert_eq!(first_match("À propos :\nLyon, France", LOCATION), None);
    }

    #[test]
    fn rating_with_review_count_on_next_line() {
        assert_eq!(first_match("4.8\n(120)", RATING), Some((4.8, 120)));
        assert_eq!(first_match("4,5\n  (12)", RATING), Some((4.5, 12)));
        assert_eq!(first_match("5\n(3)", RATING), Some((5.0, 3)));
    }

    #[test]
    fn rating_out_of_range_falls_through() {
        let text = "Membre depuis 2019\n(12)\n4.9\n(33)";
        assert_eq!(first_match(text, RATING), Some((4.9, 33)));
    }

    #[test]
    fn rating_on_same_line() {
        assert_eq!(first_match("avis\n4.7 (88)\n", RATING), Some((4.7, 88)));
    }

    #[test]
    fn articles_pair_price_with_brand_on_line() {
        let text = "Robe, marque : Zara, taille : M, prix : 15,00 €\n\
                    Jean, brand: Levi's, price: 30 €\n\
                    Pull, prix : 8,5 €\n\
                    marque : Nike, sans prix";
        let articles = extract_articles(text);
        assert_eq!(
            articles,
            vec![
                Article {
                    price: 15.0,
                    brand: Some("Zara".to_string())
                },
                Article {
                    price: 30.0,
                    brand: Some("Levi's".to_string())
                },
                Article {
                    price: 8.5,
                    brand: None
                },
            ]
        );
        assert_eq!(extract_brands(text), vec!["Levi's", "Nike", "Zara"]);
    }

    #[test]
    fn brand_line_applies_to_following_price() {
        let text = "marque : Zara,\nprix : 15,00 €\nprix : 4 €\nmarque : Nike,";
        assert_eq!(
            extract_articles(text),
            vec![
                Article {
                    price: 15.0,
                    brand: Some("Zara".to_string())
                },
                Article {
                    price: 4.0,
                    brand: None
                },
            ]
        );
        assert_eq!(extract_brands(text), vec!["Nike", "Zara"]);
    }

    #[test]
    fn brands_are_collected_without_prices() {
        let text = "brand: Nike,\nmarque : Zara,\nbrand: Nike,";
        assert!(extract_articles(text).is_empty());
        assert_eq!(extract_brands(text), vec!["Nike", "Zara"]);
    }

    #[test]
    fn normalize_location_is_case_insensitive() {
        assert_eq!(normalize_location("paris, FRANCE"), "France");
        assert_eq!(normalize_location("Somewhere"), "Somewhere");
    }
}
