//! Parse-then-enrich scenarios over pasted page text.

use chrono::{DateTime, Months, TimeZone, Utc};

use vintalyze_analytics::{enrich, performance_score, Analyzer, ScoreInputs};
use vintalyze_core::{
    AnalysisConfig, CountryShare, LanguageTable, MonthKey, MonthlySales, Trend,
};
use vintalyze_parser::parse_profile;

const MINIMAL_PAGE: &str =
    "MyShop\nÀ propos\n42\nAbonnés\n4.8\n(120)\nalice il y a 2 mois merci parfait";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn minimal_page_end_to_end() {
    let raw = parse_profile(MINIMAL_PAGE).expect("page parses");
    let enriched = enrich(raw, now());

    assert_eq!(enriched.profile.shop_name, "MyShop");
    assert_eq!(enriched.profile.follower_count, Some(42));
    assert_eq!(enriched.profile.rating, Some(4.8));
    assert_eq!(enriched.profile.review_count, Some(120));
    assert_eq!(enriched.estimated_sales_low, 108);
    assert_eq!(enriched.estimated_sales_high, 120);

    let two_months_ago = now().checked_sub_months(Months::new(2)).unwrap();
    assert_eq!(
        enriched.monthly_sales,
        vec![MonthlySales {
            month: MonthKey::of(&two_months_ago),
            count: 1
        }]
    );
    assert_eq!(
        enriched.country_distribution,
        vec![CountryShare {
            country: "France".to_string(),
            count: 1,
            percentage: 100.0
        }]
    );

    let stats = enriched.performance_stats.expect("one month of sales");
    assert_eq!(stats.trend, Trend::Stable);
    assert_eq!(stats.next_month_forecast, 1);
    assert!(enriched.degradations.is_empty());
}

#[test]
fn same_text_and_now_give_identical_records() {
    let first = enrich(parse_profile(MINIMAL_PAGE).unwrap(), now());
    let second = enrich(parse_profile(MINIMAL_PAGE).unwrap(), now());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn enriched_record_serializes_flat() {
    let enriched = enrich(parse_profile(MINIMAL_PAGE).unwrap(), now());
    let json = serde_json::to_value(&enriched).unwrap();
    assert_eq!(json["shop_name"], "MyShop");
    assert_eq!(json["estimated_sales_low"], 108);
    assert_eq!(json["monthly_sales"][0]["month"], "2024-04");
    assert_eq!(json["performance_stats"]["trend"], "stable");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn flat_monthly_series_is_fully_consistent() {
    let monthly: Vec<MonthlySales> = (1..=4)
        .map(|m| MonthlySales {
            month: MonthKey::new(2024, m).unwrap(),
            count: 2,
        })
        .collect();
    let score = performance_score(&ScoreInputs {
        rating: Some(4.0),
        estimated_sales_high: 8,
        follower_count: Some(10),
        monthly_sales: &monthly,
    });
    assert_eq!(score.breakdown.consistency, 100);
}

#[test]
fn review_count_of_one_hundred() {
    let text = "Boutique: shop\n4.5\n(100)";
    let enriched = enrich(parse_profile(text).unwrap(), now());
    assert_eq!(enriched.estimated_sales_low, 90);
    assert_eq!(enriched.estimated_sales_high, 100);
}

#[test]
fn no_reviews_means_no_performance_stats() {
    let enriched = enrich(parse_profile("Boutique: shop").unwrap(), now());
    assert!(enriched.monthly_sales.is_empty());
    assert!(enriched.performance_stats.is_none());
    assert!(enriched.country_distribution.is_empty());
}

#[test]
fn mixed_review_feed() {
    let text = "\
Boutique: atelier
120
Abonnés
4.9
(64)
julie il y a 3 semaines
Très belle pièce, envoi rapide
Vinted il y a 1 mois
Vente réussie
tom 2 months ago
Great seller, thanks
lena il y a 2 mois
Danke, alles gut
anon il y a quelques instants
";
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(config, &LanguageTable::builtin()).unwrap();
    let enriched = analyzer.enrich(parse_profile(text).unwrap(), now());

    let months: Vec<(String, u32)> = enriched
        .monthly_sales
        .iter()
        .map(|m| (m.month.to_string(), m.count))
        .collect();
    assert_eq!(
        months,
        vec![
            ("2024-04".to_string(), 2),
            ("2024-05".to_string(), 1),
        ]
    );

    let countries: Vec<(&str, u32)> = enriched
        .country_distribution
        .iter()
        .map(|c| (c.country.as_str(), c.count))
        .collect();
    assert_eq!(
        countries,
        vec![("France", 1), ("Germany", 1), ("United Kingdom", 1)]
    );
    let sum: f64 = enriched
        .country_distribution
        .iter()
        .map(|c| c.percentage)
        .sum();
    assert!((sum - 100.0).abs() < 0.2);

    assert_eq!(enriched.degradations.len(), 1);
    assert_eq!(
        enriched.degradations[0].to_string(),
        "unrecognized date expression \"quelques instants\""
    );
}
