//! Export document: the enriched record laid out as titled tables.
//!
//! Rows mirror record fields one to one. Nothing is computed here beyond
//! number formatting.

use std::fmt::Write as _;

use serde::Serialize;

use vintalyze_core::EnrichedProfileRecord;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push<const N: usize>(&mut self, row: [String; N]) {
        self.rows.push(row.into());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub title: String,
    /// General metrics first, then one table per optional section.
    pub tables: Vec<Table>,
}

impl ExportDocument {
    #[must_use]
    pub fn from_record(record: &EnrichedProfileRecord) -> Self {
        let profile = &record.profile;
        let mut tables = Vec::new();

        let mut general = Table::new("General information", &["Metric", "Value"]);
        general.push(["Shop".into(), profile.shop_name.clone()]);
        general.push([
            "Estimated sales".into(),
            format!(
                "{} - {}",
                record.estimated_sales_low, record.estimated_sales_high
            ),
        ]);
        general.push(["Followers".into(), or_na(profile.follower_count)]);
        general.push(["Following".into(), profile.following_count.to_string()]);
        general.push([
            "Location".into(),
            profile.location.clone().unwrap_or_else(|| NOT_AVAILABLE.into()),
        ]);
        general.push([
            "Rating".into(),
            match (profile.rating, profile.review_count) {
                (Some(rating), Some(count)) => format!("{rating}/5 ({count} reviews)"),
                (Some(rating), None) => format!("{rating}/5"),
                _ => NOT_AVAILABLE.into(),
            },
        ]);
        general.push([
            "Engagement rate".into(),
            format!("{:.1}%", record.engagement_rate),
        ]);
        general.push([
            "Performance score".into(),
            format!("{}/100", record.performance_score.total),
        ]);
        let b = record.performance_score.breakdown;
        general.push([
            "Score breakdown".into(),
            format!(
                "rating {}, sales {}, engagement {}, consistency {}",
                b.rating, b.sales, b.engagement, b.consistency
            ),
        ]);
        tables.push(general);

        if !record.monthly_sales.is_empty() {
            let mut monthly = Table::new("Monthly sales", &["Month", "Sales"]);
            for entry in &record.monthly_sales {
                monthly.push([entry.month.to_string(), entry.count.to_string()]);
            }
            tables.push(monthly);
        }

        if !record.country_distribution.is_empty() {
            let mut geo = Table::new("Geographic distribution", &["Country", "Reviews", "Share"]);
            for share in &record.country_distribution {
                geo.push([
                    share.country.clone(),
                    share.count.to_string(),
                    format!("{:.1}%", share.percentage),
                ]);
            }
            tables.push(geo);
        }

        if let Some(stats) = &record.performance_stats {
            let mut perf = Table::new("Performance statistics", &["Metric", "Value"]);
            perf.push([
                "Average monthly sales".into(),
                format!("{:.1}", stats.avg_monthly_sales),
            ]);
            perf.push([
                "Best month".into(),
                format!("{} ({})", stats.best_month.month, stats.best_month.count),
            ]);
            perf.push([
                "Trend".into(),
                format!("{} ({:+.2}/month)", stats.trend, stats.average_delta),
            ]);
            perf.push([
                "Next month forecast".into(),
                stats.next_month_forecast.to_string(),
            ]);
            tables.push(perf);
        }

        if let Some(articles) = &record.article_stats {
            let mut listing = Table::new("Articles", &["Metric", "Value"]);
            listing.push(["Listed articles".into(), articles.count.to_string()]);
            listing.push([
                "Price range".into(),
                format!("{:.2} € - {:.2} €", articles.min_price, articles.max_price),
            ]);
            listing.push([
                "Average price".into(),
                format!("{:.2} €", articles.average_price),
            ]);
            listing.push([
                "Total listed value".into(),
                format!("{:.2} €", articles.total_value),
            ]);
            if !articles.brands.is_empty() {
                listing.push(["Brands".into(), articles.brands.join(", ")]);
            }
            tables.push(listing);
        }

        if !profile.review_events.is_empty() {
            let mut reviews = Table::new("Latest reviews", &["Reviewer", "Date", "Comment"]);
            for event in &profile.review_events {
                reviews.push([
                    event.reviewer.clone(),
                    event.relative_time.clone(),
                    event.comment.clone(),
                ]);
            }
            tables.push(reviews);
        }

        Self {
            title: format!("Vintalyze report: {}", profile.shop_name),
            tables,
        }
    }

    /// Fixed-width plain text rendering.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(self.title.chars().count()));
        for table in &self.tables {
            out.push('\n');
            render_table(&mut out, table);
        }
        out
    }
}

fn render_table(out: &mut String, table: &Table) {
    let _ = writeln!(out, "{}", table.title);
    let _ = writeln!(out, "{}", "-".repeat(table.title.chars().count()));

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths);
    for row in &table.rows {
        write_row(out, row, &widths);
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn or_na(value: Option<u32>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}
