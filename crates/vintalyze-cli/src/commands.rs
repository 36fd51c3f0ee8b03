//! Command handlers: read input, run the pipeline, format the output.
//!
//! Handlers return the rendered output instead of printing it so tests can
//! check it directly.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};

use vintalyze_analytics::{compare, Analyzer, ExportDocument, Table};
use vintalyze_core::{load_languages, AppConfig, EnrichedProfileRecord, LanguageTable};
use vintalyze_parser::parse_profile_with;

use crate::{AnalyzeFormat, CompareFormat};

/// Builds the analyzer from config, loading the language table file if one
/// is configured.
///
/// # Errors
///
/// Returns an error if the language file cannot be loaded or the fallback
/// language is not in the table.
pub(crate) fn build_analyzer(config: &AppConfig) -> anyhow::Result<Analyzer> {
    let table = match &config.languages_path {
        Some(path) => {
            let table = load_languages(path)?;
            tracing::info!(
                path = %path.display(),
                languages = table.languages.len(),
                "loaded language table"
            );
            table
        }
        None => LanguageTable::builtin(),
    };
    Ok(Analyzer::new(config.analysis.clone(), &table)?)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read profile text from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile text from {}", path.display()))
}

/// Parses and enriches already-loaded page text.
///
/// # Errors
///
/// Returns the parser's error when the text is too large or has no shop name.
pub(crate) fn analyze_text(
    analyzer: &Analyzer,
    text: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<EnrichedProfileRecord> {
    let raw = parse_profile_with(text, analyzer.config())?;
    Ok(analyzer.enrich(raw, now))
}

pub(crate) fn analyze_file(
    analyzer: &Analyzer,
    path: &Path,
    now: DateTime<Utc>,
) -> anyhow::Result<EnrichedProfileRecord> {
    let text = read_input(path)?;
    analyze_text(analyzer, &text, now)
        .with_context(|| format!("failed to analyze {}", path.display()))
}

pub(crate) fn render_analysis(
    record: &EnrichedProfileRecord,
    format: AnalyzeFormat,
) -> anyhow::Result<String> {
    match format {
        AnalyzeFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        AnalyzeFormat::Report => Ok(ExportDocument::from_record(record).render_text()),
    }
}

pub(crate) fn render_comparison(
    first: &EnrichedProfileRecord,
    second: &EnrichedProfileRecord,
    format: CompareFormat,
) -> anyhow::Result<String> {
    let comparison = compare(first, second);
    if format == CompareFormat::Json {
        return Ok(serde_json::to_string_pretty(&comparison)?);
    }

    let (a, b) = (&comparison.first_shop, &comparison.second_shop);
    let deltas = &comparison.deltas;
    let summary = Table {
        title: "Differences".to_string(),
        headers: vec!["Metric".to_string(), format!("{b} - {a}")],
        rows: vec![
            vec![
                "Estimated sales".to_string(),
                format!("{:+}", deltas.estimated_sales_high),
            ],
            vec![
                "Rating".to_string(),
                deltas
                    .rating
                    .map_or_else(|| "N/A".to_string(), |r| format!("{r:+.1}")),
            ],
            vec![
                "Performance score".to_string(),
                format!("{:+}", deltas.score_total),
            ],
            vec![
                "Engagement rate".to_string(),
                format!("{:+.1}%", deltas.engagement_rate),
            ],
        ],
    };

    let mut tables = vec![summary];
    if !comparison.timeline.is_empty() {
        tables.push(Table {
            title: "Monthly sales".to_string(),
            headers: vec!["Month".to_string(), a.clone(), b.clone()],
            rows: comparison
                .timeline
                .iter()
                .map(|m| vec![m.month.to_string(), m.first.to_string(), m.second.to_string()])
                .collect(),
        });
    }

    let document = ExportDocument {
        title: format!("Vintalyze comparison: {a} vs {b}"),
        tables,
    };
    Ok(document.render_text())
}
