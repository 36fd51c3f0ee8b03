//! Keyword table mapping review languages to country labels.
//!
//! The built-in table covers the marketplace's main European languages. A
//! replacement table can be loaded from YAML with [`load_languages`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// `(code, country, keywords)`; earlier entries win classification ties.
const BUILTIN: &[(&str, &str, &[&str])] = &[
    (
        "fr",
        "France",
        &[
            "merci",
            "parfait",
            "parfaite",
            "très",
            "rapide",
            "conforme",
            "envoi",
            "colis",
            "vendeuse",
            "vendeur",
            "impeccable",
            "nickel",
            "recommande",
            "soigné",
            "génial",
            "très bien",
            "au top",
            "bon état",
        ],
    ),
    (
        "en",
        "United Kingdom",
        &[
            "thank",
            "thanks",
            "perfect",
            "great",
            "fast",
            "item",
            "seller",
            "lovely",
            "recommend",
            "arrived",
            "quick",
            "delivery",
            "nice",
            "amazing",
            "good",
            "as described",
        ],
    ),
    (
        "es",
        "Spain",
        &[
            "gracias",
            "perfecto",
            "perfecta",
            "muy",
            "rápido",
            "rápida",
            "vendedora",
            "vendedor",
            "todo",
            "envío",
            "genial",
            "recomiendo",
        ],
    ),
    (
        "it",
        "Italy",
        &[
            "grazie",
            "perfetto",
            "perfetta",
            "ottimo",
            "ottima",
            "veloce",
            "venditrice",
            "venditore",
            "consigliato",
            "spedizione",
            "tutto",
            "bellissimo",
        ],
    ),
    (
        "de",
        "Germany",
        &[
            "danke",
            "perfekt",
            "schnell",
            "sehr",
            "gut",
            "verkäuferin",
            "verkäufer",
            "alles",
            "gerne",
            "toll",
            "empfehlen",
        ],
    ),
    (
        "nl",
        "Netherlands",
        &[
            "bedankt",
            "dank",
            "snel",
            "heel",
            "goed",
            "verkoper",
            "verkoopster",
            "mooi",
            "prima",
            "netjes",
            "zeer",
        ],
    ),
    (
        "pt",
        "Portugal",
        &[
            "obrigado",
            "obrigada",
            "perfeito",
            "perfeita",
            "muito",
            "recomendo",
            "entrega",
            "bom",
            "ótimo",
            "chegou",
            "tudo",
        ],
    ),
];

/// One language: its code, the country it is reported as, and the keywords
/// that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub country: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTable {
    pub languages: Vec<LanguageEntry>,
}

impl LanguageTable {
    /// The table compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        let languages = BUILTIN
            .iter()
            .map(|(code, country, keywords)| LanguageEntry {
                code: (*code).to_string(),
                country: (*country).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect();
        Self { languages }
    }

    /// Looks up a language by code (case-insensitive).
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load and validate a language keyword table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_languages(path: &Path) -> Result<LanguageTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LanguagesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let table: LanguageTable =
        serde_yaml::from_str(&content).map_err(ConfigError::LanguagesFileParse)?;

    validate_languages(&table)?;

    Ok(table)
}

fn validate_languages(table: &LanguageTable) -> Result<(), ConfigError> {
    if table.languages.is_empty() {
        return Err(ConfigError::Validation(
            "languages table must list at least one language".to_string(),
        ));
    }

    let mut seen_codes = HashSet::new();

    for language in &table.languages {
        if language.code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "language code must be non-empty".to_string(),
            ));
        }

        if language.country.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "language '{}' has an empty country label",
                language.code
            )));
        }

        if language.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "language '{}' has no keywords",
                language.code
            )));
        }

        if !seen_codes.insert(language.code.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate language code: '{}'",
                language.code
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, country: &str, keywords: &[&str]) -> LanguageEntry {
        LanguageEntry {
            code: code.to_string(),
            country: country.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    #[test]
    fn builtin_table_is_valid() {
        assert!(validate_languages(&LanguageTable::builtin()).is_ok());
    }

    #[test]
    fn builtin_keywords_are_lowercase() {
        for language in LanguageTable::builtin().languages {
            for keyword in &language.keywords {
                assert_eq!(keyword, &keyword.to_lowercase(), "{}", language.code);
            }
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        let table = LanguageTable::builtin();
        assert_eq!(table.find("FR").map(|l| l.country.as_str()), Some("France"));
        assert!(table.find("xx").is_none());
    }

    #[test]
    fn validate_rejects_empty_table() {
        let table = LanguageTable { languages: vec![] };
        let err = validate_languages(&table).unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn validate_rejects_empty_code() {
        let table = LanguageTable {
            languages: vec![entry(" ", "France", &["merci"])],
        };
        let err = validate_languages(&table).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_missing_keywords() {
        let table = LanguageTable {
            languages: vec![entry("fr", "France", &[""])],
        };
        let err = validate_languages(&table).unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn validate_rejects_duplicate_code() {
        let table = LanguageTable {
            languages: vec![
                entry("fr", "France", &["merci"]),
                entry("FR", "Belgique", &["merci"]),
            ],
        };
        let err = validate_languages(&table).unwrap_err();
        assert!(err.to_string().contains("duplicate language code"));
    }

    #[test]
    fn parses_yaml_table() {
        let yaml = r"
languages:
  - code: fr
    country: France
    keywords: [merci, parfait]
  - code: pl
    country: Poland
    keywords:
      - dziękuję
";
        let table: LanguageTable = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(table.languages.len(), 2);
        assert_eq!(table.languages[1].country, "Poland");
        assert!(validate_languages(&table).is_ok());
    }

    #[test]
    fn load_languages_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("languages.yaml");
        assert!(
            path.exists(),
            "languages.yaml missing at {path:?}, required for this test"
        );
        let table = load_languages(&path).expect("failed to load languages.yaml");
        assert_eq!(table, LanguageTable::builtin());
    }

    #[test]
    fn load_languages_reports_missing_file() {
        let err = load_languages(Path::new("/nonexistent/languages.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::LanguagesFileIo { .. }));
    }
}
