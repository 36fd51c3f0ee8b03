//! Review language to country classification.
//!
//! Comments are scored against per-language keyword sets. Single words match
//! whole lowercase tokens; multi-word keywords match as substrings of the
//! lowercased comment. The language with the most hits wins and earlier
//! languages in the table win ties.

use std::collections::HashSet;

use vintalyze_core::{ConfigError, LanguageTable, INTERNATIONAL};

/// Outcome of classifying one comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// At least one keyword of this country's language matched.
    Matched(&'a str),
    /// Nothing matched; the fallback label was used.
    Fallback(&'a str),
}

impl<'a> Classification<'a> {
    #[must_use]
    pub fn country(self) -> &'a str {
        match self {
            Classification::Matched(country) | Classification::Fallback(country) => country,
        }
    }
}

/// Assigns a country label to free text. Never fails.
pub trait Classifier {
    fn classify(&self, text: &str) -> Classification<'_>;
}

#[derive(Debug, Clone)]
struct LanguageKeywords {
    country: String,
    words: HashSet<String>,
    phrases: Vec<String>,
}

impl LanguageKeywords {
    fn hits(&self, tokens: &[String], lowered: &str) -> usize {
        let word_hits = tokens.iter().filter(|t| self.words.contains(*t)).count();
        let phrase_hits: usize = self
            .phrases
            .iter()
            .map(|p| lowered.matches(p.as_str()).count())
            .sum();
        word_hits + phrase_hits
    }
}

/// Static keyword-table classifier.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    languages: Vec<LanguageKeywords>,
    fallback: String,
}

impl KeywordClassifier {
    /// Builds a classifier over `table`.
    ///
    /// `fallback_language` is a language code from `table` whose country is
    /// reported when no keyword matches; `None` reports "International".
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `fallback_language` is not in `table`.
    pub fn new(table: &LanguageTable, fallback_language: Option<&str>) -> Result<Self, ConfigError> {
        let fallback = match fallback_language {
            None => INTERNATIONAL.to_string(),
            Some(code) => table
                .find(code)
                .map(|entry| entry.country.clone())
                .ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "fallback language '{code}' is not in the language table"
                    ))
                })?,
        };

        Ok(Self {
            languages: compile(table),
            fallback,
        })
    }

    /// Label reported when nothing matches.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            languages: compile(&LanguageTable::builtin()),
            fallback: INTERNATIONAL.to_string(),
        }
    }
}

fn compile(table: &LanguageTable) -> Vec<LanguageKeywords> {
    table
        .languages
        .iter()
        .map(|entry| {
            let (phrases, words): (Vec<String>, Vec<String>) = entry
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .partition(|k| k.contains(char::is_whitespace));
            LanguageKeywords {
                country: entry.country.clone(),
                words: words.into_iter().collect(),
                phrases,
            }
        })
        .collect()
}

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Classification<'_> {
        let lowered = text.to_lowercase();
        let tokens: Vec<String> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let mut best: Option<(&LanguageKeywords, usize)> = None;
        for language in &self.languages {
            let hits = language.hits(&tokens, &lowered);
            // Strictly greater keeps the earlier language on ties.
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((language, hits));
            }
        }

        match best {
            Some((language, _)) => Classification::Matched(&language.country),
            None => Classification::Fallback(&self.fallback),
        }
    }
}
