use std::collections::HashMap;

use vintalyze_core::{CountryShare, Degradation, ReviewEvent};

use crate::classifier::{Classification, Classifier};
use crate::stats::round1;

/// Country shares over the reviews that carry a comment.
///
/// Reviews with an empty comment are not classified and do not count toward
/// the total. A comment that matches no language is counted under the
/// classifier's fallback label and reported as
/// [`Degradation::UnclassifiableLanguage`]. Entries are sorted by descending
/// count, then by country name.
#[must_use]
pub fn country_distribution<C: Classifier + ?Sized>(
    events: &[ReviewEvent],
    classifier: &C,
) -> (Vec<CountryShare>, Vec<Degradation>) {
    let mut tally: HashMap<String, u32> = HashMap::new();
    let mut degradations = Vec::new();

    for event in events.iter().filter(|e| !e.comment.trim().is_empty()) {
        let classification = classifier.classify(&event.comment);
        if let Classification::Fallback(label) = classification {
            tracing::debug!(reviewer = %event.reviewer, label, "review language not recognized");
            degradations.push(Degradation::UnclassifiableLanguage {
                reviewer: event.reviewer.clone(),
            });
        }
        *tally
            .entry(classification.country().to_string())
            .or_insert(0) += 1;
    }

    let total: u32 = tally.values().sum();
    let mut shares: Vec<CountryShare> = tally
        .into_iter()
        .map(|(country, count)| CountryShare {
            percentage: round1(f64::from(count) / f64::from(total) * 100.0),
            country,
            count,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));

    (shares, degradations)
}
