//! The four listing orders. Every order is a stable sort, so records with
//! equal keys keep their relative order from the raw list.

use std::cmp::Ordering;

use bizdir_core::{BusinessRecord, SortOption};
use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};

/// Sorts `records` in place by `option`.
pub fn sort_records(records: &mut [&BusinessRecord], option: SortOption) {
    match option {
        SortOption::NameAsc => {
            let names = NameOrder::new();
            records.sort_by(|a, b| names.compare(&a.name, &b.name));
        }
        // Descending orders flip the comparator, not the output, so ties
        // stay in raw-list order.
        SortOption::NameDesc => {
            let names = NameOrder::new();
            records.sort_by(|a, b| names.compare(&b.name, &a.name));
        }
        SortOption::RatingAsc => records.sort_by(|a, b| compare_ratings(a, b)),
        SortOption::RatingDesc => records.sort_by(|a, b| compare_ratings(b, a)),
    }
}

/// Locale-aware name ordering.
///
/// Uses the root (language-neutral) Unicode collation at tertiary strength:
/// accents and case only matter once the base letters are equal, and then
/// unaccented sorts before accented and lowercase before uppercase. So
/// `Café Zest` sits between `Cafe Nero` and `Cafe Zoo`, and `Éclair` sorts
/// with the E's.
pub struct NameOrder {
    collator: Option<Collator>,
}

impl NameOrder {
    #[must_use]
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        options.case_first = Some(CaseFirst::LowerFirst);

        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!(error = %e, "collation data unavailable; sorting names by case-folded text");
                None
            }
        };
        Self { collator }
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => compare_folded(a, b),
        }
    }
}

impl Default for NameOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive comparison with a lowercase-first tiebreak at the first
/// character that differs only in case. Accents are compared by code point.
fn compare_folded(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map_or(Ordering::Equal, |(x, y)| {
                match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                }
            })
    })
}

/// Unrated and NaN count as zero, and `-0.0` as `0.0`, so the order is total.
fn compare_ratings(a: &BusinessRecord, b: &BusinessRecord) -> Ordering {
    rating_key(a).total_cmp(&rating_key(b))
}

fn rating_key(record: &BusinessRecord) -> f64 {
    let rating = record.rating_or_zero();
    if rating.is_nan() {
        0.0
    } else {
        rating + 0.0
    }
}
