//! Text-search and minimum-rating stages, applied in that order.

use bizdir_core::BusinessRecord;

/// Returns the records passing every active stage, in their original order.
///
/// - Text search: `search_term` is trimmed and matched case-insensitively as a
///   substring of `name`, `address` or `postcode`. A blank term disables the
///   stage.
/// - Minimum rating: unrated records count as zero. A threshold of zero (or
///   below) disables the stage.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [BusinessRecord],
    search_term: &str,
    min_rating: f64,
) -> Vec<&'a BusinessRecord> {
    let term = search_term.trim().to_lowercase();

    records
        .iter()
        .filter(|r| term.is_empty() || matches_search(r, &term))
        .filter(|r| min_rating <= 0.0 || meets_min_rating(r, min_rating))
        .collect()
}

/// `term` must already be lowercased and non-empty.
fn matches_search(record: &BusinessRecord, term: &str) -> bool {
    [&record.name, &record.address, &record.postcode]
        .into_iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn meets_min_rating(record: &BusinessRecord, min_rating: f64) -> bool {
    record.rating_or_zero() >= min_rating
}
