//! Values derived per rendered card. Nothing here is stored on the listing.

use bizdir_core::BusinessRecord;

/// Icon and blurb shown for a cuisine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuisineInfo {
    pub icon: &'static str,
    pub description: &'static str,
}

/// Keyword table, matched in order; the first keyword contained in the
/// cuisine wins.
const CUISINES: &[(&str, CuisineInfo)] = &[
    ("italian", CuisineInfo { icon: "🍕", description: "Hand-tossed pizzas and classic pastas." }),
    ("chinese", CuisineInfo { icon: "🥡", description: "Wok-fresh stir fries and noodles." }),
    ("indian", CuisineInfo { icon: "🍛", description: "Spiced curries and tandoori favorites." }),
    ("japanese", CuisineInfo { icon: "🍣", description: "Sushi rolls and comforting ramen." }),
    ("burgers", CuisineInfo { icon: "🍔", description: "Stacked burgers with crispy sides." }),
    ("kebab", CuisineInfo { icon: "🥙", description: "Grilled skewers and wraps to go." }),
    ("cafe", CuisineInfo { icon: "☕", description: "Coffee, bakes, and cozy bites." }),
    ("fish & chips", CuisineInfo { icon: "🐟", description: "Golden fish with chunky chips." }),
    ("bakery", CuisineInfo { icon: "🥐", description: "Fresh bakes and sweet treats daily." }),
    ("british", CuisineInfo { icon: "🥧", description: "Comforting British classics." }),
];

const DEFAULT_CUISINE: CuisineInfo = CuisineInfo {
    icon: "🍽️",
    description: "Tasty plates and friendly service.",
};

/// Number of rating stars to draw: the hygiene rating truncated and clamped
/// to 0..=5. Unrated records get none.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn star_count(record: &BusinessRecord) -> u8 {
    // Clamped to 0..=5, so the cast cannot wrap.
    record.rating_or_zero().clamp(0.0, 5.0).trunc() as u8
}

/// Looks up the icon and description for a cuisine string.
#[must_use]
pub fn cuisine_info(cuisine: &str) -> CuisineInfo {
    let cuisine = cuisine.to_lowercase();
    CUISINES
        .iter()
        .find(|(keyword, _)| cuisine.contains(keyword))
        .map_or(DEFAULT_CUISINE, |(_, info)| *info)
}
