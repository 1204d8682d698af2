//! Normalization from raw restaurant items to [`BusinessRecord`].
//!
//! Each canonical field is read from an ordered list of upstream keys; the
//! first key holding a usable value wins. A key that is missing, `null`, or of
//! an unusable type falls through to the next alternative, and the field
//! takes its default when no alternative matches.
//!
//! | Field            | Upstream keys, in priority order           | Default          |
//! |------------------|--------------------------------------------|------------------|
//! | `id`             | `_id`, `id`, `restaurant_id`               | `row-<index>`    |
//! | `name`           | `name`, `BusinessName`                     | `"Unknown name"` |
//! | `address`        | `address`, `AddressLine1`                  | `""`             |
//! | `postcode`       | `postcode`, `PostCode`                     | `""`             |
//! | `hygiene_rating` | `hygiene_rating`, `HygieneRating`, `rating`| unrated          |
//! | `cuisine`        | `cuisine`, `BusinessType`                  | `""`             |
//! | `tags`           | `tags`                                     | `[]`             |
//! | `lat`            | `latitude`, `lat`                          | `None`           |
//! | `lng`            | `longitude`, `lng`                         | `None`           |
//!
//! Keys outside this table are carried through in [`BusinessRecord::extra`].

use std::collections::HashSet;

use bizdir_core::business::UNKNOWN_NAME;
use bizdir_core::BusinessRecord;
use serde_json::Value;

use crate::types::RawBusiness;

const ID_KEYS: &[&str] = &["_id", "id", "restaurant_id"];
const NAME_KEYS: &[&str] = &["name", "BusinessName"];
const ADDRESS_KEYS: &[&str] = &["address", "AddressLine1"];
const POSTCODE_KEYS: &[&str] = &["postcode", "PostCode"];
const RATING_KEYS: &[&str] = &["hygiene_rating", "HygieneRating", "rating"];
const CUISINE_KEYS: &[&str] = &["cuisine", "BusinessType"];
const TAGS_KEYS: &[&str] = &["tags"];
const LAT_KEYS: &[&str] = &["latitude", "lat"];
const LNG_KEYS: &[&str] = &["longitude", "lng"];

const ALL_KEYS: &[&[&str]] = &[
    ID_KEYS,
    NAME_KEYS,
    ADDRESS_KEYS,
    POSTCODE_KEYS,
    RATING_KEYS,
    CUISINE_KEYS,
    TAGS_KEYS,
    LAT_KEYS,
    LNG_KEYS,
];

/// Normalizes one raw item into a [`BusinessRecord`].
///
/// `index` is the item's position in its list and only feeds the positional
/// id given to items that carry no usable id.
#[must_use]
pub fn normalize_business(raw: RawBusiness, index: usize) -> BusinessRecord {
    let id = first_id(&raw).unwrap_or_else(|| format!("row-{index}"));
    let name = first_text(&raw, NAME_KEYS).unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let address = first_text(&raw, ADDRESS_KEYS).unwrap_or_default();
    let postcode = first_text(&raw, POSTCODE_KEYS).unwrap_or_default();
    let hygiene_rating = first_number(&raw, RATING_KEYS);
    let cuisine = first_text(&raw, CUISINE_KEYS).unwrap_or_default();
    let tags = first_tags(&raw).unwrap_or_default();
    let lat = first_number(&raw, LAT_KEYS);
    let lng = first_number(&raw, LNG_KEYS);

    let extra = raw
        .into_iter()
        .filter(|(key, _)| !is_table_key(key))
        .collect();

    BusinessRecord {
        id,
        name,
        address,
        postcode,
        hygiene_rating,
        cuisine,
        tags,
        lat,
        lng,
        extra,
    }
}

/// Normalizes a whole list, preserving order.
///
/// Ids must be unique within one list: the first record with a given id is
/// kept and later duplicates are dropped with a warning.
#[must_use]
pub fn normalize_all(raws: Vec<RawBusiness>) -> Vec<BusinessRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raws.len());
    let mut records = Vec::with_capacity(raws.len());

    for (index, raw) in raws.into_iter().enumerate() {
        let record = normalize_business(raw, index);
        if seen.insert(record.id.clone()) {
            records.push(record);
        } else {
            tracing::warn!(id = %record.id, index, "dropping record with duplicate id");
        }
    }

    records
}

/// Postcode of a raw row, read with the same key priority as
/// [`normalize_business`].
#[must_use]
pub fn raw_postcode(raw: &RawBusiness) -> Option<String> {
    first_text(raw, POSTCODE_KEYS).filter(|p| !p.trim().is_empty())
}

/// Whether a raw row already carries a usable latitude and longitude under
/// any of the accepted keys.
#[must_use]
pub fn raw_has_coordinates(raw: &RawBusiness) -> bool {
    first_number(raw, LAT_KEYS).is_some() && first_number(raw, LNG_KEYS).is_some()
}

fn is_table_key(key: &str) -> bool {
    ALL_KEYS.iter().any(|keys| keys.contains(&key))
}

/// Reads the id: a non-blank string, an integer, or a `{"$oid": "..."}` object.
fn first_id(raw: &RawBusiness) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj
            .get("$oid")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        _ => None,
    })
}

/// Reads a text field. Numbers are accepted and rendered as text (postcodes
/// and names occasionally arrive numeric); an empty string is a usable value.
fn first_text(raw: &RawBusiness, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Reads a numeric field from a JSON number or a numeric string.
/// Non-numeric strings such as `"Exempt"` are unusable.
fn first_number(raw: &RawBusiness, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Reads tags from an array of strings or a comma-separated string.
fn first_tags(raw: &RawBusiness) -> Option<Vec<String>> {
    TAGS_KEYS.iter().find_map(|key| match raw.get(*key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        ),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
