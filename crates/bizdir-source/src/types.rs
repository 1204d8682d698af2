//! Wire types for the restaurants API and the postcode geocoder.
//!
//! ## Observed shape of the restaurants collection
//!
//! `GET /api/v1.0/restaurants/` returns a bare JSON array. Items come from
//! several import generations and do not agree on field names:
//!
//! - ids arrive as `_id` (a string, or Mongo extended JSON `{"$oid": "..."}`),
//!   `id`, or `restaurant_id` (sometimes an integer).
//! - the FSA import uses `BusinessName`, `AddressLine1`, `PostCode`,
//!   `BusinessType` and `HygieneRating`; hand-entered records use
//!   `name`, `address`, `postcode`, `cuisine` and `hygiene_rating`.
//! - ratings are numbers on hand-entered records and strings (`"5"`,
//!   `"Exempt"`) on FSA records; a few records only carry `rating`.
//! - coordinates are `latitude`/`longitude` or `lat`/`lng`, and are absent
//!   until the record has been geocoded.
//!
//! Items are therefore kept as untyped JSON objects until
//! [`crate::normalize`] maps them onto [`bizdir_core::BusinessRecord`].
//!
//! ## Postcode lookup
//!
//! `GET https://api.postcodes.io/postcodes/{postcode}` answers with an
//! envelope carrying its own `status`; unknown postcodes come back as HTTP 404
//! with `"result": null`.

use serde::{Deserialize, Serialize};

/// One item of the restaurants collection, before normalization.
pub type RawBusiness = serde_json::Map<String, serde_json::Value>;

/// Response from `GET /api/v1.0/restaurants/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub restaurants_count: u64,
    pub reviews_count: u64,
    /// Mean review rating; `null` while there are no reviews.
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// Envelope returned by the postcode lookup service.
#[derive(Debug, Deserialize)]
pub(crate) struct PostcodeResponse {
    pub status: u16,
    #[serde(default)]
    pub result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostcodeResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}
