//! Postcode geocoding against a postcodes.io-compatible service.

use std::time::Duration;

use bizdir_core::BusinessRecord;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;

use crate::error::SourceError;
use crate::normalize::{raw_has_coordinates, raw_postcode};
use crate::types::{Coordinates, PostcodeResponse, RawBusiness};

/// Characters escaped in a path segment: everything except the unreserved
/// set `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Resolves postcodes to coordinates.
///
/// Lookups never fail: every miss (unknown postcode, non-2xx status, network
/// error, malformed body) is logged and reported as `None`.
pub struct GeoClient {
    client: Client,
    base_url: String,
}

impl GeoClient {
    /// Creates a client for the lookup service at `base_url`
    /// (e.g. `https://api.postcodes.io/postcodes`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Looks up the coordinates of `postcode`.
    ///
    /// Returns `None` without a request when the postcode is blank.
    pub async fn geocode(&self, postcode: &str) -> Option<Coordinates> {
        let cleaned = postcode.trim();
        if cleaned.is_empty() {
            return None;
        }

        let url = self.lookup_url(cleaned);
        tracing::debug!(postcode = cleaned, %url, "geocoding postcode");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(postcode = cleaned, error = %e, "postcode lookup failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(postcode = cleaned, status = status.as_u16(), "no result for postcode");
            return None;
        }

        let body = match response.json::<PostcodeResponse>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(postcode = cleaned, error = %e, "unreadable postcode lookup response");
                return None;
            }
        };

        if body.status != 200 {
            tracing::warn!(postcode = cleaned, status = body.status, "no result for postcode");
            return None;
        }

        let result = body.result?;
        match (result.latitude, result.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => {
                tracing::warn!(postcode = cleaned, "postcode has no coordinates");
                None
            }
        }
    }

    /// Fills in coordinates for every record missing `lat` or `lng`.
    ///
    /// Records are geocoded one at a time with `delay_ms` between requests.
    /// Records whose postcode does not resolve are left unchanged. Returns the
    /// number of records updated.
    pub async fn geocode_missing(&self, records: &mut [BusinessRecord], delay_ms: u64) -> usize {
        self.fill_missing(
            records,
            delay_ms,
            |record| {
                let postcode = record.postcode.trim();
                (!record.has_coordinates() && !postcode.is_empty()).then(|| postcode.to_owned())
            },
            |record, coords| {
                record.lat = Some(coords.lat);
                record.lng = Some(coords.lng);
            },
        )
        .await
    }

    /// Like [`geocode_missing`](Self::geocode_missing), but over raw rows.
    ///
    /// Only `lat` and `lng` are written; every other key and every row is kept
    /// as it was, so a dataset file can be enriched without rewriting it into
    /// canonical shape.
    pub async fn geocode_rows(&self, rows: &mut [RawBusiness], delay_ms: u64) -> usize {
        self.fill_missing(
            rows,
            delay_ms,
            |row| {
                if raw_has_coordinates(row) {
                    None
                } else {
                    raw_postcode(row)
                }
            },
            |row, coords| {
                row.insert("lat".to_owned(), Value::from(coords.lat));
                row.insert("lng".to_owned(), Value::from(coords.lng));
            },
        )
        .await
    }

    async fn fill_missing<T>(
        &self,
        items: &mut [T],
        delay_ms: u64,
        pending_postcode: impl Fn(&T) -> Option<String>,
        apply: impl Fn(&mut T, Coordinates),
    ) -> usize {
        let mut updated = 0usize;
        let mut is_first_request = true;

        for (index, item) in items.iter_mut().enumerate() {
            let Some(postcode) = pending_postcode(item) else {
                continue;
            };

            if !is_first_request && delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            is_first_request = false;

            tracing::info!(index, postcode = %postcode, "geocoding");
            if let Some(coords) = self.geocode(&postcode).await {
                apply(item, coords);
                updated += 1;
            }
        }

        updated
    }

    fn lookup_url(&self, postcode: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            utf8_percent_encode(postcode, PATH_SEGMENT)
        )
    }
}
