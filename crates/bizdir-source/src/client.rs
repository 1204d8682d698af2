//! HTTP client for the restaurants REST API.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SourceError;
use crate::types::{DirectoryStats, RawBusiness};

/// Client for the restaurants collection endpoint.
///
/// Non-2xx responses surface as [`SourceError::UnexpectedStatus`]; bodies
/// that are not the expected JSON shape surface as
/// [`SourceError::Deserialize`]. The client never retries: the provider
/// makes exactly one attempt per session and falls back on failure.
pub struct DirectoryClient {
    client: Client,
    base_url: Url,
}

impl DirectoryClient {
    /// Creates a client for the collection at `base_url`
    /// (e.g. `http://127.0.0.1:5000/api/v1.0/restaurants/`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // The collection route has a trailing slash; keep exactly one so that
        // `join("stats")` appends instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SourceError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches every item of the restaurants collection.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure.
    /// - [`SourceError::UnexpectedStatus`] on any non-2xx status.
    /// - [`SourceError::Deserialize`] if the body is not a JSON array of objects.
    pub async fn fetch_businesses(&self) -> Result<Vec<RawBusiness>, SourceError> {
        let url = self.base_url.clone();
        let body = self.get_text(&url).await?;
        serde_json::from_str::<Vec<RawBusiness>>(&body).map_err(|e| SourceError::Deserialize {
            context: format!("restaurants list from {url}"),
            source: e,
        })
    }

    /// Fetches aggregate counts from the `stats` route.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_businesses`].
    pub async fn fetch_stats(&self) -> Result<DirectoryStats, SourceError> {
        let url = self.stats_url()?;
        let body = self.get_text(&url).await?;
        serde_json::from_str::<DirectoryStats>(&body).map_err(|e| SourceError::Deserialize {
            context: format!("directory stats from {url}"),
            source: e,
        })
    }

    fn stats_url(&self) -> Result<Url, SourceError> {
        self.base_url
            .join("stats")
            .map_err(|e| SourceError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get_text(&self, url: &Url) -> Result<String, SourceError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
