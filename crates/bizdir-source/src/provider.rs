//! Session-scoped loading of the directory with API-to-bundled-JSON fallback.

use std::future::Future;
use std::sync::Arc;

use bizdir_core::{AppConfig, BusinessRecord, DataSource, Dataset};
use tokio::sync::OnceCell;

use crate::client::DirectoryClient;
use crate::error::SourceError;
use crate::fallback::FallbackDataset;
use crate::normalize::normalize_all;

/// Anything that can hand the listing its dataset.
///
/// Implementations must be idempotent: every call after the first completed
/// one resolves to the same dataset.
pub trait BusinessSource {
    fn load(&self) -> impl Future<Output = Arc<Dataset>> + Send;
}

/// Loads the directory once per session.
///
/// The first [`load`](Self::load) issues a single request to the restaurants
/// API. Any failure (network, status, body shape) is absorbed: the fallback
/// dataset is used instead and the provenance reads [`DataSource::Json`].
/// The outcome is cached in a single-resolution cell, so concurrent callers
/// share the one in-flight request and later callers get the cached dataset.
pub struct SourceProvider {
    client: DirectoryClient,
    fallback: FallbackDataset,
    dataset: OnceCell<Arc<Dataset>>,
}

impl SourceProvider {
    #[must_use]
    pub fn new(client: DirectoryClient, fallback: FallbackDataset) -> Self {
        Self {
            client,
            fallback,
            dataset: OnceCell::new(),
        }
    }

    /// Builds a provider from the API and fallback settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let client = DirectoryClient::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(
            client,
            FallbackDataset::from_path(config.fallback_path.clone()),
        ))
    }

    /// Returns the session's dataset, fetching it on first use.
    pub async fn load(&self) -> Arc<Dataset> {
        self.resolve().await
    }

    /// Provenance of the cached dataset; [`DataSource::None`] until the first
    /// load completes.
    #[must_use]
    pub fn source(&self) -> DataSource {
        self.dataset.get().map_or(DataSource::None, |d| d.source)
    }

    /// The cached dataset, if a load has completed.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<Dataset>> {
        self.dataset.get().map(Arc::clone)
    }

    /// Looks up a record by id in the cached dataset.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<BusinessRecord> {
        self.dataset.get()?.find(id).cloned()
    }

    /// Aggregate counts from the API; not cached and not part of the fallback.
    ///
    /// # Errors
    ///
    /// Propagates any [`SourceError`] from the stats request.
    pub async fn stats(&self) -> Result<crate::types::DirectoryStats, SourceError> {
        self.client.fetch_stats().await
    }

    async fn resolve(&self) -> Arc<Dataset> {
        let dataset = self.dataset.get_or_init(|| self.fetch_once()).await;
        Arc::clone(dataset)
    }

    async fn fetch_once(&self) -> Arc<Dataset> {
        match self.client.fetch_businesses().await {
            Ok(raws) => {
                let records = normalize_all(raws);
                tracing::info!(
                    count = records.len(),
                    source = %DataSource::Api,
                    url = %self.client.base_url(),
                    "loaded businesses"
                );
                Arc::new(Dataset::new(records, DataSource::Api))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    url = %self.client.base_url(),
                    "restaurants API unavailable; using fallback dataset"
                );
                let records = self.fallback.load();
                tracing::info!(
                    count = records.len(),
                    source = %DataSource::Json,
                    "loaded businesses"
                );
                Arc::new(Dataset::new(records, DataSource::Json))
            }
        }
    }
}

impl BusinessSource for SourceProvider {
    async fn load(&self) -> Arc<Dataset> {
        self.resolve().await
    }
}
