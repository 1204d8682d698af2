//! The static dataset substituted when the restaurants API is unreachable.

use std::path::PathBuf;

use bizdir_core::BusinessRecord;

use crate::error::SourceError;
use crate::normalize::normalize_all;
use crate::types::RawBusiness;

/// Snapshot of the directory shipped inside the binary, already in canonical
/// shape and geocoded.
const BUNDLED_JSON: &str = include_str!("../data/businesses_with_coords.json");

/// Where the fallback records come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FallbackDataset {
    /// The snapshot compiled into the binary.
    #[default]
    Bundled,
    /// A JSON array on disk, read when the fallback is needed.
    File(PathBuf),
}

impl FallbackDataset {
    /// Uses `path` when given, otherwise the bundled snapshot.
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Bundled, Self::File)
    }

    /// Loads and normalizes the fallback records.
    ///
    /// A missing or corrupt dataset is a configuration error with no further
    /// fallback: it is logged and yields an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<BusinessRecord> {
        match self.read_raw() {
            Ok(raws) => normalize_all(raws),
            Err(e) => {
                tracing::error!(error = %e, "fallback dataset unavailable; listing will be empty");
                Vec::new()
            }
        }
    }

    fn read_raw(&self) -> Result<Vec<RawBusiness>, SourceError> {
        match self {
            Self::Bundled => parse_raw(BUNDLED_JSON, "bundled fallback dataset"),
            Self::File(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| SourceError::FallbackIo {
                        path: path.display().to_string(),
                        source: e,
                    })?;
                parse_raw(&content, &path.display().to_string())
            }
        }
    }
}

fn parse_raw(content: &str, context: &str) -> Result<Vec<RawBusiness>, SourceError> {
    serde_json::from_str(content).map_err(|e| SourceError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
