use serde::Serialize;
use serde_json::{Map, Value};

/// Name given to records whose upstream payload carries no usable name.
pub const UNKNOWN_NAME: &str = "Unknown name";

/// A directory entry in canonical shape, produced by normalizing one upstream
/// item (API response or bundled dataset).
///
/// Serializes with the same keys the normalizer reads first (`_id`,
/// `hygiene_rating`, ...), so a serialized record normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRecord {
    /// Stable identifier, unique within one loaded list.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub postcode: String,
    /// Food hygiene rating on the 0-5 scale; `None` means unrated.
    /// Out-of-range values are kept as received.
    pub hygiene_rating: Option<f64>,
    pub cuisine: String,
    pub tags: Vec<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Upstream fields outside the canonical shape, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessRecord {
    /// Creates a record with the given id and name and every other field at
    /// its default.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            postcode: String::new(),
            hygiene_rating: None,
            cuisine: String::new(),
            tags: Vec::new(),
            lat: None,
            lng: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.hygiene_rating = Some(rating);
        self
    }

    /// Rating used for filtering and ordering: unrated counts as zero.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.hygiene_rating.unwrap_or(0.0)
    }

    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

/// Where a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The remote directory API answered.
    Api,
    /// The bundled (or configured) fallback dataset was used.
    Json,
    /// Nothing has loaded yet.
    #[default]
    None,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Api => write!(f, "api"),
            DataSource::Json => write!(f, "json"),
            DataSource::None => write!(f, "none"),
        }
    }
}

/// The result of one completed load: the ordered records and their provenance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub records: Vec<BusinessRecord>,
    pub source: DataSource,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<BusinessRecord>, source: DataSource) -> Self {
        Self { records, source }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with the given id, if present.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&BusinessRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
