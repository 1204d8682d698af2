pub mod client;
pub mod error;
pub mod fallback;
pub mod geo;
pub mod normalize;
pub mod provider;
pub mod types;

pub use client::DirectoryClient;
pub use error::SourceError;
pub use fallback::FallbackDataset;
pub use geo::GeoClient;
pub use normalize::{normalize_all, normalize_business, raw_has_coordinates, raw_postcode};
pub use provider::{BusinessSource, SourceProvider};
pub use types::{Coordinates, DirectoryStats, RawBusiness};
