pub mod app_config;
pub mod business;
pub mod config;
pub mod sort;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use business::{BusinessRecord, DataSource, Dataset};
pub use config::{load_app_config, load_app_config_from_env};
pub use sort::SortOption;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort option: {0} (expected name-asc, name-desc, rating-asc or rating-desc)")]
    InvalidSortOption(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
