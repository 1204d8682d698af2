use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the directory client, read from `BIZDIR_*`
/// environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Restaurants collection endpoint, always ending in `/`.
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Overrides the bundled fallback dataset when set.
    pub fallback_path: Option<PathBuf>,
    pub geocoder_url: String,
    pub geocode_delay_ms: u64,
    /// Viewport width assumed by the CLI when no `--width` is given.
    pub viewport_width: u32,
}
