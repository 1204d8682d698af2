use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/v1.0/restaurants/";
pub const DEFAULT_GEOCODER_URL: &str = "https://api.postcodes.io/postcodes";
pub const DEFAULT_USER_AGENT: &str = "bizdir/0.1 (business-directory)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BIZDIR_ENV", "development"));
    let log_level = or_default("BIZDIR_LOG_LEVEL", "info");

    let api_url = or_default("BIZDIR_API_URL", DEFAULT_API_URL);
    let api_url = validate_http_url("BIZDIR_API_URL", &api_url)?;
    let api_url = format!("{}/", api_url.trim_end_matches('/'));

    let request_timeout_secs = parse_u64("BIZDIR_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BIZDIR_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("BIZDIR_USER_AGENT", DEFAULT_USER_AGENT);

    let fallback_path = lookup("BIZDIR_FALLBACK_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let geocoder_url = or_default("BIZDIR_GEOCODER_URL", DEFAULT_GEOCODER_URL);
    let geocoder_url = validate_http_url("BIZDIR_GEOCODER_URL", &geocoder_url)?
        .trim_end_matches('/')
        .to_string();
    let geocode_delay_ms = parse_u64("BIZDIR_GEOCODE_DELAY_MS", "150")?;
    let viewport_width = parse_u32("BIZDIR_VIEWPORT_WIDTH", "1280")?;

    Ok(AppConfig {
        env,
        log_level,
        api_url,
        request_timeout_secs,
        user_agent,
        fallback_path,
        geocoder_url,
        geocode_delay_ms,
        viewport_width,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn validate_http_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got \"{raw}\""),
        })
    }
}
