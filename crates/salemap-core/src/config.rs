use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value. Unset
/// vars fall back to their defaults — nothing is required.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the parsing/validation logic decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let geocode_base_url = or_default(
        "SALEMAP_GEOCODE_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let geocode_country = or_default("SALEMAP_GEOCODE_COUNTRY", "India");
    let request_timeout_secs = parse_u64("SALEMAP_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("SALEMAP_USER_AGENT", "salemap/0.1 (pincode-sales-map)");
    let lookup_delay_ms = parse_u64("SALEMAP_LOOKUP_DELAY_MS", "300")?;
    let cache_path = PathBuf::from(or_default(
        "SALEMAP_CACHE_PATH",
        "./.salemap/pincode-cache.json",
    ));
    let currency_symbol = or_default("SALEMAP_CURRENCY_SYMBOL", "\u{20b9}");
    let log_level = or_default("SALEMAP_LOG_LEVEL", "info");

    Ok(AppConfig {
        geocode_base_url,
        geocode_country,
        request_timeout_secs,
        user_agent,
        lookup_delay_ms,
        cache_path,
        currency_symbol,
        log_level,
    })
}
