use std::path::PathBuf;

/// Runtime configuration for the salemap binary and resolver.
///
/// Every field has a default; the process runs with an empty environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Nominatim-style geocoding service.
    pub geocode_base_url: String,
    /// Country scope sent with every pincode lookup.
    pub geocode_country: String,
    /// Per-request timeout for the geocoding client.
    pub request_timeout_secs: u64,
    /// User-Agent sent to the geocoding service.
    pub user_agent: String,
    /// Fixed pause between consecutive external lookups.
    pub lookup_delay_ms: u64,
    /// Location of the durable pincode → coordinates cache file.
    pub cache_path: PathBuf,
    /// Currency symbol prefixed to magnitude labels.
    pub currency_symbol: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}
