//! Domain model, configuration, aggregation, and visual encoding for the
//! pincode sales map. Resolution (cache + geocoding) lives in
//! `salemap-geocode`; this crate performs no network or map I/O.

pub mod app_config;
pub mod config;
pub mod encode;
pub mod export;
pub mod pipeline;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use encode::{magnitude_label, Rgb, SalesScale};
pub use export::export_csv;
pub use pipeline::{
    aggregate, Aggregation, BucketId, FilterState, HeatBucket, HeatPoint, Limit, SalesStats,
};
pub use types::{
    coalesce_records, Coordinates, ResolutionProgress, ResolvedRecord, SalesRecord,
};
