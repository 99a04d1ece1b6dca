//! Pincode → coordinate resolution: layered cache, static seed table,
//! rate-limited external geocoding, and batch resolution with progress
//! reporting and supersession.

pub mod cache;
pub mod client;
pub mod error;
pub mod resolver;
pub mod seed;

pub use cache::CoordinateCache;
pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use resolver::{BatchToken, ResolveEvent, Resolver};
pub use seed::seed_coordinates;
