//! HTTP client for the Nominatim-style pincode search endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use salemap_core::Coordinates;

use crate::error::GeocodeError;

/// One place from the geocoder's JSON response. Nominatim serialises
/// latitude and longitude as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Client for single-pincode coordinate lookups.
///
/// Sends one `search?format=json&postalcode=<pin>&country=<scope>&limit=1`
/// query per call and expects a JSON array of zero or one places. The caller
/// is responsible for pacing calls to respect the upstream rate limit.
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    /// Creates a `GeocodeClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, base_url: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Looks up one pincode within the given country scope.
    ///
    /// Returns `Ok(None)` when the geocoder knows nothing about the pincode
    /// (an empty result array).
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::UnexpectedStatus`] — any non-2xx response.
    /// - [`GeocodeError::Http`] — network or TLS failure.
    /// - [`GeocodeError::Deserialize`] — body is not a JSON place array.
    /// - [`GeocodeError::MalformedCoordinates`] — lat/lon not parseable as
    ///   finite floats.
    pub async fn lookup(
        &self,
        pincode: &str,
        country: &str,
    ) -> Result<Option<Coordinates>, GeocodeError> {
        let url = self.search_url(pincode, country)?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let places: Vec<Place> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search result for pincode {pincode}"),
                source: e,
            })?;

        let Some(place) = places.first() else {
            return Ok(None);
        };

        let lat = place
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodeError::MalformedCoordinates {
                pincode: pincode.to_string(),
                reason: format!("latitude \"{}\": {e}", place.lat),
            })?;
        let lon = place
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodeError::MalformedCoordinates {
                pincode: pincode.to_string(),
                reason: format!("longitude \"{}\": {e}", place.lon),
            })?;

        Coordinates::new(lat, lon)
            .ok_or_else(|| GeocodeError::MalformedCoordinates {
                pincode: pincode.to_string(),
                reason: format!("non-finite pair ({lat}, {lon})"),
            })
            .map(Some)
    }

    fn search_url(&self, pincode: &str, country: &str) -> Result<String, GeocodeError> {
        let base = format!("{}/search", self.base_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("postalcode", pincode)
            .append_pair("country", country)
            .append_pair("limit", "1");

        Ok(url.to_string())
    }
}
