//! Integration tests for `GeocodeClient::lookup`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy path, the empty-result path,
//! and every error variant `lookup` can propagate.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use salemap_geocode::{GeocodeClient, GeocodeError};

/// Builds a `GeocodeClient` suitable for tests: 5-second timeout, descriptive UA.
fn test_client(base_url: &str) -> GeocodeClient {
    GeocodeClient::new(5, "salemap-test/0.1", base_url).expect("failed to build test GeocodeClient")
}

/// One-place JSON fixture in Nominatim's shape: lat/lon as decimal strings.
fn one_place_json(lat: &str, lon: &str) -> serde_json::Value {
    json!([{
        "lat": lat,
        "lon": lon,
        "display_name": "Bengaluru, Karnataka, India"
    }])
}

#[tokio::test]
async fn lookup_parses_string_lat_lon_as_floats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("postalcode", "560001"))
        .and(query_param("country", "India"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_place_json("12.9716", "77.5946")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coords = client.lookup("560001", "India").await.unwrap().unwrap();

    assert!((coords.lat - 12.9716).abs() < 1e-9);
    assert!((coords.lon - 77.5946).abs() < 1e-9);
}

#[tokio::test]
async fn lookup_returns_none_for_empty_result_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.lookup("999999", "India").await.unwrap();
    assert!(result.is_none(), "empty array must resolve to None, not an error");
}

#[tokio::test]
async fn lookup_surfaces_server_errors_as_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.lookup("560001", "India").await;
    assert!(
        matches!(result, Err(GeocodeError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn lookup_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.lookup("560001", "India").await;
    assert!(
        matches!(result, Err(GeocodeError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}

#[tokio::test]
async fn lookup_rejects_unparseable_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(one_place_json("not-a-number", "77.5946")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.lookup("560001", "India").await;
    assert!(
        matches!(result, Err(GeocodeError::MalformedCoordinates { ref pincode, .. }) if pincode == "560001"),
        "expected MalformedCoordinates, got: {result:?}"
    );
}

#[tokio::test]
async fn lookup_takes_the_first_place_when_several_are_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "12.9716", "lon": "77.5946"},
            {"lat": "13.0000", "lon": "77.6000"}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coords = client.lookup("560001", "India").await.unwrap().unwrap();
    assert!((coords.lat - 12.9716).abs() < 1e-9);
}
