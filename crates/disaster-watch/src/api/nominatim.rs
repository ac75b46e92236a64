//! Nominatim (OpenStreetMap) geocoding client

use crate::error::{Result, WatchError};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Latitude and longitude of a resolved place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves a place name to coordinates
///
/// `Ok(None)` means the service answered but knows no such place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<Option<Coordinates>>;
}

/// One entry of a Nominatim search response
///
/// Nominatim encodes coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NominatimPlace {
    /// Parse the string coordinates
    pub fn coordinates(&self) -> Result<Coordinates> {
        let latitude = self.lat.trim().parse::<f64>().map_err(|e| {
            WatchError::ApiError(format!("Invalid latitude '{}' from Nominatim: {e}", self.lat))
        })?;
        let longitude = self.lon.trim().parse::<f64>().map_err(|e| {
            WatchError::ApiError(format!("Invalid longitude '{}' from Nominatim: {e}", self.lon))
        })?;
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

/// Nominatim client with rate limiting
pub struct NominatimGeocoder {
    client: Client,
    search_url: String,
    rate_limiter: SharedRateLimiter,
}

impl NominatimGeocoder {
    /// Create a new Nominatim client
    ///
    /// # Arguments
    /// * `base_url` - Nominatim instance, e.g. `https://nominatim.openstreetmap.org`
    /// * `user_agent` - Identifies the application, required by the usage policy
    /// * `rate_per_sec` - Requests per second (public instance: 1)
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: &str,
        user_agent: &str,
        rate_per_sec: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let rate = NonZeroU32::new(rate_per_sec).ok_or_else(|| {
            WatchError::ConfigError("geocoder rate must be greater than 0".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(rate)));

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            search_url: format!("{}/search", base_url.trim_end_matches('/')),
            rate_limiter,
        })
    }

    /// Full URL of the search endpoint
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, name: &str) -> Result<Option<Coordinates>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| WatchError::ApiError(format!("Nominatim request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::ApiError(format!(
                "Nominatim API error {status}: {body}"
            )));
        }

        let places = response.json::<Vec<NominatimPlace>>().await.map_err(|e| {
            WatchError::ApiError(format!("Failed to parse Nominatim response: {e}"))
        })?;

        debug!(query = name, matches = places.len(), "Nominatim search complete");
        first_match(&places)
    }
}

/// Coordinates of the best (first) match, if any
pub fn first_match(places: &[NominatimPlace]) -> Result<Option<Coordinates>> {
    places.first().map(NominatimPlace::coordinates).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<NominatimPlace> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_first_match_parses_string_coordinates() {
        let places = parse(
            r#"[{"place_id": 1, "lat": "10.8505159", "lon": "76.2710833",
                 "display_name": "Kerala, India"},
                {"lat": "0", "lon": "0"}]"#,
        );

        let coords = first_match(&places).unwrap().unwrap();
        assert!((coords.latitude - 10.850_515_9).abs() < 1e-9);
        assert!((coords.longitude - 76.271_083_3).abs() < 1e-9);
        assert_eq!(places[0].display_name.as_deref(), Some("Kerala, India"));
    }

    #[test]
    fn test_empty_response_is_not_found() {
        assert_eq!(first_match(&parse("[]")).unwrap(), None);
    }

    #[test]
    fn test_bad_coordinate_is_error() {
        let places = parse(r#"[{"lat": "north", "lon": "76.2"}]"#);
        assert!(matches!(first_match(&places), Err(WatchError::ApiError(_))));
    }

    #[test]
    fn test_client_creation() {
        let geocoder = NominatimGeocoder::new(
            "https://nominatim.openstreetmap.org/",
            "DisasterWatch",
            1,
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            geocoder.search_url(),
            "https://nominatim.openstreetmap.org/search"
        );
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = NominatimGeocoder::new("http://localhost", "ua", 0, Duration::from_secs(1));
        assert!(matches!(result, Err(WatchError::ConfigError(_))));
    }
}
