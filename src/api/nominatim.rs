use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::GeocoderConfig;
use crate::domain::Point;
use crate::error::GeocodeError;

/// Zoom level passed to the reverse endpoint; 18 is building-level detail
const REVERSE_ZOOM: u8 = 18;

/// Body of a Nominatim `/reverse` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<RawAddress>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Set instead of `address` when no feature was found at the point
    #[serde(default)]
    pub error: Option<String>,
}

/// Address components as Nominatim reports them; any may be absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    pub road: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub quarter: Option<String>,
    pub village: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

/// Source of reverse-geocoding answers
///
/// Implemented by [`NominatimClient`] for production and by in-memory
/// fakes in tests.
pub trait ReverseGeocoder: Send + Sync {
    fn reverse(
        &self,
        point: Point,
    ) -> impl Future<Output = Result<ReverseResponse, GeocodeError>> + Send;
}

/// Async reverse-geocoding client for the Nominatim API
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    reverse_url: String,
    language: Option<String>,
}

impl NominatimClient {
    /// Build a client for the `/reverse` endpoint under `config.base_url`
    ///
    /// # Arguments
    /// * `config` - Base URL, User-Agent, request timeout and optional
    ///   `accept-language`
    ///
    /// # Returns
    /// The client, or [`GeocodeError::Client`] if the HTTP client cannot be
    /// built
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        // Nominatim's usage policy requires an identifying User-Agent
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(GeocodeError::Client)?;

        Ok(Self {
            client,
            reverse_url: format!("{}/reverse", config.base_url.trim_end_matches('/')),
            language: config.language.clone(),
        })
    }

    fn query(&self, point: Point) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("format", "json".to_string()),
            ("lat", point.lat.to_string()),
            ("lon", point.lng.to_string()),
            ("zoom", REVERSE_ZOOM.to_string()),
            ("addressdetails", "1".to_string()),
        ];
        if let Some(ref lang) = self.language {
            query.push(("accept-language", lang.clone()));
        }
        query
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, point: Point) -> Result<ReverseResponse, GeocodeError> {
        debug!(lat = point.lat, lng = point.lng, "reverse geocoding");

        let response = self
            .client
            .get(&self.reverse_url)
            .query(&self.query(point))
            .send()
            .await
            .map_err(GeocodeError::Http)?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let body = response.text().await.map_err(GeocodeError::Http)?;
        trace!(%body, "geocoder response");

        parse_reverse_response(&body)
    }
}

/// Parse a `/reverse` body, treating Nominatim's `{"error": ...}` form as a miss
pub fn parse_reverse_response(body: &str) -> Result<ReverseResponse, GeocodeError> {
    let parsed: ReverseResponse = serde_json::from_str(body)?;

    match parsed.error {
        Some(message) => Err(GeocodeError::NotFound(message)),
        None => Ok(parsed),
    }
}
