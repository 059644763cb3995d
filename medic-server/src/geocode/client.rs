//! Nominatim place search client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::LocateError;

/// Default Nominatim base URL.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Region appended to every query to bias results.
const DEFAULT_REGION: &str = "Tamil Nadu";

/// A single Nominatim search hit. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinate: Coordinate,
    pub display_name: String,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Region suffix appended to queries; `None` searches worldwide
    pub region: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// `User-Agent` sent with every request (required by Nominatim policy)
    pub user_agent: String,
}

impl GeocodeConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            region: Some(DEFAULT_REGION.to_string()),
            timeout_secs: 30,
            user_agent: crate::overpass::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for free-text place lookup.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    region: Option<String>,
}

impl GeocodeClient {
    pub fn new(config: GeocodeConfig) -> Result<Self, LocateError> {
        let mut headers = HeaderMap::new();
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| LocateError::SearchFailed {
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            region: config.region,
        })
    }

    /// The query string actually sent, with the region suffix.
    pub fn qualified_query(&self, query: &str) -> String {
        match &self.region {
            Some(region) => format!("{query}, {region}"),
            None => query.to_string(),
        }
    }

    /// Look up the best match for a place name.
    pub async fn search(&self, query: &str) -> Result<GeocodedPlace, LocateError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LocateError::EmptyQuery);
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("limit", "1"),
                ("q", self.qualified_query(query).as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocateError::SearchFailed {
                message: format!("status {}", status.as_u16()),
            });
        }

        let body = response.text().await?;
        let places: Vec<Place> =
            serde_json::from_str(&body).map_err(|e| LocateError::SearchFailed {
                message: format!("invalid response: {e}"),
            })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| LocateError::PlaceNotFound {
                query: query.to_string(),
            })?;

        let coordinate = parse_place(&place)?;
        tracing::info!(query, %coordinate, "place located");

        Ok(GeocodedPlace {
            coordinate,
            display_name: place.display_name,
        })
    }
}

/// Parse the string coordinates of a Nominatim hit.
fn parse_place(place: &Place) -> Result<Coordinate, LocateError> {
    let parse = |s: &str| {
        s.trim().parse::<f64>().map_err(|_| LocateError::SearchFailed {
            message: format!("unparseable coordinate {s:?}"),
        })
    };
    Ok(Coordinate::new(parse(&place.lat)?, parse(&place.lon)?)?)
}
