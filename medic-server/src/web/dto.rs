//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::discovery::{ScanOutcome, ScanSource, nearest_hospital};
use crate::domain::{Coordinate, RankedFacility};

/// Placeholder shown for missing phone and address fields.
const NOT_AVAILABLE: &str = "Not Available";

/// Result of a device geolocation attempt, as reported by the browser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GpsReport {
    Locked { lat: f64, lon: f64 },
    Denied,
    Unsupported,
}

/// Request to locate a place by name.
#[derive(Debug, Deserialize)]
pub struct PlaceSearchRequest {
    pub query: String,
}

/// The reference coordinate after a successful locate.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// HUD status line
    pub status: String,
    pub lat: f64,
    pub lon: f64,
    /// Matched place name, for searches
    pub label: Option<String>,
}

impl LocationResponse {
    pub fn new(status: String, coordinate: Coordinate, label: Option<String>) -> Self {
        Self {
            status,
            lat: coordinate.lat(),
            lon: coordinate.lon(),
            label,
        }
    }
}

/// Query parameters for filtering the latest scan.
#[derive(Debug, Default, Deserialize)]
pub struct FacilityListRequest {
    /// `all`, `hospital`, `clinic`, `pharmacy`, ...
    pub category: Option<String>,
    /// Free-text filter
    pub q: Option<String>,
}

/// A facility as shown in the list and detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityView {
    /// `node/123` style identifier
    pub id: String,
    pub name: String,
    /// Tamil name, if tagged
    pub localized_name: Option<String>,
    /// Raw category value (for client-side filtering)
    pub category: String,
    /// Upper-case category label
    pub category_label: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_km: f64,
    /// Distance formatted for display, e.g. "1.25 km"
    pub distance_text: String,
    pub priority: f64,
    pub phone: String,
    /// `tel:` link when a phone number exists
    pub call_link: Option<String>,
    pub address: String,
    /// "YES" or "UNKNOWN"
    pub emergency: String,
    pub directions_url: String,
    /// Whether this is the top-ranked entry
    pub nearest: bool,
}

impl FacilityView {
    pub fn from_ranked(ranked: &RankedFacility, nearest: bool) -> Self {
        let facility = &ranked.facility;
        let tags = &facility.tags;
        let phone = tags.phone();

        Self {
            id: facility.id.to_string(),
            name: tags.name().unwrap_or("Unnamed").to_string(),
            localized_name: tags.localized_name().map(str::to_string),
            category: facility.category.as_str().to_string(),
            category_label: facility.category.label(),
            lat: facility.location.lat(),
            lon: facility.location.lon(),
            distance_km: ranked.distance_km,
            distance_text: format!("{:.2} km", ranked.distance_km),
            priority: ranked.priority,
            phone: phone.unwrap_or(NOT_AVAILABLE).to_string(),
            call_link: phone.map(|p| format!("tel:{}", p.replace(' ', ""))),
            address: tags.address().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            emergency: if tags.emergency() { "YES" } else { "UNKNOWN" }.to_string(),
            directions_url: directions_url(&facility.location),
            nearest,
        }
    }

    /// Views for a ranked list; the first entry is flagged as nearest.
    pub fn list<'a>(ranked: impl IntoIterator<Item = &'a RankedFacility>) -> Vec<Self> {
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, r)| Self::from_ranked(r, i == 0))
            .collect()
    }
}

/// Google Maps directions link to a coordinate.
pub fn directions_url(destination: &Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        destination.lat(),
        destination.lon()
    )
}

/// Response to a successful scan.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    /// HUD status line
    pub status: String,
    /// "cache" or "remote"
    pub source: &'static str,
    /// Endpoint that answered, for remote scans
    pub endpoint: Option<String>,
    pub generation: u64,
    pub facilities: Vec<FacilityView>,
    /// First hospital in ranked order, for auto-framing
    pub nearest_hospital: Option<FacilityView>,
}

impl ScanResponse {
    pub fn from_outcome(outcome: &ScanOutcome) -> Self {
        let (source, endpoint) = match &outcome.source {
            ScanSource::Cache => ("cache", None),
            ScanSource::Remote { endpoint } => ("remote", Some(endpoint.clone())),
        };

        Self {
            status: outcome.hud_message(),
            source,
            endpoint,
            generation: outcome.generation,
            facilities: FacilityView::list(outcome.facilities.iter()),
            nearest_hospital: nearest_hospital(&outcome.facilities)
                .map(|h| FacilityView::from_ranked(h, false)),
        }
    }
}

/// Filtered view of the latest scan.
#[derive(Debug, Serialize)]
pub struct FacilityListResponse {
    pub count: usize,
    pub facilities: Vec<FacilityView>,
}

/// Emergency mode: the nearest hospital, framed on the user.
#[derive(Debug, Serialize)]
pub struct EmergencyResponse {
    pub status: String,
    pub reference: Option<LocationPoint>,
    pub hospital: FacilityView,
}

/// A bare coordinate pair.
#[derive(Debug, Serialize)]
pub struct LocationPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for LocationPoint {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lon: c.lon(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
