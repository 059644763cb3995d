//! Errors from establishing a reference coordinate.

use crate::domain::InvalidCoordinate;

/// Errors from GPS reports and place-name searches.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// The device refused location access
    #[error("geolocation permission denied")]
    GeolocationDenied,

    /// The device has no geolocation capability
    #[error("geolocation not supported")]
    GeolocationUnsupported,

    /// Search text was blank
    #[error("empty place query")]
    EmptyQuery,

    /// The geocoder returned no match
    #[error("no place matches {query:?}")]
    PlaceNotFound { query: String },

    /// The geocoder could not be reached or answered badly
    #[error("place search failed: {message}")]
    SearchFailed { message: String },

    /// Reported or geocoded coordinates were unusable
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
}

impl LocateError {
    /// Short status line for the HUD.
    pub fn hud_message(&self) -> &'static str {
        match self {
            LocateError::GeolocationDenied => "GPS PERMISSION DENIED",
            LocateError::GeolocationUnsupported => "GPS NOT SUPPORTED",
            LocateError::EmptyQuery => "ENTER A LOCATION",
            LocateError::PlaceNotFound { .. } => "LOCATION NOT FOUND",
            LocateError::SearchFailed { .. } => "LOCATION SEARCH FAILED",
            LocateError::InvalidCoordinate(_) => "INVALID COORDINATES",
        }
    }
}

impl From<reqwest::Error> for LocateError {
    fn from(err: reqwest::Error) -> Self {
        LocateError::SearchFailed {
            message: err.to_string(),
        }
    }
}
