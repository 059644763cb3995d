//! Overpass client error types.

/// Errors from querying the Overpass API.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid Overpass JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Every configured endpoint failed
    #[error("all {attempted} Overpass endpoints failed")]
    AllEndpointsFailed { attempted: usize },

    /// Local fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
