//! Application state for the web layer.

use std::sync::Arc;

use crate::discovery::{ConfiguredSource, Discovery};
use crate::geocode::GeocodeClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Discovery session (cooldown, cache, reference, latest result)
    pub discovery: Arc<Discovery<ConfiguredSource>>,

    /// Place-name geocoder
    pub geocoder: Arc<GeocodeClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(discovery: Discovery<ConfiguredSource>, geocoder: GeocodeClient) -> Self {
        Self {
            discovery: Arc::new(discovery),
            geocoder: Arc::new(geocoder),
        }
    }
}
