//! Overpass API response DTOs.
//!
//! These map directly onto the JSON produced by `[out:json]` queries.
//! Coordinates sit on the element for nodes and in `center` for ways and
//! relations requested with `out center`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level Overpass JSON payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OverpassResponse {
    /// Matched elements. Overpass omits the key entirely on some errors.
    #[serde(default)]
    pub elements: Vec<Element>,

    /// Server-side remark, set when a query times out or hits a quota.
    pub remark: Option<String>,
}

/// A single OSM element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Element {
    /// Element type: `node`, `way` or `relation`.
    #[serde(rename = "type")]
    pub kind: String,

    pub id: u64,

    pub lat: Option<f64>,

    pub lon: Option<f64>,

    /// Geometric center, present for non-node elements.
    pub center: Option<Center>,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Center point of a way or relation.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl Element {
    /// Element position, preferring explicit `lat`/`lon` over `center`.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }
}
