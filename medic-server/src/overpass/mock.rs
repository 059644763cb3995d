//! Fixture-backed Overpass source for running without network access.
//!
//! Loads a saved Overpass JSON response and answers radius queries from it
//! as if it were a live interpreter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::client::FacilityBatch;
use super::convert::convert_response;
use super::error::OverpassError;
use super::query::FacilityQuery;
use super::types::OverpassResponse;

/// Serves facilities from a local Overpass JSON file.
#[derive(Debug, Clone)]
pub struct MockOverpassSource {
    response: Arc<OverpassResponse>,
    path: PathBuf,
}

impl MockOverpassSource {
    /// Load a fixture file containing an Overpass `[out:json]` payload.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OverpassError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| OverpassError::Fixture {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let response: OverpassResponse =
            serde_json::from_str(&json).map_err(|e| OverpassError::Fixture {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;

        Ok(Self {
            response: Arc::new(response),
            path: path.to_path_buf(),
        })
    }

    /// Pseudo-endpoint name reported for answered queries.
    pub fn endpoint(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// Answer a query from the fixture: same category set, same radius.
    pub async fn find_facilities(
        &self,
        query: &FacilityQuery,
    ) -> Result<FacilityBatch, OverpassError> {
        let radius_km = f64::from(query.radius_m) / 1000.0;

        let facilities = convert_response(&self.response)
            .into_iter()
            .filter(|f| query.categories.contains(&f.category))
            .filter(|f| query.center.distance_km(&f.location) <= radius_km)
            .collect();

        Ok(FacilityBatch {
            facilities,
            endpoint: self.endpoint(),
            remark: self.response.remark.clone(),
        })
    }
}
