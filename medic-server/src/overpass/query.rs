//! Overpass QL query construction.

use crate::domain::{Category, Coordinate};

/// Server-side evaluation limit sent with every query, in seconds.
pub const SERVER_TIMEOUT_SECS: u32 = 25;

/// Default search radius in metres.
pub const DEFAULT_RADIUS_M: u32 = 10_000;

/// A radius search for facilities of the given categories.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityQuery {
    pub center: Coordinate,
    pub radius_m: u32,
    pub categories: Vec<Category>,
}

impl FacilityQuery {
    /// Search for hospitals, clinics and pharmacies around `center`.
    pub fn around(center: Coordinate, radius_m: u32) -> Self {
        Self {
            center,
            radius_m,
            categories: Category::SCANNED.to_vec(),
        }
    }

    /// Render the query as Overpass QL.
    ///
    /// One `node` clause per category, returning tags and centers.
    pub fn to_overpass_ql(&self) -> String {
        let clauses: String = self
            .categories
            .iter()
            .map(|category| {
                format!(
                    "node[\"amenity\"=\"{}\"](around:{},{},{});",
                    category.as_str(),
                    self.radius_m,
                    self.center.lat(),
                    self.center.lon()
                )
            })
            .collect();

        format!("[out:json][timeout:{SERVER_TIMEOUT_SECS}];({clauses});out tags center;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_three_categories() {
        let center = Coordinate::new(11.1271, 78.6569).unwrap();
        let ql = FacilityQuery::around(center, DEFAULT_RADIUS_M).to_overpass_ql();

        assert_eq!(
            ql,
            "[out:json][timeout:25];(\
             node[\"amenity\"=\"hospital\"](around:10000,11.1271,78.6569);\
             node[\"amenity\"=\"clinic\"](around:10000,11.1271,78.6569);\
             node[\"amenity\"=\"pharmacy\"](around:10000,11.1271,78.6569);\
             );out tags center;"
        );
    }

    #[test]
    fn custom_radius_and_categories() {
        let center = Coordinate::new(13.0, 80.25).unwrap();
        let query = FacilityQuery {
            center,
            radius_m: 500,
            categories: vec![Category::Hospital],
        };
        let ql = query.to_overpass_ql();
        assert!(ql.contains("(around:500,13,80.25)"));
        assert!(!ql.contains("clinic"));
    }
}
