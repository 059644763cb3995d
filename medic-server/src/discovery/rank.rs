//! Facility ranking for scan results.

use crate::domain::{Coordinate, Facility, RankedFacility};
use crate::scoring::PriorityPolicy;

/// Score, order and truncate facilities around a reference coordinate.
///
/// Facilities are sorted by ascending priority score. The sort is stable,
/// so equal scores keep their response order. At most `max_results`
/// facilities are returned.
pub fn rank_facilities(
    reference: &Coordinate,
    facilities: Vec<Facility>,
    policy: &PriorityPolicy,
    max_results: usize,
) -> Vec<RankedFacility> {
    let mut ranked: Vec<RankedFacility> = facilities
        .into_iter()
        .map(|facility| {
            let distance_km = reference.distance_km(&facility.location);
            let priority = policy.score(&facility, distance_km);
            RankedFacility {
                facility,
                distance_km,
                priority,
            }
        })
        .collect();

    ranked.sort_by(|a, b| a.priority.total_cmp(&b.priority));
    ranked.truncate(max_results);
    ranked
}
