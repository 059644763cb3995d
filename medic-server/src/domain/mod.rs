//! Domain types for the facility radar.
//!
//! Coordinates are validated at construction; facility records wrap the
//! loosely-typed OSM tag mapping behind named accessors so the rest of the
//! crate never performs ad hoc tag lookups.

mod category;
mod coord;
mod facility;
mod tags;

pub use category::Category;
pub use coord::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, distance_km};
pub use facility::{ElementKind, Facility, FacilityId, RankedFacility};
pub use tags::FacilityTags;
