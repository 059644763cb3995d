//! Facility records.

use std::fmt;

use super::category::Category;
use super::coord::Coordinate;
use super::tags::FacilityTags;

/// OSM element kind a facility was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "node" => Some(ElementKind::Node),
            "way" => Some(ElementKind::Way),
            "relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }
}

/// Identifier of a facility: OSM element kind plus numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacilityId {
    pub kind: ElementKind,
    pub id: u64,
}

impl FacilityId {
    pub fn new(kind: ElementKind, id: u64) -> Self {
        Self { kind, id }
    }

    /// Parse the `kind/id` form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        let (kind, id) = s.split_once('/')?;
        Some(Self {
            kind: ElementKind::parse(kind)?,
            id: id.parse().ok()?,
        })
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.id)
    }
}

/// A medical facility as reported by the geodata service.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: FacilityId,
    pub location: Coordinate,
    pub category: Category,
    pub tags: FacilityTags,
}

impl Facility {
    /// Build a facility, deriving its category from the `amenity` tag.
    pub fn new(id: FacilityId, location: Coordinate, tags: FacilityTags) -> Self {
        let category = Category::from_amenity(tags.amenity().unwrap_or_default());
        Self {
            id,
            location,
            category,
            tags,
        }
    }
}

/// A facility with its derived ranking attributes.
///
/// Distance and priority only exist together, and only once scored.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFacility {
    pub facility: Facility,
    /// Great-circle distance from the reference coordinate.
    pub distance_km: f64,
    /// Rank score; lower is better.
    pub priority: f64,
}

impl RankedFacility {
    /// Text used for free-text filtering: name, localized name, category and phone.
    pub fn search_text(&self) -> String {
        let tags = &self.facility.tags;
        [
            tags.name().unwrap_or("Unnamed"),
            tags.localized_name().unwrap_or_default(),
            self.facility.category.as_str(),
            tags.phone().unwrap_or("N/A"),
        ]
        .join(" ")
        .to_lowercase()
    }
}
