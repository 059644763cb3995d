//! Facility categories.

use std::fmt;

/// Category of a medical facility, taken from the OSM `amenity` tag.
///
/// The set is open-ended: unknown values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Hospital,
    Clinic,
    Pharmacy,
    Other(String),
}

impl Category {
    /// Categories requested from the geodata service on every scan.
    pub const SCANNED: [Category; 3] = [Category::Hospital, Category::Clinic, Category::Pharmacy];

    /// Parse an `amenity` tag value. OSM values are lower case, and
    /// anything else is kept verbatim in `Other`.
    pub fn from_amenity(value: &str) -> Self {
        match value {
            "hospital" => Category::Hospital,
            "clinic" => Category::Clinic,
            "pharmacy" => Category::Pharmacy,
            other => Category::Other(other.to_string()),
        }
    }

    /// The tag value as used in Overpass queries.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Hospital => "hospital",
            Category::Clinic => "clinic",
            Category::Pharmacy => "pharmacy",
            Category::Other(s) => s,
        }
    }

    /// Upper-case label for list and detail views.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn is_hospital(&self) -> bool {
        matches!(self, Category::Hospital)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
