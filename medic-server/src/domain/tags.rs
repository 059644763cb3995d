//! Typed access to the free-form OSM tag mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Phone-like keys, in lookup order.
const PHONE_KEYS: [&str; 3] = ["phone", "contact:phone", "mobile"];

/// Keys that earn the contact bonus when ranking. `mobile` is display-only.
const CONTACT_PHONE_KEYS: [&str; 2] = ["phone", "contact:phone"];

/// Address fragments, in display order.
const ADDRESS_KEYS: [&str; 6] = [
    "addr:housenumber",
    "addr:street",
    "addr:suburb",
    "addr:city",
    "addr:district",
    "addr:state",
];

/// Tag mapping of a facility with named accessors for the well-known keys.
///
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityTags(HashMap<String, String>);

impl FacilityTags {
    pub fn new(tags: HashMap<String, String>) -> Self {
        Self(tags)
    }

    /// Look up a raw tag, ignoring empty values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn amenity(&self) -> Option<&str> {
        self.get("amenity")
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// Tamil name (`name:ta`).
    pub fn localized_name(&self) -> Option<&str> {
        self.get("name:ta")
    }

    /// First available phone-like field.
    pub fn phone(&self) -> Option<&str> {
        PHONE_KEYS.iter().find_map(|k| self.get(k))
    }

    pub fn has_phone(&self) -> bool {
        self.phone().is_some()
    }

    /// Whether a `phone` or `contact:phone` tag is present.
    pub fn has_contact_phone(&self) -> bool {
        CONTACT_PHONE_KEYS.iter().any(|k| self.get(k).is_some())
    }

    /// Address fragments joined with ", ", or `None` if there are none.
    pub fn address(&self) -> Option<String> {
        let parts: Vec<&str> = ADDRESS_KEYS.iter().filter_map(|k| self.get(k)).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Whether the facility advertises emergency care.
    pub fn emergency(&self) -> bool {
        self.get("emergency") == Some("yes")
            || self.get("healthcare:speciality") == Some("emergency")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FacilityTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_falls_back_through_keys() {
        let tags: FacilityTags = [("contact:phone", "+91 431 2414969")].into_iter().collect();
        assert_eq!(tags.phone(), Some("+91 431 2414969"));

        let tags: FacilityTags = [("mobile", "9876543210")].into_iter().collect();
        assert_eq!(tags.phone(), Some("9876543210"));
        assert!(tags.has_phone());
        assert!(!tags.has_contact_phone());

        let tags: FacilityTags = [("phone", "1"), ("mobile", "2")].into_iter().collect();
        assert_eq!(tags.phone(), Some("1"));
    }

    #[test]
    fn blank_values_are_absent() {
        let tags: FacilityTags = [("phone", "  "), ("name", "")].into_iter().collect();
        assert!(!tags.has_phone());
        assert!(!tags.has_contact_phone());
        assert_eq!(tags.name(), None);
    }

    #[test]
    fn address_joins_present_parts_in_order() {
        let tags: FacilityTags = [
            ("addr:state", "Tamil Nadu"),
            ("addr:street", "Bharathidasan Salai"),
            ("addr:city", "Tiruchirappalli"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            tags.address().as_deref(),
            Some("Bharathidasan Salai, Tiruchirappalli, Tamil Nadu")
        );
        assert_eq!(FacilityTags::default().address(), None);
    }

    #[test]
    fn emergency_flag() {
        let yes: FacilityTags = [("emergency", "yes")].into_iter().collect();
        let speciality: FacilityTags = [("healthcare:speciality", "emergency")]
            .into_iter()
            .collect();
        let no: FacilityTags = [("emergency", "no")].into_iter().collect();
        assert!(yes.emergency());
        assert!(speciality.emergency());
        assert!(!no.emergency());
        assert!(!FacilityTags::default().emergency());
    }

    #[test]
    fn deserializes_from_plain_object() {
        let tags: FacilityTags =
            serde_json::from_str(r#"{"amenity":"clinic","name:ta":"மருத்துவமனை"}"#).unwrap();
        assert_eq!(tags.amenity(), Some("clinic"));
        assert_eq!(tags.localized_name(), Some("மருத்துவமனை"));
        assert_eq!(tags.len(), 2);
    }
}
