//! Queries over a ranked result list.

use std::str::FromStr;

use crate::domain::{Category, FacilityId, RankedFacility};

/// First hospital in ranked order, used for auto-framing and emergency mode.
pub fn nearest_hospital(list: &[RankedFacility]) -> Option<&RankedFacility> {
    list.iter().find(|r| r.facility.category.is_hospital())
}

/// Look up a facility by identifier.
pub fn find_by_id<'a>(list: &'a [RankedFacility], id: &FacilityId) -> Option<&'a RankedFacility> {
    list.iter().find(|r| &r.facility.id == id)
}

/// Category filter for list views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, facility: &RankedFacility) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &facility.facility.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(Category::from_amenity(
                &s.to_ascii_lowercase(),
            )))
        }
    }
}

/// Facilities matching a category filter, in ranked order.
pub fn filter_by_category<'a>(
    list: &'a [RankedFacility],
    filter: &CategoryFilter,
) -> Vec<&'a RankedFacility> {
    list.iter().filter(|r| filter.matches(r)).collect()
}

/// Facilities whose display text contains `needle`, case-insensitively.
///
/// A blank needle matches everything.
pub fn filter_by_text<'a>(list: &'a [RankedFacility], needle: &str) -> Vec<&'a RankedFacility> {
    let needle = needle.trim().to_lowercase();
    list.iter()
        .filter(|r| needle.is_empty() || r.search_text().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, ElementKind, Facility, FacilityTags};

    fn ranked(id: u64, tags: &[(&str, &str)]) -> RankedFacility {
        RankedFacility {
            facility: Facility::new(
                FacilityId::new(ElementKind::Node, id),
                Coordinate::new(11.0, 78.0).unwrap(),
                tags.iter().copied().collect::<FacilityTags>(),
            ),
            distance_km: id as f64,
            priority: id as f64,
        }
    }

    fn sample() -> Vec<RankedFacility> {
        vec![
            ranked(1, &[("amenity", "clinic"), ("name", "Cantonment Clinic")]),
            ranked(2, &[("amenity", "hospital"), ("name", "KMC Hospital")]),
            ranked(3, &[("amenity", "pharmacy"), ("name", "Apollo"), ("phone", "0431 999")]),
            ranked(4, &[("amenity", "hospital"), ("name", "Government Hospital")]),
        ]
    }

    #[test]
    fn nearest_hospital_is_first_hospital_in_rank_order() {
        let list = sample();
        assert_eq!(nearest_hospital(&list).map(|r| r.facility.id.id), Some(2));
    }

    #[test]
    fn nearest_hospital_none_without_hospitals() {
        let list = vec![ranked(1, &[("amenity", "pharmacy")])];
        assert!(nearest_hospital(&list).is_none());
    }

    #[test]
    fn find_by_id_matches_kind_and_number() {
        let list = sample();
        let id = FacilityId::new(ElementKind::Node, 3);
        assert!(find_by_id(&list, &id).is_some());
        let way = FacilityId::new(ElementKind::Way, 3);
        assert!(find_by_id(&list, &way).is_none());
    }

    #[test]
    fn category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Hospital".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Hospital))
        );
    }

    #[test]
    fn filter_by_category_keeps_order() {
        let list = sample();
        let hospitals = filter_by_category(&list, &CategoryFilter::Only(Category::Hospital));
        let ids: Vec<u64> = hospitals.iter().map(|r| r.facility.id.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(filter_by_category(&list, &CategoryFilter::All).len(), 4);
    }

    #[test]
    fn filter_by_text_is_case_insensitive() {
        let list = sample();
        let ids: Vec<u64> = filter_by_text(&list, "HOSPITAL")
            .iter()
            .map(|r| r.facility.id.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);

        let by_phone = filter_by_text(&list, "0431");
        assert_eq!(by_phone.len(), 1);

        assert_eq!(filter_by_text(&list, "  ").len(), 4);
        assert!(filter_by_text(&list, "dentist").is_empty());
    }
}
