//! Conversion from Overpass DTOs to domain facilities.

use crate::domain::{Coordinate, ElementKind, Facility, FacilityId, FacilityTags};

use super::types::{Element, OverpassResponse};

/// Error converting a single element.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Element type is not node, way or relation
    #[error("unknown element type: {0}")]
    UnknownKind(String),

    /// Neither `lat`/`lon` nor `center` present
    #[error("element {0} has no coordinates")]
    MissingCoordinate(u64),

    /// Coordinates present but out of range
    #[error("element {id} has invalid coordinates: {reason}")]
    InvalidCoordinate { id: u64, reason: String },
}

/// Convert one element into a facility.
pub fn convert_element(element: &Element) -> Result<Facility, ConversionError> {
    let kind = ElementKind::parse(&element.kind)
        .ok_or_else(|| ConversionError::UnknownKind(element.kind.clone()))?;

    let (lat, lon) = element
        .position()
        .ok_or(ConversionError::MissingCoordinate(element.id))?;

    let location =
        Coordinate::new(lat, lon).map_err(|e| ConversionError::InvalidCoordinate {
            id: element.id,
            reason: e.to_string(),
        })?;

    Ok(Facility::new(
        FacilityId::new(kind, element.id),
        location,
        FacilityTags::new(element.tags.clone()),
    ))
}

/// Convert every usable element of a response, in response order.
///
/// Elements that cannot be converted are skipped so one bad record never
/// discards the batch.
pub fn convert_response(response: &OverpassResponse) -> Vec<Facility> {
    let mut facilities = Vec::with_capacity(response.elements.len());

    for element in &response.elements {
        match convert_element(element) {
            Ok(facility) => facilities.push(facility),
            Err(e) => {
                tracing::debug!(error = %e, "skipping Overpass element");
            }
        }
    }

    facilities
}
