//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;

use crate::discovery::{
    CategoryFilter, ScanError, filter_by_text, find_by_id, nearest_hospital,
};
use crate::domain::{Coordinate, ElementKind, FacilityId};
use crate::geocode::LocateError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/location/gps", post(lock_gps))
        .route("/location/search", post(search_location))
        .route("/scan", post(scan_nearby))
        .route("/facilities", get(list_facilities))
        .route("/facilities/:kind/:id", get(facility_details))
        .route("/emergency", get(emergency_mode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Accept a device geolocation report as the new reference coordinate.
async fn lock_gps(
    State(state): State<AppState>,
    Json(report): Json<GpsReport>,
) -> Result<Json<LocationResponse>, AppError> {
    let coordinate = match report {
        GpsReport::Locked { lat, lon } => Coordinate::new(lat, lon).map_err(LocateError::from)?,
        GpsReport::Denied => return Err(LocateError::GeolocationDenied.into()),
        GpsReport::Unsupported => return Err(LocateError::GeolocationUnsupported.into()),
    };

    state.discovery.set_reference(coordinate);

    Ok(Json(LocationResponse::new(
        "GPS LOCKED".to_string(),
        coordinate,
        None,
    )))
}

/// Geocode a place name and use it as the reference coordinate.
async fn search_location(
    State(state): State<AppState>,
    Json(req): Json<PlaceSearchRequest>,
) -> Result<Json<LocationResponse>, AppError> {
    let place = state.geocoder.search(&req.query).await?;

    state.discovery.set_reference(place.coordinate);

    Ok(Json(LocationResponse::new(
        format!("LOCATION SET: {}", req.query.trim()),
        place.coordinate,
        Some(place.display_name),
    )))
}

/// Scan for facilities around the current reference coordinate.
async fn scan_nearby(State(state): State<AppState>) -> Result<Json<ScanResponse>, AppError> {
    let outcome = state.discovery.scan_current(Utc::now()).await?;
    Ok(Json(ScanResponse::from_outcome(&outcome)))
}

/// Filter the latest scan by category and free text.
async fn list_facilities(
    State(state): State<AppState>,
    Query(req): Query<FacilityListRequest>,
) -> Result<Json<FacilityListResponse>, AppError> {
    let latest = state.discovery.latest().ok_or_else(|| AppError::NotFound {
        message: "NO SCAN RESULTS YET".to_string(),
    })?;

    let filter: CategoryFilter = req
        .category
        .as_deref()
        .unwrap_or_default()
        .parse()
        .unwrap_or_default();

    let top = latest.facilities.first().map(|r| &r.facility.id);
    let facilities = filter_by_text(&latest.facilities, req.q.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|r| filter.matches(r))
        .map(|r| FacilityView::from_ranked(r, Some(&r.facility.id) == top))
        .collect::<Vec<_>>();

    Ok(Json(FacilityListResponse {
        count: facilities.len(),
        facilities,
    }))
}

/// Detail view of one facility from the latest scan.
async fn facility_details(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> Result<Json<FacilityView>, AppError> {
    let kind = ElementKind::parse(&kind).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid element type: {kind}"),
    })?;
    let id = FacilityId::new(kind, id);

    let latest = state.discovery.latest().ok_or_else(|| AppError::NotFound {
        message: "NO SCAN RESULTS YET".to_string(),
    })?;

    let facility = find_by_id(&latest.facilities, &id).ok_or_else(|| AppError::NotFound {
        message: format!("Facility {id} not in latest scan"),
    })?;

    let is_top = latest
        .facilities
        .first()
        .is_some_and(|top| top.facility.id == id);
    Ok(Json(FacilityView::from_ranked(facility, is_top)))
}

/// Highlight the nearest hospital from the latest scan.
async fn emergency_mode(State(state): State<AppState>) -> Result<Json<EmergencyResponse>, AppError> {
    let reference = state
        .discovery
        .reference()
        .ok_or(ScanError::NoReferenceCoordinate)?;

    let latest = state.discovery.latest();
    let hospital = latest
        .as_ref()
        .and_then(|l| nearest_hospital(&l.facilities))
        .ok_or_else(|| AppError::NotFound {
            message: "NO HOSPITALS FOUND".to_string(),
        })?;

    Ok(Json(EmergencyResponse {
        status: "EMERGENCY MODE ACTIVATED! Nearest hospital highlighted.".to_string(),
        reference: Some(reference.into()),
        hospital: FacilityView::from_ranked(hospital, false),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Scan(ScanError),
    Locate(LocateError),
}

impl From<ScanError> for AppError {
    fn from(e: ScanError) -> Self {
        AppError::Scan(e)
    }
}

impl From<LocateError> for AppError {
    fn from(e: LocateError) -> Self {
        AppError::Locate(e)
    }
}

impl AppError {
    /// HTTP status and HUD message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Scan(e) => {
                let status = match e {
                    ScanError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
                    ScanError::NoReferenceCoordinate => StatusCode::BAD_REQUEST,
                    ScanError::AllEndpointsUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    ScanError::NoFacilitiesFound => StatusCode::NOT_FOUND,
                    ScanError::Superseded { .. } => StatusCode::CONFLICT,
                };
                (status, e.hud_message())
            }
            AppError::Locate(e) => {
                let status = match e {
                    LocateError::GeolocationDenied => StatusCode::FORBIDDEN,
                    LocateError::GeolocationUnsupported => StatusCode::NOT_IMPLEMENTED,
                    LocateError::EmptyQuery | LocateError::InvalidCoordinate(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    LocateError::PlaceNotFound { .. } => StatusCode::NOT_FOUND,
                    LocateError::SearchFailed { .. } => StatusCode::BAD_GATEWAY,
                };
                (status, e.hud_message().to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            AppError::Scan(e) => tracing::info!(%status, error = %e, "scan rejected"),
            AppError::Locate(e) => tracing::info!(%status, error = %e, "locate rejected"),
            _ => tracing::info!(%status, error = %message, "request rejected"),
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
