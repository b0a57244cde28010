use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::common::{cached, validate_id, CacheDuration, CachedResult};
use crate::models::{SchoolInfo, Station};
use crate::{ApiResponse, AppState};

pub fn nearby_routes() -> Router<AppState> {
    Router::new()
        .route("/apartments/:id/nearest-station", get(get_nearest_station))
        .route("/apartments/:id/schools", get(get_schools))
}

/// Nearest subway station
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/nearest-station",
    params(("id" = i32, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Station, or null data when none is recorded", body = ApiResponse<Option<Station>>),
        (status = 400, description = "Invalid apartment id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Nearby"
)]
pub async fn get_nearest_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CachedResult<Option<Station>> {
    let id = validate_id(&id)?;
    let station = state.services.apartments.nearest_station(id).await?;
    Ok(cached(CacheDuration::Static, station))
}

/// Assigned elementary school and nearby middle and high schools
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/schools",
    params(("id" = i32, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "School information", body = ApiResponse<SchoolInfo>),
        (status = 400, description = "Invalid apartment id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Nearby"
)]
pub async fn get_schools(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CachedResult<SchoolInfo> {
    let id = validate_id(&id)?;
    let info = state.services.schools.school_info(id).await?;
    Ok(cached(CacheDuration::Static, info))
}
