use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::{
    cached, page_request, paginated, require_f64, validate_id, CacheDuration, CachedResult,
};
use crate::errors::ServiceError;
use crate::models::{Apartment, ApartmentDetail, AutocompleteItem, Period, SearchFilters};
use crate::services::apartments::MapBounds;
use crate::services::compare::{parse_compare_ids, CompareEntry};
use crate::{ApiResponse, AppState, PaginatedResponse};

pub fn apartment_routes() -> Router<AppState> {
    Router::new()
        .route("/apartments/search", get(search_apartments))
        .route("/apartments/autocomplete", get(autocomplete))
        .route("/apartments/by-bounds", get(apartments_by_bounds))
        .route("/apartments/compare", get(compare_apartments))
        .route("/apartments/:id", get(get_apartment))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Search term, at least 2 characters
    pub q: Option<String>,
    pub page: Option<String>,
    /// 1..=100, default 20
    pub limit: Option<String>,
    /// `~1990`, `1990s`, `2000s`, `2010s` or `2020~`
    pub year_built: Option<String>,
    /// `~100`, `100~300`, `300~500`, `500~1000`, `1000~2000` or `2000~`
    pub units: Option<String>,
    /// `계단식`, `복도식` or `혼합식`
    pub hallway_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AutocompleteQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BoundsQuery {
    pub sw_lat: Option<String>,
    pub sw_lng: Option<String>,
    pub ne_lat: Option<String>,
    pub ne_lng: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CompareQuery {
    /// Comma separated apartment ids, at most 4
    pub ids: Option<String>,
    /// `1y`, `3y` (default), `5y` or `all`
    pub period: Option<String>,
}

/// Get apartment detail
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}",
    params(("id" = i32, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Apartment with K-apt building and facility info", body = ApiResponse<ApartmentDetail>),
        (status = 400, description = "Invalid apartment id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Apartments"
)]
pub async fn get_apartment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CachedResult<ApartmentDetail> {
    let id = validate_id(&id)?;
    let detail = state.services.apartments.get_detail(id).await?;
    Ok(cached(CacheDuration::Medium, detail))
}

/// Search apartments by name or address
#[utoipa::path(
    get,
    path = "/api/v1/apartments/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching apartments, busiest first", body = ApiResponse<PaginatedResponse<Apartment>>),
        (status = 400, description = "Search term too short or unknown filter", body = crate::errors::ErrorResponse)
    ),
    tag = "Apartments"
)]
pub async fn search_apartments(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> CachedResult<PaginatedResponse<Apartment>> {
    let filters = SearchFilters::parse(
        params.year_built.as_deref(),
        params.units.as_deref(),
        params.hallway_type.as_deref(),
    )?;
    let page = page_request(
        params.page.as_deref(),
        params.limit.as_deref(),
        state.config.api_default_page_size,
        state.config.api_max_page_size,
    );

    let term = params.q.unwrap_or_default();
    let (items, total) = state.services.apartments.search(&term, filters, page).await?;
    Ok(cached(
        CacheDuration::Short,
        paginated(items, total, page),
    ))
}

/// Suggest apartments while typing
#[utoipa::path(
    get,
    path = "/api/v1/apartments/autocomplete",
    params(AutocompleteQuery),
    responses(
        (status = 200, description = "Suggestions, empty for a blank term", body = ApiResponse<Vec<AutocompleteItem>>)
    ),
    tag = "Apartments"
)]
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteQuery>,
) -> CachedResult<Vec<AutocompleteItem>> {
    let items = state
        .services
        .apartments
        .autocomplete(params.q.as_deref().unwrap_or_default())
        .await?;
    Ok(cached(CacheDuration::Short, items))
}

/// Apartments inside a map viewport
#[utoipa::path(
    get,
    path = "/api/v1/apartments/by-bounds",
    params(BoundsQuery),
    responses(
        (status = 200, description = "Apartments with coordinates inside the box", body = ApiResponse<Vec<Apartment>>),
        (status = 400, description = "Missing or non-numeric coordinates", body = crate::errors::ErrorResponse)
    ),
    tag = "Apartments"
)]
pub async fn apartments_by_bounds(
    State(state): State<AppState>,
    Query(params): Query<BoundsQuery>,
) -> CachedResult<Vec<Apartment>> {
    let bounds = MapBounds {
        sw_lat: require_f64("swLat", params.sw_lat.as_deref())?,
        sw_lng: require_f64("swLng", params.sw_lng.as_deref())?,
        ne_lat: require_f64("neLat", params.ne_lat.as_deref())?,
        ne_lng: require_f64("neLng", params.ne_lng.as_deref())?,
    };
    let items = state.services.apartments.by_bounds(bounds).await?;
    Ok(cached(CacheDuration::Short, items))
}

/// Compare up to four apartments
#[utoipa::path(
    get,
    path = "/api/v1/apartments/compare",
    params(CompareQuery),
    responses(
        (status = 200, description = "Detail, nearest station and sale trend per apartment", body = ApiResponse<Vec<CompareEntry>>),
        (status = 400, description = "Bad id list", body = crate::errors::ErrorResponse),
        (status = 404, description = "An apartment was not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Apartments"
)]
pub async fn compare_apartments(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> CachedResult<Vec<CompareEntry>> {
    let raw_ids = params
        .ids
        .as_deref()
        .ok_or_else(|| ServiceError::InvalidInput("ids is required".to_string()))?;
    let ids = parse_compare_ids(raw_ids)?;
    let period = Period::parse_lenient(params.period.as_deref());

    let entries = state.services.compare.compare(&ids, period).await?;
    Ok(cached(CacheDuration::Medium, entries))
}
