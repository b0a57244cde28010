use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;

use super::common::{
    cached, page_request, paginated, parse_optional, parse_optional_f64, validate_id,
    CacheDuration, CachedResult,
};
use crate::models::{AreaTypeView, Period, Rent, RentTrendPoint, RentType, SaleTrendPoint, Trade};
use crate::services::transactions::DealListQuery;
use crate::{ApiResponse, AppState, PaginatedResponse};

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/apartments/:id/area-types", get(get_area_types))
        .route("/apartments/:id/trades", get(list_trades))
        .route("/apartments/:id/rents", get(list_rents))
        .route("/apartments/:id/price-trend", get(get_price_trend))
        .route("/apartments/:id/rent-trend", get(get_rent_trend))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TradesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Exclusive area in m²
    pub area: Option<String>,
    /// Default 2020
    pub start_year: Option<String>,
    /// Default current year
    pub end_year: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RentsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// `jeonse` or `monthly`; anything else lists both
    pub rent_type: Option<String>,
    pub area: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PriceTrendQuery {
    /// `1y`, `3y` (default), `5y` or `all`
    pub period: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RentTrendQuery {
    pub period: Option<String>,
    /// `jeonse` (default) or `monthly`
    pub rent_type: Option<String>,
    pub area: Option<String>,
}

fn deal_list_query(
    state: &AppState,
    page: Option<&str>,
    limit: Option<&str>,
    area: Option<&str>,
    start_year: Option<&str>,
    end_year: Option<&str>,
) -> Result<DealListQuery, crate::errors::ServiceError> {
    Ok(DealListQuery {
        page: page_request(
            page,
            limit,
            state.config.api_default_page_size,
            state.config.api_max_page_size,
        ),
        area: parse_optional_f64("area", area)?,
        start_year: parse_optional("startYear", start_year)?,
        end_year: parse_optional("endYear", end_year)?,
    })
}

fn rent_type_of(raw: Option<&str>) -> Option<RentType> {
    raw.and_then(|v| RentType::from_str(v.trim()).ok())
}

/// Pyeong bands with latest prices
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/area-types",
    params(("id" = i32, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Bands in ascending pyeong order", body = ApiResponse<Vec<AreaTypeView>>),
        (status = 400, description = "Invalid apartment id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Market"
)]
pub async fn get_area_types(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CachedResult<Vec<AreaTypeView>> {
    let id = validate_id(&id)?;
    let views = state.services.area_types.list_area_types(id).await?;
    Ok(cached(CacheDuration::Medium, views))
}

/// Sale history
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/trades",
    params(("id" = i32, Path, description = "Apartment ID"), TradesQuery),
    responses(
        (status = 200, description = "Sales, newest first", body = ApiResponse<PaginatedResponse<Trade>>),
        (status = 400, description = "Invalid id or non-numeric filter", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Market"
)]
pub async fn list_trades(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TradesQuery>,
) -> CachedResult<PaginatedResponse<Trade>> {
    let id = validate_id(&id)?;
    let query = deal_list_query(
        &state,
        params.page.as_deref(),
        params.limit.as_deref(),
        params.area.as_deref(),
        params.start_year.as_deref(),
        params.end_year.as_deref(),
    )?;

    let (items, total) = state.services.transactions.list_trades(id, query).await?;
    Ok(cached(
        CacheDuration::Medium,
        paginated(items, total, query.page),
    ))
}

/// Jeonse and monthly rent history
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/rents",
    params(("id" = i32, Path, description = "Apartment ID"), RentsQuery),
    responses(
        (status = 200, description = "Rent contracts, newest first", body = ApiResponse<PaginatedResponse<Rent>>),
        (status = 400, description = "Invalid id or non-numeric filter", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Market"
)]
pub async fn list_rents(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RentsQuery>,
) -> CachedResult<PaginatedResponse<Rent>> {
    let id = validate_id(&id)?;
    let query = deal_list_query(
        &state,
        params.page.as_deref(),
        params.limit.as_deref(),
        params.area.as_deref(),
        params.start_year.as_deref(),
        params.end_year.as_deref(),
    )?;
    let rent_type = rent_type_of(params.rent_type.as_deref());

    let (items, total) = state
        .services
        .transactions
        .list_rents(id, query, rent_type)
        .await?;
    Ok(cached(
        CacheDuration::Medium,
        paginated(items, total, query.page),
    ))
}

/// Monthly average sale price
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/price-trend",
    params(("id" = i32, Path, description = "Apartment ID"), PriceTrendQuery),
    responses(
        (status = 200, description = "Monthly points in ascending order", body = ApiResponse<Vec<SaleTrendPoint>>),
        (status = 400, description = "Invalid id or area", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Market"
)]
pub async fn get_price_trend(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PriceTrendQuery>,
) -> CachedResult<Vec<SaleTrendPoint>> {
    let id = validate_id(&id)?;
    let period = Period::parse_lenient(params.period.as_deref());
    let area = parse_optional_f64("area", params.area.as_deref())?;

    let points = state.services.trends.sale_trend(id, period, area).await?;
    Ok(cached(CacheDuration::Long, points))
}

/// Monthly average deposit and rent
#[utoipa::path(
    get,
    path = "/api/v1/apartments/{id}/rent-trend",
    params(("id" = i32, Path, description = "Apartment ID"), RentTrendQuery),
    responses(
        (status = 200, description = "Monthly points in ascending order", body = ApiResponse<Vec<RentTrendPoint>>),
        (status = 400, description = "Invalid id or area", body = crate::errors::ErrorResponse),
        (status = 404, description = "Apartment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Market"
)]
pub async fn get_rent_trend(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RentTrendQuery>,
) -> CachedResult<Vec<RentTrendPoint>> {
    let id = validate_id(&id)?;
    let period = Period::parse_lenient(params.period.as_deref());
    let rent_type = rent_type_of(params.rent_type.as_deref()).unwrap_or(RentType::Jeonse);
    let area = parse_optional_f64("area", params.area.as_deref())?;

    let points = state
        .services
        .trends
        .rent_trend(id, period, rent_type, area)
        .await?;
    Ok(cached(CacheDuration::Long, points))
}
