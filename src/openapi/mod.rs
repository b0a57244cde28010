use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Apartment Explorer API",
        version = "1.0.0",
        description = r#"
# Apartment Explorer API

Read-only browsing of apartment complexes backed by public sale and rent
transaction records.

## Features

- **Search**: name and address search with year-built, household and hallway filters
- **Map**: complexes inside a viewport
- **Area types**: unit areas grouped by pyeong with the latest sale and jeonse prices
- **Trends**: monthly average sale prices, deposits and rents
- **Nearby**: nearest subway station, assigned and nearby schools

## Caching

Successful responses carry `Cache-Control: public, max-age=N, stale-while-revalidate=N/2`.
Search results are cached for a minute, trends for an hour and station or
school data for a day.

## Prices

All amounts are in 만원 (10,000 KRW).
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080/api/v1", description = "Local development")
    ),
    tags(
        (name = "Apartments", description = "Search, detail, map and compare endpoints"),
        (name = "Market", description = "Area types, deal listings and price trends"),
        (name = "Nearby", description = "Subway and school proximity"),
    ),
    paths(
        // Apartments
        crate::handlers::apartments::get_apartment,
        crate::handlers::apartments::search_apartments,
        crate::handlers::apartments::autocomplete,
        crate::handlers::apartments::apartments_by_bounds,
        crate::handlers::apartments::compare_apartments,

        // Market
        crate::handlers::market::get_area_types,
        crate::handlers::market::list_trades,
        crate::handlers::market::list_rents,
        crate::handlers::market::get_price_trend,
        crate::handlers::market::get_rent_trend,

        // Nearby
        crate::handlers::nearby::get_nearest_station,
        crate::handlers::nearby::get_schools,
    ),
    components(
        schemas(
            crate::models::Apartment,
            crate::models::ApartmentDetail,
            crate::models::BuildingInfo,
            crate::models::FacilityInfo,
            crate::models::UnitsByArea,
            crate::models::AutocompleteItem,
            crate::models::AreaTypeView,
            crate::models::Trade,
            crate::models::Rent,
            crate::models::DealingType,
            crate::models::RentType,
            crate::models::ContractType,
            crate::models::SaleTrendPoint,
            crate::models::RentTrendPoint,
            crate::models::Station,
            crate::models::SchoolInfo,
            crate::models::SchoolItem,
            crate::models::SchoolLevel,
            crate::services::compare::CompareEntry,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_endpoint() {
        let json = serde_json::to_string_pretty(&ApiDocV1::openapi()).unwrap();
        assert!(json.contains("Apartment Explorer API"));
        for path in [
            "/api/v1/apartments/{id}",
            "/api/v1/apartments/search",
            "/api/v1/apartments/autocomplete",
            "/api/v1/apartments/by-bounds",
            "/api/v1/apartments/compare",
            "/api/v1/apartments/{id}/area-types",
            "/api/v1/apartments/{id}/trades",
            "/api/v1/apartments/{id}/rents",
            "/api/v1/apartments/{id}/price-trend",
            "/api/v1/apartments/{id}/rent-trend",
            "/api/v1/apartments/{id}/nearest-station",
            "/api/v1/apartments/{id}/schools",
        ] {
            assert!(json.contains(path), "missing {}", path);
        }
    }
}
