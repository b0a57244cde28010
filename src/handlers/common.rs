use crate::db::PageRequest;
use crate::errors::ServiceError;
use crate::{ApiResponse, PaginatedResponse};
use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::str::FromStr;

/// Cache lifetime presets for read endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDuration {
    None,
    /// Search and autocomplete
    Short,
    /// Detail, area types and deal listings
    Medium,
    /// Aggregated trends
    Long,
    /// Station and school data
    Static,
}

impl CacheDuration {
    pub fn seconds(self) -> u32 {
        match self {
            CacheDuration::None => 0,
            CacheDuration::Short => 60,
            CacheDuration::Medium => 300,
            CacheDuration::Long => 3600,
            CacheDuration::Static => 86400,
        }
    }

    /// `Cache-Control` value, `None` when responses must not be cached
    pub fn header_value(self) -> Option<String> {
        match self.seconds() {
            0 => None,
            secs => Some(format!(
                "public, max-age={}, stale-while-revalidate={}",
                secs,
                secs / 2
            )),
        }
    }
}

/// Response wrapper that adds a `Cache-Control` header
#[derive(Debug)]
pub struct Cached<T> {
    pub cache: CacheDuration,
    pub body: T,
}

impl<T: IntoResponse> IntoResponse for Cached<T> {
    fn into_response(self) -> Response {
        let mut response = self.body.into_response();
        if let Some(value) = self
            .cache
            .header_value()
            .and_then(|v| HeaderValue::from_str(&v).ok())
        {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
        response
    }
}

/// Result type of cacheable JSON endpoints
pub type CachedResult<T> = Result<Cached<Json<ApiResponse<T>>>, ServiceError>;

/// Wraps `data` in a success envelope with the given cache preset
pub fn cached<T: Serialize>(cache: CacheDuration, data: T) -> Cached<Json<ApiResponse<T>>> {
    Cached {
        cache,
        body: Json(ApiResponse::success(data)),
    }
}

pub fn paginated<T>(items: Vec<T>, total: u64, page: PageRequest) -> PaginatedResponse<T> {
    PaginatedResponse {
        items,
        total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages(total),
    }
}

/// Apartment id from a path segment: a positive integer and nothing else
pub fn validate_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServiceError::InvalidInput(format!("invalid apartment id: {}", raw)))
}

/// Optional numeric query parameter; blank counts as absent
pub fn parse_optional<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, ServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ServiceError::InvalidInput(format!("{} must be a number: {}", name, value))),
    }
}

/// Optional finite floating-point query parameter
pub fn parse_optional_f64(name: &str, raw: Option<&str>) -> Result<Option<f64>, ServiceError> {
    match parse_optional::<f64>(name, raw)? {
        Some(v) if !v.is_finite() => Err(ServiceError::InvalidInput(format!(
            "{} must be a finite number",
            name
        ))),
        other => Ok(other),
    }
}

/// Required finite floating-point query parameter
pub fn require_f64(name: &str, raw: Option<&str>) -> Result<f64, ServiceError> {
    parse_optional_f64(name, raw)?
        .ok_or_else(|| ServiceError::InvalidInput(format!("{} is required", name)))
}

/// Clamped page request from raw `page` / `limit` strings. Values that do
/// not parse fall back to the defaults.
pub fn page_request(
    page: Option<&str>,
    limit: Option<&str>,
    default_limit: u64,
    max_limit: u64,
) -> PageRequest {
    let number = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<u64>().ok());
    PageRequest::normalize(number(page), number(limit), default_limit, max_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(1))]
    #[case("42", Some(42))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("abc", None)]
    #[case("12abc", None)]
    fn ids(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(validate_id(raw).ok(), expected);
    }

    #[test]
    fn cache_header_values() {
        assert_eq!(CacheDuration::None.header_value(), None);
        assert_eq!(
            CacheDuration::Short.header_value().as_deref(),
            Some("public, max-age=60, stale-while-revalidate=30")
        );
        assert_eq!(
            CacheDuration::Static.header_value().as_deref(),
            Some("public, max-age=86400, stale-while-revalidate=43200")
        );
    }

    #[test]
    fn cached_sets_header() {
        let response = cached(CacheDuration::Long, 1).into_response();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=3600, stale-while-revalidate=1800"
        );
    }

    #[test]
    fn numeric_params() {
        assert_eq!(parse_optional::<i32>("startYear", Some(" 2021 ")).unwrap(), Some(2021));
        assert_eq!(parse_optional::<i32>("startYear", Some("")).unwrap(), None);
        assert_matches!(
            parse_optional::<i32>("startYear", Some("last")),
            Err(ServiceError::InvalidInput(_))
        );
        assert_matches!(parse_optional_f64("area", Some("NaN")), Err(ServiceError::InvalidInput(_)));
        assert_matches!(require_f64("swLat", None), Err(ServiceError::InvalidInput(_)));
    }

    #[test]
    fn page_request_defaults_and_clamps() {
        let page = page_request(Some("x"), Some("1000"), 20, 100);
        assert_eq!(page, PageRequest { page: 1, limit: 100 });
    }
}
