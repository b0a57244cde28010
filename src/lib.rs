//! Apartment Explorer API Library
//!
//! Read-only browsing of apartment complexes, their unit area types and the
//! public sale and rent transactions recorded against them.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod favorites;
pub mod format;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services =
            handlers::AppServices::new(db.clone(), services::QuerySettings::from(&config));
        Self {
            db,
            config,
            services,
        }
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(ResponseMeta::capture()),
        }
    }
}


/// Every `/api/v1` route
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::apartments::apartment_routes())
        .merge(handlers::market::market_routes())
        .merge(handlers::nearby::nearby_routes())
}

/// Full application router without CORS, which depends on deployment config
pub fn app_router(state: AppState) -> Router {
    let db = state.db.clone();

    Router::<AppState>::new()
        .route("/", get(|| async { "apt-explorer-api up" }))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
        .nest("/health", health::health_routes(db))
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}

pub mod prelude {
    pub use crate::db::*;
    pub use crate::errors::*;
    pub use crate::favorites::{FavoriteSet, FavoriteStore};
    pub use crate::health::*;
    pub use crate::models::*;
    pub use crate::openapi::*;
    pub use crate::services::*;
    pub use crate::tracing::*;
}
