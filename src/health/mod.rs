/*!
 * # Health Check Module
 *
 * - Liveness (`/health`) - process is up
 * - Readiness (`/health/ready`) - the transaction store answers a ping
 * - Version (`/health/version`) - build information
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, error};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Clone)]
pub struct HealthState {
    pub db_pool: Arc<DatabaseConnection>,
    pub start_time: SystemTime,
}

impl HealthState {
    pub fn new(db_pool: Arc<DatabaseConnection>) -> Self {
        Self {
            db_pool,
            start_time: SystemTime::now(),
        }
    }

    pub fn uptime(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs()
    }

    pub async fn database_status(&self) -> HealthStatus {
        match crate::db::check_connection(&self.db_pool).await {
            Ok(()) => HealthStatus::Up,
            Err(e) => {
                error!("Database health check failed: {}", e);
                HealthStatus::Down
            }
        }
    }
}

/// Returns build and version information
pub async fn version_info() -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "commit": option_env!("GIT_HASH").unwrap_or("unknown"),
    }))
}

/// Liveness endpoint
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    debug!("Health check endpoint called");

    (
        StatusCode::OK,
        Json(json!({
            "status": HealthStatus::Up,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_seconds": state.uptime(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Readiness endpoint
pub async fn readiness_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    debug!("Readiness check endpoint called");

    let database = state.database_status().await;
    let status_code = match database {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(json!({
            "ready": database == HealthStatus::Up,
            "checks": { "database": database },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Creates router with health check endpoints
pub fn health_routes(db_pool: Arc<DatabaseConnection>) -> Router {
    let health_state = Arc::new(HealthState::new(db_pool));

    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/version", get(version_info))
        .with_state(health_state)
}
