use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use utoipa::ToSchema;

use super::response::ApiResponse;
use crate::cache::RedisCache;
use crate::config::Config;
use crate::db::{Database, PoolStatus};
use crate::errors::ErrorCode;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub database: Database,
    pub cache: Option<RedisCache>,
    pub config: Config,
}

/// Envelope carrying a string payload
#[derive(Debug, Serialize, ToSchema)]
pub struct StringEnvelope {
    /// Result code, 200 on success
    pub code: i32,
    /// Human-readable message
    pub message: String,
    /// Payload (omitted on failure)
    pub data: Option<String>,
    /// Creation time, `yyyy-MM-dd HH:mm:ss`
    pub timestamp: String,
}

/// Envelope carrying a readiness report
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessEnvelope {
    pub code: i32,
    pub message: String,
    pub data: Option<ReadinessReport>,
    pub timestamp: String,
}

/// Status of every collaborator the service depends on
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessReport {
    pub status: String,
    pub database: String,
    pub pool: PoolStatus,
    /// "up", "down" or "disabled"
    pub cache: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Liveness {
    pub status: String,
    pub instance_id: String,
}

/// Greeting endpoint
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "hello",
    responses(
        (status = 200, description = "Greeting", body = StringEnvelope)
    )
)]
pub async fn hello() -> ApiResponse<String> {
    ApiResponse::success("hello world".to_string())
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.config.server.instance_id,
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
        },
        "database": state.database.backend_name(),
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive", body = Liveness)
    )
)]
pub async fn health_live(State(state): State<AppState>) -> ApiResponse<Liveness> {
    ApiResponse::success(Liveness {
        status: "alive".to_string(),
        instance_id: state.config.server.instance_id.clone(),
    })
}

/// Readiness probe: database must answer, cache is reported but optional
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve traffic", body = ReadinessEnvelope),
        (status = 503, description = "Database unreachable", body = ReadinessEnvelope)
    )
)]
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let cache = match &state.cache {
        None => "disabled",
        Some(cache) => match cache.test_connection().await {
            Ok(()) => "up",
            Err(e) => {
                warn!("Cache readiness check failed: {}", e);
                "down"
            }
        },
    };

    match state.database.test_connection().await {
        Ok(()) => ApiResponse::success(ReadinessReport {
            status: "ready".to_string(),
            database: "up".to_string(),
            pool: state.database.pool_status(),
            cache: cache.to_string(),
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::from_code(ErrorCode::ServiceUnavailable)),
            )
                .into_response()
        }
    }
}
