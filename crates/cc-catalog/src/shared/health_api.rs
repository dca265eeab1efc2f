//! Health Check Endpoints
//!
//! Standard health check endpoints for probes and monitoring.
//! - /health - Combined health status
//! - /health/live - Liveness probe
//! - /health/ready - Readiness probe (checks MongoDB connectivity)

use axum::{
    routing::get,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use utoipa::ToSchema;
use serde::Serialize;
use chrono::{DateTime, Utc};

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// Service is healthy
    Up,
    /// Service is unhealthy
    Down,
}

/// Individual health check result
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    /// Name of the check
    pub name: String,

    /// Status of the check
    pub status: HealthStatus,

    /// Optional details/message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Time taken for the check in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Full health response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall status
    pub status: HealthStatus,

    /// Current server time
    pub timestamp: DateTime<Utc>,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Individual health checks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
}

/// Simple health status response
#[derive(Debug, Serialize, ToSchema)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Health service state
#[derive(Clone)]
pub struct HealthState {
    /// Database for connectivity check
    pub db: Option<mongodb::Database>,

    /// Service version
    pub version: Option<String>,

    /// Startup time
    pub started_at: DateTime<Utc>,
}

impl HealthState {
    pub fn new(db: Option<mongodb::Database>) -> Self {
        Self {
            db,
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            started_at: Utc::now(),
        }
    }

    async fn check_mongo(&self) -> Option<HealthCheck> {
        let db = self.db.as_ref()?;
        let start = std::time::Instant::now();

        let check = match db.run_command(mongodb::bson::doc! { "ping": 1 }).await {
            Ok(_) => HealthCheck {
                name: "mongodb".to_string(),
                status: HealthStatus::Up,
                message: None,
                duration_ms: Some(start.elapsed().as_millis() as u64),
            },
            Err(e) => HealthCheck {
                name: "mongodb".to_string(),
                status: HealthStatus::Down,
                message: Some(format!("Connection failed: {}", e)),
                duration_ms: Some(start.elapsed().as_millis() as u64),
            },
        };
        Some(check)
    }
}

/// Combined health endpoint
async fn health(State(state): State<HealthState>) -> Response {
    let checks: Vec<HealthCheck> = state.check_mongo().await.into_iter().collect();
    let status = if checks.iter().any(|c| c.status == HealthStatus::Down) {
        HealthStatus::Down
    } else {
        HealthStatus::Up
    };

    let body = HealthResponse {
        status,
        timestamp: Utc::now(),
        version: state.version.clone(),
        checks,
    };

    let code = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(body)).into_response()
}

/// Liveness probe: the process is running
async fn live() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse { status: HealthStatus::Up })
}

/// Readiness probe: dependencies are reachable
async fn ready(State(state): State<HealthState>) -> Response {
    match state.check_mongo().await {
        Some(check) if check.status == HealthStatus::Down => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleHealthResponse { status: HealthStatus::Down }),
        )
            .into_response(),
        _ => Json(SimpleHealthResponse { status: HealthStatus::Up }).into_response(),
    }
}

/// Create the health router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
        .with_state(state)
}
