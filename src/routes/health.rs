//! Health check endpoints.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check (always 200 if the server is up)
//! - `GET /health/ready` - Readiness check (200 if the datastore answers a ping)

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::ServiceState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Store backend tag.
    pub store: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub reason: String,
}

/// Liveness check: `GET /health`
pub async fn health(State(state): State<ServiceState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        store: state.store.backend_tag(),
    })
}

/// Readiness check: `GET /health/ready`
pub async fn ready(State(state): State<ServiceState>) -> (StatusCode, Json<ReadyResponse>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                reason: "datastore reachable".into(),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    ready: false,
                    reason: e.to_string(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.1.0",
            uptime_secs: 60,
            store: "memory",
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"store\":\"memory\""));
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let (status, Json(body)) = ready(State(ServiceState::in_memory())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ready);
    }
}
