//! System lifecycle handlers.

use crate::api::rest::state::AppState;
use axum::{extract::State, Json};
use crewgate_providers::ProviderMode;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub mode: ProviderMode,
}

/// Liveness endpoint; also reports whether the daemon is running against
/// a configured provider or in stub mode.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        mode: state.mode,
    })
}

/// Response body for system shutdown requests.
#[derive(Debug, Serialize)]
pub struct ShutdownResponse {
    pub status: String,
    pub message: String,
}

/// Request a graceful daemon shutdown. In-flight registrations observe
/// the same signal and surface a cancellation error.
pub async fn shutdown_daemon(State(state): State<AppState>) -> Json<ShutdownResponse> {
    if let Err(err) = state.shutdown_tx.send(true) {
        tracing::warn!("failed to send shutdown signal: {}", err);
        return Json(ShutdownResponse {
            status: "error".to_string(),
            message: "unable to signal shutdown".to_string(),
        });
    }

    Json(ShutdownResponse {
        status: "accepted".to_string(),
        message: "shutdown signal sent".to_string(),
    })
}
