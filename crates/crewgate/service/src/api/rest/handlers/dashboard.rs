//! Dashboard access and status-derivation handlers.

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use crewgate_access::{AccessDecision, DashboardVariant};
use crewgate_status::{MetricsSnapshot, Severity, StatusItem, TierCounts};
use crewgate_types::UserId;
use serde::Serialize;

const USER_ID_HEADER: &str = "x-user-id";

fn authenticated_user(headers: &HeaderMap) -> ApiResult<UserId> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Validation {
            field: USER_ID_HEADER.to_string(),
            message: "missing authenticated user header".to_string(),
        })?;
    UserId::parse(raw).map_err(|_| ApiError::Validation {
        field: USER_ID_HEADER.to_string(),
        message: format!("{} is not a valid user id", raw),
    })
}

/// Route an authenticated user to a dashboard variant. Everything other
/// than an approved profile with a matching role comes back as a
/// non-granted decision, never as a fallthrough dashboard.
pub async fn dashboard_access(
    State(state): State<AppState>,
    Path(role): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<AccessDecision>> {
    let user_id = authenticated_user(&headers)?;
    let decision = state.gate.authorize(&user_id, &role).await?;
    Ok(Json(decision))
}

/// Derived status report on the wire.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub overall: Severity,
    pub badge: &'static str,
    pub counts: TierCounts,
    pub items: Vec<StatusItem>,
}

/// Derive the status items for one dashboard render from a live metrics
/// snapshot. Nothing is cached; every call recomputes.
pub async fn dashboard_status(
    Path(role): Path<String>,
    Json(snapshot): Json<MetricsSnapshot>,
) -> ApiResult<Json<StatusResponse>> {
    if DashboardVariant::from_token(&role).is_none() {
        return Err(ApiError::NotFound(format!("unknown dashboard: {}", role)));
    }
    if snapshot.domain_token() != role {
        return Err(ApiError::Validation {
            field: "domain".to_string(),
            message: format!(
                "snapshot domain {} does not match dashboard {}",
                snapshot.domain_token(),
                role
            ),
        });
    }

    let report = snapshot.derive();
    Ok(Json(StatusResponse {
        overall: report.overall,
        badge: report.badge(),
        counts: report.counts(),
        items: report.items,
    }))
}
