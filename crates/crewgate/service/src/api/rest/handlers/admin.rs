//! Admin review queue handlers.

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use crewgate_review::{DocumentListing, ReviewOutcome};
use crewgate_types::{UserId, UserProfile};

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    UserId::parse(raw).map_err(|_| ApiError::Validation {
        field: "id".to_string(),
        message: format!("{} is not a valid user id", raw),
    })
}

/// Profiles awaiting a verification decision, newest first.
pub async fn list_pending(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let pending = state.review.pending().await?;
    Ok(Json(pending))
}

/// Approved profiles, newest first.
pub async fn list_verified(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let verified = state.review.verified().await?;
    Ok(Json(verified))
}

/// Approve a pending profile. The response carries the committed profile
/// plus the pending queue re-read from the store.
pub async fn approve_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReviewOutcome>> {
    let id = parse_user_id(&id)?;
    let outcome = state.review.approve(&id).await?;
    Ok(Json(outcome))
}

/// Reject a pending profile; same response shape as approve.
pub async fn reject_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReviewOutcome>> {
    let id = parse_user_id(&id)?;
    let outcome = state.review.reject(&id).await?;
    Ok(Json(outcome))
}

/// Resolved document handles for one profile.
pub async fn list_user_documents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DocumentListing>> {
    let id = parse_user_id(&id)?;
    let listing = state.review.documents_for(&id).await?;
    Ok(Json(listing))
}
