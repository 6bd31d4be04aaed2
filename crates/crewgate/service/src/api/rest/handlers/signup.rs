//! Signup handler.

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, Json};
use base64::Engine;
use crewgate_onboarding::{DocumentUpload, RegistrationRequest};
use crewgate_types::{Role, StorageRef, UserId, VerificationStatus};
use serde::{Deserialize, Serialize};

/// One document on the signup wire, base64-encoded.
#[derive(Debug, Deserialize)]
pub struct SignupDocument {
    pub file_name: String,
    pub content_base64: String,
}

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupPayload {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(default)]
    pub documents: Vec<SignupDocument>,
}

/// Signup response: the persisted pending profile.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub documents: Vec<StorageRef>,
}

/// Register a new applicant.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> ApiResult<Json<SignupResponse>> {
    let mut documents = Vec::with_capacity(payload.documents.len());
    for document in payload.documents {
        let content = base64::engine::general_purpose::STANDARD
            .decode(&document.content_base64)
            .map_err(|_| ApiError::Validation {
                field: "documents".to_string(),
                message: format!("document {} is not valid base64", document.file_name),
            })?;
        documents.push(DocumentUpload {
            file_name: document.file_name,
            content,
        });
    }

    let request = RegistrationRequest {
        email: payload.email,
        password: payload.password,
        confirm_password: payload.confirm_password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        role: payload.role,
        documents,
    };

    let profile = state.registration.register(request).await?;

    tracing::info!(user_id = %profile.id, "signup accepted, verification pending");

    Ok(Json(SignupResponse {
        id: profile.id,
        email: profile.email,
        role: profile.role,
        verification_status: profile.verification_status,
        documents: profile.documents,
    }))
}
