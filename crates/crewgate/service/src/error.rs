//! Error types for the crewgate daemon.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crewgate_access::AccessError;
use crewgate_onboarding::RegistrationError;
use crewgate_providers::{AuthError, DocumentStorageError};
use crewgate_review::ReviewError;
use crewgate_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Daemon-level errors.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("server error: {0}")]
    Server(String),

    /// Store error during startup
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for daemon operations.
pub type DaemonResult<T> = Result<T, DaemonError>;

/// API-surface errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-correctable request failure, tied to one field.
    #[error("validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Conflict (e.g. already exists)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Attempted lifecycle transition out of a terminal state
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Provider not configured (stub mode write)
    #[error("provider not configured")]
    NotConfigured,

    /// Upstream provider failure
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Collaborator call timed out
    #[error("timed out: {0}")]
    Timeout(String),

    /// Daemon is shutting down
    #[error("shutting down")]
    ShuttingDown,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            ApiError::NotConfigured => (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ApiError::ShuttingDown => (StatusCode::SERVICE_UNAVAILABLE, "SHUTTING_DOWN"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let field = match &self {
            ApiError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(message) => ApiError::NotFound(message),
            StoreError::Conflict(message) => ApiError::Conflict(message),
            StoreError::InvalidTransition(message) => ApiError::InvalidTransition(message),
            StoreError::NotConfigured => ApiError::NotConfigured,
            StoreError::Serialization(message) | StoreError::Backend(message) => {
                ApiError::Internal(message)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotConfigured => ApiError::NotConfigured,
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<DocumentStorageError> for ApiError {
    fn from(err: DocumentStorageError) -> Self {
        match err {
            DocumentStorageError::NotConfigured => ApiError::NotConfigured,
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(validation) => ApiError::Validation {
                field: validation.field().to_string(),
                message: validation.to_string(),
            },
            RegistrationError::Auth(auth) => auth.into(),
            RegistrationError::DocumentUpload(storage) => storage.into(),
            RegistrationError::Persistence(store) => store.into(),
            RegistrationError::Timeout { operation } => ApiError::Timeout(operation.to_string()),
            RegistrationError::Cancelled => ApiError::ShuttingDown,
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Store(store) => store.into(),
            ReviewError::Documents(storage) => storage.into(),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Store(store) => store.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation {
                field: "role".to_string(),
                message: "unknown role".to_string(),
            }
            .into_response()
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::InvalidTransition("x".to_string())
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::NotConfigured.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(StoreError::InvalidTransition("x".to_string())),
            ApiError::InvalidTransition(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::NotConfigured),
            ApiError::NotConfigured
        ));
    }

    #[test]
    fn test_registration_validation_keeps_the_field() {
        let err = ApiError::from(RegistrationError::Validation(
            crewgate_onboarding::ValidationError::NoDocuments,
        ));
        match err {
            ApiError::Validation { field, .. } => assert_eq!(field, "documents"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
