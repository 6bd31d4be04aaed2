use crewgate_providers::{AuthError, DocumentStorageError};
use crewgate_store::StoreError;
use thiserror::Error;

/// Client-correctable request failures, one per failing field. The first
/// failing check wins; later ones are not evaluated.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("at least one document is required")]
    NoDocuments,
}

impl ValidationError {
    /// The request field the failure points at.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::PasswordMismatch => "confirm_password",
            ValidationError::UnknownRole(_) => "role",
            ValidationError::NoDocuments => "documents",
        }
    }
}

/// Registration pipeline failures.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Surfaced only under [`crate::UploadPolicy::AllOrNothing`]; the
    /// best-effort policy logs and skips instead.
    #[error(transparent)]
    DocumentUpload(DocumentStorageError),

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    #[error("registration cancelled by shutdown")]
    Cancelled,
}
