use thiserror::Error;

/// Identity-provider failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider answered and refused the request.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// No provider endpoint/credential configured (stub mode).
    #[error("provider not configured")]
    NotConfigured,

    /// The provider could not be reached.
    #[error("identity provider unreachable: {0}")]
    Transport(String),
}

/// Object-storage failures for document upload/resolution.
#[derive(Debug, Error)]
pub enum DocumentStorageError {
    /// The storage backend refused the upload.
    #[error("document upload failed: {0}")]
    UploadFailed(String),

    /// No provider endpoint/credential configured (stub mode).
    #[error("provider not configured")]
    NotConfigured,

    /// The storage backend could not be reached.
    #[error("object storage unreachable: {0}")]
    Transport(String),
}
