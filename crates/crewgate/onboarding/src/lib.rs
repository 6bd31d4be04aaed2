//! Applicant registration pipeline.
//!
//! Registration is a three-step side-effecting sequence behind one
//! validation gate:
//!
//! 1. validate the request (no network before all checks pass)
//! 2. create the identity, obtaining the id that namespaces every upload
//! 3. upload the documents sequentially under that namespace
//! 4. persist the pending profile with the collected references
//!
//! Per-document upload failures follow an explicit [`UploadPolicy`];
//! every external call is bounded by a timeout and the daemon's shutdown
//! signal, surfaced as distinct error kinds.

#![deny(unsafe_code)]

mod error;
mod service;

pub use error::{RegistrationError, ValidationError};
pub use service::{DocumentUpload, RegistrationRequest, RegistrationService, UploadPolicy};
