//! Application state for API handlers.

use crewgate_access::AccessGate;
use crewgate_onboarding::{RegistrationService, UploadPolicy};
use crewgate_providers::{ProviderMode, Providers};
use crewgate_review::ReviewQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration pipeline
    pub registration: Arc<RegistrationService>,

    /// Admin review queue
    pub review: Arc<ReviewQueue>,

    /// Verification-gated role router
    pub gate: Arc<AccessGate>,

    /// Which provider bundle was resolved at startup
    pub mode: ProviderMode,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Graceful shutdown signal sender
    pub shutdown_tx: watch::Sender<bool>,
}

impl AppState {
    /// Wire the services around a resolved provider bundle.
    pub fn new(
        providers: &Providers,
        upload_policy: UploadPolicy,
        call_timeout: Duration,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        let registration = RegistrationService::from_providers(providers)
            .with_policy(upload_policy)
            .with_call_timeout(call_timeout)
            .with_shutdown(shutdown_tx.subscribe());

        Self {
            registration: Arc::new(registration),
            review: Arc::new(ReviewQueue::new(
                providers.store.clone(),
                providers.documents.clone(),
            )),
            gate: Arc::new(AccessGate::new(providers.store.clone())),
            mode: providers.mode,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
            shutdown_tx,
        }
    }

    /// Uptime as a human-readable string.
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        }
    }
}
