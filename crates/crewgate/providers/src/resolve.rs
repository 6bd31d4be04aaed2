//! One-shot provider selection.
//!
//! The choice between the HTTP collaborators and the stubs is made
//! exactly once, at process start; the resolved bundle is injected into
//! every service. Nothing swaps a client per call.

use crate::http::{HttpIdentityProvider, HttpObjectStorage};
use crate::stub::{StubIdentityProvider, StubObjectStorage};
use crate::traits::{IdentityProvider, ObjectStorage};
use crewgate_store::{StubVerificationStore, VerificationStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The two configuration values the core depends on. Absence of either
/// switches the whole core into stub mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Platform provider base URL.
    pub endpoint: Option<String>,

    /// Access credential sent with every provider call.
    pub access_key: Option<String>,

    /// Per-call timeout for provider requests, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl ProviderSettings {
    pub fn is_configured(&self) -> bool {
        matches!((&self.endpoint, &self.access_key), (Some(e), Some(k)) if !e.is_empty() && !k.is_empty())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which bundle was selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    Configured,
    Stub,
}

/// The resolved collaborator bundle: identity, document storage, and the
/// verification store behind one selection decision.
#[derive(Clone)]
pub struct Providers {
    pub mode: ProviderMode,
    pub identity: Arc<dyn IdentityProvider>,
    pub documents: Arc<dyn ObjectStorage>,
    pub store: Arc<dyn VerificationStore>,
}

impl Providers {
    /// Resolve the bundle from settings. When both endpoint and access key
    /// are present the HTTP collaborators are built (sharing one reqwest
    /// client) around the given store backend; otherwise everything is
    /// stubbed and the given store is ignored.
    pub fn resolve(
        settings: &ProviderSettings,
        store: Arc<dyn VerificationStore>,
    ) -> Result<Self, reqwest::Error> {
        if !settings.is_configured() {
            tracing::warn!("provider endpoint or access key missing; running in stub mode");
            return Ok(Self::stub());
        }

        let endpoint = settings.endpoint.as_deref().unwrap_or_default();
        let access_key = settings.access_key.as_deref().unwrap_or_default();
        let client = reqwest::Client::builder()
            .timeout(settings.call_timeout())
            .build()?;

        Ok(Self {
            mode: ProviderMode::Configured,
            identity: Arc::new(HttpIdentityProvider::new(
                client.clone(),
                endpoint,
                access_key,
            )),
            documents: Arc::new(HttpObjectStorage::new(client, endpoint, access_key)),
            store,
        })
    }

    /// The all-stub bundle: writes fail uniformly, reads are empty.
    pub fn stub() -> Self {
        Self {
            mode: ProviderMode::Stub,
            identity: Arc::new(StubIdentityProvider),
            documents: Arc::new(StubObjectStorage),
            store: Arc::new(StubVerificationStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewgate_store::MemoryVerificationStore;

    #[test]
    fn missing_credentials_resolve_to_stub_mode() {
        let settings = ProviderSettings {
            endpoint: Some("https://api.example.com".to_string()),
            access_key: None,
            timeout_secs: 10,
        };
        let store: Arc<dyn VerificationStore> = Arc::new(MemoryVerificationStore::new());
        let providers = Providers::resolve(&settings, store).unwrap();
        assert_eq!(providers.mode, ProviderMode::Stub);
    }

    #[test]
    fn empty_credentials_count_as_missing() {
        let settings = ProviderSettings {
            endpoint: Some(String::new()),
            access_key: Some("key".to_string()),
            timeout_secs: 10,
        };
        assert!(!settings.is_configured());
    }

    #[test]
    fn complete_settings_resolve_to_configured_mode() {
        let settings = ProviderSettings {
            endpoint: Some("https://api.example.com".to_string()),
            access_key: Some("key".to_string()),
            timeout_secs: 10,
        };
        let store: Arc<dyn VerificationStore> = Arc::new(MemoryVerificationStore::new());
        let providers = Providers::resolve(&settings, store).unwrap();
        assert_eq!(providers.mode, ProviderMode::Configured);
    }
}
