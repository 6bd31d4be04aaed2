//! Server setup and lifecycle management.

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::{ServiceConfig, StorageConfig};
use crate::error::{DaemonError, DaemonResult};
use crewgate_providers::Providers;
use crewgate_store::{MemoryVerificationStore, PostgresVerificationStore, VerificationStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// The crewgate daemon server.
pub struct Server {
    config: ServiceConfig,
    state: AppState,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Resolve the provider bundle and wire the application state.
    pub async fn new(config: ServiceConfig) -> DaemonResult<Self> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let providers = if config.provider.is_configured() {
            let store = build_store(&config.storage).await?;
            Providers::resolve(&config.provider, store)
                .map_err(|e| DaemonError::Config(e.to_string()))?
        } else {
            Providers::stub()
        };

        let state = AppState::new(
            &providers,
            config.upload_policy,
            config.provider.call_timeout(),
            shutdown_tx,
        );

        Ok(Self {
            config,
            state,
            shutdown_rx,
        })
    }

    /// Run the server until ctrl-c, SIGTERM, or a shutdown request.
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = create_router(self.state.clone());

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("crewgate daemon listening on {}", addr);
        tracing::info!(mode = ?self.state.mode, "provider bundle resolved");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.shutdown_rx))
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("crewgate daemon shutting down");
        Ok(())
    }
}

async fn build_store(config: &StorageConfig) -> DaemonResult<Arc<dyn VerificationStore>> {
    match config {
        StorageConfig::Memory => Ok(Arc::new(MemoryVerificationStore::new())),
        StorageConfig::Postgres {
            url,
            max_connections,
            connect_timeout_secs,
        } => {
            let store =
                PostgresVerificationStore::new(url, *max_connections, *connect_timeout_secs)
                    .await?;
            Ok(Arc::new(store))
        }
    }
}

/// Resolves on ctrl-c, SIGTERM, or the in-process shutdown request.
async fn shutdown_signal(mut shutdown_rx: watch::Receiver<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let requested = async {
        let _ = shutdown_rx.changed().await;
    };

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received ctrl-c, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received terminate signal, initiating graceful shutdown");
        }
        _ = requested => {
            tracing::info!("shutdown requested via api, initiating graceful shutdown");
        }
    }
}
