//! Crewgate daemon - workforce onboarding and verification service.
//!
//! The daemon provides:
//! - applicant signup with document intake
//! - the admin verification review queue
//! - verification-gated dashboard access and status derivation

use clap::Parser;
use crewgate_service::error::DaemonResult;
use crewgate_service::{DaemonError, Server, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crewgate daemon CLI.
#[derive(Parser)]
#[command(name = "crewgated")]
#[command(about = "Crewgate daemon - workforce onboarding and verification service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CREWGATE_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "CREWGATE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "CREWGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "CREWGATE_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        configured = config.provider.is_configured(),
        "starting crewgate daemon"
    );

    let server = Server::new(config).await?;
    server.run().await
}
