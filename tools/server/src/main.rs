//! drivegate server - read-only Google Drive connector for GPT agents.
//!
//! Configuration is read from the environment (and `.env` when present)
//! and validated before the listener is bound.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use drivegate_connector::{ConnectorConfig, DriveService};

#[derive(Parser, Debug)]
#[command(name = "drivegate")]
#[command(about = "Read-only Google Drive connector for GPT agents")]
#[command(version)]
struct Cli {
    /// Address to bind to.
    #[arg(long, default_value = "0.0.0.0", env = "DRIVEGATE_BIND")]
    bind: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000, env = "DRIVEGATE_PORT")]
    port: u16,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "drivegate=debug,drivegate_connector=debug,drivegate_storage=debug,\
         drivegate_http=debug,tower_http=debug"
    } else {
        "drivegate=info,drivegate_connector=info,drivegate_storage=info,\
         drivegate_http=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConnectorConfig::from_env().context("Invalid connector configuration")?;
    for warning in config.startup_warnings() {
        warn!("{}", warning);
    }

    info!(
        auth_mode = %config.auth_mode(),
        allowed_folder_id = %config.allowed_folder_id(),
        "Loaded configuration"
    );

    let service = DriveService::google(config).context("Failed to create Drive service")?;
    let app = drivegate_http::router(service);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
