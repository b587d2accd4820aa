//! # aquahubd, the aquahub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the HTTP controller client (driven adapter)
//! - Construct the shadow states and hand them to the state coordinator
//! - Build the axum router around the coordinator
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use aquahub_adapter_http_axum::router;
use aquahub_adapter_http_axum::state::AppState;
use aquahub_adapter_remote_http::HttpRemoteDevice;
use aquahub_app::coordinator::StateCoordinator;
use aquahub_domain::cover::Cover;
use aquahub_domain::reservoir::Reservoir;
use aquahub_domain::threshold::Threshold;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Remote controller
    let remote = HttpRemoteDevice::new(&config.controller)?;
    tracing::info!(
        controller = remote.base_url(),
        timeout_ms = config.controller.timeout_ms,
        "remote controller configured"
    );

    // Shadow state
    let coordinator = StateCoordinator::new(
        remote,
        Cover::default(),
        Reservoir::new(config.reservoir.capacity)?,
        Threshold::new(i64::from(config.threshold.initial))?,
    )
    .with_deadline(config.controller.timeout());

    // HTTP
    let app = router::build(AppState::new(coordinator));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "aquahubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("aquahubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
