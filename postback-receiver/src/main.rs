//! Signhost postback receiver - web server binary.
//!
//! This binary:
//! - Loads the Signhost credentials (refusing to start without them)
//! - Receives postbacks and verifies header and checksum
//! - Forwards verified postbacks to RabbitMQ, or logs them when no broker is set
//! - Returns 200 OK for every postback

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use signhost_postback::{router, AppState, Config, LogSink, PostbackSink, Publisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("postback_receiver_starting");

    let config = Config::from_env().context("Invalid configuration")?;
    info!(
        port = config.port,
        max_body_bytes = config.max_body_bytes,
        rabbitmq_configured = config.cloudamqp_url.is_some(),
        "config_loaded"
    );

    let publisher = config.cloudamqp_url.clone().map(Publisher::new);
    let sink: Arc<dyn PostbackSink> = match &publisher {
        Some(publisher) => {
            info!("rabbitmq_publisher_created");
            Arc::new(publisher.clone())
        }
        None => {
            info!("log_sink_selected");
            Arc::new(LogSink)
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, sink));

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "postback_receiver_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(publisher) = publisher {
        publisher.close().await;
    }

    info!("postback_receiver_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("postback_receiver_shutting_down");
}
