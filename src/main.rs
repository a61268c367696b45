//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Prepares the QR image directory
//! - Starts the HTTP server with graceful shutdown support

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use qrshort::config::Config;
use qrshort::qr::{QrCache, QR_SUBDIR};
use qrshort::route::create_app;
use qrshort::store::AppState;

/// Application entry point
///
/// See [`Config::from_env`] for the environment variables read at startup.
/// `RUST_LOG` overrides the default log filter.
#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qrshort=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();

    let qr_dir = config.static_dir.join(QR_SUBDIR);
    let qr = QrCache::open(&qr_dir).inspect_err(|e| {
        tracing::error!(dir = %qr_dir.display(), error = %e, "cannot create qr directory");
    })?;

    let port = config.port;
    let state = AppState::new(config, qr);

    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(%addr, qr_dir = %qr_dir.display(), "server running");

    // Serve until SIGTERM or SIGINT; in-flight requests are allowed to finish
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received
///
/// The alias mapping lives only in memory, so everything shortened during this
/// run is gone once the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
