//! Route definitions for the URL shortener
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::handler::{generate_qr, index, redirect_url, shorten_url};
use crate::store::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Landing page
/// - `POST /shorten` - Creates a short URL from form fields `url` and `alias`
/// - `POST /generate_qr` - Returns the URL of a QR image for a JSON `{"url": ...}`
/// - `GET /static/*` - Static files, including generated QR images
/// - `GET /{token}` - Redirects to the stored destination
///
/// Request bodies larger than `config.max_body_bytes` are rejected with 413.
///
/// # Example Usage
///
/// ```no_run
/// # use qrshort::config::Config;
/// # use qrshort::qr::{QrCache, QR_SUBDIR};
/// # use qrshort::route::create_app;
/// # use qrshort::store::AppState;
/// let config = Config::default();
/// let qr = QrCache::open(config.static_dir.join(QR_SUBDIR)).unwrap();
/// let app = create_app(AppState::new(config, qr));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/", get(index))
        .route("/shorten", post(shorten_url))
        .route("/generate_qr", post(generate_qr))
        .nest_service("/static", static_files)
        // Public redirect endpoint - converts short token to original URL
        .route("/{token}", get(redirect_url))
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        // Inject the application state into all handlers
        .with_state(state)
}
