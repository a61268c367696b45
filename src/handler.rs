//! HTTP request handlers
//!
//! Handlers validate and normalize input, delegate to the alias store or the
//! QR cache, and turn the result into a response. Errors are rendered by
//! [`AppError`]'s `IntoResponse` implementation.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, FormRejection},
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};

use crate::config::Config;
use crate::error::AppError;
use crate::model::{QrRequest, QrResponse, ShortenForm, ShortenResponse};
use crate::qr::QR_SUBDIR;
use crate::store::AppState;
use crate::validation::is_valid_url;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Serves the landing page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Creates a new short URL
///
/// # Form Fields
///
/// - `url` (required) - destination, must be http(s) with a host
/// - `alias` (optional) - custom token, 1-32 of `[A-Za-z0-9_-]`
///
/// # Response
///
/// - **200 OK** - `{"short_url": "http://host/abc123"}`
/// - **400 Bad Request** - missing/invalid URL, invalid alias, alias taken
/// - **413 Payload Too Large** - body above the configured limit
pub async fn shorten_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<ShortenForm>, FormRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Form(form) = form?;

    let url = form.url.trim();
    if url.is_empty() {
        return Err(AppError::MissingUrl);
    }

    // A blank alias means the caller wants a generated token
    let alias = form
        .alias
        .as_deref()
        .map(str::trim)
        .filter(|alias| !alias.is_empty());

    let token = state.store.allocate(alias, url)?;
    tracing::info!(%token, destination = %url, custom = alias.is_some(), "short url created");

    Ok(Json(ShortenResponse {
        short_url: format!("{}/{}", public_origin(&state.config, &headers), token),
    }))
}

/// Redirects a short URL to its destination with **302 Found**
///
/// Unknown tokens get **404 Not Found** with the plain-text body `URL not found`.
pub async fn redirect_url(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let destination = state.store.resolve(&token)?;

    let location = HeaderValue::from_str(&destination).map_err(|e| {
        AppError::Internal(format!("destination for {token} is not a valid header: {e}"))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Returns the absolute URL of a QR image encoding the given URL
///
/// The body is parsed as JSON whatever its `Content-Type`.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{"qr_code": "http://host/static/qr_codes/c984d06aaf.png"}`
/// - **400 Bad Request** - undecodable body, missing or invalid URL
/// - **500 Internal Server Error** - rendering or writing the image failed
pub async fn generate_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<QrResponse>, AppError> {
    let body = body?;
    let request: QrRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::MalformedRequest {
            status: StatusCode::BAD_REQUEST,
            message: "Request body must be a JSON object".to_string(),
        })?;

    let url = request.url.trim().to_string();
    if url.is_empty() {
        return Err(AppError::MissingUrl);
    }
    if !is_valid_url(&url) {
        return Err(AppError::InvalidUrl);
    }

    // Rendering and the PNG write are blocking work
    let cache = state.qr.clone();
    let image = tokio::task::spawn_blocking(move || cache.get_or_create(&url))
        .await
        .map_err(|e| AppError::Internal(format!("qr task failed: {e}")))??;

    Ok(Json(QrResponse {
        qr_code: format!(
            "{}/static/{}/{}",
            public_origin(&state.config, &headers),
            QR_SUBDIR,
            image.file_name
        ),
    }))
}

/// Origin prefixed to generated links
///
/// `BASE_URL` wins; otherwise the request `Host` header is used, and without one
/// the local listen address.
fn public_origin(config: &Config, headers: &HeaderMap) -> String {
    if let Some(base) = &config.base_url {
        return base.clone();
    }

    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .filter(|host| !host.is_empty())
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| config.fallback_origin())
}
