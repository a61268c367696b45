//! Request and response payloads

use serde::{Deserialize, Serialize};

/// Form fields accepted by `POST /shorten`
///
/// # Example
/// `url=https%3A%2F%2Fexample.com%2Flong&alias=my-link`
#[derive(Deserialize, Debug, Default)]
pub struct ShortenForm {
    /// The destination URL; a missing field is reported as "URL is required"
    #[serde(default)]
    pub url: String,

    /// Optional custom token; blank means "generate one"
    #[serde(default)]
    pub alias: Option<String>,
}

/// Response returned after successfully creating a short URL
///
/// # Example
/// ```json
/// { "short_url": "http://localhost:8080/abc123" }
/// ```
#[derive(Serialize, Deserialize, Debug)]
pub struct ShortenResponse {
    pub short_url: String,
}

/// JSON body accepted by `POST /generate_qr`
#[derive(Deserialize, Debug, Default)]
pub struct QrRequest {
    #[serde(default)]
    pub url: String,
}

/// Response carrying the absolute URL of the QR image
///
/// # Example
/// ```json
/// { "qr_code": "http://localhost:8080/static/qr_codes/c984d06aaf.png" }
/// ```
#[derive(Serialize, Deserialize, Debug)]
pub struct QrResponse {
    pub qr_code: String,
}
