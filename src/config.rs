//! Runtime configuration loaded from environment variables
//!
//! Every value has a default so the service starts with no `.env` file at all.
//! Values that fail to parse fall back to their default.

use std::env;
use std::path::PathBuf;

/// Default request body limit (16 KiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;

/// Service configuration shared with every handler through [`crate::store::AppState`]
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on (all interfaces)
    pub port: u16,

    /// Public origin used to build absolute URLs (e.g. "https://sho.rt")
    ///
    /// When `None`, the origin is derived from the request `Host` header.
    pub base_url: Option<String>,

    /// Directory served under `/static`; QR images are written to its `qr_codes` child
    pub static_dir: PathBuf,

    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            base_url: None,
            static_dir: PathBuf::from("static"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment
    ///
    /// # Environment Variables
    ///
    /// - `PORT` - Server port number (default: 8080)
    /// - `BASE_URL` - Public origin for generated links (default: request host)
    /// - `STATIC_DIR` - Static file directory (default: "static")
    /// - `MAX_BODY_BYTES` - Request body limit (default: 16384)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let base_url = lookup("BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let static_dir = lookup("STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let max_body_bytes = lookup("MAX_BODY_BYTES")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_body_bytes);

        Self {
            port,
            base_url,
            static_dir,
            max_body_bytes,
        }
    }

    /// Origin used when neither `BASE_URL` nor a `Host` header is available
    pub fn fallback_origin(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}
