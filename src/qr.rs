//! Content-addressed QR image cache
//!
//! Each URL maps to `{hash}.png`, where `hash` is the first 10 hex characters of
//! the URL's MD5 digest. A file is rendered the first time its URL is requested
//! and never regenerated or invalidated afterwards.
//!
//! Two concurrent first requests for the same URL may both render and write the
//! file. The bytes are identical, so the overwrite is harmless.
//!
//! Truncating the digest to 10 hex characters (40 bits) makes collisions between
//! distinct URLs possible in large populations; a colliding URL would be served
//! the other URL's image. The filename format is kept as is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::Luma;
use qrcode::{EcLevel, QrCode};

use crate::error::AppError;
use crate::validation::is_valid_url;

/// Subdirectory of the static directory that holds QR images
pub const QR_SUBDIR: &str = "qr_codes";

/// Number of hex characters of the digest kept in the filename
pub const HASH_PREFIX_LEN: usize = 10;

/// Pixel width and height of one QR module
const MODULE_PIXELS: u32 = 10;

/// A QR image on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    /// `{hash}.png`
    pub file_name: String,
    pub path: PathBuf,
    /// `true` when this call rendered the file, `false` on a cache hit
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct QrCache {
    dir: PathBuf,
}

impl QrCache {
    /// Opens the cache rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the image for `url`, rendering it only if it is not on disk yet
    pub fn get_or_create(&self, url: &str) -> Result<QrImage, AppError> {
        if !is_valid_url(url) {
            return Err(AppError::InvalidUrl);
        }

        let file_name = image_file_name(url);
        let path = self.dir.join(&file_name);

        if path.exists() {
            tracing::debug!(%file_name, "qr cache hit");
            return Ok(QrImage {
                file_name,
                path,
                created: false,
            });
        }

        render_png(url, &path)?;
        tracing::debug!(%file_name, path = %path.display(), "qr image written");

        Ok(QrImage {
            file_name,
            path,
            created: true,
        })
    }
}

/// First [`HASH_PREFIX_LEN`] hex characters of the MD5 digest of `url`
pub fn content_hash(url: &str) -> String {
    let mut hex = format!("{:x}", md5::compute(url.as_bytes()));
    hex.truncate(HASH_PREFIX_LEN);
    hex
}

/// `{content_hash}.png`
pub fn image_file_name(url: &str) -> String {
    format!("{}.png", content_hash(url))
}

/// Encodes `data` at error-correction level L with the smallest version that
/// fits, then writes a black-on-white PNG with 10px modules and a 4-module border
fn render_png(data: &str, path: &Path) -> Result<(), AppError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .map_err(|e| AppError::Internal(format!("qr encoding failed: {e}")))?;

    let rendered = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    rendered
        .save(path)
        .map_err(|e| AppError::Internal(format!("writing {} failed: {e}", path.display())))
}
