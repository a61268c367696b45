//! In-memory alias store and shared application state
//!
//! The store is the only owner of the token → destination mapping and the sole
//! authority on token uniqueness. Nothing is persisted; the mapping is lost when
//! the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::{distr::Alphanumeric, Rng};

use crate::config::Config;
use crate::error::AppError;
use crate::qr::QrCache;
use crate::validation::{is_valid_url, validate_alias};

/// Length of system-generated tokens
pub const TOKEN_LENGTH: usize = 6;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AliasStore>,
    pub qr: Arc<QrCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, qr: QrCache) -> Self {
        Self {
            store: Arc::new(AliasStore::new()),
            qr: Arc::new(qr),
            config: Arc::new(config),
        }
    }
}

/// Maps short tokens to destination URLs
///
/// Entries are created by [`AliasStore::allocate`] and never updated or removed.
#[derive(Debug, Default)]
pub struct AliasStore {
    links: RwLock<HashMap<String, String>>,
}

impl AliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `destination` under `requested_alias`, or under a fresh random token
    ///
    /// The destination and alias are validated before the map is touched. The
    /// uniqueness check and the insertion happen under one write lock, so two
    /// concurrent requests can never both claim the same token.
    pub fn allocate(
        &self,
        requested_alias: Option<&str>,
        destination: &str,
    ) -> Result<String, AppError> {
        self.allocate_with(requested_alias, destination, random_token)
    }

    fn allocate_with<G>(
        &self,
        requested_alias: Option<&str>,
        destination: &str,
        mut generate: G,
    ) -> Result<String, AppError>
    where
        G: FnMut() -> String,
    {
        if !is_valid_url(destination) {
            return Err(AppError::InvalidUrl);
        }
        if let Some(alias) = requested_alias {
            validate_alias(alias)?;
        }

        let mut links = self.links.write();

        let token = match requested_alias {
            Some(alias) if links.contains_key(alias) => return Err(AppError::AliasTaken),
            Some(alias) => alias.to_string(),
            // 62^6 candidates; a collision almost never happens, so the loop is left uncapped
            None => loop {
                let candidate = generate();
                if !links.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        links.insert(token.clone(), destination.to_string());
        Ok(token)
    }

    /// Looks up the destination for `token`
    pub fn resolve(&self, token: &str) -> Result<String, AppError> {
        self.links
            .read()
            .get(token)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }
}

/// Draws a token of [`TOKEN_LENGTH`] characters uniformly from `[A-Za-z0-9]`
pub fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
