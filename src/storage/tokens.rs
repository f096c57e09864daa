use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::User;

use super::Storage;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_DATA_KEY: &str = "user_data";

/// Single source of truth for the persisted credential pair and the cached
/// user profile. The only component that touches the storage layer directly.
///
/// Tokens are opaque strings; no shape validation happens here. Readers never
/// fail: an absent or corrupt value reads as `None`.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn set_access_token(&self, token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, token);
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.storage.set(REFRESH_TOKEN_KEY, token);
    }

    /// The denormalized profile copy saved for fast startup hydration.
    /// May be stale; hydration reconciles it against a live fetch.
    pub fn cached_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_DATA_KEY)?;
        // A literal "undefined" can end up persisted by a buggy writer;
        // treat it like an absent value.
        if raw.is_empty() || raw == "undefined" {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Ignoring unparseable cached user profile");
                None
            }
        }
    }

    pub fn set_cached_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set(USER_DATA_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize user profile for caching"),
        }
    }

    /// Whether a full credential pair is present.
    pub fn has_credentials(&self) -> bool {
        self.access_token().is_some() && self.refresh_token().is_some()
    }

    /// Atomic post-login / post-refresh write of tokens and profile: one
    /// batch write, so a concurrent reader never sees a torn pair.
    pub fn store_session(&self, access_token: &str, refresh_token: &str, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set_many(&[
                (ACCESS_TOKEN_KEY, access_token),
                (REFRESH_TOKEN_KEY, refresh_token),
                (USER_DATA_KEY, &json),
            ]),
            Err(e) => {
                warn!(error = %e, "Failed to serialize user profile, storing tokens only");
                self.storage.set_many(&[
                    (ACCESS_TOKEN_KEY, access_token),
                    (REFRESH_TOKEN_KEY, refresh_token),
                ]);
            }
        }
    }

    /// Remove the credential pair and the cached profile as one logical
    /// operation, never partially.
    pub fn clear_all(&self) {
        self.storage
            .remove_many(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY]);
    }
}
