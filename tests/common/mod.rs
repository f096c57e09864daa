//! Shared helpers for integration tests: a client wired against a mock
//! backend with in-memory storage.

// Each integration test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::MockServer;

use biblio_client::api::AuthTransport;
use biblio_client::config::Config;
use biblio_client::storage::{MemoryStorage, Storage, TokenStore};
use biblio_client::BiblioClient;

pub fn sample_user_json(first_name: &str) -> Value {
    json!({
        "id": "u1",
        "email": "anne@example.fr",
        "role": "READER",
        "first_name": first_name,
        "last_name": "Moreau",
        "active_loans_count": 1
    })
}

pub fn sample_user(first_name: &str) -> biblio_client::models::User {
    serde_json::from_value(sample_user_json(first_name)).expect("sample user")
}

pub fn sample_book_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Candide",
        "authors": [],
        "available_copies": 2,
        "is_available": true
    })
}

/// A transport over in-memory storage, for tests that exercise the refresh
/// pipeline directly.
pub fn transport_with_tokens(
    server: &MockServer,
    access: Option<&str>,
    refresh: Option<&str>,
) -> Arc<AuthTransport> {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let tokens = TokenStore::new(storage);
    if let Some(access) = access {
        tokens.set_access_token(access);
    }
    if let Some(refresh) = refresh {
        tokens.set_refresh_token(refresh);
    }
    Arc::new(AuthTransport::new(&Config::new(server.uri()), tokens).expect("transport"))
}

/// A full client over in-memory storage, for session-level tests.
pub fn client(server: &MockServer) -> BiblioClient {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    BiblioClient::with_storage(Config::new(server.uri()), storage).expect("client")
}

/// A full client whose storage is pre-seeded before construction, as after
/// an earlier process run.
pub fn client_with_seeded_storage(
    server: &MockServer,
    seed: impl FnOnce(&TokenStore),
) -> BiblioClient {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    seed(&TokenStore::new(storage.clone()));
    BiblioClient::with_storage(Config::new(server.uri()), storage).expect("client")
}
