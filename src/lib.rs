//! Biblio client SDK.
//!
//! This crate is the client-side core of the Biblio library lending system:
//! catalog and lending API clients, the data model, and the
//! authenticated-session machinery that keeps "who is logged in" consistent
//! with a backend issuing short-lived access tokens and longer-lived
//! refresh tokens.
//!
//! The interesting part lives in [`api::AuthTransport`]: every
//! authenticated request flows through it, and an expired access token is
//! recovered transparently with a single-flight refresh-and-retry cycle.
//! [`auth::SessionManager`] sits on top, owning hydration at startup and
//! the login/logout lifecycle. UI concerns are out of scope; a UI shell
//! consumes [`BiblioClient`] and the session snapshots it exposes.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;

use api::{AuthApi, AuthTransport, BooksApi, LoansApi, UsersApi};
use auth::SessionManager;
use config::Config;
use storage::{FileStorage, Storage, TokenStore};

/// Fully wired client: one per running application.
///
/// The session object is constructed explicitly and handed to consumers,
/// rather than living in hidden static state.
pub struct BiblioClient {
    transport: Arc<AuthTransport>,
    pub session: Arc<SessionManager>,
    pub books: BooksApi,
    pub loans: LoansApi,
    pub users: UsersApi,
}

impl BiblioClient {
    /// Build a client with file-backed session persistence under the
    /// configured storage directory.
    pub fn new(config: Config) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(config.storage_dir()?)?);
        Self::with_storage(config, storage)
    }

    /// Build a client over a caller-supplied storage backend.
    pub fn with_storage(config: Config, storage: Arc<dyn Storage>) -> Result<Self> {
        let tokens = TokenStore::new(storage);
        let transport = Arc::new(AuthTransport::new(&config, tokens.clone())?);
        let auth = AuthApi::new(transport.clone());
        let session = Arc::new(SessionManager::new(tokens, auth));

        Ok(Self {
            books: BooksApi::new(transport.clone()),
            loans: LoansApi::new(transport.clone()),
            users: UsersApi::new(transport.clone()),
            session,
            transport,
        })
    }

    /// The underlying authenticated transport, for callers issuing
    /// requests outside the typed endpoint clients.
    pub fn transport(&self) -> &Arc<AuthTransport> {
        &self.transport
    }
}
