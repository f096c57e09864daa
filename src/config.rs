//! Client configuration management.
//!
//! This module handles the settings a `BiblioClient` is constructed from:
//! the backend base URL, the request timeout, and the directory used for
//! persisted session state.
//!
//! Settings can be supplied explicitly or read from the environment
//! (`BIBLIO_API_BASE_URL`, `BIBLIO_STORAGE_DIR`), with `.env` files
//! honoured via dotenvy.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Application name used for storage directory paths
const APP_NAME: &str = "biblio-client";

/// Default backend base URL for local development
const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// HTTP request timeout in seconds.
/// 10s matches the backend's own gateway timeout while failing fast enough
/// for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Biblio REST backend, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Directory for persisted session state. None selects the platform
    /// data directory.
    pub storage_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            storage_dir: None,
        }
    }

    /// Build a configuration from the environment, loading a `.env` file
    /// if one is present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let base_url =
            std::env::var("BIBLIO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        if let Ok(dir) = std::env::var("BIBLIO_STORAGE_DIR") {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Resolve the directory persisted session state lives in.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
