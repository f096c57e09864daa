//! Authenticated HTTP transport with transparent token refresh.
//!
//! Every authenticated request goes through `AuthTransport::execute`, which
//! attaches the stored access token and recovers from a 401 by refreshing
//! the token and replaying the request once. The refresh cycle is
//! single-flight: while one refresh is outstanding, every other request that
//! hits a 401 parks on a completion handle and is replayed against the new
//! token when the refresh settles.

use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::config::Config;
use crate::storage::TokenStore;

use super::endpoints::{AUTH_REFRESH, REFRESH_TOKEN_HEADER};
use super::ApiError;

/// Immutable description of an API request.
///
/// A replay rebuilds the request from this descriptor; retry state lives in
/// the transport's control flow rather than in a flag on a mutable request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    refresh: String,
}

/// Outcome shared with parked requests: the new access token, or the reason
/// the session ended.
type RefreshOutcome = Result<String, String>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Authenticated request pipeline.
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections internally.
pub struct AuthTransport {
    client: Client,
    base_url: String,
    tokens: TokenStore,
    refresh: Mutex<RefreshState>,
}

impl AuthTransport {
    pub fn new(config: &Config, tokens: TokenStore) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
            refresh: Mutex::new(RefreshState::default()),
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Execute a request, decoding a JSON response body.
    pub async fn execute<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T, ApiError> {
        let response = self.execute_raw(spec).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Execute a request, discarding any response body.
    pub async fn execute_unit(&self, spec: &RequestSpec) -> Result<(), ApiError> {
        self.execute_raw(spec).await.map(|_| ())
    }

    async fn execute_raw(&self, spec: &RequestSpec) -> Result<reqwest::Response, ApiError> {
        let response = self.send(spec, self.tokens.access_token()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_response(response).await;
        }

        debug!(path = %spec.path, "Request rejected with 401, entering refresh path");
        let token = self.refreshed_token().await?;

        // Exactly one replay per original request. A 401 on the replay is a
        // definitive authentication failure and never re-enters the refresh
        // path, so an endpoint that keeps rejecting us cannot loop.
        let response = self.send(spec, Some(token)).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(path = %spec.path, "Replay rejected with 401 after refresh");
            return Err(ApiError::Unauthorized);
        }
        Self::check_response(response).await
    }

    async fn send(
        &self,
        spec: &RequestSpec,
        token: Option<String>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.client.request(spec.method.clone(), self.url(&spec.path));
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(ref body) = spec.body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        Ok(request.send().await?)
    }

    /// Check if response is successful, returning an error with body if not.
    pub(crate) async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Obtain a fresh access token, coordinating with any refresh already in
    /// flight. The caller that finds no refresh outstanding becomes the
    /// leader and performs the round trip; everyone else parks on a oneshot
    /// handle and is woken with the leader's outcome.
    async fn refreshed_token(&self) -> Result<String, ApiError> {
        let parked = {
            let mut state = self.refresh.lock().await;
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = parked {
            debug!("Refresh already in flight, parking request");
            return match rx.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(reason)) => Err(ApiError::SessionExpired { reason }),
                // Leader dropped without settling; treat as a dead session.
                Err(_) => Err(ApiError::SessionExpired {
                    reason: "refresh abandoned".to_string(),
                }),
            };
        }

        let outcome = self.run_refresh().await;

        // Swap the waiter list out atomically so every parked request is
        // completed exactly once, then clear the in-flight mark so a later
        // 401 can start a new cycle.
        let waiters = {
            let mut state = self.refresh.lock().await;
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        let shared: RefreshOutcome = match &outcome {
            Ok(token) => Ok(token.clone()),
            Err(ApiError::SessionExpired { reason }) => Err(reason.clone()),
            Err(err) => Err(err.to_string()),
        };
        for waiter in waiters {
            // A parked request may itself have been cancelled; ignore.
            let _ = waiter.send(shared.clone());
        }

        outcome
    }

    /// The refresh round trip itself. On success both tokens are stored
    /// before anyone is woken; on failure the session is over and the store
    /// is cleared in full.
    async fn run_refresh(&self) -> Result<String, ApiError> {
        let refresh_token = match self.tokens.refresh_token() {
            Some(token) => token,
            None => {
                self.tokens.clear_all();
                return Err(ApiError::SessionExpired {
                    reason: "no refresh token stored".to_string(),
                });
            }
        };

        match self.request_new_tokens(&refresh_token).await {
            Ok(tokens) => {
                self.tokens.set_access_token(&tokens.access);
                self.tokens.set_refresh_token(&tokens.refresh);
                debug!("Access token refreshed");
                Ok(tokens.access)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed, ending session");
                self.tokens.clear_all();
                Err(ApiError::SessionExpired {
                    reason: err.to_string(),
                })
            }
        }
    }

    async fn request_new_tokens(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        let response = self
            .client
            .post(self.url(AUTH_REFRESH))
            .header(REFRESH_TOKEN_HEADER, format!("Bearer {}", refresh_token))
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
