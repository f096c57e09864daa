//! Authentication endpoints: login, registration, logout, and the live
//! profile fetch.
//!
//! Login and registration are unauthenticated; logout presents the refresh
//! token in the `X-Refresh-Token` header; the profile fetch goes through the
//! authenticated transport and so participates in the refresh cycle.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::models::{LoginForm, RegisterForm, User};

use super::endpoints::{AUTH_LOGIN, AUTH_LOGOUT, REFRESH_TOKEN_HEADER, USERS, USER_PROFILE};
use super::transport::RequestSpec;
use super::{ApiError, AuthTransport};

/// Successful login payload: the profile plus both tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthApi {
    transport: Arc<AuthTransport>,
}

impl AuthApi {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    /// Exchange credentials for a token pair and the account profile.
    /// Does not touch the token store; that is the session layer's job.
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        let response = self
            .transport
            .client()
            .post(self.transport.url(AUTH_LOGIN))
            .json(form)
            .send()
            .await?;
        let response = AuthTransport::check_response(response).await?;
        debug!("Login accepted");
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Create an account. No tokens are issued; the caller logs in
    /// separately.
    pub async fn register(&self, form: &RegisterForm) -> Result<User, ApiError> {
        let response = self
            .transport
            .client()
            .post(self.transport.url(USERS))
            .json(form)
            .send()
            .await?;
        let response = AuthTransport::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Ask the backend to invalidate the given refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let response = self
            .transport
            .client()
            .post(self.transport.url(AUTH_LOGOUT))
            .header(REFRESH_TOKEN_HEADER, format!("Bearer {}", refresh_token))
            .send()
            .await?;
        AuthTransport::check_response(response).await.map(|_| ())
    }

    /// Fetch the live profile for the authenticated account.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.transport.execute(&RequestSpec::get(USER_PROFILE)).await
    }
}
