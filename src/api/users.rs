//! User management endpoints (admin screens).

use std::sync::Arc;

use crate::models::{PaginatedResponse, User};

use super::endpoints;
use super::transport::RequestSpec;
use super::{ApiError, AuthTransport};

#[derive(Clone)]
pub struct UsersApi {
    transport: Arc<AuthTransport>,
}

impl UsersApi {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: u32) -> Result<PaginatedResponse<User>, ApiError> {
        let spec = RequestSpec::get(endpoints::USERS).with_query("page", page.to_string());
        self.transport.execute(&spec).await
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.transport
            .execute(&RequestSpec::get(endpoints::user_detail(id)))
            .await
    }

    /// Update mutable profile fields, returning the updated profile.
    pub async fn update(&self, id: &str, fields: serde_json::Value) -> Result<User, ApiError> {
        self.transport
            .execute(&RequestSpec::put(endpoints::user_detail(id), fields))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .execute_unit(&RequestSpec::delete(endpoints::user_detail(id)))
            .await
    }
}
