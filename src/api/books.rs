//! Catalog endpoints: books, authors, and categories.

use std::sync::Arc;

use crate::models::{Author, Book, BookForm, Category, PaginatedResponse};

use super::endpoints;
use super::transport::RequestSpec;
use super::{ApiError, AuthTransport};

#[derive(Clone)]
pub struct BooksApi {
    transport: Arc<AuthTransport>,
}

impl BooksApi {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: u32) -> Result<PaginatedResponse<Book>, ApiError> {
        let spec = RequestSpec::get(endpoints::BOOKS).with_query("page", page.to_string());
        self.transport.execute(&spec).await
    }

    pub async fn search(&self, query: &str) -> Result<PaginatedResponse<Book>, ApiError> {
        let spec = RequestSpec::get(endpoints::BOOKS).with_query("search", query);
        self.transport.execute(&spec).await
    }

    pub async fn get(&self, id: &str) -> Result<Book, ApiError> {
        self.transport
            .execute(&RequestSpec::get(endpoints::book_detail(id)))
            .await
    }

    pub async fn create(&self, form: &BookForm) -> Result<Book, ApiError> {
        let body = serde_json::to_value(form).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.transport
            .execute(&RequestSpec::post(endpoints::BOOKS, body))
            .await
    }

    pub async fn update(&self, id: &str, form: &BookForm) -> Result<Book, ApiError> {
        let body = serde_json::to_value(form).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.transport
            .execute(&RequestSpec::put(endpoints::book_detail(id), body))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .execute_unit(&RequestSpec::delete(endpoints::book_detail(id)))
            .await
    }

    pub async fn authors(&self) -> Result<PaginatedResponse<Author>, ApiError> {
        self.transport
            .execute(&RequestSpec::get(endpoints::AUTHORS))
            .await
    }

    pub async fn categories(&self) -> Result<PaginatedResponse<Category>, ApiError> {
        self.transport
            .execute(&RequestSpec::get(endpoints::CATEGORIES))
            .await
    }
}
