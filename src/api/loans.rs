//! Lending endpoints: loans and loan requests.

use std::sync::Arc;

use crate::models::{
    Loan, LoanFilters, LoanForm, LoanRequest, LoanRequestForm, PaginatedResponse,
};

use super::endpoints;
use super::transport::RequestSpec;
use super::{ApiError, AuthTransport};

#[derive(Clone)]
pub struct LoansApi {
    transport: Arc<AuthTransport>,
}

impl LoansApi {
    pub fn new(transport: Arc<AuthTransport>) -> Self {
        Self { transport }
    }

    // ===== Loan requests =====

    pub async fn list_requests(
        &self,
        page: u32,
    ) -> Result<PaginatedResponse<LoanRequest>, ApiError> {
        let spec =
            RequestSpec::get(endpoints::LOAN_REQUESTS).with_query("page", page.to_string());
        self.transport.execute(&spec).await
    }

    pub async fn get_request(&self, id: &str) -> Result<LoanRequest, ApiError> {
        self.transport
            .execute(&RequestSpec::get(endpoints::loan_request_detail(id)))
            .await
    }

    pub async fn create_request(&self, form: &LoanRequestForm) -> Result<LoanRequest, ApiError> {
        let body = serde_json::to_value(form).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.transport
            .execute(&RequestSpec::post(endpoints::LOAN_REQUESTS, body))
            .await
    }

    pub async fn approve_request(
        &self,
        id: &str,
        message: Option<&str>,
    ) -> Result<LoanRequest, ApiError> {
        let body = serde_json::json!({ "message": message });
        self.transport
            .execute(&RequestSpec::put(endpoints::loan_request_approve(id), body))
            .await
    }

    pub async fn reject_request(
        &self,
        id: &str,
        message: Option<&str>,
    ) -> Result<LoanRequest, ApiError> {
        let body = serde_json::json!({ "message": message });
        self.transport
            .execute(&RequestSpec::put(endpoints::loan_request_reject(id), body))
            .await
    }

    pub async fn cancel_request(&self, id: &str) -> Result<LoanRequest, ApiError> {
        let body = serde_json::json!({});
        self.transport
            .execute(&RequestSpec::put(endpoints::loan_request_cancel(id), body))
            .await
    }

    // ===== Loans =====

    pub async fn list(
        &self,
        filters: &LoanFilters,
        page: u32,
    ) -> Result<PaginatedResponse<Loan>, ApiError> {
        let spec = RequestSpec::get(endpoints::LOANS)
            .with_query_pairs(filters.to_query())
            .with_query("page", page.to_string());
        self.transport.execute(&spec).await
    }

    pub async fn get(&self, id: &str) -> Result<Loan, ApiError> {
        self.transport
            .execute(&RequestSpec::get(endpoints::loan_detail(id)))
            .await
    }

    /// Secretary-only: open a loan directly, bypassing the request flow.
    pub async fn create(&self, form: &LoanForm) -> Result<Loan, ApiError> {
        let body = serde_json::to_value(form).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.transport
            .execute(&RequestSpec::post(endpoints::LOANS, body))
            .await
    }

    pub async fn return_loan(&self, id: &str) -> Result<Loan, ApiError> {
        let body = serde_json::json!({});
        self.transport
            .execute(&RequestSpec::put(endpoints::loan_return(id), body))
            .await
    }

    pub async fn renew(&self, id: &str) -> Result<Loan, ApiError> {
        let body = serde_json::json!({});
        self.transport
            .execute(&RequestSpec::put(endpoints::loan_renew(id), body))
            .await
    }
}
