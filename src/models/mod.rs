//! Data models for Biblio entities.
//!
//! This module contains all the data structures used to represent
//! Biblio data including:
//!
//! - `User`, `Role`: Account profiles and role-based access
//! - `Book`, `Author`, `Category`, `BookStock`: The catalog
//! - `Loan`, `LoanRequest`: The lending workflow
//! - `AuthTokens`, `LoginForm`, `RegisterForm`: Authentication payloads

pub mod book;
pub mod loan;
pub mod user;

pub use book::{Author, Book, BookForm, BookStock, Category};
pub use loan::{
    Loan, LoanFilters, LoanForm, LoanRequest, LoanRequestForm, LoanRequestStatus, LoanStatus,
    PenaltyStatus, PenaltyType,
};
pub use user::{AuthTokens, LoginForm, RegisterForm, Role, User};

use serde::{Deserialize, Serialize};

/// Paginated list envelope returned by the backend's list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub count: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}
