//! REST API client module for the Biblio backend.
//!
//! This module provides the authenticated transport and the typed endpoint
//! clients built on top of it:
//!
//! - `AuthTransport`: attaches the access token to outgoing requests and
//!   transparently recovers from an expired token via a single-flight
//!   refresh-and-retry cycle
//! - `AuthApi`: login, registration, logout, and profile endpoints
//! - `BooksApi`, `LoansApi`, `UsersApi`: conventional CRUD callers
//!
//! The API uses short-lived JWT bearer tokens; the refresh token travels
//! only in the `X-Refresh-Token` header of the refresh and logout calls.

pub mod auth;
pub mod books;
pub mod endpoints;
pub mod error;
pub mod loans;
pub mod transport;
pub mod users;

pub use auth::{AuthApi, LoginResponse};
pub use books::BooksApi;
pub use error::ApiError;
pub use loans::LoansApi;
pub use transport::{AuthTransport, RequestSpec};
pub use users::UsersApi;
