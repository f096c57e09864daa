//! Endpoint paths for the Biblio REST backend.
//!
//! Paths are relative to the configured base URL and keep the backend's
//! trailing-slash convention.

/// Header carrying the refresh token on the refresh and logout calls.
pub const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";

pub const AUTH_LOGIN: &str = "/auth/login/";
pub const AUTH_LOGOUT: &str = "/auth/logout/";
pub const AUTH_REFRESH: &str = "/auth/refresh/";

pub const USERS: &str = "/users/";
pub const USER_PROFILE: &str = "/users/profile/";

pub fn user_detail(id: &str) -> String {
    format!("/users/{}/", id)
}

pub const BOOKS: &str = "/books/";

pub fn book_detail(id: &str) -> String {
    format!("/books/{}/", id)
}

pub const AUTHORS: &str = "/authors/";
pub const CATEGORIES: &str = "/categories/";

pub const LOANS: &str = "/loans/";

pub fn loan_detail(id: &str) -> String {
    format!("/loans/{}/", id)
}

pub fn loan_return(id: &str) -> String {
    format!("/loans/{}/return/", id)
}

pub fn loan_renew(id: &str) -> String {
    format!("/loans/{}/renew/", id)
}

pub const LOAN_REQUESTS: &str = "/loan-requests/";

pub fn loan_request_detail(id: &str) -> String {
    format!("/loan-requests/{}/", id)
}

pub fn loan_request_approve(id: &str) -> String {
    format!("/loan-requests/{}/approve/", id)
}

pub fn loan_request_reject(id: &str) -> String {
    format!("/loan-requests/{}/reject/", id)
}

pub fn loan_request_cancel(id: &str) -> String {
    format!("/loan-requests/{}/cancel/", id)
}
