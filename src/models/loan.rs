use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Book, User};

/// Standard loan duration granted on approval.
pub const LOAN_DURATION_DAYS: i64 = 14;

/// Maximum number of times a single loan may be renewed.
pub const MAX_RENEWALS: u32 = 2;

/// Maximum number of simultaneously active loans per reader.
pub const MAX_CONCURRENT_LOANS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    Returned,
    Overdue,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanRequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyType {
    LateReturn,
    LostBook,
    DamagedBook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyStatus {
    Pending,
    Paid,
    Waived,
}

/// A reader's request to borrow a book, awaiting a secretary's decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub request_date: String,
    pub requested_due_date: String,
    pub status: LoanRequestStatus,
    #[serde(default)]
    pub response_date: Option<String>,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub processed_by: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub book: Option<Book>,
}

/// An active or settled loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub loan_date: String,
    /// Due date in `YYYY-MM-DD` form.
    pub due_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    pub status: LoanStatus,
    #[serde(default)]
    pub renewal_count: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub book: Option<Book>,
}

impl Loan {
    /// Whether the loan is past due as of today. An unparseable due date is
    /// treated as not overdue; the backend's OVERDUE status is authoritative.
    pub fn is_past_due(&self) -> bool {
        if self.status != LoanStatus::Active {
            return false;
        }
        match NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d") {
            Ok(due) => Utc::now().date_naive() > due,
            Err(_) => false,
        }
    }

    pub fn can_renew(&self) -> bool {
        self.status == LoanStatus::Active && self.renewal_count < MAX_RENEWALS
    }
}

/// Write payload for a reader creating a loan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequestForm {
    pub book_id: String,
    pub requested_due_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Write payload for a secretary creating a loan directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanForm {
    pub user_id: String,
    pub book_id: String,
    pub due_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query filters for loan listings.
#[derive(Debug, Clone, Default)]
pub struct LoanFilters {
    pub status: Option<LoanStatus>,
    pub user_id: Option<String>,
    pub overdue: Option<bool>,
}

impl LoanFilters {
    /// Flatten into query-string pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            // serde gives the SCREAMING_SNAKE_CASE wire name, quoted
            let value = serde_json::to_string(&status).unwrap_or_default();
            pairs.push(("status".to_string(), value.trim_matches('"').to_string()));
        }
        if let Some(ref user_id) = self.user_id {
            pairs.push(("userId".to_string(), user_id.clone()));
        }
        if let Some(overdue) = self.overdue {
            pairs.push(("overdue".to_string(), overdue.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_status_wire_format() {
        let status: LoanStatus = serde_json::from_str("\"OVERDUE\"").unwrap();
        assert_eq!(status, LoanStatus::Overdue);
        assert_eq!(
            serde_json::to_string(&LoanRequestStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }

    #[test]
    fn test_parse_loan_request() {
        let json = r#"{
            "id": "r1", "userId": "u1", "bookId": "b1",
            "requestDate": "2025-03-01", "requestedDueDate": "2025-03-15",
            "status": "PENDING"
        }"#;
        let request: LoanRequest = serde_json::from_str(json).expect("request should parse");
        assert_eq!(request.status, LoanRequestStatus::Pending);
        assert!(request.processed_by.is_none());
    }

    #[test]
    fn test_loan_renewal_limit() {
        let json = r#"{
            "id": "l1", "userId": "u1", "bookId": "b1",
            "loanDate": "2025-03-01", "dueDate": "2025-03-15",
            "status": "ACTIVE", "renewalCount": 2
        }"#;
        let loan: Loan = serde_json::from_str(json).expect("loan should parse");
        assert!(!loan.can_renew());
    }

    #[test]
    fn test_past_due_only_applies_to_active_loans() {
        let json = r#"{
            "id": "l2", "userId": "u1", "bookId": "b1",
            "loanDate": "2020-01-01", "dueDate": "2020-01-15",
            "returnDate": "2020-01-14", "status": "RETURNED"
        }"#;
        let loan: Loan = serde_json::from_str(json).expect("loan should parse");
        assert!(!loan.is_past_due());
    }

    #[test]
    fn test_filters_to_query() {
        let filters = LoanFilters {
            status: Some(LoanStatus::Active),
            user_id: Some("u1".to_string()),
            overdue: None,
        };
        let pairs = filters.to_query();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("status".to_string(), "ACTIVE".to_string()));
        assert_eq!(pairs[1], ("userId".to_string(), "u1".to_string()));
    }
}
