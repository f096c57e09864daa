use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Reader,
    Secretary,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Reader => write!(f, "Reader"),
            Role::Secretary => write!(f, "Secretary"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// A Biblio account profile.
///
/// The counter fields (`active_loans_count` and friends) are derived by the
/// backend at serialization time and are absent from write payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub is_suspended: Option<bool>,
    #[serde(default)]
    pub suspension_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub suspension_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active_loans_count: Option<u32>,
    #[serde(default)]
    pub pending_requests_count: Option<u32>,
    #[serde(default)]
    pub unpaid_penalties_amount: Option<f64>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_suspended(&self) -> bool {
        self.is_suspended.unwrap_or(false)
    }
}

/// Credential pair issued by the login and refresh endpoints.
/// Both tokens are opaque strings; their encoding is the backend's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin > Role::Secretary);
        assert!(Role::Secretary > Role::Reader);
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Reader).unwrap(), "\"READER\"");
        let role: Role = serde_json::from_str("\"SECRETARY\"").unwrap();
        assert_eq!(role, Role::Secretary);
    }

    #[test]
    fn test_parse_profile_with_counters() {
        let json = r#"{
            "id": "3f2a", "email": "a@b.fr", "role": "READER",
            "first_name": "Anne", "last_name": "Moreau",
            "username": "amoreau",
            "is_suspended": false,
            "active_loans_count": 2,
            "pending_requests_count": 0,
            "unpaid_penalties_amount": 1.5
        }"#;
        let user: User = serde_json::from_str(json).expect("profile should parse");
        assert_eq!(user.full_name(), "Anne Moreau");
        assert_eq!(user.active_loans_count, Some(2));
        assert!(!user.is_suspended());
    }

    #[test]
    fn test_parse_minimal_profile() {
        // Write payload echoes omit every derived field
        let json = r#"{"id":"1","email":"x@y.z","role":"ADMIN","first_name":"X","last_name":"Y"}"#;
        let user: User = serde_json::from_str(json).expect("minimal profile should parse");
        assert_eq!(user.role, Role::Admin);
        assert!(user.active_loans_count.is_none());
    }
}
