//! Role checks for route guards and conditional UI.
//!
//! Roles are strictly ordered: Admin covers Secretary, Secretary covers
//! Reader. A check for a role passes for any account holding that role or
//! a higher one.

use crate::models::{Role, User};

/// Whether the account covers the given role.
pub fn has_role(user: Option<&User>, role: Role) -> bool {
    match user {
        Some(user) => user.role >= role,
        None => false,
    }
}

/// Whether the account covers at least one of the given roles.
pub fn has_any_role(user: Option<&User>, roles: &[Role]) -> bool {
    roles.iter().any(|&role| has_role(user, role))
}

/// Route-guard check: an authenticated account covering one of the
/// required roles. An empty requirement list means "any authenticated
/// account".
pub fn can_access_route(user: Option<&User>, required: &[Role]) -> bool {
    match user {
        None => false,
        Some(_) if required.is_empty() => true,
        Some(_) => has_any_role(user, required),
    }
}
