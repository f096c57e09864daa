//! Authentication module for managing the user session and role checks.
//!
//! This module provides:
//! - `SessionManager`: the process-wide authenticated-session state, with
//!   startup hydration and login/logout/update operations
//! - Role helpers for route guards (`has_role`, `can_access_route`)
//!
//! Session state is persisted through the token store and survives restarts.

pub mod roles;
pub mod session;

pub use roles::{can_access_route, has_any_role, has_role};
pub use session::{Session, SessionManager};
