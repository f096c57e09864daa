//! Persisted session state.
//!
//! This module provides:
//! - `Storage`: a string key-value persistence boundary, with file-backed
//!   and in-memory implementations
//! - `TokenStore`: the single source of truth for the credential pair and
//!   the cached user profile
//!
//! Session state survives process restarts and is cleared on logout or
//! refresh exhaustion.

pub mod kv;
pub mod tokens;

pub use kv::{FileStorage, MemoryStorage, Storage};
pub use tokens::TokenStore;
