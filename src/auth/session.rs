use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthApi};
use crate::models::{LoginForm, RegisterForm, User};
use crate::storage::TokenStore;

/// Snapshot of the current session.
///
/// `is_loading` is true only while startup hydration is running; once it
/// settles it stays false for the life of the process.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// The single process-wide authenticated-session state.
///
/// Construct one per running application and share it by reference; the
/// session is deliberately an explicit object rather than ambient state.
///
/// `login` and `logout` are not guarded against concurrent invocation;
/// callers are expected to disable the triggering affordances while a
/// mutation is pending.
pub struct SessionManager {
    tokens: TokenStore,
    auth: AuthApi,
    state: RwLock<Session>,
    hydrated: AtomicBool,
}

impl SessionManager {
    /// Starts in the loading state, seeded with the cached profile so the
    /// UI can render something plausible before hydration settles.
    pub fn new(tokens: TokenStore, auth: AuthApi) -> Self {
        let cached = tokens.cached_user();
        Self {
            tokens,
            auth,
            state: RwLock::new(Session {
                user: cached,
                is_loading: true,
            }),
            hydrated: AtomicBool::new(false),
        }
    }

    /// Startup hydration: reconcile the cached profile against a live
    /// fetch. Runs once per instance; later calls are no-ops.
    ///
    /// Any failure on the live fetch, including refresh exhaustion inside
    /// the transport, ends the persisted session and leaves us anonymous.
    pub async fn initialize(&self) {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            return;
        }

        if !self.tokens.has_credentials() {
            debug!("No stored credentials, starting anonymous");
            self.settle(None);
            return;
        }

        match self.auth.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "Session hydrated");
                self.tokens.set_cached_user(&user);
                self.settle(Some(user));
            }
            Err(err) => {
                warn!(error = %err, "Session hydration failed, clearing stored session");
                self.tokens.clear_all();
                self.settle(None);
            }
        }
    }

    /// Log in and store the credential pair and profile atomically.
    /// On failure nothing changes and the error propagates for display.
    pub async fn login(&self, form: &LoginForm) -> Result<(), ApiError> {
        let response = self.auth.login(form).await?;
        self.tokens
            .store_session(&response.access_token, &response.refresh_token, &response.user);
        info!(user_id = %response.user.id, "Logged in");
        self.set_user(Some(response.user));
        Ok(())
    }

    /// Pure passthrough to the registration endpoint; no auto-login and no
    /// session mutation.
    pub async fn register(&self, form: &RegisterForm) -> Result<User, ApiError> {
        self.auth.register(form).await
    }

    /// End the session. The server-side invalidation is best-effort: the
    /// local session always clears, whatever the network does, so a client
    /// can never be stuck logged in behind a failing logout call.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.tokens.refresh_token() {
            if let Err(err) = self.auth.logout(&refresh_token).await {
                warn!(error = %err, "Server logout failed, clearing local session anyway");
            }
        }
        self.tokens.clear_all();
        self.set_user(None);
        info!("Logged out");
    }

    /// Replace the profile in memory and in the cache after a local edit.
    /// Synchronous; no network round trip.
    pub fn update_user(&self, user: User) {
        self.tokens.set_cached_user(&user);
        self.set_user(Some(user));
    }

    /// Snapshot of the current session state.
    pub fn session(&self) -> Session {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().user
    }

    /// The route-guard predicate: a live profile and a full credential pair.
    pub fn is_authenticated(&self) -> bool {
        self.session().user.is_some() && self.tokens.has_credentials()
    }

    fn set_user(&self, user: Option<User>) {
        // Recover from a poisoned lock the same way the read path does;
        // dropping the write would strand a stale user in state.
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.user = user;
    }

    // Hydration settling also retires the loading flag, permanently.
    fn settle(&self, user: Option<User>) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.user = user;
        state.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Arc;

    use super::*;
    use crate::api::{AuthApi, AuthTransport};
    use crate::config::Config;
    use crate::storage::{MemoryStorage, TokenStore};

    fn manager() -> SessionManager {
        let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
        let transport = Arc::new(
            AuthTransport::new(&Config::new("http://localhost:0"), tokens.clone())
                .expect("transport"),
        );
        SessionManager::new(tokens, AuthApi::new(transport))
    }

    fn sample_user(first_name: &str) -> User {
        serde_json::from_str(&format!(
            r#"{{"id":"u1","email":"a@b.fr","role":"READER","first_name":"{}","last_name":"M"}}"#,
            first_name
        ))
        .unwrap()
    }

    #[test]
    fn test_state_survives_a_poisoned_lock() {
        let manager = manager();
        manager.update_user(sample_user("Before"));

        // Panic while holding the write guard to poison the lock.
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = manager.state.write().unwrap();
            panic!("poison");
        }));
        assert!(result.is_err());

        manager.update_user(sample_user("After"));
        assert_eq!(
            manager.session().user.map(|u| u.first_name),
            Some("After".to_string())
        );
    }
}
