//! In-memory session token storage.
//!
//! Shared by every in-flight gateway call. Writes are last-write-wins; each
//! one is a complete state transition, so no caller ever observes a
//! half-installed session.

use std::sync::Arc;

use holocron_domain::{Session, User, token_preview};
use tokio::sync::RwLock;

/// Thread-safe in-memory token store.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    session: Arc<RwLock<Session>>,
}

impl TokenStore {
    /// Create an empty, signed-out store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fully authenticated session, overwriting any prior state.
    pub async fn set_credentials(&self, user: User, access_token: String, refresh_token: String) {
        tracing::debug!(
            user_id = %user.id,
            access_token = %token_preview(&access_token),
            "installing credentials"
        );
        *self.session.write().await = Session::signed_in(user, access_token, refresh_token);
    }

    /// Replace only the access token.
    ///
    /// Returns `false` if the store was cleared in the meantime; the token is
    /// then discarded.
    pub async fn set_access_token(&self, access_token: String) -> bool {
        let preview = token_preview(&access_token);
        let installed = self.session.write().await.set_access_token(access_token);
        if installed {
            tracing::debug!(access_token = %preview, "access token replaced");
        } else {
            tracing::debug!(access_token = %preview, "signed out, access token discarded");
        }
        installed
    }

    /// Reset to the signed-out state.
    pub async fn clear(&self) {
        *self.session.write().await = Session::default();
    }

    /// Copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Current access token, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token().map(String::from)
    }

    /// Current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<String> {
        self.session.read().await.refresh_token().map(String::from)
    }

    /// Signed-in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.session.read().await.user().cloned()
    }

    /// Whether a user is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }
}
