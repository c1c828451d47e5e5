//! Access rules for views that need a signed-in user

use holocron_domain::{EntityId, LoginRedirect, User};

use crate::session::{FavouritesStore, TokenStore};

/// Gate for protected views.
pub struct RequireSession {
    tokens: TokenStore,
}

impl RequireSession {
    /// Creates a new `RequireSession` use case.
    pub const fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// Returns the signed-in user, or where to send the visitor.
    ///
    /// # Errors
    /// Returns a [`LoginRedirect`] back to `current_path` when signed out.
    pub async fn execute(&self, current_path: &str) -> Result<User, LoginRedirect> {
        let session = self.tokens.snapshot().await;
        match session.user() {
            Some(user) if session.is_authenticated() => Ok(user.clone()),
            _ => Err(LoginRedirect::sign_in_required(current_path)),
        }
    }
}

/// What a toggle did to the favourites set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteChange {
    /// The id was added.
    Added,
    /// The id was removed.
    Removed,
}

/// Adds or removes a favourite for a signed-in user.
pub struct ToggleFavourite {
    guard: RequireSession,
    favourites: FavouritesStore,
}

impl ToggleFavourite {
    /// Creates a new `ToggleFavourite` use case.
    pub const fn new(tokens: TokenStore, favourites: FavouritesStore) -> Self {
        Self {
            guard: RequireSession::new(tokens),
            favourites,
        }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns a [`LoginRedirect`] when signed out; the set is not touched.
    pub async fn execute(
        &self,
        id: EntityId,
        current_path: &str,
    ) -> Result<FavouriteChange, LoginRedirect> {
        self.guard.execute(current_path).await?;

        if self.favourites.remove(&id).await {
            Ok(FavouriteChange::Removed)
        } else {
            self.favourites.add(id).await;
            Ok(FavouriteChange::Added)
        }
    }
}
