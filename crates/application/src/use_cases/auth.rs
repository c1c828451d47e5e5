//! Login and logout use cases

use std::sync::Arc;

use holocron_domain::{
    ApiRequest, AuthResponse, LoginCredentials, LogoutRequest, StatusCode, User,
};
use tracing::{info, warn};

use crate::endpoints::AuthEndpoints;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpTransport;
use crate::session::{FavouritesStore, TokenStore};

/// Shown when a failed login carries no server message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Signs a user in and installs the issued credentials.
///
/// Login talks to the transport directly: a rejected login is a credential
/// error, never a reason to refresh.
pub struct Login {
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
    endpoints: AuthEndpoints,
}

impl Login {
    /// Creates a new `Login` use case.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: TokenStore,
        endpoints: AuthEndpoints,
    ) -> Self {
        Self {
            transport,
            tokens,
            endpoints,
        }
    }

    /// Executes the use case.
    ///
    /// Credentials go to the server as given; form-level checks belong to
    /// the caller. The token store is only written on success.
    ///
    /// # Errors
    /// - `InvalidCredentials` if the server answers 401
    /// - `Transport`, `Http` or `Decode` for other failures
    pub async fn execute(&self, credentials: &LoginCredentials) -> ApplicationResult<User> {
        let request = ApiRequest::post_json(self.endpoints.login()?, credentials)?;
        let response = self.transport.execute(&request).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            info!(email = %credentials.email, "login rejected");
            return Err(ApplicationError::InvalidCredentials {
                message: response
                    .error_message()
                    .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
            });
        }
        if !response.is_success() {
            return Err(ApplicationError::Http {
                status: response.status.as_u16(),
                message: response
                    .error_message()
                    .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
            });
        }

        let auth: AuthResponse = response.json()?;
        let user = auth.user.clone();
        self.tokens
            .set_credentials(auth.user, auth.access_token, auth.refresh_token)
            .await;

        info!(user_id = %user.id, "signed in");
        Ok(user)
    }
}

/// Signs the user out and resets all session state.
pub struct Logout {
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
    favourites: FavouritesStore,
    endpoints: AuthEndpoints,
}

impl Logout {
    /// Creates a new `Logout` use case.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: TokenStore,
        favourites: FavouritesStore,
        endpoints: AuthEndpoints,
    ) -> Self {
        Self {
            transport,
            tokens,
            favourites,
            endpoints,
        }
    }

    /// Executes the use case.
    ///
    /// Revokes the held refresh token if there is one. A failed revocation
    /// is logged; the local session and favourites are cleared regardless.
    pub async fn execute(&self) {
        if let Some(refresh_token) = self.tokens.refresh_token().await {
            let body = LogoutRequest {
                refresh_token: Some(refresh_token),
            };
            if let Err(e) = self.revoke(&body).await {
                warn!(error = %e, "logout request failed");
            }
        }

        self.tokens.clear().await;
        self.favourites.clear().await;
        info!("signed out");
    }

    async fn revoke(&self, body: &LogoutRequest) -> ApplicationResult<()> {
        let request = ApiRequest::post_json(self.endpoints.logout()?, body)?;
        let response = self.transport.execute(&request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApplicationError::Http {
                status: response.status.as_u16(),
                message: response.error_message().unwrap_or_default(),
            })
        }
    }
}
