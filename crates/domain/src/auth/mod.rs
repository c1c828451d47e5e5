//! Authentication domain types

mod credentials;
mod redirect;
mod types;

pub use credentials::{CredentialErrors, LoginCredentials};
pub use redirect::{LOGIN_PATH, LoginRedirect, SESSION_EXPIRED_NOTICE};
pub use types::{
    AuthResponse, LogoutRequest, RefreshRequest, RefreshResponse, Session, User, token_preview,
};
