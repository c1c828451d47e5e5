//! Navigation port
//!
//! The data layer never routes by itself. When a session is lost it hands a
//! [`LoginRedirect`] to whatever owns navigation.

use holocron_domain::LoginRedirect;

/// Port for the collaborator that owns the current location.
pub trait Navigator: Send + Sync {
    /// Path the user is currently on, used as the post-login destination.
    fn current_path(&self) -> String;

    /// Navigates to the login entry point.
    fn redirect_to_login(&self, redirect: LoginRedirect);
}
