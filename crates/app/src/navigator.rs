//! Navigator backed by the shell's notion of a current location.

use std::sync::Mutex;

use holocron_application::Navigator;
use holocron_domain::LoginRedirect;

/// Tracks the current path and the last login redirect requested.
#[derive(Debug)]
pub struct ShellNavigator {
    current: Mutex<String>,
    pending: Mutex<Option<LoginRedirect>>,
}

impl Default for ShellNavigator {
    fn default() -> Self {
        Self {
            current: Mutex::new("/".to_string()),
            pending: Mutex::new(None),
        }
    }
}

impl ShellNavigator {
    /// Moves to `path`.
    pub fn go_to(&self, path: impl Into<String>) {
        if let Ok(mut current) = self.current.lock() {
            *current = path.into();
        }
    }

    /// Takes the redirect raised since the last call, if any.
    pub fn take_redirect(&self) -> Option<LoginRedirect> {
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }

    /// Records a redirect raised by the shell itself.
    pub fn remember(&self, redirect: LoginRedirect) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(redirect);
        }
    }
}

impl Navigator for ShellNavigator {
    fn current_path(&self) -> String {
        self.current
            .lock()
            .map_or_else(|_| "/".to_string(), |current| current.clone())
    }

    fn redirect_to_login(&self, redirect: LoginRedirect) {
        tracing::debug!(location = %redirect, "redirecting to login");
        self.remember(redirect);
    }
}
