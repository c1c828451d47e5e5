//! Login credentials and their validation rules

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// `POST /auth/login` request body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Per-field validation messages for a login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialErrors {
    /// Problem with the email field.
    pub email: Option<String>,
    /// Problem with the password field.
    pub password: Option<String>,
}

impl CredentialErrors {
    /// Returns true if no field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

impl fmt::Display for CredentialErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.email.as_deref(), self.password.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl LoginCredentials {
    /// Creates credentials from an email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the credentials before they are sent.
    ///
    /// # Errors
    ///
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> Result<(), CredentialErrors> {
        let mut errors = CredentialErrors::default();

        if self.email.is_empty() {
            errors.email = Some("Email is required".to_string());
        } else if !EMAIL_PATTERN.is_match(&self.email) {
            errors.email = Some("Please enter a valid email address".to_string());
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required".to_string());
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.password = Some(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
