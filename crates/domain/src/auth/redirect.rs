//! Login redirect signal
//!
//! Carries where the user was headed and whether the redirect was forced
//! by an expired session. Rendered as `/login?next=<path>` with
//! `&sessionExpired=true` appended for forced logouts.

use std::fmt;

use url::Url;

/// Path of the login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Notice shown on the login view after a forced logout.
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";

/// A request to navigate to the login entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    /// Path to return to after signing in.
    pub next: String,
    /// True when the session was cleared because a refresh failed.
    pub session_expired: bool,
}

impl LoginRedirect {
    /// Redirect for a view that needs a signed-in user.
    #[must_use]
    pub fn sign_in_required(next: impl Into<String>) -> Self {
        Self {
            next: next.into(),
            session_expired: false,
        }
    }

    /// Redirect after a forced logout.
    #[must_use]
    pub fn session_expired(next: impl Into<String>) -> Self {
        Self {
            next: next.into(),
            session_expired: true,
        }
    }

    /// Returns the notice to show on the login view, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        if self.session_expired {
            Some(SESSION_EXPIRED_NOTICE)
        } else {
            None
        }
    }

    /// Parses a login location such as `/login?next=/favourites&sessionExpired=true`.
    ///
    /// A missing `next` defaults to `/`. Returns `None` for locations that
    /// are not the login path.
    #[must_use]
    pub fn parse(location: &str) -> Option<Self> {
        let url = Url::parse("http://localhost").ok()?.join(location).ok()?;
        if url.path() != LOGIN_PATH {
            return None;
        }

        let mut next = None;
        let mut session_expired = false;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "next" => next = Some(value.into_owned()),
                "sessionExpired" => session_expired = value == "true",
                _ => {}
            }
        }

        Some(Self {
            next: next.filter(|n| !n.is_empty()).unwrap_or_else(|| "/".to_string()),
            session_expired,
        })
    }
}

impl fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LOGIN_PATH}?next={}", self.next)?;
        if self.session_expired {
            f.write_str("&sessionExpired=true")?;
        }
        Ok(())
    }
}
