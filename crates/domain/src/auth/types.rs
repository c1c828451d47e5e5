//! Session and auth payload types

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user id.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Successful `POST /auth/login` payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Long-lived credential exchanged for new access tokens.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &token_preview(&self.access_token))
            .field("refresh_token", &token_preview(&self.refresh_token))
            .field("user", &self.user)
            .finish()
    }
}

/// `POST /auth/refresh` request body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The held refresh token.
    pub refresh_token: String,
}

/// Successful `POST /auth/refresh` payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// The replacement access token.
    pub access_token: String,
}

/// `POST /auth/logout` request body. The token is omitted when none is held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    /// Refresh token to revoke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Client-side session state.
///
/// `is_authenticated()` is true iff user, access token and refresh token
/// are all present. Only [`Session::signed_in`] sets the flag, and
/// [`Session::default`] is the signed-out state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    authenticated: bool,
}

impl Session {
    /// Creates a fully authenticated session.
    #[must_use]
    pub const fn signed_in(user: User, access_token: String, refresh_token: String) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            authenticated: true,
        }
    }

    /// Replaces only the access token.
    ///
    /// Returns `false` and leaves the session untouched when no refresh
    /// token is held, so a signed-out session never regains a bearer token.
    pub fn set_access_token(&mut self, access_token: String) -> bool {
        if self.refresh_token.is_none() {
            return false;
        }
        self.access_token = Some(access_token);
        true
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the current refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns true when the session is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &self.access_token.as_deref().map(token_preview))
            .field(
                "refresh_token",
                &self.refresh_token.as_deref().map(token_preview),
            )
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Get a preview of a token (first 8 chars + ...), safe for logs.
#[must_use]
pub fn token_preview(token: &str) -> String {
    match token.char_indices().nth(8) {
        Some((end, _)) if token.chars().count() > 12 => format!("{}...", &token[..end]),
        _ => token.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn luke() -> User {
        User {
            id: "1".to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
        }
    }

    #[test]
    fn test_default_session_is_signed_out() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn test_signed_in_session() {
        let session = Session::signed_in(luke(), "a".into(), "r".into());
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("a"));
        assert_eq!(session.refresh_token(), Some("r"));
    }

    #[test]
    fn test_set_access_token_keeps_rest() {
        let mut session = Session::signed_in(luke(), "a".into(), "r".into());
        assert!(session.set_access_token("b".into()));
        assert_eq!(session.access_token(), Some("b"));
        assert_eq!(session.refresh_token(), Some("r"));
        assert_eq!(session.user(), Some(&luke()));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_set_access_token_ignored_when_signed_out() {
        let mut session = Session::default();
        assert!(!session.set_access_token("b".into()));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_auth_response_wire_format() {
        let parsed: AuthResponse = serde_json::from_value(json!({
            "accessToken": "access_token_1",
            "refreshToken": "refresh_token_1",
            "user": {"id": "1", "email": "test@example.com", "name": "Test User"}
        }))
        .unwrap();
        assert_eq!(parsed.access_token, "access_token_1");
        assert_eq!(parsed.user, luke());
    }

    #[test]
    fn test_refresh_request_wire_format() {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: "r".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"refreshToken": "r"}));
    }

    #[test]
    fn test_logout_request_omits_missing_token() {
        let body = serde_json::to_value(LogoutRequest::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_token_preview() {
        assert_eq!(token_preview("abcdefghijklmnop"), "abcdefgh...");
        assert_eq!(token_preview("short"), "short");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let session = Session::signed_in(
            luke(),
            "access_token_1700000000000".into(),
            "refresh_token_1700000000000".into(),
        );
        let debug = format!("{session:?}");
        assert!(!debug.contains("access_token_1700000000000"));
        assert!(debug.contains("access_t..."));
    }
}
