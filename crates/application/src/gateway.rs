//! Authenticated request gateway.
//!
//! Every call that may need authorization goes through [`AuthGateway::send`],
//! which runs this sequence once per request:
//!
//! 1. **Attempt** with the held access token as a bearer credential.
//! 2. **Evaluate**: anything other than 401 is returned unchanged.
//! 3. **Refresh** with the held refresh token, exactly once.
//! 4. **Retry** once with the new access token; that result is final.
//!
//! When the refresh cannot happen or fails, the session is cleared and the
//! caller gets the original 401. A failed refresh also sends the navigator
//! to login with the session-expired flag. Concurrent requests each run their
//! own sequence; refresh calls are not shared between them.

use std::sync::Arc;

use holocron_domain::{ApiRequest, ApiResponse, LoginRedirect, RefreshRequest, RefreshResponse};
use tracing::{debug, info, warn};

use crate::endpoints::AuthEndpoints;
use crate::error::ApplicationResult;
use crate::ports::{HttpTransport, Navigator};
use crate::session::TokenStore;

/// Result of the refresh step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RefreshOutcome {
    /// A new access token was issued and installed.
    Renewed(String),
    /// No refresh token was held, or the session ended while the refresh
    /// was in flight and the new token was discarded.
    NoRefreshToken,
    /// The refresh call failed; the reason is only logged.
    Failed(String),
}

/// Gateway that attaches bearer credentials and recovers from expired
/// access tokens.
pub struct AuthGateway {
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    endpoints: AuthEndpoints,
}

impl AuthGateway {
    /// Creates a gateway sharing `tokens` with the rest of the application.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
        endpoints: AuthEndpoints,
    ) -> Self {
        Self {
            transport,
            tokens,
            navigator,
            endpoints,
        }
    }

    /// The token store this gateway reads and updates.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Sends `request`, refreshing the access token at most once on 401.
    ///
    /// Non-2xx responses are returned as `Ok`; interpreting them is up to
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the first attempt or the retry could not
    /// be sent. Failures of the refresh call itself are never returned.
    pub async fn send(&self, request: &ApiRequest) -> ApplicationResult<ApiResponse> {
        let access_token = self.tokens.access_token().await;
        debug!(
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
            authenticated = access_token.is_some(),
            "sending request"
        );

        let response = self
            .transport
            .execute(&request.authorized(access_token.as_deref()))
            .await?;

        if !response.is_unauthorized() {
            return Ok(response);
        }

        info!(request_id = %request.id, url = %request.url, "request unauthorized, refreshing");

        match self.refresh().await {
            RefreshOutcome::Renewed(new_token) => {
                let retried = self
                    .transport
                    .execute(&request.authorized(Some(&new_token)))
                    .await?;
                debug!(
                    request_id = %request.id,
                    status = retried.status.as_u16(),
                    "retry finished"
                );
                Ok(retried)
            }
            RefreshOutcome::NoRefreshToken => {
                debug!(request_id = %request.id, "signed out, clearing session");
                self.tokens.clear().await;
                Ok(response)
            }
            RefreshOutcome::Failed(reason) => {
                warn!(request_id = %request.id, %reason, "token refresh failed, session expired");
                self.tokens.clear().await;
                let redirect = LoginRedirect::session_expired(self.navigator.current_path());
                self.navigator.redirect_to_login(redirect);
                Ok(response)
            }
        }
    }

    /// Exchanges the held refresh token for a new access token and installs it.
    async fn refresh(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.tokens.refresh_token().await else {
            return RefreshOutcome::NoRefreshToken;
        };

        let request = match self
            .endpoints
            .refresh()
            .and_then(|url| ApiRequest::post_json(url, &RefreshRequest { refresh_token }))
        {
            Ok(request) => request,
            Err(e) => return RefreshOutcome::Failed(e.to_string()),
        };

        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(e) => return RefreshOutcome::Failed(e.to_string()),
        };

        if !response.is_success() {
            return RefreshOutcome::Failed(format!(
                "{}: {}",
                response.status,
                response.error_message().unwrap_or_default()
            ));
        }

        match response.json::<RefreshResponse>() {
            Ok(body) => {
                if self.tokens.set_access_token(body.access_token.clone()).await {
                    RefreshOutcome::Renewed(body.access_token)
                } else {
                    RefreshOutcome::NoRefreshToken
                }
            }
            Err(e) => RefreshOutcome::Failed(format!("malformed refresh response: {e}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use holocron_domain::{AUTHORIZATION_HEADER, Session, User};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::ports::{TransportError, TransportFuture};

    /// Replays queued results and records what was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
        sent: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                sent: Mutex::default(),
            })
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn execute<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a> {
            self.sent.lock().unwrap().push(request.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no scripted reply".into())));
            Box::pin(async move { reply })
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        redirects: Mutex<Vec<LoginRedirect>>,
    }

    impl Navigator for RecordingNavigator {
        fn current_path(&self) -> String {
            "/people/1".to_string()
        }

        fn redirect_to_login(&self, redirect: LoginRedirect) {
            self.redirects.lock().unwrap().push(redirect);
        }
    }

    fn ok(body: serde_json::Value) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse::json_body(200, &body))
    }

    fn unauthorized(message: &str) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse::json_body(401, &json!({ "message": message })))
    }

    async fn signed_in_store() -> TokenStore {
        let tokens = TokenStore::new();
        let user = User {
            id: "1".into(),
            email: "test@example.com".into(),
            name: "Test User".into(),
        };
        tokens.set_credentials(user, "old".into(), "refresh".into()).await;
        tokens
    }

    fn gateway(
        transport: Arc<ScriptedTransport>,
        tokens: TokenStore,
        navigator: Arc<RecordingNavigator>,
    ) -> AuthGateway {
        AuthGateway::new(
            transport,
            tokens,
            navigator,
            AuthEndpoints::new("http://localhost:5173/").unwrap(),
        )
    }

    fn catalog_request() -> ApiRequest {
        ApiRequest::get(url::Url::parse("https://swapi.dev/api/people/?page=1").unwrap())
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let transport = ScriptedTransport::new(vec![ok(json!({"count": 0}))]);
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = gateway(transport.clone(), signed_in_store().await, navigator);

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert_eq!(response.status.as_u16(), 200);

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header(AUTHORIZATION_HEADER), Some("Bearer old"));
    }

    #[tokio::test]
    async fn test_no_token_omits_header() {
        let transport = ScriptedTransport::new(vec![ok(json!({}))]);
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = gateway(transport.clone(), TokenStore::new(), navigator);

        gateway.send(&catalog_request()).await.unwrap();
        assert_eq!(transport.sent()[0].header(AUTHORIZATION_HEADER), None);
    }

    #[tokio::test]
    async fn test_non_401_errors_are_not_refreshed() {
        let transport = ScriptedTransport::new(vec![Ok(ApiResponse::new(500, "boom"))]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport.clone(), tokens.clone(), navigator);

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert_eq!(response.status.as_u16(), 500);
        assert_eq!(transport.sent().len(), 1);
        assert!(tokens.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_refresh_then_retry() {
        let transport = ScriptedTransport::new(vec![
            unauthorized("expired"),
            ok(json!({"accessToken": "new"})),
            ok(json!({"count": 82})),
        ]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport.clone(), tokens.clone(), navigator.clone());

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert_eq!(response.status.as_u16(), 200);

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].url.path(), "/auth/refresh");
        assert_eq!(sent[1].body, Some(json!({"refreshToken": "refresh"})));
        assert_eq!(sent[2].header(AUTHORIZATION_HEADER), Some("Bearer new"));
        assert_eq!(sent[2].id, sent[0].id);

        assert_eq!(tokens.access_token().await.as_deref(), Some("new"));
        assert_eq!(tokens.refresh_token().await.as_deref(), Some("refresh"));
        assert!(navigator.redirects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retry_401_is_final() {
        let transport = ScriptedTransport::new(vec![
            unauthorized("expired"),
            ok(json!({"accessToken": "new"})),
            unauthorized("still no"),
        ]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport.clone(), tokens.clone(), navigator.clone());

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert!(response.is_unauthorized());
        assert_eq!(response.error_message().as_deref(), Some("still no"));
        assert_eq!(transport.sent().len(), 3);
        assert!(tokens.is_authenticated().await);
        assert!(navigator.redirects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_rejected_clears_and_redirects() {
        let transport = ScriptedTransport::new(vec![
            unauthorized("expired"),
            unauthorized("Invalid refresh token"),
        ]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport.clone(), tokens.clone(), navigator.clone());

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert!(response.is_unauthorized());
        assert_eq!(response.error_message().as_deref(), Some("expired"));
        assert_eq!(transport.sent().len(), 2);

        assert!(!tokens.is_authenticated().await);
        assert_eq!(tokens.user().await, None);
        assert_eq!(tokens.access_token().await, None);
        assert_eq!(tokens.refresh_token().await, None);

        assert_eq!(
            navigator.redirects.lock().unwrap().as_slice(),
            &[LoginRedirect::session_expired("/people/1")]
        );
    }

    #[tokio::test]
    async fn test_refresh_transport_error_counts_as_failure() {
        let transport = ScriptedTransport::new(vec![
            unauthorized("expired"),
            Err(TransportError::ConnectionFailed("refused".into())),
        ]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport.clone(), tokens.clone(), navigator.clone());

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert!(response.is_unauthorized());
        assert!(!tokens.is_authenticated().await);
        assert_eq!(navigator.redirects.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_refresh_body_counts_as_failure() {
        let transport = ScriptedTransport::new(vec![
            unauthorized("expired"),
            ok(json!({"token": "wrong-field"})),
        ]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport.clone(), tokens.clone(), navigator.clone());

        gateway.send(&catalog_request()).await.unwrap();
        assert!(!tokens.is_authenticated().await);
        assert_eq!(navigator.redirects.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_refresh_token_returns_401_without_redirect() {
        let transport = ScriptedTransport::new(vec![unauthorized("expired")]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = TokenStore::new();
        let gateway = gateway(transport.clone(), tokens.clone(), navigator.clone());

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert!(response.is_unauthorized());
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(tokens.snapshot().await, Session::default());
        assert!(navigator.redirects.lock().unwrap().is_empty());
    }

    /// Signs the user out while the refresh call is on the wire.
    struct SignOutDuringRefresh {
        inner: Arc<ScriptedTransport>,
        tokens: TokenStore,
    }

    impl HttpTransport for SignOutDuringRefresh {
        fn execute<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a> {
            let reply = self.inner.execute(request);
            let refreshing = request.url.path().ends_with("/auth/refresh");
            Box::pin(async move {
                if refreshing {
                    self.tokens.clear().await;
                }
                reply.await
            })
        }
    }

    #[tokio::test]
    async fn test_refresh_after_sign_out_does_not_revive_session() {
        let scripted = ScriptedTransport::new(vec![
            unauthorized("expired"),
            ok(json!({"accessToken": "late"})),
        ]);
        let tokens = signed_in_store().await;
        let transport = Arc::new(SignOutDuringRefresh {
            inner: scripted.clone(),
            tokens: tokens.clone(),
        });
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = AuthGateway::new(
            transport,
            tokens.clone(),
            navigator.clone(),
            AuthEndpoints::new("http://localhost:5173/").unwrap(),
        );

        let response = gateway.send(&catalog_request()).await.unwrap();
        assert!(response.is_unauthorized());
        assert_eq!(scripted.sent().len(), 2);
        assert_eq!(tokens.access_token().await, None);
        assert!(!tokens.is_authenticated().await);
        assert!(navigator.redirects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_attempt_transport_error_propagates() {
        let transport =
            ScriptedTransport::new(vec![Err(TransportError::Timeout { timeout_ms: 10 })]);
        let navigator = Arc::new(RecordingNavigator::default());
        let tokens = signed_in_store().await;
        let gateway = gateway(transport, tokens.clone(), navigator);

        let result = gateway.send(&catalog_request()).await;
        assert!(matches!(
            result,
            Err(crate::ApplicationError::Transport(TransportError::Timeout { .. }))
        ));
        assert!(tokens.is_authenticated().await);
    }
}
