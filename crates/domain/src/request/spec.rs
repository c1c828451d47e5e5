//! Request specification type

use serde::Serialize;
use url::Url;
use uuid::Uuid;

use super::HttpMethod;
use crate::error::{DomainError, DomainResult};
use crate::id::generate_request_id;

/// Name of the header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// A single outbound HTTP call.
///
/// The request is a plain value so it can be reissued verbatim after a
/// token refresh; only the authorization header changes between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Correlation id used in log lines.
    pub id: Uuid,
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: Url,
    /// Headers in insertion order. Names compare case-insensitively.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request without body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            id: generate_request_id(),
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the payload cannot be
    /// represented as JSON.
    pub fn post_json<T: Serialize>(url: Url, payload: &T) -> DomainResult<Self> {
        let body =
            serde_json::to_value(payload).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        let mut request = Self::new(HttpMethod::Post, url);
        request.body = Some(body);
        Ok(request)
    }

    /// Sets a header in place, replacing any existing header with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove_header(&name);
        self.headers.push((name, value.into()));
    }

    /// Removes every header with the given name.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Returns the value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a copy of this request carrying `Authorization: Bearer <token>`.
    ///
    /// With no token the header is removed rather than sent empty.
    #[must_use]
    pub fn authorized(&self, access_token: Option<&str>) -> Self {
        let mut request = self.clone();
        match access_token {
            Some(token) => request.set_header(AUTHORIZATION_HEADER, format!("Bearer {token}")),
            None => request.remove_header(AUTHORIZATION_HEADER),
        }
        request
    }
}
