//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest library.
//! It handles all HTTP communication for the application.

use std::time::{Duration, Instant};

use holocron_application::{HttpTransport, TransportError, TransportFuture};
use holocron_domain::{ApiRequest, ApiResponse, HttpMethod};
use reqwest::{Client, Method};
use tracing::trace;

use crate::settings::Settings;

/// HTTP transport implementation using reqwest.
///
/// Wraps a shared `reqwest::Client`; cloning the client is cheap and reuses
/// its connection pool.
pub struct ReqwestTransport {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport from the loaded settings.
    ///
    /// Configuration:
    /// - Per-request timeout: `request_timeout_ms`
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: `user_agent`
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &Settings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: settings.request_timeout_ms,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_redirect() {
            return TransportError::Other("too many redirects".to_string());
        }
        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), request.url.clone());

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

            let status = response.status().as_u16();

            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::Body(e.to_string()))?
                .to_vec();

            trace!(
                request_id = %request.id,
                status,
                elapsed_ms = start.elapsed().as_millis(),
                "response received"
            );

            Ok(ApiResponse::new(status, body))
        })
    }
}
