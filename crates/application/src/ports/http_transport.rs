//! HTTP transport port

use std::future::Future;
use std::pin::Pin;

use holocron_domain::{ApiRequest, ApiResponse};
use thiserror::Error;

/// Errors raised when a request produced no HTTP response at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + 'a>>;

/// Port for sending HTTP requests.
///
/// Any HTTP status, including 4xx and 5xx, is a successful transport
/// result; only failures to obtain a response are errors.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the response.
    fn execute<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a>;
}
