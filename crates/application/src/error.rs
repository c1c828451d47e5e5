//! Application error types

use holocron_domain::DomainError;
use thiserror::Error;

use crate::ports::TransportError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The login endpoint rejected the credentials.
    #[error("{message}")]
    InvalidCredentials {
        /// Message to show on the login form.
        message: String,
    },

    /// An authenticated call failed and the session could not be recovered.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Server-provided message, if any.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Numeric status code.
        status: u16,
        /// Server-provided or default message.
        message: String,
    },

    /// A success response had an unexpected body.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApplicationError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
