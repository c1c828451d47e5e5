//! Holocron Domain - Core catalog and session types
//!
//! This crate defines the domain model for the Holocron catalog client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod id;
pub mod request;
pub mod response;

pub use auth::{
    AuthResponse, CredentialErrors, LOGIN_PATH, LoginCredentials, LoginRedirect, LogoutRequest,
    RefreshRequest, RefreshResponse, SESSION_EXPIRED_NOTICE, Session, User, token_preview,
};
pub use catalog::{PAGE_SIZE, PeoplePage, Person, portrait_seed, total_pages};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, generate_request_id};
pub use request::{AUTHORIZATION_HEADER, ApiRequest, HttpMethod};
pub use response::{ApiResponse, StatusCode};
