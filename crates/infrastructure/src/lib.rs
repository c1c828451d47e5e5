//! Holocron Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings and logging setup.

pub mod adapters;
pub mod logging;
pub mod settings;

pub use adapters::ReqwestTransport;
pub use logging::init_tracing;
pub use settings::{Settings, SettingsError};
