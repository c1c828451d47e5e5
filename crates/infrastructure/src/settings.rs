//! Client settings.
//!
//! Resolution order, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `HOLOCRON_*` environment variables (e.g. `HOLOCRON_CATALOG_BASE_URL`)
//! 3. Command-line overrides applied by the binary

use config::{Config, ConfigError, Environment};
use holocron_application::{AuthEndpoints, CatalogEndpoints};
use serde::Deserialize;
use thiserror::Error;

/// Default location of the auth endpoints (the local development server).
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:5173/";
/// Default catalog API root.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://swapi.dev/api/";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "HOLOCRON";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    /// A value was read but is not usable.
    #[error("invalid setting {key}: {message}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Runtime settings for the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Root of `auth/login`, `auth/refresh` and `auth/logout`.
    pub auth_base_url: String,
    /// Root of `people/`.
    pub catalog_base_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("Holocron/{}", env!("CARGO_PKG_VERSION"))
}

impl Settings {
    /// Loads defaults overridden by `HOLOCRON_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(environment: Environment) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let settings: Self = Config::builder()
            .set_default("auth_base_url", defaults.auth_base_url)?
            .set_default("catalog_base_url", defaults.catalog_base_url)?
            .set_default("request_timeout_ms", defaults.request_timeout_ms)?
            .set_default("user_agent", defaults.user_agent)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the settings can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.auth_endpoints()?;
        self.catalog_endpoints()?;
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::Invalid {
                key: "request_timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Auth endpoint locations.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] if the base URL is not usable.
    pub fn auth_endpoints(&self) -> Result<AuthEndpoints, SettingsError> {
        AuthEndpoints::new(&self.auth_base_url).map_err(|e| SettingsError::Invalid {
            key: "auth_base_url",
            message: e.to_string(),
        })
    }

    /// Catalog endpoint locations.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] if the base URL is not usable.
    pub fn catalog_endpoints(&self) -> Result<CatalogEndpoints, SettingsError> {
        CatalogEndpoints::new(&self.catalog_base_url).map_err(|e| SettingsError::Invalid {
            key: "catalog_base_url",
            message: e.to_string(),
        })
    }
}
