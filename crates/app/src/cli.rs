//! Command-line arguments.

use clap::Parser;
use holocron_infrastructure::Settings;

/// Browse the character catalog, sign in and keep favourites.
#[derive(Debug, Parser)]
#[command(name = "holocron", version, about)]
pub struct Args {
    /// Root URL of the auth endpoints (overrides `HOLOCRON_AUTH_BASE_URL`).
    #[arg(long)]
    pub auth_url: Option<String>,

    /// Root URL of the catalog API (overrides `HOLOCRON_CATALOG_BASE_URL`).
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies the flags that were given on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.auth_url {
            settings.auth_base_url.clone_from(url);
        }
        if let Some(url) = &self.catalog_url {
            settings.catalog_base_url.clone_from(url);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            settings.request_timeout_ms = timeout_ms;
        }
    }

    /// Default tracing directive for this run.
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
