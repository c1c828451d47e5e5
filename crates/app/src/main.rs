//! Holocron - Main Entry Point
//!
//! Loads settings, sets up logging and runs the interactive shell on
//! stdin/stdout until `quit` or end of input.

mod cli;
mod navigator;
mod shell;

use std::sync::Arc;

use clap::Parser;
use holocron_infrastructure::{ReqwestTransport, Settings, init_tracing};
use tokio::io::{BufReader, stdin, stdout};

use crate::cli::Args;
use crate::shell::Shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.log_directive());

    let mut settings = Settings::load()?;
    args.apply(&mut settings);
    settings.validate()?;

    tracing::info!(
        auth = %settings.auth_base_url,
        catalog = %settings.catalog_base_url,
        timeout_ms = settings.request_timeout_ms,
        "starting holocron"
    );

    let transport = Arc::new(ReqwestTransport::new(&settings)?);
    let shell = Shell::new(
        transport,
        settings.auth_endpoints()?,
        settings.catalog_endpoints()?,
    );

    shell.run(BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
