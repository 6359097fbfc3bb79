//! ## nodescope-cli
//! **Telemetry configuration tooling**
//!
//! Locates, validates and inspects the node's telemetry configuration
//! the same way the node does at startup.

use clap::Parser;
use nodescope_config::ConfigError;
use nodescope_telemetry::logging::EventLogger;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    EventLogger::init();
    let cli = Cli::parse();

    commands::run(cli).inspect_err(|err| match err.downcast_ref::<ConfigError>() {
        Some(config_error) => EventLogger::log_config_error(config_error),
        None => tracing::error!(error = %err, "command failed"),
    })
}
