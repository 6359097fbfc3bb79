//! ## nodescope-telemetry::logging
//! **Structured logging with tracing**
//!
//! The configuration core never logs its own failures; it returns them.
//! Entry points install the subscriber here and decide how to report errors.

use std::io;

use nodescope_config::ConfigError;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global fmt subscriber. Panics if one is already set.
    pub fn init() {
        Self::builder().init()
    }

    // stdout carries command output.
    fn builder() -> fmt::SubscriberBuilder<
        fmt::format::DefaultFields,
        fmt::format::Format,
        EnvFilter,
        fn() -> io::Stderr,
    > {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .with_writer(io::stderr as fn() -> io::Stderr)
    }

    /// Reports a configuration failure at the entry point.
    pub fn log_config_error(error: &ConfigError) {
        match error {
            ConfigError::NotFound { file_name, searched } => tracing::error!(
                file_name = %file_name,
                searched = searched.len(),
                %error,
                "telemetry configuration not found"
            ),
            ConfigError::UnknownCategory { field, key, .. } => tracing::error!(
                field = %field,
                key = %key,
                %error,
                "unknown telemetry category"
            ),
            ConfigError::InvalidScrapeInterval { value } => tracing::error!(
                value = *value,
                %error,
                "invalid scrape interval"
            ),
            _ => tracing::error!(%error, "failed to load telemetry configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn not_found_is_logged_with_searched_count() {
        EventLogger::log_config_error(&ConfigError::NotFound {
            file_name: "telemetryconfig.json".into(),
            searched: vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")],
        });

        assert!(logs_contain("telemetry configuration not found"));
        assert!(logs_contain("searched=2"));
    }

    #[traced_test]
    #[test]
    fn scrape_interval_error_is_logged_with_value() {
        EventLogger::log_config_error(&ConfigError::InvalidScrapeInterval { value: 20 });

        assert!(logs_contain("invalid scrape interval"));
        assert!(logs_contain("value=20"));
    }
}
