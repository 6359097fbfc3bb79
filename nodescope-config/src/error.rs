//! Error types for configuration discovery, loading and binding

use std::path::PathBuf;

use figment::error::Kind;
use thiserror::Error;
use crate::validation::SCRAPE_INTERVAL_RULE;

/// Unified configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No candidate directory holds the configuration file.
    #[error(
        "could not find {file_name} in the following directories: {}",
        join_paths(.searched)
    )]
    NotFound {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    /// The resolved configuration file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A document key or list entry names no member of its category.
    #[error("unknown category `{key}` in `{field}`, expected one of: {}", .expected.join(", "))]
    UnknownCategory {
        field: String,
        key: String,
        expected: &'static [&'static str],
    },

    /// The expected scrape interval breaks the interval rule.
    #[error("invalid ExpectedScrapeIntervalSeconds {value}: {}", SCRAPE_INTERVAL_RULE)]
    InvalidScrapeInterval { value: i64 },

    /// The document could not be parsed or does not fit the schema.
    #[error("malformed telemetry configuration: {0}")]
    Malformed(#[source] figment::Error),

    /// A label mapping pattern failed to compile.
    #[error("invalid label pattern `{pattern}`: {source}")]
    InvalidLabelPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    /// Whether the configuration file could not be located or opened.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::FileNotFound(_))
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        if let Kind::UnknownVariant(key, expected) = &error.kind {
            return ConfigError::UnknownCategory {
                field: error.path.join("."),
                key: key.clone(),
                expected: *expected,
            };
        }
        ConfigError::Malformed(error)
    }
}
