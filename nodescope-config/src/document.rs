//! Raw document loading.
//!
//! Turns a configuration file into a generic figment tree. Binding that tree
//! into the typed schema happens in [`crate::TelemetryConfig::bind`].

use std::path::{Path, PathBuf};

use figment::providers::{Format, Json, Yaml};
use figment::Figment;
use tracing::debug;

use crate::ConfigError;

/// Source of a generic configuration document.
pub trait DocumentSource {
    /// Loads the document and returns a Figment instance.
    fn load(&self) -> Result<Figment, ConfigError>;
}

/// Structured formats a configuration file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension. Anything unrecognized is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// A configuration file inside a resolved configuration directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub directory: PathBuf,
    pub file_name: PathBuf,
}

impl ConfigFile {
    /// Pairs a resolved directory with the file name of the requested `target`.
    pub fn new(directory: impl Into<PathBuf>, target: &Path) -> Self {
        let file_name = target
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| target.to_path_buf());
        Self {
            directory: directory.into(),
            file_name,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_path(&self.file_name)
    }
}

impl DocumentSource for ConfigFile {
    fn load(&self) -> Result<Figment, ConfigError> {
        let path = self.path();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path));
        }

        let format = self.format();
        debug!(path = %path.display(), ?format, "loading telemetry configuration");
        let figment = match format {
            DocumentFormat::Json => Figment::from(Json::file_exact(&path)),
            DocumentFormat::Yaml => Figment::from(Yaml::file_exact(&path)),
        };
        Ok(figment)
    }
}

/// An in-memory JSON document.
#[derive(Debug, Clone)]
pub struct JsonDocument(pub String);

impl DocumentSource for JsonDocument {
    fn load(&self) -> Result<Figment, ConfigError> {
        Ok(Figment::from(Json::string(&self.0)))
    }
}
