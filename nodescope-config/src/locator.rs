//! Discovery of the directory holding the telemetry configuration file.
//!
//! Lookup is split in two: a [`SearchRoots`] implementation enumerates the
//! candidate directories (platform specific), and [`locate_with`] applies the
//! first-match-wins rule over that list with an injected existence probe.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ConfigError;

/// File name looked up when no explicit path is given.
pub const DEFAULT_FILE_NAME: &str = "telemetryconfig.json";

/// Directory name used below per-user and system configuration roots.
pub const APP_DIR_NAME: &str = "nodescope";

/// Source of candidate configuration directories, in probe order.
pub trait SearchRoots {
    fn directories(&self) -> Vec<PathBuf>;
}

/// A fixed list of candidate directories.
impl SearchRoots for [PathBuf] {
    fn directories(&self) -> Vec<PathBuf> {
        self.to_vec()
    }
}

impl SearchRoots for Vec<PathBuf> {
    fn directories(&self) -> Vec<PathBuf> {
        self.clone()
    }
}

/// Platform candidate directories.
///
/// Order:
/// 1. Current working directory
/// 2. Directory of the running executable
/// 3. Per-user configuration directory (`<config_dir>/<app>`)
/// 4. `/etc/<app>` on Unix
#[derive(Debug, Clone)]
pub struct PlatformSearchRoots {
    app_dir_name: String,
}

impl PlatformSearchRoots {
    pub fn new(app_dir_name: impl Into<String>) -> Self {
        Self {
            app_dir_name: app_dir_name.into(),
        }
    }
}

impl Default for PlatformSearchRoots {
    fn default() -> Self {
        Self::new(APP_DIR_NAME)
    }
}

impl SearchRoots for PlatformSearchRoots {
    fn directories(&self) -> Vec<PathBuf> {
        let mut directories = Vec::new();

        if let Ok(cwd) = env::current_dir() {
            directories.push(cwd);
        }
        if let Some(exe_dir) = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            directories.push(exe_dir);
        }
        if let Some(config_dir) = dirs::config_dir() {
            directories.push(config_dir.join(&self.app_dir_name));
        }
        if cfg!(unix) {
            directories.push(Path::new("/etc").join(&self.app_dir_name));
        }

        directories
    }
}

/// Resolves the directory holding `target` by probing the filesystem.
///
/// An absolute `target` resolves to its parent without touching the
/// filesystem. A relative `target` is joined onto each candidate in order and
/// the first candidate where it names a regular file wins.
pub fn locate<R>(target: impl AsRef<Path>, roots: &R) -> Result<PathBuf, ConfigError>
where
    R: SearchRoots + ?Sized,
{
    locate_with(target.as_ref(), &roots.directories(), |path| path.is_file())
}

/// Same as [`locate`] over an explicit candidate list and existence probe.
pub fn locate_with<F>(
    target: &Path,
    candidates: &[PathBuf],
    is_file: F,
) -> Result<PathBuf, ConfigError>
where
    F: Fn(&Path) -> bool,
{
    if target.is_absolute() {
        return match target.parent() {
            Some(parent) => {
                debug!(path = %target.display(), "using explicit configuration path");
                Ok(parent.to_path_buf())
            }
            None => Err(not_found(target, Vec::new())),
        };
    }

    for candidate in candidates {
        let probe = candidate.join(target);
        debug!(path = %probe.display(), "probing for configuration file");
        if is_file(&probe) {
            let directory = probe
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| candidate.clone());
            debug!(directory = %directory.display(), "configuration directory resolved");
            return Ok(directory);
        }
    }

    Err(not_found(target, candidates.to_vec()))
}

fn not_found(target: &Path, searched: Vec<PathBuf>) -> ConfigError {
    ConfigError::NotFound {
        file_name: target.display().to_string(),
        searched,
    }
}
