//! Path management for folio configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/folio/             # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── session.toml             # Remembered backend URL and admin token
//! ```
//!
//! Setting `FOLIO_CONFIG_DIR` replaces the whole directory.

use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for folio_core::FolioError {
    fn from(err: PathError) -> Self {
        folio_core::FolioError::config(err.to_string())
    }
}

/// Resolves folio's on-disk locations.
pub struct FolioPaths;

impl FolioPaths {
    /// Returns the folio configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join("folio"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to `session.toml`.
    ///
    /// # Security Note
    ///
    /// The admin token is stored in plaintext. The file is created with mode
    /// 600 on Unix.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
