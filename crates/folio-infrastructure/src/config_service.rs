//! Configuration service implementation.
//!
//! Loads [`FolioConfig`] from `config.toml` and applies environment overrides
//! (`FOLIO_TIMEOUT_MS`, `FOLIO_BACKEND_URL`). A missing file means defaults.

use crate::paths::FolioPaths;
use crate::storage::AtomicTomlFile;
use folio_core::Result;
use folio_core::config::FolioConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub const TIMEOUT_ENV: &str = "FOLIO_TIMEOUT_MS";
pub const BACKEND_URL_ENV: &str = "FOLIO_BACKEND_URL";

/// Configuration service that loads and caches the client configuration.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<FolioConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `<config_dir>/config.toml`.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(FolioPaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<FolioConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let file = AtomicTomlFile::<FolioConfig>::new(self.path.clone());
        let mut loaded = file.load()?.unwrap_or_default();
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());
        tracing::debug!("[ConfigService] Loaded config from {:?}: {:?}", self.path, loaded);

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }
}

/// Applies environment overrides on top of file values.
///
/// An unparsable timeout is ignored with a warning.
pub fn apply_env_overrides<F>(config: &mut FolioConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(TIMEOUT_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => config.request_timeout_ms = ms,
            _ => tracing::warn!("[ConfigService] Ignoring invalid {}={:?}", TIMEOUT_ENV, raw),
        }
    }
    if let Some(url) = lookup(BACKEND_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.default_backend_url = Some(url.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let mut config = service.get_config().unwrap();
        // Environment may carry overrides on the test host; compare file part only.
        config.default_backend_url = None;
        config.request_timeout_ms = FolioConfig::default().request_timeout_ms;
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "request_timeout_ms = 2500\ndefault_backend_url = \"https://cms.example\"\n",
        )
        .unwrap();

        let file = AtomicTomlFile::<FolioConfig>::new(path);
        let config = file.load().unwrap().unwrap();
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.default_backend_url.as_deref(), Some("https://cms.example"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (TIMEOUT_ENV, "1200"),
            (BACKEND_URL_ENV, " http://localhost:5000 "),
        ]
        .into_iter()
        .collect();
        let mut config = FolioConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.request_timeout_ms, 1200);
        assert_eq!(
            config.default_backend_url.as_deref(),
            Some("http://localhost:5000")
        );
    }

    #[test]
    fn test_invalid_timeout_override_is_ignored() {
        let mut config = FolioConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert_eq!(config.request_timeout_ms, 8000);
    }
}
