//! File-backed session store.
//!
//! Persists the remembered backend URL and admin token in `session.toml` so a
//! new process picks up the previous session.

use crate::paths::FolioPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use folio_core::Result;
use folio_core::session::{SessionCredential, SessionStore};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Session store backed by a TOML file.
///
/// The credential is cached after the first read; every write goes through
/// the file first and updates the cache only on success.
pub struct TomlSessionStore {
    file: AtomicTomlFile<SessionCredential>,
    cache: Mutex<Option<SessionCredential>>,
}

impl TomlSessionStore {
    /// Creates a store at the default location (`<config_dir>/session.toml`).
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(FolioPaths::session_file()?))
    }

    /// Creates a store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            cache: Mutex::new(None),
        }
    }

    async fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut SessionCredential),
    {
        let mut cache = self.cache.lock().await;
        let written = self.file.update(SessionCredential::default(), f)?;
        *cache = Some(written);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn get(&self) -> Result<SessionCredential> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "[TomlSessionStore] Loaded session from {:?} (authenticated: {})",
            self.file.path(),
            loaded.is_authenticated()
        );
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    async fn set_backend_url(&self, url: String) -> Result<()> {
        self.modify(|credential| credential.backend_url = Some(url))
            .await
    }

    async fn set_token(&self, token: String) -> Result<()> {
        self.modify(|credential| credential.token = Some(token)).await
    }

    async fn clear(&self) -> Result<()> {
        self.modify(|credential| credential.token = None).await
    }
}
