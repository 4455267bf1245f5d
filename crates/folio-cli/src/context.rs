//! Wiring of configuration, session store and HTTP client for one invocation.

use anyhow::{Context, Result};
use folio_application::{ContentProvider, EditSession};
use folio_core::config::FolioConfig;
use folio_core::content::ContentRepository;
use folio_core::session::SessionStore;
use folio_infrastructure::{
    ConfigService, HttpContentClient, HttpTransport, MemorySessionStore, TomlSessionStore,
};
use std::sync::Arc;

pub struct AppContext {
    pub config: FolioConfig,
    pub store: Arc<dyn SessionStore>,
    pub repository: Arc<dyn ContentRepository>,
}

impl AppContext {
    pub fn build(ephemeral: bool, timeout_ms: Option<u64>) -> Result<Self> {
        let mut config = if ephemeral {
            FolioConfig::default()
        } else {
            ConfigService::new_default()
                .and_then(|service| service.get_config())
                .context("Failed to load configuration")?
        };
        if let Some(ms) = timeout_ms.filter(|ms| *ms > 0) {
            config.request_timeout_ms = ms;
        }

        let store: Arc<dyn SessionStore> = if ephemeral {
            Arc::new(MemorySessionStore::new())
        } else {
            Arc::new(TomlSessionStore::new_default().context("Failed to open session store")?)
        };

        let transport = HttpTransport::new(config.request_timeout());
        tracing::debug!(
            "[AppContext] ephemeral={}, timeout={:?}",
            ephemeral,
            transport.timeout()
        );

        Ok(Self {
            config,
            store,
            repository: Arc::new(HttpContentClient::new(transport)),
        })
    }

    pub fn content_provider(&self) -> ContentProvider {
        ContentProvider::new(self.repository.clone(), self.store.clone())
            .with_default_backend_url(self.config.default_backend_url.clone())
    }

    pub async fn edit_session(&self) -> Result<EditSession> {
        Ok(EditSession::open(self.repository.clone(), self.store.clone()).await?)
    }

    /// Backend URL from the session, else from configuration.
    pub async fn backend_url(&self) -> Result<Option<String>> {
        let credential = self.store.get().await?;
        Ok(credential
            .backend_url()
            .map(str::to_string)
            .or_else(|| self.config.default_backend_url.clone()))
    }
}
