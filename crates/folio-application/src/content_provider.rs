//! ContentProvider - read-only view of the portfolio document.
//!
//! Resolves which document the public views should render: the backend's
//! document when a backend URL is configured, the compiled-in fallback
//! otherwise. Display consumers either take a [`ProviderSnapshot`] or follow
//! state changes through [`ContentProvider::subscribe`].

use folio_core::Result;
use folio_core::content::ContentRepository;
use folio_core::document::{PortfolioDocument, asset_url, fallback_document};
use folio_core::session::SessionStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Lifecycle of the provided document.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderState {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// Document fetched from the backend.
    Ready(PortfolioDocument),
    /// No backend configured; the compiled-in document is served.
    Fallback(PortfolioDocument),
    /// Fetch failed; there is no document to render.
    Failed(String),
}

impl ProviderState {
    pub fn document(&self) -> Option<&PortfolioDocument> {
        match self {
            Self::Ready(document) | Self::Fallback(document) => Some(document),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Point-in-time view for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSnapshot {
    pub document: Option<PortfolioDocument>,
    pub loading: bool,
    pub error: Option<String>,
    pub backend_url: Option<String>,
}

pub struct ContentProvider {
    repository: Arc<dyn ContentRepository>,
    store: Arc<dyn SessionStore>,
    default_backend_url: Option<String>,
    state: watch::Sender<ProviderState>,
    generation: AtomicU64,
}

impl ContentProvider {
    pub fn new(repository: Arc<dyn ContentRepository>, store: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(ProviderState::Idle);
        Self {
            repository,
            store,
            default_backend_url: None,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Backend URL used when the session store has none.
    pub fn with_default_backend_url(mut self, url: Option<String>) -> Self {
        self.default_backend_url = url.filter(|url| !url.trim().is_empty());
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ProviderState {
        self.state.borrow().clone()
    }

    pub async fn snapshot(&self) -> Result<ProviderSnapshot> {
        let state = self.state();
        Ok(ProviderSnapshot {
            document: state.document().cloned(),
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            backend_url: self.backend_url().await?,
        })
    }

    /// Currently effective backend URL.
    pub async fn backend_url(&self) -> Result<Option<String>> {
        let credential = self.store.get().await?;
        Ok(credential
            .backend_url()
            .map(str::to_string)
            .or_else(|| self.default_backend_url.clone()))
    }

    /// Resolves the document for the current backend URL.
    ///
    /// Returns the state this load settled on. If a newer load started
    /// meanwhile, nothing is published and the newer load's outcome stands.
    pub async fn load(&self) -> Result<ProviderState> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let credential = self.store.get().await?;
        self.state.send_replace(ProviderState::Loading);

        let backend_url = credential
            .backend_url()
            .map(str::to_string)
            .or_else(|| self.default_backend_url.clone());

        let resolved = match backend_url {
            None => {
                tracing::debug!("[ContentProvider] No backend URL, serving fallback document");
                ProviderState::Fallback(fallback_document())
            }
            Some(url) => {
                let token = credential.token.as_deref().filter(|t| !t.is_empty());
                match self.repository.fetch_document(&url, token).await {
                    Ok(document) => {
                        tracing::info!(
                            "[ContentProvider] Loaded document from {} ({} projects)",
                            url,
                            document.projects.len()
                        );
                        ProviderState::Ready(document)
                    }
                    Err(err) => {
                        tracing::warn!("[ContentProvider] Failed to load from {}: {}", url, err);
                        ProviderState::Failed(err.message().to_string())
                    }
                }
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(
                "[ContentProvider] Discarding superseded load (generation {})",
                generation
            );
            return Ok(self.state());
        }
        self.state.send_replace(resolved.clone());
        Ok(resolved)
    }

    /// Persists a new backend URL and reloads against it.
    ///
    /// A blank URL switches back to the fallback document.
    pub async fn set_backend_url(&self, url: impl Into<String>) -> Result<ProviderState> {
        let url = url.into().trim().to_string();
        tracing::debug!("[ContentProvider] Backend URL set to '{}'", url);
        self.store.set_backend_url(url).await?;
        self.load().await
    }

    /// Full URL of an uploaded asset, if a backend is configured.
    pub async fn asset_url(&self, filename: &str) -> Result<Option<String>> {
        Ok(self
            .backend_url()
            .await?
            .map(|base| asset_url(&base, filename)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockContentRepository;
    use folio_core::document::{Project, ProjectId};
    use folio_core::session::SessionCredential;
    use folio_infrastructure::MemorySessionStore;
    use std::time::Duration;

    fn remote_document(name: &str) -> PortfolioDocument {
        PortfolioDocument {
            name: name.to_string(),
            projects: vec![Project::placeholder(ProjectId::Number(7))],
            ..PortfolioDocument::default()
        }
    }

    #[tokio::test]
    async fn test_no_backend_url_serves_fallback_without_network() {
        let repository = Arc::new(MockContentRepository::default());
        let provider = ContentProvider::new(repository.clone(), Arc::new(MemorySessionStore::new()));
        assert_eq!(provider.state(), ProviderState::Idle);

        let state = provider.load().await.unwrap();

        let document = match state {
            ProviderState::Fallback(document) => document,
            other => panic!("expected fallback, got {:?}", other),
        };
        assert_eq!(document.projects.len(), 4);
        assert_eq!(repository.fetch_count.load(Ordering::SeqCst), 0);

        let snapshot = provider.snapshot().await.unwrap();
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.backend_url, None);
    }

    #[tokio::test]
    async fn test_backend_url_fetches_with_stored_token() {
        let repository = Arc::new(MockContentRepository::serving(
            "http://api",
            remote_document("Remote"),
        ));
        let store = Arc::new(MemorySessionStore::with_credential(SessionCredential {
            backend_url: Some("http://api".into()),
            token: Some("tok".into()),
        }));
        let provider = ContentProvider::new(repository.clone(), store);

        let state = provider.load().await.unwrap();

        assert_eq!(state.document().unwrap().name, "Remote");
        assert!(matches!(state, ProviderState::Ready(_)));
        assert_eq!(
            repository.fetch_tokens.lock().unwrap().as_slice(),
            &[Some("tok".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_has_no_document() {
        let provider = ContentProvider::new(
            Arc::new(MockContentRepository::default()),
            Arc::new(MemorySessionStore::new()),
        )
        .with_default_backend_url(Some("http://down".into()));

        let state = provider.load().await.unwrap();

        assert_eq!(state, ProviderState::Failed("Failed to fetch data".into()));
        let snapshot = provider.snapshot().await.unwrap();
        assert!(snapshot.document.is_none());
        assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch data"));
        assert_eq!(snapshot.backend_url.as_deref(), Some("http://down"));
    }

    #[tokio::test]
    async fn test_set_backend_url_persists_and_reloads() {
        let store = Arc::new(MemorySessionStore::new());
        let provider = ContentProvider::new(
            Arc::new(MockContentRepository::serving("http://api", remote_document("A"))),
            store.clone(),
        );
        let mut updates = provider.subscribe();

        let state = provider.set_backend_url(" http://api ").await.unwrap();

        assert_eq!(state.document().unwrap().name, "A");
        assert_eq!(
            store.get().await.unwrap().backend_url.as_deref(),
            Some("http://api")
        );
        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), state);

        let state = provider.set_backend_url("").await.unwrap();
        assert!(matches!(state, ProviderState::Fallback(_)));
    }

    #[tokio::test]
    async fn test_latest_load_wins() {
        let mut repository = MockContentRepository::serving("http://slow", remote_document("Slow"));
        repository
            .documents
            .insert("http://fast".into(), remote_document("Fast"));
        repository
            .fetch_delays
            .insert("http://slow".into(), Duration::from_millis(100));
        let store = Arc::new(MemorySessionStore::new());
        let provider = Arc::new(ContentProvider::new(Arc::new(repository), store.clone()));

        store.set_backend_url("http://slow".into()).await.unwrap();
        let slow = tokio::spawn({
            let provider = provider.clone();
            async move { provider.load().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        provider.set_backend_url("http://fast").await.unwrap();
        slow.await.unwrap().unwrap();

        assert_eq!(provider.state().document().unwrap().name, "Fast");
    }

    #[tokio::test]
    async fn test_asset_url_uses_current_backend() {
        let store = Arc::new(MemorySessionStore::new());
        let provider = ContentProvider::new(Arc::new(MockContentRepository::default()), store);
        assert_eq!(provider.asset_url("a.png").await.unwrap(), None);

        provider.set_backend_url("http://h:5000/").await.unwrap();
        assert_eq!(
            provider.asset_url("a.png").await.unwrap().as_deref(),
            Some("http://h:5000/uploads/a.png")
        );
    }
}
