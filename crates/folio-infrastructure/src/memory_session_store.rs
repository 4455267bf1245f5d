//! In-memory session store.

use async_trait::async_trait;
use folio_core::Result;
use folio_core::session::{SessionCredential, SessionStore};
use tokio::sync::RwLock;

/// Session store that lives only as long as the process.
#[derive(Default)]
pub struct MemorySessionStore {
    credential: RwLock<SessionCredential>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given credential.
    pub fn with_credential(credential: SessionCredential) -> Self {
        Self {
            credential: RwLock::new(credential),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<SessionCredential> {
        Ok(self.credential.read().await.clone())
    }

    async fn set_backend_url(&self, url: String) -> Result<()> {
        self.credential.write().await.backend_url = Some(url);
        Ok(())
    }

    async fn set_token(&self, token: String) -> Result<()> {
        self.credential.write().await.token = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.credential.write().await.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clear_removes_only_token() {
        let store = MemorySessionStore::new();
        store.set_backend_url("http://x".into()).await.unwrap();
        store.set_token("t".into()).await.unwrap();
        assert!(store.get().await.unwrap().is_authenticated());

        store.clear().await.unwrap();
        let credential = store.get().await.unwrap();
        assert!(!credential.is_authenticated());
        assert_eq!(credential.backend_url(), Some("http://x"));
    }
}
