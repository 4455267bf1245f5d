//! Scriptable in-memory repository for service tests.

use async_trait::async_trait;
use folio_core::content::{
    AssetUpload, AuthGrant, ContactMessage, ContentRepository, UpdateReceipt, UploadedAsset,
};
use folio_core::document::PortfolioDocument;
use folio_core::{FolioError, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct MockContentRepository {
    pub password: Option<String>,
    /// Document served per backend URL.
    pub documents: HashMap<String, PortfolioDocument>,
    /// Artificial latency per backend URL for fetches.
    pub fetch_delays: HashMap<String, Duration>,
    pub update_delay: Option<Duration>,
    pub upload_delay: Option<Duration>,
    pub fail_update: Mutex<Option<String>>,
    pub fail_upload: Option<String>,
    pub uploaded_name: Option<String>,
    pub updates: Mutex<Vec<PortfolioDocument>>,
    pub fetch_tokens: Mutex<Vec<Option<String>>>,
    pub fetch_count: AtomicUsize,
    pub upload_count: AtomicUsize,
}

impl MockContentRepository {
    pub fn serving(url: &str, document: PortfolioDocument) -> Self {
        let mut documents = HashMap::new();
        documents.insert(url.to_string(), document);
        Self {
            documents,
            ..Self::default()
        }
    }

    pub fn updates(&self) -> Vec<PortfolioDocument> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentRepository for MockContentRepository {
    async fn authenticate(&self, _backend_url: &str, password: &str) -> Result<AuthGrant> {
        match &self.password {
            Some(expected) if expected == password => Ok(AuthGrant {
                token: "token-1".to_string(),
                message: Some("Authentication successful".to_string()),
            }),
            _ => Err(FolioError::auth("Invalid password")),
        }
    }

    async fn fetch_document(
        &self,
        backend_url: &str,
        token: Option<&str>,
    ) -> Result<PortfolioDocument> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.fetch_tokens
            .lock()
            .unwrap()
            .push(token.map(str::to_string));
        if let Some(delay) = self.fetch_delays.get(backend_url) {
            tokio::time::sleep(*delay).await;
        }
        self.documents
            .get(backend_url)
            .cloned()
            .ok_or_else(|| FolioError::fetch("Failed to fetch data"))
    }

    async fn update_document(
        &self,
        _backend_url: &str,
        _token: &str,
        document: &PortfolioDocument,
    ) -> Result<UpdateReceipt> {
        if let Some(delay) = self.update_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.fail_update.lock().unwrap().clone() {
            return Err(FolioError::update(message));
        }
        self.updates.lock().unwrap().push(document.clone());
        Ok(UpdateReceipt {
            message: Some("Portfolio updated successfully".to_string()),
        })
    }

    async fn upload_asset(
        &self,
        _backend_url: &str,
        _token: &str,
        upload: AssetUpload,
    ) -> Result<UploadedAsset> {
        self.upload_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.upload_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.fail_upload {
            return Err(FolioError::upload(message.clone()));
        }
        Ok(UploadedAsset {
            filename: self
                .uploaded_name
                .clone()
                .unwrap_or_else(|| format!("stored-{}", upload.file_name)),
        })
    }

    async fn submit_contact(&self, _backend_url: &str, _message: &ContactMessage) -> Result<()> {
        Ok(())
    }
}
