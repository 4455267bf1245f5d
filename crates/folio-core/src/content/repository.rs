//! Content repository trait.
//!
//! Defines the remote operations against the portfolio backend.

use async_trait::async_trait;

use super::model::{AssetUpload, AuthGrant, ContactMessage, UpdateReceipt, UploadedAsset};
use crate::document::PortfolioDocument;
use crate::error::Result;

/// An abstract client for the portfolio content backend.
///
/// Every operation is stateless: the backend URL and token are passed on each
/// call rather than held by the implementation. Each operation reports failure
/// with exactly one error kind:
///
/// | Operation | Error kind |
/// |---|---|
/// | `authenticate` | `FolioError::Auth` |
/// | `fetch_document` | `FolioError::Fetch` |
/// | `update_document` | `FolioError::Update` |
/// | `upload_asset` | `FolioError::Upload` |
/// | `submit_contact` | `FolioError::Contact` |
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Exchanges the admin password for a token.
    async fn authenticate(&self, backend_url: &str, password: &str) -> Result<AuthGrant>;

    /// Fetches the portfolio document. The token is optional for public reads.
    async fn fetch_document(
        &self,
        backend_url: &str,
        token: Option<&str>,
    ) -> Result<PortfolioDocument>;

    /// Replaces the whole document on the backend.
    async fn update_document(
        &self,
        backend_url: &str,
        token: &str,
        document: &PortfolioDocument,
    ) -> Result<UpdateReceipt>;

    /// Uploads a binary asset. The caller splices the returned filename.
    async fn upload_asset(
        &self,
        backend_url: &str,
        token: &str,
        upload: AssetUpload,
    ) -> Result<UploadedAsset>;

    /// Sends the public contact form.
    async fn submit_contact(&self, backend_url: &str, message: &ContactMessage) -> Result<()>;
}
