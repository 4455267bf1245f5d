//! HttpContentClient - REST implementation of [`ContentRepository`].
//!
//! Talks to the portfolio backend:
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | POST | `/verify` | none |
//! | GET | `/data` | optional bearer |
//! | POST | `/update` | bearer |
//! | POST | `/upload` | bearer (multipart field `file`) |
//! | POST | `/contact` | none |
//!
//! Each operation reduces every failure (timeout, network, non-2xx, bad JSON)
//! to its own error kind with a message fit for a status banner.

use super::transport::{HttpRequest, HttpTransport, MultipartFile, RawResponse, join_url};
use async_trait::async_trait;
use folio_core::content::{
    AssetUpload, AuthGrant, ContactMessage, ContentRepository, UpdateReceipt, UploadedAsset,
};
use folio_core::document::PortfolioDocument;
use folio_core::{FolioError, Result};
use serde::Deserialize;
use serde_json::json;

const NOT_AUTHENTICATED: &str = "Not authenticated";
const NO_BACKEND: &str = "Backend URL is not configured";

/// Which remote operation an error belongs to.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Authenticate,
    Fetch,
    Update,
    Upload,
    Contact,
}

impl Operation {
    fn fallback_message(self) -> &'static str {
        match self {
            Operation::Authenticate => "Authentication failed. Please try again.",
            Operation::Fetch => "Failed to fetch data",
            Operation::Update => "Update failed",
            Operation::Upload => "Upload failed",
            Operation::Contact => "Failed to send message",
        }
    }

    fn error(self, message: impl Into<String>) -> FolioError {
        let message = message.into();
        match self {
            Operation::Authenticate => FolioError::Auth(message),
            Operation::Fetch => FolioError::Fetch(message),
            Operation::Update => FolioError::Update(message),
            Operation::Upload => FolioError::Upload(message),
            Operation::Contact => FolioError::Contact(message),
        }
    }

    /// Reduces a transport failure to this operation's error kind.
    fn from_transport(self, err: FolioError) -> FolioError {
        match err {
            FolioError::Timeout(message) => self.error(message),
            FolioError::Network(detail) => match self {
                Operation::Authenticate => {
                    self.error("Failed to connect to the backend. Check the URL and try again.")
                }
                _ => self.error(format!("{}: {}", self.fallback_message(), detail)),
            },
            other => self.error(other.message().to_string()),
        }
    }

    /// Builds the error for a non-2xx response.
    fn from_status(self, response: &RawResponse) -> FolioError {
        let message = response
            .server_message()
            .unwrap_or_else(|| self.fallback_message().to_string());
        tracing::warn!(
            "[HttpContentClient] {:?} rejected with status {}: {}",
            self,
            response.status(),
            message
        );
        self.error(message)
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    token: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

impl AckResponse {
    fn reason(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    filename: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

/// Stateless client for the portfolio backend.
#[derive(Clone, Default)]
pub struct HttpContentClient {
    transport: HttpTransport,
}

impl HttpContentClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Sends a request and returns the 2xx response, or the operation's error.
    async fn send(&self, operation: Operation, request: HttpRequest) -> Result<RawResponse> {
        let response = self
            .transport
            .request(request)
            .await
            .map_err(|err| operation.from_transport(err))?;

        if !response.is_success() {
            return Err(operation.from_status(&response));
        }
        Ok(response)
    }

    fn endpoint(operation: Operation, backend_url: &str, path: &str) -> Result<String> {
        if backend_url.trim().is_empty() {
            return Err(operation.error(NO_BACKEND));
        }
        Ok(join_url(backend_url, path))
    }

    fn require_token(operation: Operation, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(operation.error(NOT_AUTHENTICATED));
        }
        Ok(())
    }

    fn decode<T: for<'de> Deserialize<'de>>(
        operation: Operation,
        response: &RawResponse,
    ) -> Result<T> {
        response.json().map_err(|e| {
            tracing::warn!("[HttpContentClient] {:?} returned malformed JSON: {}", operation, e);
            operation.error(format!("{}: malformed response", operation.fallback_message()))
        })
    }
}

#[async_trait]
impl ContentRepository for HttpContentClient {
    async fn authenticate(&self, backend_url: &str, password: &str) -> Result<AuthGrant> {
        let op = Operation::Authenticate;
        let url = Self::endpoint(op, backend_url, "verify")?;
        let request = HttpRequest::post(url).json(json!({ "password": password }));

        let response = self.send(op, request).await?;
        let verify: VerifyResponse = Self::decode(op, &response)?;

        match verify.token.filter(|token| !token.is_empty()) {
            Some(token) if verify.success => {
                tracing::info!("[HttpContentClient] Authenticated against {}", backend_url);
                Ok(AuthGrant {
                    token,
                    message: verify.message,
                })
            }
            _ => Err(op.error(
                verify
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| op.fallback_message().to_string()),
            )),
        }
    }

    async fn fetch_document(
        &self,
        backend_url: &str,
        token: Option<&str>,
    ) -> Result<PortfolioDocument> {
        let op = Operation::Fetch;
        let url = Self::endpoint(op, backend_url, "data")?;
        let token = token.filter(|token| !token.trim().is_empty());
        let request = HttpRequest::get(url).bearer(token);

        let response = self.send(op, request).await?;
        let value: serde_json::Value = Self::decode(op, &response)?;
        let document = PortfolioDocument::from_wire(value).map_err(|message| op.error(message))?;

        tracing::info!(
            "[HttpContentClient] Fetched document from {} ({} projects)",
            backend_url,
            document.projects.len()
        );
        Ok(document)
    }

    async fn update_document(
        &self,
        backend_url: &str,
        token: &str,
        document: &PortfolioDocument,
    ) -> Result<UpdateReceipt> {
        let op = Operation::Update;
        Self::require_token(op, token)?;
        let url = Self::endpoint(op, backend_url, "update")?;
        let body = serde_json::to_value(document).map_err(|e| op.error(e.to_string()))?;
        let request = HttpRequest::post(url).bearer(Some(token)).json(body);

        let response = self.send(op, request).await?;
        let ack: AckResponse = Self::decode(op, &response)?;
        if !ack.success {
            return Err(op.error(
                ack.reason()
                    .unwrap_or_else(|| op.fallback_message().to_string()),
            ));
        }

        tracing::info!("[HttpContentClient] Document updated on {}", backend_url);
        Ok(UpdateReceipt {
            message: ack.message,
        })
    }

    async fn upload_asset(
        &self,
        backend_url: &str,
        token: &str,
        upload: AssetUpload,
    ) -> Result<UploadedAsset> {
        let op = Operation::Upload;
        Self::require_token(op, token)?;
        let url = Self::endpoint(op, backend_url, "upload")?;
        let request = HttpRequest::post(url)
            .bearer(Some(token))
            .multipart(MultipartFile {
                field: "file".to_string(),
                file_name: upload.file_name,
                bytes: upload.bytes,
            });

        let response = self.send(op, request).await?;
        let uploaded: UploadResponse = Self::decode(op, &response)?;

        match uploaded.filename.filter(|name| !name.is_empty()) {
            Some(filename) if uploaded.success => {
                tracing::info!("[HttpContentClient] Uploaded asset as {}", filename);
                Ok(UploadedAsset { filename })
            }
            _ => Err(op.error(
                uploaded
                    .error
                    .or(uploaded.message)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| op.fallback_message().to_string()),
            )),
        }
    }

    async fn submit_contact(&self, backend_url: &str, message: &ContactMessage) -> Result<()> {
        let op = Operation::Contact;
        let url = Self::endpoint(op, backend_url, "contact")?;
        let body = serde_json::to_value(message).map_err(|e| op.error(e.to_string()))?;
        let request = HttpRequest::post(url).json(body);

        let response = self.send(op, request).await?;
        let ack: AckResponse = Self::decode(op, &response)?;
        if !ack.success {
            return Err(op.error(
                ack.reason()
                    .unwrap_or_else(|| op.fallback_message().to_string()),
            ));
        }
        Ok(())
    }
}
