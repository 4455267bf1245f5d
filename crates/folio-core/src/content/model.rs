//! Request and response types of the content backend.

use serde::{Deserialize, Serialize};

/// Admin token granted by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub message: Option<String>,
}

/// Acknowledgement of a document update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateReceipt {
    pub message: Option<String>,
}

/// A file to upload as an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AssetUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// The stored filename returned by the backend after an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub filename: String,
}

/// Fields of the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}
