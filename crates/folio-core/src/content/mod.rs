//! Remote content operations.

pub mod model;
pub mod repository;

pub use model::{AssetUpload, AuthGrant, ContactMessage, UpdateReceipt, UploadedAsset};
pub use repository::ContentRepository;
