//! Session store trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::SessionCredential;

/// Holds the backend endpoint and admin token for the current session.
///
/// Implementations decide durability; the file-backed store survives process
/// restarts the way a browser's local storage survives reloads.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the current credential.
    async fn get(&self) -> Result<SessionCredential>;

    async fn set_backend_url(&self, url: String) -> Result<()>;

    async fn set_token(&self, token: String) -> Result<()>;

    /// Removes the token (logout). The remembered endpoint is kept.
    async fn clear(&self) -> Result<()>;
}
