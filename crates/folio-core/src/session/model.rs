//! Session credential model.

use serde::{Deserialize, Serialize};

/// Endpoint and admin credential remembered across runs.
///
/// `token` absent means unauthenticated. No expiry is tracked client-side; an
/// expired token is only discovered when the backend rejects a call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    #[serde(
        default,
        rename = "admin_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,
}

impl SessionCredential {
    /// Returns `true` if an admin token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Returns the backend URL if one is configured and non-blank.
    pub fn backend_url(&self) -> Option<&str> {
        self.backend_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
