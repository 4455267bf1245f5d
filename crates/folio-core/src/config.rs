//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default deadline for a single backend request.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 8000;

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// Root configuration, stored as `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Deadline applied to every HTTP request, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Backend used when the session store has no remembered endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_backend_url: Option<String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            default_backend_url: None,
        }
    }
}

impl FolioConfig {
    /// Per-request deadline. A configured `0` falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        let ms = match self.request_timeout_ms {
            0 => DEFAULT_REQUEST_TIMEOUT_MS,
            ms => ms,
        };
        Duration::from_millis(ms)
    }
}
