//! Infrastructure layer for Folio: HTTP client, session stores, configuration.

pub mod config_service;
pub mod http;
pub mod memory_session_store;
pub mod paths;
pub mod storage;
pub mod toml_session_store;

pub use crate::config_service::ConfigService;
pub use crate::http::{HttpContentClient, HttpTransport};
pub use crate::memory_session_store::MemorySessionStore;
pub use crate::toml_session_store::TomlSessionStore;
