//! Domain layer for Folio.
//!
//! Holds the portfolio document model and its typed mutations, the session
//! credential, the repository and store traits implemented by
//! `folio-infrastructure`, and the shared error type. Nothing here performs I/O.

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::{ErrorKind, FolioError, Result};
