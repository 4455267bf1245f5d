//! Application layer for Folio.
//!
//! Coordinates the content repository and the session store into the two
//! stateful services the front ends use: the read-only [`ContentProvider`]
//! and the admin [`EditSession`].

pub mod content_provider;
pub mod edit_session;

#[cfg(test)]
mod test_support;

pub use content_provider::{ContentProvider, ProviderSnapshot, ProviderState};
pub use edit_session::{ConnectOutcome, EditPhase, EditSession, EditStatus, UploadTarget};
