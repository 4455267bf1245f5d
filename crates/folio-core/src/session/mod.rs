//! Session credential and its store.

pub mod model;
pub mod store;

pub use model::SessionCredential;
pub use store::SessionStore;
