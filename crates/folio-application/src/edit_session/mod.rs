//! Admin edit session.

mod controller;
mod phase;

pub use controller::EditSession;
pub use phase::{ConnectOutcome, EditPhase, EditStatus, UploadTarget};
