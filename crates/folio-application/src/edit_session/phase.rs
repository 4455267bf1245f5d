//! Phase and status types of an edit session.

use folio_core::FolioError;
use std::fmt;
use std::str::FromStr;

/// Where an edit session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    /// No admin token.
    LoggedOut,
    /// Token present, no document fetched yet.
    Disconnected,
    Connecting,
    /// Working copy equals the freshly fetched document.
    Connected,
    ConnectFailed(String),
    /// Working copy has unsaved edits.
    Editing,
    Saving,
    Saved,
    SaveFailed(String),
}

impl fmt::Display for EditPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged out"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::ConnectFailed(message) => write!(f, "connect failed: {}", message),
            Self::Editing => write!(f, "editing"),
            Self::Saving => write!(f, "saving"),
            Self::Saved => write!(f, "saved"),
            Self::SaveFailed(message) => write!(f, "save failed: {}", message),
        }
    }
}

/// Status banner: phase plus the last progress message or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStatus {
    pub phase: EditPhase,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Result of a connect that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The fetched document became the working copy.
    Connected,
    /// A later connect was issued before this one completed; its response was dropped.
    Superseded,
}

/// Where an uploaded image goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Profile,
    /// Project by position in the working copy at the time of the call.
    Project(usize),
}

impl FromStr for UploadTarget {
    type Err = FolioError;

    /// Parses `profile` or `project:<index>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("profile") {
            return Ok(Self::Profile);
        }
        s.strip_prefix("project:")
            .and_then(|index| index.trim().parse().ok())
            .map(Self::Project)
            .ok_or_else(|| {
                FolioError::invalid_input(format!(
                    "Unknown upload target '{}' (expected 'profile' or 'project:<index>')",
                    s
                ))
            })
    }
}
