//! Portfolio document domain models.
//!
//! The document is fetched from and pushed back to the backend as a whole.
//! Optional fields are defaulted here, at the deserialization boundary, so
//! consumers never need ad hoc presence checks. Keys this client does not
//! know are kept in `extra` maps and written back untouched on save.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Identifier of a project within a document.
///
/// Persisted projects carry whatever the server assigned (number or string);
/// projects added client-side get a millisecond timestamp. The untagged
/// representation keeps the wire form unchanged on round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Text(String),
}

impl ProjectId {
    /// Returns the numeric value, if this id is numeric.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProjectId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single portfolio project entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Server-relative filename; empty string means "no image".
    #[serde(default)]
    pub image: String,
    /// Display-ordered tags. Duplicates are allowed.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Creates the placeholder entry appended by "add project".
    pub fn placeholder(id: ProjectId) -> Self {
        Self {
            id,
            title: "New Project".to_string(),
            description: "Project description".to_string(),
            image: String::new(),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Returns `true` if the project has an image attached.
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// Keys of the fixed page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Hero,
    About,
    Projects,
    Skills,
    Contact,
}

impl SectionKey {
    /// All section keys in page order.
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Hero,
        SectionKey::About,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Hero => "hero",
            SectionKey::About => "about",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
            SectionKey::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown section '{}'", s))
    }
}

fn visible() -> bool {
    true
}

/// Visibility toggles for the five fixed page sections.
///
/// Missing keys default to visible; unknown keys are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    #[serde(default = "visible")]
    pub hero: bool,
    #[serde(default = "visible")]
    pub about: bool,
    #[serde(default = "visible")]
    pub projects: bool,
    #[serde(default = "visible")]
    pub skills: bool,
    #[serde(default = "visible")]
    pub contact: bool,
    /// Flags for sections this client does not render.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            hero: true,
            about: true,
            projects: true,
            skills: true,
            contact: true,
            extra: Map::new(),
        }
    }
}

impl Sections {
    pub fn get(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Hero => self.hero,
            SectionKey::About => self.about,
            SectionKey::Projects => self.projects,
            SectionKey::Skills => self.skills,
            SectionKey::Contact => self.contact,
        }
    }

    pub fn set(&mut self, key: SectionKey, visible: bool) {
        let slot = match key {
            SectionKey::Hero => &mut self.hero,
            SectionKey::About => &mut self.about,
            SectionKey::Projects => &mut self.projects,
            SectionKey::Skills => &mut self.skills,
            SectionKey::Contact => &mut self.contact,
        };
        *slot = visible;
    }

    /// Iterates `(key, visible)` pairs in page order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, bool)> + '_ {
        SectionKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

/// The portfolio document: the single mutable aggregate shared with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Server-relative filename of the profile photo, exactly as received.
    /// Use [`PortfolioDocument::profile_image`] for display.
    #[serde(
        default,
        alias = "profileImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PortfolioDocument {
    /// Parses a document received from the backend.
    ///
    /// Defaults missing optional fields and rejects documents whose project
    /// ids are not unique.
    pub fn from_wire(value: Value) -> Result<Self, String> {
        let document: PortfolioDocument =
            serde_json::from_value(value).map_err(|e| format!("Malformed document: {}", e))?;
        document.validate()?;
        Ok(document)
    }

    /// Checks the document invariants.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.projects.len());
        for project in &self.projects {
            if !seen.insert(&project.id) {
                return Err(format!(
                    "Malformed document: duplicate project id {}",
                    project.id
                ));
            }
        }
        Ok(())
    }

    /// Profile image filename, if one is set. A blank value counts as none.
    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
    }

    /// Finds the index of the project with the given id.
    pub fn project_index(&self, id: &ProjectId) -> Option<usize> {
        self.projects.iter().position(|project| &project.id == id)
    }

    /// Largest numeric project id in the document, if any.
    pub fn max_numeric_id(&self) -> Option<i64> {
        self.projects.iter().filter_map(|p| p.id.as_number()).max()
    }
}

/// Resolves the public URL of an uploaded asset.
pub fn asset_url(backend_url: &str, filename: &str) -> String {
    format!(
        "{}/uploads/{}",
        backend_url.trim_end_matches('/'),
        filename.trim_start_matches('/')
    )
}
