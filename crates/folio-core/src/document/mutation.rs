//! Typed mutations of the portfolio working copy.
//!
//! All edits go through [`apply`], a single reducer over the closed set of
//! [`DocumentMutation`] variants. Index-addressed mutations whose index is out
//! of range are no-ops: a stale UI referring to a removed project must never
//! corrupt the working copy.

use super::model::{PortfolioDocument, Project, ProjectId, SectionKey};
use std::collections::HashSet;
use std::str::FromStr;

/// Top-level scalar fields of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Name,
    Title,
    ProfileImage,
}

impl FromStr for ScalarField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "title" => Ok(Self::Title),
            "profile_image" | "profileImage" | "profile-image" => Ok(Self::ProfileImage),
            other => Err(format!("Unknown field '{}'", other)),
        }
    }
}

/// Editable string fields of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Description,
    Image,
}

impl FromStr for ProjectField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "image" => Ok(Self::Image),
            other => Err(format!("Unknown project field '{}'", other)),
        }
    }
}

/// A single edit of the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMutation {
    SetScalar(ScalarField, String),
    SetSectionFlag(SectionKey, bool),
    SetProjectField {
        index: usize,
        field: ProjectField,
        value: String,
    },
    SetProjectTags {
        index: usize,
        raw: String,
    },
    AddProject,
    RemoveProject {
        index: usize,
    },
}

impl DocumentMutation {
    /// Builds a field mutation from a textual path.
    ///
    /// Accepted paths: `name`, `title`, `profile_image`, `sections.<key>`
    /// (value `true`/`false`/`on`/`off`), `projects[<index>].<field>` where
    /// field is `title`, `description`, `image` or `tags`.
    pub fn from_path(path: &str, value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        let path = path.trim();

        if let Some(key) = path.strip_prefix("sections.") {
            let key: SectionKey = key.parse()?;
            return Ok(Self::SetSectionFlag(key, parse_flag(&value)?));
        }

        if let Some(rest) = path.strip_prefix("projects[") {
            let (index, field) = rest
                .split_once("].")
                .ok_or_else(|| format!("Malformed project path '{}'", path))?;
            let index: usize = index
                .parse()
                .map_err(|_| format!("Invalid project index '{}'", index))?;
            if field == "tags" {
                return Ok(Self::SetProjectTags { index, raw: value });
            }
            return Ok(Self::SetProjectField {
                index,
                field: field.parse()?,
                value,
            });
        }

        Ok(Self::SetScalar(path.parse()?, value))
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(format!("Expected on/off, got '{}'", other)),
    }
}

/// Splits comma-separated tag input into trimmed tags.
///
/// Blank input clears the tags. Otherwise every piece is kept, including empty
/// ones between consecutive commas, and duplicates are preserved.
pub fn parse_tags(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// Generates ids for projects added client-side.
///
/// Ids are millisecond timestamps, forced strictly above both the last id
/// handed out and every numeric id already in the document. If that would
/// overflow `i64`, the smallest positive id not in the document is used.
#[derive(Debug, Default, Clone)]
pub struct ProjectIdGenerator {
    last: Option<i64>,
}

impl ProjectIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, document: &PortfolioDocument) -> ProjectId {
        let now = chrono::Utc::now().timestamp_millis();
        let floor = self
            .last
            .into_iter()
            .chain(document.max_numeric_id())
            .max();
        let id = match floor {
            None => Some(now),
            Some(n) => match n.checked_add(1) {
                Some(floor) => Some(now.max(floor)),
                None => smallest_unused_id(document),
            },
        };
        match id {
            Some(id) => {
                self.last = Some(id);
                ProjectId::Number(id)
            }
            None => ProjectId::Text(format!("project-{}-{}", now, document.projects.len())),
        }
    }
}

fn smallest_unused_id(document: &PortfolioDocument) -> Option<i64> {
    let used: HashSet<i64> = document
        .projects
        .iter()
        .filter_map(|project| project.id.as_number())
        .collect();
    (1..=i64::MAX).find(|candidate| !used.contains(candidate))
}

/// Applies a mutation to the document. Returns `true` if anything changed.
pub fn apply(
    document: &mut PortfolioDocument,
    mutation: DocumentMutation,
    ids: &mut ProjectIdGenerator,
) -> bool {
    match mutation {
        DocumentMutation::SetScalar(field, value) => match field {
            ScalarField::Name => replace(&mut document.name, value),
            ScalarField::Title => replace(&mut document.title, value),
            ScalarField::ProfileImage => {
                // Clearing keeps the key on the wire if the backend sent one.
                let next = if value.is_empty() && document.profile_image.is_none() {
                    None
                } else {
                    Some(value)
                };
                let changed = document.profile_image != next;
                document.profile_image = next;
                changed
            }
        },
        DocumentMutation::SetSectionFlag(key, visible) => {
            let changed = document.sections.get(key) != visible;
            document.sections.set(key, visible);
            changed
        }
        DocumentMutation::SetProjectField {
            index,
            field,
            value,
        } => {
            let Some(project) = document.projects.get_mut(index) else {
                return false;
            };
            match field {
                ProjectField::Title => replace(&mut project.title, value),
                ProjectField::Description => replace(&mut project.description, value),
                ProjectField::Image => replace(&mut project.image, value),
            }
        }
        DocumentMutation::SetProjectTags { index, raw } => {
            let Some(project) = document.projects.get_mut(index) else {
                return false;
            };
            let tags = parse_tags(&raw);
            let changed = project.tags != tags;
            project.tags = tags;
            changed
        }
        DocumentMutation::AddProject => {
            let id = ids.next_id(document);
            document.projects.push(Project::placeholder(id));
            true
        }
        DocumentMutation::RemoveProject { index } => {
            if index >= document.projects.len() {
                return false;
            }
            document.projects.remove(index);
            true
        }
    }
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
