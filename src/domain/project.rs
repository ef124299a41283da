//! Project entity and its lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a project.
///
/// Freshly generated ids are random UUIDs, but any string is accepted when
/// parsing a drag payload; the store decides whether it names a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a new random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a project sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Finished,
}

impl ProjectStatus {
    /// All statuses in board order
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    /// Lowercase name used in element ids (`active-projects`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Finished => "finished",
        }
    }

    /// The other status
    pub fn toggled(self) -> Self {
        match self {
            ProjectStatus::Active => ProjectStatus::Finished,
            ProjectStatus::Finished => ProjectStatus::Active,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of tracked work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Create a new active project with a fresh id
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            id: ProjectId::generate(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    /// "1 person" / "N persons"
    pub fn persons(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_is_active() {
        let project = Project::new("Build API", "Implement REST endpoints", 3);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.people, 3);
        assert!(!project.id.as_str().is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_persons_label() {
        let mut project = Project::new("t", "description", 1);
        assert_eq!(project.persons(), "1 person");
        project.people = 4;
        assert_eq!(project.persons(), "4 persons");
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ProjectStatus::Active.as_str(), "active");
        assert_eq!(ProjectStatus::Finished.to_string(), "finished");
        assert_eq!(ProjectStatus::Active.toggled(), ProjectStatus::Finished);
    }
}
