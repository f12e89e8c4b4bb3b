use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A course project as published in the catalog dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub title_ru: String,
    pub title_en: String,
    pub supervisor: String,
    pub co_supervisor: String,
    pub annotation: String,
    pub goals: String,
    pub tasks: String,
    pub requirements: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub format: String,
    pub courses: Vec<String>,
    pub tags: Vec<String>,
    pub contact: String,
    pub team_size: String,
    pub selection_form: String,
    pub preferred_contact: String,
    pub video_link: String,
    pub presentation_link: String,
}

impl Project {
    /// Co-supervisor name, if the project has one
    pub fn co_supervisor(&self) -> Option<&str> {
        non_empty(&self.co_supervisor)
    }

    pub fn video_link(&self) -> Option<&str> {
        non_empty(&self.video_link)
    }

    pub fn presentation_link(&self) -> Option<&str> {
        non_empty(&self.presentation_link)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Supervisor record. `projects` is a back-reference; the project's
/// `supervisor` field is the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Supervisor {
    pub id: String,
    pub name: String,
    pub projects: Vec<String>,
}

/// Display-only counters shipped with the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Metadata {
    pub total_projects: u32,
    pub total_supervisors: u32,
    pub total_tags: u32,
}

/// Normalized dataset held in memory for the lifetime of the application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectData {
    pub projects: Vec<Project>,
    pub supervisors: Vec<Supervisor>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}
