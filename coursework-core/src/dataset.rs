//! Static dataset loading.
//!
//! The document is read once per application load. `supervisors` and `tags`
//! are accepted either as arrays or as objects: supervisor objects contribute
//! their values, tag objects contribute their keys.

use serde::Deserialize;
use serde_json::{Map, Value};
use shared_types::{Metadata, Project, ProjectData, Supervisor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Message shown to users when the dataset cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load project data";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawProjectData {
    projects: Vec<Project>,
    supervisors: SupervisorsField,
    tags: TagsField,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SupervisorsField {
    List(Vec<Supervisor>),
    Keyed(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagsField {
    List(Vec<String>),
    Keyed(Map<String, Value>),
}

impl SupervisorsField {
    fn into_list(self) -> Result<Vec<Supervisor>, serde_json::Error> {
        match self {
            SupervisorsField::List(list) => Ok(list),
            SupervisorsField::Keyed(map) => map
                .into_iter()
                .map(|(_, value)| serde_json::from_value(value))
                .collect(),
        }
    }
}

impl TagsField {
    fn into_list(self) -> Vec<String> {
        match self {
            TagsField::List(list) => list,
            TagsField::Keyed(map) => map.into_iter().map(|(key, _)| key).collect(),
        }
    }
}

/// Parse and normalize a dataset document
pub fn parse_dataset(content: &str) -> Result<ProjectData, DatasetError> {
    let raw: RawProjectData = serde_json::from_str(content)?;

    Ok(ProjectData {
        projects: raw.projects,
        supervisors: raw.supervisors.into_list()?,
        tags: raw.tags.into_list(),
        metadata: raw.metadata,
    })
}

/// Read and normalize the dataset document at `path`
pub fn load_dataset(path: impl AsRef<Path>) -> Result<ProjectData, DatasetError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dataset(&content)
}

/// Outcome of the one-time dataset load, as seen by pages.
///
/// A failed load never exposes partial data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Ready(ProjectData),
    Failed(String),
}

impl LoadState {
    pub fn from_result(result: Result<ProjectData, DatasetError>) -> Self {
        match result {
            Ok(data) => {
                info!(
                    "Loaded {} projects, {} supervisors, {} tags",
                    data.projects.len(),
                    data.supervisors.len(),
                    data.tags.len()
                );
                LoadState::Ready(data)
            }
            Err(e) => {
                error!("Error loading project data: {}", e);
                LoadState::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Load from disk, folding any failure into the generic error flag
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::from_result(load_dataset(path))
    }

    /// True once data is available; drives scroll restoration
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn data(&self) -> Option<&ProjectData> {
        match self {
            LoadState::Ready(data) => Some(data),
            LoadState::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Ready(_) => None,
            LoadState::Failed(message) => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ARRAY_SHAPE: &str = r#"{
        "projects": [
            {"id": "project_0", "title_ru": "Анализ данных", "supervisor": "Петров П.П.", "tags": ["Анализ данных"]}
        ],
        "supervisors": [
            {"id": "supervisor_0", "name": "Петров П.П.", "projects": ["project_0"]}
        ],
        "tags": ["Анализ данных"],
        "metadata": {"total_projects": 1, "total_supervisors": 1, "total_tags": 1}
    }"#;

    const KEYED_SHAPE: &str = r#"{
        "projects": [],
        "supervisors": {
            "Сидорова А.А.": {"id": "supervisor_1", "name": "Сидорова А.А.", "projects": []},
            "Абрамов Б.Б.": {"id": "supervisor_0", "name": "Абрамов Б.Б.", "projects": []}
        },
        "tags": {"Робототехника": 3, "IoT": 1},
        "metadata": {"total_projects": 40, "total_supervisors": 2, "total_tags": 2}
    }"#;

    #[test]
    fn test_array_shape_is_used_verbatim() {
        let data = parse_dataset(ARRAY_SHAPE).unwrap();

        assert_eq!(data.projects.len(), 1);
        assert_eq!(data.projects[0].id, "project_0");
        assert_eq!(data.supervisors[0].name, "Петров П.П.");
        assert_eq!(data.tags, vec!["Анализ данных".to_string()]);
        assert_eq!(data.metadata.total_projects, 1);
    }

    #[test]
    fn test_keyed_shape_is_normalized_in_document_order() {
        let data = parse_dataset(KEYED_SHAPE).unwrap();

        let names: Vec<&str> = data.supervisors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Сидорова А.А.", "Абрамов Б.Б."]);
        assert_eq!(data.tags, vec!["Робототехника".to_string(), "IoT".to_string()]);
        // Metadata is display-only and not reconciled with the arrays
        assert_eq!(data.metadata.total_projects, 40);
    }

    #[test]
    fn test_missing_sections_fail_the_load() {
        assert!(parse_dataset(r#"{"projects": [], "tags": []}"#).is_err());
        assert!(parse_dataset("not json").is_err());
    }

    #[test]
    fn test_load_state_hides_cause() {
        let dir = TempDir::new().unwrap();
        let state = LoadState::load(dir.path().join("projects.json"));

        assert!(!state.is_ready());
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_load_state_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, ARRAY_SHAPE).unwrap();

        let state = LoadState::load(&path);
        assert!(state.is_ready());
        assert_eq!(state.data().unwrap().projects[0].title_ru, "Анализ данных");
        assert_eq!(state.error(), None);
    }
}
