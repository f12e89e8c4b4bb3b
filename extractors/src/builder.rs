use shared_types::{Metadata, Project, ProjectData, Supervisor};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Accumulates projects and derives the supervisor index, tag list and
/// counts of the published dataset
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    projects: Vec<Project>,
    project_ids: HashSet<String>,
    supervisors: Vec<Supervisor>,
    supervisor_index: HashMap<String, usize>,
    tags: BTreeSet<String>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a previously published dataset, keeping its ids
    pub fn from_existing(data: ProjectData) -> Self {
        let mut builder = Self::new();

        for supervisor in data.supervisors {
            builder
                .supervisor_index
                .insert(supervisor.name.clone(), builder.supervisors.len());
            builder.supervisors.push(supervisor);
        }
        builder.tags.extend(data.tags);

        for project in data.projects {
            builder.project_ids.insert(project.id.clone());
            builder.tags.extend(project.tags.iter().cloned());
            builder.projects.push(project);
        }

        builder
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.project_ids.contains(project_id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Add a project, registering its supervisor on first sight.
    ///
    /// Returns `false` when a project with the same id is already present.
    pub fn add_project(&mut self, project: Project) -> bool {
        if !self.project_ids.insert(project.id.clone()) {
            debug!("Skipping duplicate project {}", project.id);
            return false;
        }

        self.tags.extend(project.tags.iter().cloned());

        let name = project.supervisor.trim();
        if !name.is_empty() {
            let index = match self.supervisor_index.get(name) {
                Some(&index) => index,
                None => {
                    let index = self.supervisors.len();
                    self.supervisors.push(Supervisor {
                        id: format!("supervisor_{}", index),
                        name: name.to_string(),
                        projects: Vec::new(),
                    });
                    self.supervisor_index.insert(name.to_string(), index);
                    index
                }
            };
            self.supervisors[index].projects.push(project.id.clone());
        }

        self.projects.push(project);
        true
    }

    pub fn build(self) -> ProjectData {
        let metadata = Metadata {
            total_projects: self.projects.len() as u32,
            total_supervisors: self.supervisors.len() as u32,
            total_tags: self.tags.len() as u32,
        };

        ProjectData {
            projects: self.projects,
            supervisors: self.supervisors,
            tags: self.tags.into_iter().collect(),
            metadata,
        }
    }
}
