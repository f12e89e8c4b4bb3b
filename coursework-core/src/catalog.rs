use shared_types::{Project, ProjectData, Supervisor};
use std::collections::HashSet;

pub fn find_project<'a>(data: &'a ProjectData, project_id: &str) -> Option<&'a Project> {
    data.projects.iter().find(|p| p.id == project_id)
}

/// Favorited projects in dataset order. Ids with no matching project are skipped.
pub fn favorite_projects<'a>(data: &'a ProjectData, favorites: &[String]) -> Vec<&'a Project> {
    data.projects
        .iter()
        .filter(|p| favorites.contains(&p.id))
        .collect()
}

/// Supervisors whose back-reference list names at least one of `projects`
pub fn supervisors_with_projects<'a>(
    supervisors: &'a [Supervisor],
    projects: &[&Project],
) -> Vec<&'a Supervisor> {
    let visible: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();

    supervisors
        .iter()
        .filter(|s| s.projects.iter().any(|id| visible.contains(id.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ProjectData {
        let project = |id: &str| Project {
            id: id.to_string(),
            ..Default::default()
        };
        let supervisor = |id: &str, projects: &[&str]| Supervisor {
            id: id.to_string(),
            name: id.to_uppercase(),
            projects: projects.iter().map(|p| p.to_string()).collect(),
        };

        ProjectData {
            projects: vec![project("p1"), project("p2"), project("p3")],
            supervisors: vec![supervisor("s1", &["p1", "p3"]), supervisor("s2", &["p2"])],
            ..Default::default()
        }
    }

    #[test]
    fn test_find_project() {
        let data = data();
        assert_eq!(find_project(&data, "p2").map(|p| p.id.as_str()), Some("p2"));
        assert!(find_project(&data, "p9").is_none());
    }

    #[test]
    fn test_favorites_follow_dataset_order() {
        let data = data();
        let favorites = vec!["p3".to_string(), "gone".to_string(), "p1".to_string()];

        let ids: Vec<&str> = favorite_projects(&data, &favorites)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_supervisors_with_visible_projects() {
        let data = data();
        let visible = vec![&data.projects[1]];

        let supervisors = supervisors_with_projects(&data.supervisors, &visible);
        assert_eq!(supervisors.len(), 1);
        assert_eq!(supervisors[0].id, "s2");
    }
}
