//! Filter/search engine.
//!
//! Facets combine as a conjunction. Inside a facet, courses, types and
//! formats are any-of while tags are all-of. The free-text query is a
//! case-insensitive substring match over both titles, the annotation and
//! the supervisor name.

use crate::storage::{load_json, save_json, KeyValueStore};
use shared_types::{Facet, FilterState, Project};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const FILTERS_STORAGE_KEY: &str = "coursework_filters";

/// Replace exactly one field of the filter state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    SearchQuery(String),
    Supervisor(String),
    Courses(Vec<String>),
    Types(Vec<String>),
    Formats(Vec<String>),
    Tags(Vec<String>),
}

impl FilterUpdate {
    fn apply(self, state: &mut FilterState) {
        match self {
            FilterUpdate::SearchQuery(query) => state.search_query = query,
            FilterUpdate::Supervisor(supervisor) => state.selected_supervisor = supervisor,
            FilterUpdate::Courses(courses) => state.selected_courses = courses,
            FilterUpdate::Types(types) => state.selected_types = types,
            FilterUpdate::Formats(formats) => state.selected_formats = formats,
            FilterUpdate::Tags(tags) => state.selected_tags = tags,
        }
    }
}

/// Trim and collapse runs of whitespace (newlines included) to one space
pub fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn comparable(value: &str) -> String {
    normalize(value).to_lowercase()
}

/// Filter state with its comparison keys computed once per derivation
struct Criteria<'s> {
    query: Option<String>,
    supervisor: Option<&'s str>,
    courses: &'s [String],
    types: Vec<String>,
    formats: Vec<String>,
    tags: &'s [String],
}

impl<'s> Criteria<'s> {
    fn new(state: &'s FilterState) -> Self {
        Self {
            query: (!state.search_query.is_empty()).then(|| state.search_query.to_lowercase()),
            supervisor: (!state.selected_supervisor.is_empty())
                .then_some(state.selected_supervisor.as_str()),
            courses: &state.selected_courses,
            types: state.selected_types.iter().map(|t| comparable(t)).collect(),
            formats: state.selected_formats.iter().map(|f| comparable(f)).collect(),
            tags: &state.selected_tags,
        }
    }

    fn matches(&self, project: &Project) -> bool {
        if let Some(query) = &self.query {
            let found = [
                &project.title_ru,
                &project.title_en,
                &project.annotation,
                &project.supervisor,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(query.as_str()));
            if !found {
                return false;
            }
        }

        if let Some(supervisor) = self.supervisor {
            if project.supervisor != supervisor {
                return false;
            }
        }

        if !self.courses.is_empty()
            && !self.courses.iter().any(|course| project.courses.contains(course))
        {
            return false;
        }

        if !self.types.is_empty() && !self.types.contains(&comparable(&project.project_type)) {
            return false;
        }

        if !self.formats.is_empty() && !self.formats.contains(&comparable(&project.format)) {
            return false;
        }

        self.tags.iter().all(|tag| project.tags.contains(tag))
    }
}

/// True when `project` passes every active filter in `state`
pub fn matches(project: &Project, state: &FilterState) -> bool {
    Criteria::new(state).matches(project)
}

/// Projects passing `state`, in dataset order
pub fn filter_projects<'a>(projects: &'a [Project], state: &FilterState) -> Vec<&'a Project> {
    let criteria = Criteria::new(state);
    let result: Vec<&Project> = projects.iter().filter(|p| criteria.matches(p)).collect();

    if !state.selected_tags.is_empty() {
        debug!(
            selected_tags = ?state.selected_tags,
            total_projects = projects.len(),
            filtered_count = result.len(),
            "Tag filter applied"
        );
    }

    result
}

fn facet_values(project: &Project, facet: Facet) -> &[String] {
    match facet {
        Facet::Supervisor => std::slice::from_ref(&project.supervisor),
        Facet::Course => &project.courses,
        Facet::Type => std::slice::from_ref(&project.project_type),
        Facet::Format => std::slice::from_ref(&project.format),
        Facet::Tag => &project.tags,
    }
}

fn starts_capitalized(value: &str) -> bool {
    value
        .chars()
        .next()
        .map(|first| first.to_uppercase().eq(std::iter::once(first)))
        .unwrap_or(false)
}

/// Distinct, normalized values of `facet` across `projects`, sorted.
///
/// Values differing only in case collapse to one entry. A capitalized
/// spelling replaces a lowercase one seen earlier; otherwise the first
/// spelling wins.
pub fn unique_values(projects: &[Project], facet: Facet) -> Vec<String> {
    let mut by_key: HashMap<String, String> = HashMap::new();

    for raw in projects.iter().flat_map(|p| facet_values(p, facet)) {
        let value = normalize(raw);
        if value.is_empty() {
            continue;
        }

        let key = value.to_lowercase();
        match by_key.get_mut(&key) {
            None => {
                by_key.insert(key, value);
            }
            Some(existing) => {
                if starts_capitalized(&value) && !starts_capitalized(existing) {
                    *existing = value;
                }
            }
        }
    }

    let mut values: Vec<String> = by_key.into_values().collect();
    values.sort();
    values
}

/// Filter state bound to its session-storage entry
#[derive(Debug)]
pub struct FilterEngine<S> {
    store: S,
    state: FilterState,
}

impl<S: KeyValueStore> FilterEngine<S> {
    /// Restore the saved state; anything unreadable starts from the empty baseline
    pub fn load(store: S) -> Self {
        let state = match load_json::<FilterState, _>(&store, FILTERS_STORAGE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => FilterState::default(),
            Err(e) => {
                warn!("Error loading saved filters: {}", e);
                FilterState::default()
            }
        };

        Self { store, state }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace one field and persist the result
    pub fn update_filter(&mut self, update: FilterUpdate) {
        update.apply(&mut self.state);
        if let Err(e) = save_json(&self.store, FILTERS_STORAGE_KEY, &self.state) {
            warn!("Error saving filters: {}", e);
        }
    }

    /// Reset to the empty baseline and drop the saved entry
    pub fn clear_filters(&mut self) {
        self.state = FilterState::default();
        if let Err(e) = self.store.remove(FILTERS_STORAGE_KEY) {
            warn!("Error clearing saved filters: {}", e);
        }
    }

    pub fn filtered_projects<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        filter_projects(projects, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use shared_types::StorageError;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn tagged(id: &str, tags: &[&str]) -> Project {
        Project {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..project(id)
        }
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.clone()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Vec<Project> {
        vec![
            Project {
                title_ru: "Чат-бот для приёмной комиссии".to_string(),
                title_en: "Admissions chatbot".to_string(),
                supervisor: "Иванов И.И.".to_string(),
                project_type: "  Программный\n".to_string(),
                format: "Командный".to_string(),
                courses: strings(&["2 курс", "3 курс"]),
                ..tagged("p1", &["NLP", "LLM"])
            },
            Project {
                title_ru: "Распознавание жестов".to_string(),
                title_en: "Gesture recognition".to_string(),
                annotation: "Компьютерное зрение на мобильных устройствах".to_string(),
                supervisor: "Петрова А.А.".to_string(),
                project_type: "Исследовательский".to_string(),
                format: "Командный".to_string(),
                courses: strings(&["3 курс"]),
                ..tagged("p2", &["Компьютерное зрение"])
            },
            Project {
                title_ru: "Игровой движок".to_string(),
                title_en: "Game engine".to_string(),
                supervisor: "Иванов И.И.".to_string(),
                project_type: "исследовательский".to_string(),
                format: "Индивидуальный".to_string(),
                courses: strings(&["4 курс"]),
                ..tagged("p3", &["Игровая разработка"])
            },
        ]
    }

    #[test]
    fn test_empty_state_returns_everything_in_order() {
        let projects = sample();
        let result = filter_projects(&projects, &FilterState::default());
        assert_eq!(ids(&result), strings(&["p1", "p2", "p3"]));
    }

    #[test]
    fn test_query_matches_titles_annotation_and_supervisor() {
        let projects = sample();
        let mut state = FilterState {
            search_query: "GESTURE".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p2"]));

        state.search_query = "зрение".to_string();
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p2"]));

        state.search_query = "иванов".to_string();
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p1", "p3"]));

        state.search_query = "blockchain".to_string();
        assert!(filter_projects(&projects, &state).is_empty());
    }

    #[test]
    fn test_supervisor_is_exact_and_case_sensitive() {
        let projects = sample();
        let mut state = FilterState {
            selected_supervisor: "Иванов И.И.".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p1", "p3"]));

        state.selected_supervisor = "иванов и.и.".to_string();
        assert!(filter_projects(&projects, &state).is_empty());
    }

    #[test]
    fn test_tags_use_intersection() {
        let projects = vec![
            tagged("a", &["web"]),
            tagged("b", &["web", "ml"]),
            tagged("c", &["ml"]),
        ];
        let mut state = FilterState {
            selected_tags: strings(&["web"]),
            ..Default::default()
        };
        let web_only = filter_projects(&projects, &state).len();
        assert_eq!(web_only, 2);

        state.selected_tags = strings(&["web", "ml"]);
        let both = filter_projects(&projects, &state);
        assert_eq!(ids(&both), strings(&["b"]));
        assert!(both.len() <= web_only);
    }

    #[test]
    fn test_courses_use_any_of() {
        let projects = sample();
        let mut state = FilterState {
            selected_courses: strings(&["4 курс"]),
            ..Default::default()
        };
        let narrow = filter_projects(&projects, &state).len();
        assert_eq!(narrow, 1);

        state.selected_courses.push("2 курс".to_string());
        let wider = filter_projects(&projects, &state);
        assert_eq!(ids(&wider), strings(&["p1", "p3"]));
        assert!(wider.len() >= narrow);
    }

    #[test]
    fn test_type_matching_ignores_case_and_whitespace() {
        let projects = sample();
        let state = FilterState {
            selected_types: strings(&["программный"]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p1"]));

        let state = FilterState {
            selected_types: strings(&["  Исследовательский "]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p2", "p3"]));
    }

    #[test]
    fn test_format_matching_ignores_case_and_whitespace() {
        let projects = vec![
            Project {
                format: " командный\n проект ".to_string(),
                ..project("p1")
            },
            Project {
                format: "Индивидуальный".to_string(),
                ..project("p2")
            },
        ];
        let state = FilterState {
            selected_formats: strings(&["Командный проект"]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p1"]));
    }

    #[test]
    fn test_more_types_or_formats_never_narrow() {
        let projects = sample();

        let one_type = FilterState {
            selected_types: strings(&["Программный"]),
            ..Default::default()
        };
        let two_types = FilterState {
            selected_types: strings(&["Программный", "Исследовательский"]),
            ..Default::default()
        };
        let narrow = filter_projects(&projects, &one_type).len();
        let wider = filter_projects(&projects, &two_types).len();
        assert_eq!(narrow, 1);
        assert!(wider >= narrow);
        assert_eq!(wider, 3);

        let one_format = FilterState {
            selected_formats: strings(&["Индивидуальный"]),
            ..Default::default()
        };
        let two_formats = FilterState {
            selected_formats: strings(&["Индивидуальный", "командный"]),
            ..Default::default()
        };
        let narrow = filter_projects(&projects, &one_format).len();
        let wider = filter_projects(&projects, &two_formats).len();
        assert_eq!(narrow, 1);
        assert!(wider >= narrow);
        assert_eq!(wider, 3);
    }

    #[test]
    fn test_facets_combine_as_conjunction() {
        let projects = sample();
        let state = FilterState {
            selected_types: strings(&["Исследовательский"]),
            selected_formats: strings(&["Командный"]),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &state)), strings(&["p2"]));
    }

    #[test]
    fn test_stale_values_match_nothing() {
        let projects = sample();
        let state = FilterState {
            selected_formats: strings(&["Удалённый формат"]),
            ..Default::default()
        };
        assert!(filter_projects(&projects, &state).is_empty());
        assert!(!matches(&projects[0], &state));
    }

    #[test]
    fn test_unique_values_prefers_capitalized_spelling() {
        let projects = vec![
            tagged("a", &["react", "Vue"]),
            tagged("b", &["React", "  vue\n"]),
            tagged("c", &["", "3D"]),
        ];

        let values = unique_values(&projects, Facet::Tag);
        assert_eq!(values, strings(&["3D", "React", "Vue"]));
        assert_eq!(unique_values(&projects, Facet::Tag), values);
    }

    #[test]
    fn test_unique_values_for_scalar_facets() {
        let projects = sample();

        assert_eq!(
            unique_values(&projects, Facet::Type),
            strings(&["Исследовательский", "Программный"])
        );
        assert_eq!(
            unique_values(&projects, Facet::Supervisor),
            strings(&["Иванов И.И.", "Петрова А.А."])
        );
        assert_eq!(
            unique_values(&projects, Facet::Course),
            strings(&["2 курс", "3 курс", "4 курс"])
        );
        assert!(unique_values(&[project("x")], Facet::Format).is_empty());
    }

    #[test]
    fn test_engine_persists_every_update() {
        let store = MemoryStore::new();
        let mut engine = FilterEngine::load(&store);

        engine.update_filter(FilterUpdate::SearchQuery("бот".to_string()));
        engine.update_filter(FilterUpdate::Tags(strings(&["NLP"])));
        assert_eq!(engine.state().search_query, "бот");
        assert_eq!(engine.state().selected_tags, strings(&["NLP"]));

        let restored = FilterEngine::load(&store);
        assert_eq!(restored.state(), engine.state());
        assert_eq!(ids(&restored.filtered_projects(&sample())), strings(&["p1"]));
    }

    #[test]
    fn test_clear_removes_saved_entry() {
        let store = MemoryStore::new();
        let mut engine = FilterEngine::load(&store);
        engine.update_filter(FilterUpdate::Supervisor("Петрова А.А.".to_string()));

        engine.clear_filters();
        assert!(engine.state().is_empty());
        assert_eq!(store.get(FILTERS_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_malformed_saved_state_loads_as_baseline() {
        let store = MemoryStore::new();
        store.set(FILTERS_STORAGE_KEY, "{\"selectedTags\": 7").unwrap();

        let engine = FilterEngine::load(&store);
        assert!(engine.state().is_empty());
    }

    /// Session storage that accepts reads but rejects writes
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_write_failure_keeps_in_memory_update() {
        let mut engine = FilterEngine::load(FullStore);

        engine.update_filter(FilterUpdate::Formats(strings(&["Командный"])));
        assert_eq!(engine.state().selected_formats, strings(&["Командный"]));

        engine.clear_filters();
        assert!(engine.state().is_empty());
    }
}
