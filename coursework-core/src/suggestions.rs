use shared_types::{HandoffKind, Project, Suggestion};
use std::collections::HashSet;

pub const MIN_QUERY_CHARS: usize = 2;
pub const SUGGESTIONS_PER_KIND: usize = 3;
pub const MAX_SUGGESTIONS: usize = 6;

/// Distinct values in first-appearance order
fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<&'a String> {
    let mut seen = HashSet::new();
    values.filter(|&value| seen.insert(value.as_str())).collect()
}

fn matching<'a>(
    values: Vec<&'a String>,
    query: &str,
    kind: HandoffKind,
) -> impl Iterator<Item = Suggestion> + 'a {
    let query = query.to_string();
    values
        .into_iter()
        .filter(move |value| value.to_lowercase().contains(&query))
        .take(SUGGESTIONS_PER_KIND)
        .map(move |value| Suggestion {
            kind,
            value: value.clone(),
        })
}

/// Landing-page search suggestions: supervisors, then tags, then courses
pub fn suggest(projects: &[Project], query: &str) -> Vec<Suggestion> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let query = query.to_lowercase();

    let supervisors = distinct(projects.iter().map(|p| &p.supervisor));
    let tags = distinct(projects.iter().flat_map(|p| p.tags.iter()));
    let courses = distinct(projects.iter().flat_map(|p| p.courses.iter()));

    matching(supervisors, &query, HandoffKind::Supervisor)
        .chain(matching(tags, &query, HandoffKind::Tag))
        .chain(matching(courses, &query, HandoffKind::Course))
        .take(MAX_SUGGESTIONS)
        .collect()
}
