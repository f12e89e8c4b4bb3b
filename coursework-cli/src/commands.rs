use crate::session::Session;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use coursework_core::catalog::{favorite_projects, find_project, supervisors_with_projects};
use coursework_core::{publish_handoff, suggest, unique_values, FilterUpdate};
use shared_types::{Facet, FilterState, Project, ProjectData};
use std::io::Write;

/// Field updates requested by `coursework filter`
#[derive(Debug, Default)]
pub struct FilterRequest {
    pub clear: bool,
    pub query: Option<String>,
    pub supervisor: Option<String>,
    pub courses: Vec<String>,
    pub types: Vec<String>,
    pub formats: Vec<String>,
    pub tags: Vec<String>,
}

impl FilterRequest {
    fn updates(self) -> Vec<FilterUpdate> {
        let mut updates = Vec::new();

        if let Some(query) = self.query {
            updates.push(FilterUpdate::SearchQuery(query));
        }
        if let Some(supervisor) = self.supervisor {
            updates.push(FilterUpdate::Supervisor(supervisor));
        }
        if !self.courses.is_empty() {
            updates.push(FilterUpdate::Courses(self.courses));
        }
        if !self.types.is_empty() {
            updates.push(FilterUpdate::Types(self.types));
        }
        if !self.formats.is_empty() {
            updates.push(FilterUpdate::Formats(self.formats));
        }
        if !self.tags.is_empty() {
            updates.push(FilterUpdate::Tags(self.tags));
        }

        updates
    }
}

fn write_project_line(out: &mut impl Write, project: &Project, favorite: bool) -> Result<()> {
    let marker = if favorite { '*' } else { ' ' };
    writeln!(
        out,
        "{} {:<12} {} ({})",
        marker, project.id, project.title_ru, project.supervisor
    )?;
    Ok(())
}

fn write_filter_state(out: &mut impl Write, state: &FilterState) -> Result<()> {
    if state.is_empty() {
        writeln!(out, "No active filters")?;
        return Ok(());
    }

    if !state.search_query.is_empty() {
        writeln!(out, "query:      {}", state.search_query)?;
    }
    if !state.selected_supervisor.is_empty() {
        writeln!(out, "supervisor: {}", state.selected_supervisor)?;
    }
    for (label, values) in [
        ("courses:   ", &state.selected_courses),
        ("types:     ", &state.selected_types),
        ("formats:   ", &state.selected_formats),
        ("tags:      ", &state.selected_tags),
    ] {
        if !values.is_empty() {
            writeln!(out, "{} {}", label, values.join(", "))?;
        }
    }
    Ok(())
}

/// Print the listing, consuming a pending search handoff first
pub fn list(
    data: &ProjectData,
    session: &mut Session,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(kind) = session.filters.apply_handoff(now) {
        writeln!(out, "Applied {} filter from search", kind.as_str())?;
    }

    let visible = session.filters.filtered_projects(&data.projects);
    for project in &visible {
        write_project_line(out, project, session.favorites.is_favorite(&project.id))?;
    }
    writeln!(
        out,
        "Showing {} of {} projects",
        visible.len(),
        data.projects.len()
    )?;
    Ok(())
}

pub fn filter(
    data: &ProjectData,
    session: &mut Session,
    request: FilterRequest,
    out: &mut impl Write,
) -> Result<()> {
    if request.clear {
        session.filters.clear_filters();
    }
    for update in request.updates() {
        session.filters.update_filter(update);
    }

    write_filter_state(out, session.filters.state())?;
    let matching = session.filters.filtered_projects(&data.projects).len();
    writeln!(out, "{} of {} projects match", matching, data.projects.len())?;
    Ok(())
}

pub fn facets(data: &ProjectData, facet: Facet, out: &mut impl Write) -> Result<()> {
    for value in unique_values(&data.projects, facet) {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

pub fn show(
    data: &ProjectData,
    session: &Session,
    project_id: &str,
    out: &mut impl Write,
) -> Result<()> {
    let Some(project) = find_project(data, project_id) else {
        bail!("Project not found: {}", project_id);
    };

    writeln!(out, "{}", project.title_ru)?;
    if !project.title_en.is_empty() {
        writeln!(out, "{}", project.title_en)?;
    }
    writeln!(out)?;
    writeln!(out, "Supervisor:    {}", project.supervisor)?;
    if let Some(co_supervisor) = project.co_supervisor() {
        writeln!(out, "Co-supervisor: {}", co_supervisor)?;
    }
    writeln!(out, "Type:          {}", project.project_type)?;
    writeln!(out, "Format:        {}", project.format)?;
    writeln!(out, "Courses:       {}", project.courses.join(", "))?;
    writeln!(out, "Tags:          {}", project.tags.join(", "))?;
    writeln!(out, "Team size:     {}", project.team_size)?;
    writeln!(out, "Selection:     {}", project.selection_form)?;
    writeln!(out, "Contact:       {}", project.contact)?;
    writeln!(out, "Preferred:     {}", project.preferred_contact)?;
    if let Some(link) = project.video_link() {
        writeln!(out, "Video:         {}", link)?;
    }
    if let Some(link) = project.presentation_link() {
        writeln!(out, "Presentation:  {}", link)?;
    }

    for (heading, body) in [
        ("Annotation", &project.annotation),
        ("Goals", &project.goals),
        ("Tasks", &project.tasks),
        ("Requirements", &project.requirements),
    ] {
        if !body.trim().is_empty() {
            writeln!(out, "\n{}\n{}", heading, body.trim())?;
        }
    }

    if session.favorites.is_favorite(&project.id) {
        writeln!(out, "\n* In favorites")?;
    }
    Ok(())
}

pub fn toggle_favorite(
    data: &ProjectData,
    session: &mut Session,
    project_id: &str,
    out: &mut impl Write,
) -> Result<()> {
    if find_project(data, project_id).is_none() && !session.favorites.is_favorite(project_id) {
        bail!("Project not found: {}", project_id);
    }

    if session.favorites.toggle_favorite(project_id) {
        writeln!(out, "Added {} to favorites", project_id)?;
    } else {
        writeln!(out, "Removed {} from favorites", project_id)?;
    }
    writeln!(out, "{} favorites", session.favorites.favorites_count())?;
    Ok(())
}

pub fn favorites(
    data: &ProjectData,
    session: &mut Session,
    clear: bool,
    out: &mut impl Write,
) -> Result<()> {
    if clear {
        session.favorites.clear_favorites();
        writeln!(out, "Favorites cleared")?;
        return Ok(());
    }

    let projects = favorite_projects(data, session.favorites.favorites());
    if projects.is_empty() {
        writeln!(out, "No favorites yet")?;
        return Ok(());
    }
    for project in &projects {
        write_project_line(out, project, true)?;
    }
    writeln!(out, "{} favorites", projects.len())?;
    Ok(())
}

/// Print suggestions for `query`; `select` is 1-based and hands the chosen
/// value over to the next `list`
pub fn suggestions(
    data: &ProjectData,
    session: &Session,
    query: &str,
    select: Option<usize>,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    let found = suggest(&data.projects, query);

    let Some(choice) = select else {
        for (index, suggestion) in found.iter().enumerate() {
            writeln!(
                out,
                "{}. [{}] {}",
                index + 1,
                suggestion.kind.as_str(),
                suggestion.value
            )?;
        }
        if found.is_empty() {
            writeln!(out, "No suggestions")?;
        }
        return Ok(());
    };

    let Some(suggestion) = choice.checked_sub(1).and_then(|i| found.get(i)) else {
        bail!("No suggestion number {} for \"{}\"", choice, query);
    };

    publish_handoff(session.storage.as_ref(), suggestion.kind, &suggestion.value, now)
        .context("Failed to save search selection")?;
    writeln!(
        out,
        "Selected {} \"{}\"; run `coursework list` to see matching projects",
        suggestion.kind.as_str(),
        suggestion.value
    )?;
    Ok(())
}

pub fn stats(data: &ProjectData, session: &Session, out: &mut impl Write) -> Result<()> {
    let metadata = &data.metadata;
    writeln!(out, "Projects:    {}", metadata.total_projects)?;
    writeln!(out, "Supervisors: {}", metadata.total_supervisors)?;
    writeln!(out, "Tags:        {}", metadata.total_tags)?;

    for facet in [Facet::Course, Facet::Type, Facet::Format] {
        let values = unique_values(&data.projects, facet);
        writeln!(out, "{:<12} {}", format!("{}s:", facet.as_str()), values.len())?;
    }

    let visible = session.filters.filtered_projects(&data.projects);
    let supervisors = supervisors_with_projects(&data.supervisors, &visible);
    writeln!(
        out,
        "Matching current filters: {} projects, {} supervisors",
        visible.len(),
        supervisors.len()
    )?;
    writeln!(out, "Favorites:   {}", session.favorites.favorites_count())?;
    Ok(())
}
