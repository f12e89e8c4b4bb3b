use std::fmt;

/// Prefix the client is served under
pub const BASE_PATH: &str = "/course_project_discovery";

/// Navigable views of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Projects,
    ProjectDetail(String),
    Favorites,
    About,
    Guide,
}

/// `path` relative to [`BASE_PATH`]; paths outside it are returned unchanged
pub fn strip_base_path(path: &str) -> &str {
    match path.strip_prefix(BASE_PATH) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

impl Route {
    /// Parse a location path, with or without [`BASE_PATH`]
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = strip_base_path(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["projects"] => Some(Route::Projects),
            ["projects", id] => Some(Route::ProjectDetail(id.to_string())),
            ["favorites"] => Some(Route::Favorites),
            ["about"] => Some(Route::About),
            ["guide"] => Some(Route::Guide),
            _ => None,
        }
    }

    /// Path relative to [`BASE_PATH`]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
            Route::Favorites => "/favorites".to_string(),
            Route::About => "/about".to_string(),
            Route::Guide => "/guide".to_string(),
        }
    }

    /// Pages that restore their own scroll offset instead of jumping to the top
    pub fn restores_scroll(&self) -> bool {
        matches!(self, Route::Projects | Route::Favorites)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
