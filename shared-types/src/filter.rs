use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Filter selection persisted in session storage.
///
/// Multi-select values are expected to come from the dataset's own facet
/// values, but stale entries are allowed and simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub search_query: String,
    pub selected_supervisor: String,
    pub selected_courses: Vec<String>,
    pub selected_types: Vec<String>,
    pub selected_formats: Vec<String>,
    pub selected_tags: Vec<String>,
}

impl FilterState {
    /// True when no filter narrows the project list
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.selected_supervisor.is_empty()
            && self.selected_courses.is_empty()
            && self.selected_types.is_empty()
            && self.selected_formats.is_empty()
            && self.selected_tags.is_empty()
    }
}

/// Independent filterable dimension of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Facet {
    Supervisor,
    Course,
    Type,
    Format,
    Tag,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Supervisor,
        Facet::Course,
        Facet::Type,
        Facet::Format,
        Facet::Tag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Supervisor => "supervisor",
            Facet::Course => "course",
            Facet::Type => "type",
            Facet::Format => "format",
            Facet::Tag => "tag",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supervisor" | "supervisors" => Ok(Facet::Supervisor),
            "course" | "courses" => Ok(Facet::Course),
            "type" | "types" => Ok(Facet::Type),
            "format" | "formats" => Ok(Facet::Format),
            "tag" | "tags" => Ok(Facet::Tag),
            other => Err(format!("unknown facet: {other}")),
        }
    }
}
