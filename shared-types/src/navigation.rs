use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Single-slot scroll snapshot taken when leaving a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
    pub path: String,
}

/// Which facet a landing-page search selection targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum HandoffKind {
    Supervisor,
    Tag,
    Course,
}

impl HandoffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandoffKind::Supervisor => "supervisor",
            HandoffKind::Tag => "tag",
            HandoffKind::Course => "course",
        }
    }
}

/// Filter handed from the landing page to the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchHandoff {
    #[serde(rename = "type")]
    pub kind: HandoffKind,
    pub value: String,
    /// Milliseconds since the Unix epoch
    #[ts(type = "number")]
    pub timestamp: i64,
}

/// Search-box suggestion offered on the landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: HandoffKind,
    pub value: String,
}
