pub mod filter;
pub mod navigation;
pub mod project;
pub mod storage;

pub use filter::{Facet, FilterState};
pub use navigation::{HandoffKind, ScrollPosition, SearchHandoff, Suggestion};
pub use project::{Metadata, Project, ProjectData, Supervisor};
pub use storage::StorageError;

