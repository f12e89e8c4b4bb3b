//! Coursework catalog engine
//!
//! Loads the static project dataset and keeps the per-visitor state that
//! surrounds browsing it: filters, favorites, scroll position and the
//! landing-page search handoff.
//!
//! # Architecture
//!
//! - **Types**: dataset and state records are defined in the `shared-types` crate
//! - **Storage**: every persisted value goes through the ports in [`storage`],
//!   so the engine runs the same against browser storage, files or memory
//!
//! # Example
//!
//! ```rust,ignore
//! use coursework_core::{FilterEngine, FilterUpdate, LoadState, MemoryStore};
//!
//! let state = LoadState::load("data/projects.json");
//! let session = MemoryStore::new();
//! let mut filters = FilterEngine::load(&session);
//! filters.update_filter(FilterUpdate::Tags(vec!["NLP".to_string()]));
//! let visible = filters.filtered_projects(&state.data().unwrap().projects);
//! ```

pub mod catalog;
pub mod dataset;
pub mod favorites;
pub mod filters;
pub mod handoff;
pub mod routes;
pub mod scroll;
pub mod storage;
pub mod suggestions;

pub use dataset::{load_dataset, parse_dataset, DatasetError, LoadState, LOAD_ERROR_MESSAGE};
pub use favorites::FavoritesStore;
pub use filters::{filter_projects, normalize, unique_values, FilterEngine, FilterUpdate};
pub use handoff::publish_handoff;
pub use routes::Route;
pub use scroll::{ScrollRestoration, ScrollTiming, Viewport};
pub use storage::{CookieStore, FileStore, KeyValueStore, KvCookieJar, MemoryStore};
pub use suggestions::suggest;
