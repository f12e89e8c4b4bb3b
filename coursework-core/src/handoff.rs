//! Landing-page search handoff.
//!
//! Selecting a search suggestion writes a short-lived entry to session
//! storage; the listing page consumes it once, within 30 seconds, by
//! replacing all filters with that single facet selection.

use crate::filters::{FilterEngine, FilterUpdate};
use crate::storage::{load_json, save_json, KeyValueStore};
use chrono::{DateTime, Utc};
use shared_types::{HandoffKind, SearchHandoff, StorageError};
use tracing::{info, warn};

pub const HANDOFF_STORAGE_KEY: &str = "homepage_search_filter";
pub const HANDOFF_TTL_MS: i64 = 30_000;

/// Record a suggestion selection for the listing page
pub fn publish_handoff<S>(
    store: &S,
    kind: HandoffKind,
    value: &str,
    now: DateTime<Utc>,
) -> Result<SearchHandoff, StorageError>
where
    S: KeyValueStore + ?Sized,
{
    let handoff = SearchHandoff {
        kind,
        value: value.to_string(),
        timestamp: now.timestamp_millis(),
    };
    save_json(store, HANDOFF_STORAGE_KEY, &handoff)?;
    Ok(handoff)
}

/// True while `handoff` is younger than [`HANDOFF_TTL_MS`]
pub fn is_recent(handoff: &SearchHandoff, now: DateTime<Utc>) -> bool {
    now.timestamp_millis()
        .checked_sub(handoff.timestamp)
        .is_some_and(|age| age < HANDOFF_TTL_MS)
}

/// Remove and return the pending handoff if it is still fresh.
///
/// Stale entries stay where they are until the next selection overwrites them.
pub fn take_recent_handoff<S>(store: &S, now: DateTime<Utc>) -> Option<SearchHandoff>
where
    S: KeyValueStore + ?Sized,
{
    let handoff = match load_json::<SearchHandoff, _>(store, HANDOFF_STORAGE_KEY) {
        Ok(Some(handoff)) => handoff,
        Ok(None) => return None,
        Err(e) => {
            warn!("Error applying homepage search filter: {}", e);
            return None;
        }
    };

    if !is_recent(&handoff, now) {
        return None;
    }

    if let Err(e) = store.remove(HANDOFF_STORAGE_KEY) {
        warn!("Failed to clear homepage search filter: {}", e);
    }
    Some(handoff)
}

impl<S: KeyValueStore> FilterEngine<S> {
    /// Consume a fresh handoff: clear every filter, then select its single value
    pub fn apply_handoff(&mut self, now: DateTime<Utc>) -> Option<HandoffKind> {
        let handoff = take_recent_handoff(self.store(), now)?;

        self.clear_filters();
        let update = match handoff.kind {
            HandoffKind::Supervisor => FilterUpdate::Supervisor(handoff.value.clone()),
            HandoffKind::Tag => FilterUpdate::Tags(vec![handoff.value.clone()]),
            HandoffKind::Course => FilterUpdate::Courses(vec![handoff.value.clone()]),
        };
        self.update_filter(update);

        info!("Applied {:?} filter from search: {}", handoff.kind, handoff.value);
        Some(handoff.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_handoff_replaces_filters() {
        let store = MemoryStore::new();
        let mut engine = FilterEngine::load(&store);
        engine.update_filter(FilterUpdate::SearchQuery("старый запрос".to_string()));
        engine.update_filter(FilterUpdate::Tags(vec!["LLM".to_string()]));

        publish_handoff(&store, HandoffKind::Course, "3 курс", noon()).unwrap();

        let applied = engine.apply_handoff(noon() + Duration::seconds(5));
        assert_eq!(applied, Some(HandoffKind::Course));
        assert!(engine.state().search_query.is_empty());
        assert!(engine.state().selected_tags.is_empty());
        assert_eq!(engine.state().selected_courses, vec!["3 курс".to_string()]);

        // Consumed exactly once
        assert_eq!(store.get(HANDOFF_STORAGE_KEY).unwrap(), None);
        assert_eq!(engine.apply_handoff(noon() + Duration::seconds(6)), None);
    }

    #[test]
    fn test_supervisor_and_tag_handoffs() {
        let store = MemoryStore::new();
        let mut engine = FilterEngine::load(&store);

        publish_handoff(&store, HandoffKind::Supervisor, "Петрова А.А.", noon()).unwrap();
        engine.apply_handoff(noon());
        assert_eq!(engine.state().selected_supervisor, "Петрова А.А.");

        publish_handoff(&store, HandoffKind::Tag, "Робототехника", noon()).unwrap();
        engine.apply_handoff(noon());
        assert!(engine.state().selected_supervisor.is_empty());
        assert_eq!(engine.state().selected_tags, vec!["Робототехника".to_string()]);
    }

    #[test]
    fn test_stale_handoff_is_ignored_and_kept() {
        let store = MemoryStore::new();
        let mut engine = FilterEngine::load(&store);
        engine.update_filter(FilterUpdate::SearchQuery("бот".to_string()));

        publish_handoff(&store, HandoffKind::Tag, "IoT", noon()).unwrap();

        let applied = engine.apply_handoff(noon() + Duration::milliseconds(HANDOFF_TTL_MS));
        assert_eq!(applied, None);
        assert_eq!(engine.state().search_query, "бот");
        assert!(store.get(HANDOFF_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_malformed_handoff_is_ignored() {
        let store = MemoryStore::new();
        store
            .set(HANDOFF_STORAGE_KEY, r#"{"type":"room","value":"101","timestamp":0}"#)
            .unwrap();

        assert_eq!(take_recent_handoff(&store, noon()), None);
    }

    #[test]
    fn test_out_of_range_timestamp_is_not_fresh() {
        let store = MemoryStore::new();
        store
            .set(
                HANDOFF_STORAGE_KEY,
                r#"{"type":"tag","value":"IoT","timestamp":-9223372036854775808}"#,
            )
            .unwrap();

        assert_eq!(take_recent_handoff(&store, noon()), None);
        assert!(store.get(HANDOFF_STORAGE_KEY).unwrap().is_some());
    }
}
