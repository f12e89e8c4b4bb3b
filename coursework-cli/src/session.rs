use coursework_core::{FavoritesStore, FileStore, FilterEngine, KvCookieJar};
use std::path::Path;
use std::sync::Arc;

const SESSION_FILE: &str = "session.json";
const COOKIES_FILE: &str = "cookies.json";

/// Per-visitor state kept between invocations
pub struct Session {
    pub storage: Arc<FileStore>,
    pub filters: FilterEngine<Arc<FileStore>>,
    pub favorites: FavoritesStore<KvCookieJar<FileStore>>,
}

impl Session {
    pub fn open(state_dir: &Path) -> Self {
        let storage = Arc::new(FileStore::open(state_dir.join(SESSION_FILE)));
        let cookies = KvCookieJar::new(FileStore::open(state_dir.join(COOKIES_FILE)));

        Self {
            filters: FilterEngine::load(Arc::clone(&storage)),
            favorites: FavoritesStore::load(cookies),
            storage,
        }
    }
}
