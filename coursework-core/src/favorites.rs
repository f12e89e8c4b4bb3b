//! Favorite projects persisted in a cookie.
//!
//! The cookie holds a percent-encoded JSON array of project ids. Every
//! mutation rewrites the cookie with a fresh 365-day expiry and updates the
//! in-memory list in the same call. A failed cookie write is logged and the
//! in-memory list still changes.

use crate::storage::{cookie_value, Cookie, CookieStore};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

pub const FAVORITES_COOKIE_NAME: &str = "coursework_favorites";
pub const COOKIE_EXPIRY_DAYS: i64 = 365;

/// Encode ids as the cookie value: percent-encoded JSON array
pub fn encode_favorites(ids: &[String]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(ids)?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Decode a cookie value. Anything that is not a JSON array of strings
/// decodes to `None`. Duplicate ids are collapsed.
pub fn decode_favorites(raw: &str) -> Option<Vec<String>> {
    let decoded = urlencoding::decode(raw).ok()?;
    let ids: Vec<String> = serde_json::from_str(&decoded).ok()?;

    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Some(unique)
}

/// Favorites found in a `document.cookie` style header
pub fn favorites_from_header(header: &str) -> Vec<String> {
    cookie_value(header, FAVORITES_COOKIE_NAME)
        .and_then(decode_favorites)
        .unwrap_or_default()
}

#[derive(Debug)]
pub struct FavoritesStore<C> {
    cookies: C,
    favorites: Vec<String>,
}

impl<C: CookieStore> FavoritesStore<C> {
    /// Load favorites from the cookie; malformed content loads as empty
    pub fn load(cookies: C) -> Self {
        let favorites = match cookies.get(FAVORITES_COOKIE_NAME) {
            Ok(Some(raw)) => decode_favorites(&raw).unwrap_or_else(|| {
                warn!("Error loading favorites from cookies: malformed value");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error loading favorites from cookies: {}", e);
                Vec::new()
            }
        };

        Self { cookies, favorites }
    }

    /// Ids in the order they were added
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_favorite(&self, project_id: &str) -> bool {
        self.favorites.iter().any(|id| id == project_id)
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    /// Add or remove `project_id`, returning whether it is now a favorite
    pub fn toggle_favorite(&mut self, project_id: &str) -> bool {
        self.toggle_favorite_at(project_id, Utc::now())
    }

    pub fn toggle_favorite_at(&mut self, project_id: &str, now: DateTime<Utc>) -> bool {
        let mut next = self.favorites.clone();
        let is_favorite = match next.iter().position(|id| id == project_id) {
            Some(index) => {
                next.remove(index);
                false
            }
            None => {
                next.push(project_id.to_string());
                true
            }
        };

        self.save(next, now);
        is_favorite
    }

    pub fn clear_favorites(&mut self) {
        self.clear_favorites_at(Utc::now());
    }

    pub fn clear_favorites_at(&mut self, now: DateTime<Utc>) {
        self.save(Vec::new(), now);
    }

    fn save(&mut self, favorites: Vec<String>, now: DateTime<Utc>) {
        if let Err(e) = self.write_cookie(&favorites, now) {
            warn!("Error saving favorites to cookies: {}", e);
        }
        debug!("Favorites now hold {} projects", favorites.len());
        self.favorites = favorites;
    }

    fn write_cookie(
        &self,
        favorites: &[String],
        now: DateTime<Utc>,
    ) -> Result<(), shared_types::StorageError> {
        let value = encode_favorites(favorites)?;
        let expires = now + Duration::days(COOKIE_EXPIRY_DAYS);
        self.cookies
            .set(&Cookie::new(FAVORITES_COOKIE_NAME, value, expires))
    }
}
