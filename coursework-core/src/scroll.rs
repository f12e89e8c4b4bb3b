//! Scroll position capture and replay across navigation.
//!
//! One snapshot is kept at a time. Restoration only happens when the page
//! reports it is ready and the snapshot was taken on the same path. The
//! scroll is requested twice, on the next frame and again after a short
//! delay, since layout may still be settling at the first attempt.

use crate::routes::{strip_base_path, Route};
use crate::storage::{load_json, save_json, KeyValueStore};
use shared_types::ScrollPosition;
use std::time::Duration;
use tracing::{debug, warn};

pub const SCROLL_STORAGE_KEY: &str = "coursework_scroll_position";
pub const RESTORE_RETRY_DELAY: Duration = Duration::from_millis(50);

/// When a scroll request should be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTiming {
    Immediate,
    NextFrame,
    After(Duration),
}

/// The scrollable window a page renders into
pub trait Viewport {
    fn scroll_offset(&self) -> (f64, f64);
    fn scroll_to(&mut self, x: f64, y: f64, timing: ScrollTiming);
}

#[derive(Debug)]
pub struct ScrollRestoration<S> {
    store: S,
}

impl<S: KeyValueStore> ScrollRestoration<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the snapshot with the current offset of `path`
    pub fn capture(&self, path: &str, x: f64, y: f64) {
        let position = ScrollPosition {
            x,
            y,
            path: path.to_string(),
        };
        if let Err(e) = save_json(&self.store, SCROLL_STORAGE_KEY, &position) {
            warn!("Error saving scroll position: {}", e);
        }
    }

    /// Capture when navigating away from `path` or tearing the page down
    pub fn capture_viewport<V: Viewport + ?Sized>(&self, path: &str, viewport: &V) {
        let (x, y) = viewport.scroll_offset();
        self.capture(path, x, y);
    }

    pub fn saved(&self) -> Option<ScrollPosition> {
        match load_json(&self.store, SCROLL_STORAGE_KEY) {
            Ok(position) => position,
            Err(e) => {
                warn!("Error restoring scroll position: {}", e);
                None
            }
        }
    }

    /// Replay the snapshot onto `viewport` if it belongs to `active_path`.
    ///
    /// Returns the position that was requested, if any.
    pub fn restore<V: Viewport + ?Sized>(
        &self,
        is_ready: bool,
        active_path: &str,
        viewport: &mut V,
    ) -> Option<ScrollPosition> {
        if !is_ready {
            return None;
        }

        let position = self.saved()?;
        if position.path != active_path {
            return None;
        }

        debug!("Restoring scroll to ({}, {}) on {}", position.x, position.y, position.path);
        viewport.scroll_to(position.x, position.y, ScrollTiming::NextFrame);
        viewport.scroll_to(position.x, position.y, ScrollTiming::After(RESTORE_RETRY_DELAY));
        Some(position)
    }
}

/// Jump to the top when entering a page that does not restore its own scroll.
///
/// Only the exact listing paths keep their offset; `/projects/` resets.
pub fn reset_scroll_on_enter<V: Viewport + ?Sized>(pathname: &str, viewport: &mut V) -> bool {
    let path = strip_base_path(pathname);
    let keeps_offset = Route::parse(path)
        .filter(Route::restores_scroll)
        .is_some_and(|route| route.path() == path);
    if keeps_offset {
        return false;
    }
    viewport.scroll_to(0.0, 0.0, ScrollTiming::Immediate);
    true
}
