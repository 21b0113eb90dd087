//! Hydration, snapshots and debounced saving

use crate::page::{PageConfig, HOME_PAGE};
use crate::persistence::{LayoutSnapshot, LayoutStore};
use super::{default_items, DesktopSurface};

impl DesktopSurface {
    /// Replace the layout with a loaded snapshot, or the default layout if
    /// there is none or it holds no items
    pub fn hydrate(&mut self, snapshot: Option<LayoutSnapshot>, now_ms: f64) {
        let (items, pages, windows) = match snapshot {
            Some(snapshot) => (snapshot.items, snapshot.pages, snapshot.windows),
            None => (Vec::new(), PageConfig::default(), serde_json::Value::Null),
        };
        let items = if items.is_empty() {
            log::info!("no saved items, using the default layout");
            default_items()
        } else {
            items
        };

        self.cancel_drag();
        self.resize.end();
        if let Some(mut press) = self.background.take() {
            self.timers.cancel_slot(&mut press.timer);
        }
        self.snap = None;

        self.store.replace_all(items);
        self.pages.set_config(pages);
        self.windows = windows;
        self.navigator.set_active(HOME_PAGE);
        self.pages
            .sync(&self.store.item_pages(), self.store.revision(), self.navigator.active());
        self.navigator.ensure_active_known(&self.pages);

        // Loading is not an edit
        self.saved_revisions = (self.store.revision(), self.pages.revision());
        self.hydrated = true;
        self.dots_visible = false;
        self.timers.cancel_slot(&mut self.dots_timer);
        log::info!(
            "hydrated {} item(s) on {} page(s)",
            self.store.len(),
            self.pages.pages().len()
        );
        self.note_changes(now_ms);
    }

    /// Load from a store. A failed load falls back to the default layout.
    pub fn load_from<S: LayoutStore + ?Sized>(&mut self, store: &mut S, now_ms: f64) {
        let snapshot = match store.load_layout() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("failed to load layout: {e}");
                None
            }
        };
        self.hydrate(snapshot, now_ms);
    }

    /// Check if a layout has been loaded
    #[inline]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Current layout as a snapshot
    pub fn snapshot(&self) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::new(self.store.items().to_vec(), self.pages.config().clone());
        snapshot.windows = self.windows.clone();
        snapshot
    }

    /// Host window state saved alongside the layout
    pub fn set_windows(&mut self, windows: serde_json::Value, now_ms: f64) {
        if self.windows == windows {
            return;
        }
        self.windows = windows;
        if self.hydrated {
            self.saver.touch(&mut self.timers, now_ms);
        }
    }

    /// Snapshot whose debounce window has elapsed, if any
    pub fn take_pending_save(&mut self) -> Option<LayoutSnapshot> {
        self.pending_save.take()
    }

    /// Write the pending snapshot to a store.
    ///
    /// Failures are logged and dropped; the next change schedules a fresh
    /// save. Returns true if a snapshot was written.
    pub fn flush_save<S: LayoutStore + ?Sized>(&mut self, store: &mut S) -> bool {
        let snapshot = match self.take_pending_save() {
            Some(snapshot) => snapshot,
            None => return false,
        };
        match store.save_layout(&snapshot) {
            Ok(()) => {
                log::debug!("saved layout with {} item(s)", snapshot.items.len());
                true
            }
            Err(e) => {
                log::warn!("failed to save layout: {e}");
                false
            }
        }
    }
}
