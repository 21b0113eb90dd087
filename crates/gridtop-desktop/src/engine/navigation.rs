//! Page navigation: keyboard, wheel, edge flips and the page map

use crate::input::{InputResult, Key};
use crate::page::{CreatePolicy, Direction, NavOutcome, PageCoord, PageId};
use crate::timer::{TimerId, TimerKind};
use super::DesktopSurface;

impl DesktopSurface {
    /// Step one page in a direction, creating a page if the policy allows
    pub(crate) fn navigate(&mut self, direction: Direction, policy: CreatePolicy, now_ms: f64) -> NavOutcome {
        let (dx, dy) = direction.delta();
        let source_occupied = self.store.has_items_on(self.navigator.active());
        let outcome = self
            .navigator
            .move_by(&mut self.pages, dx, dy, policy, source_occupied);
        match outcome {
            NavOutcome::Created(id) => log::debug!("created page {id} toward {direction:?}"),
            NavOutcome::Moved(id) => log::trace!("moved to page {id}"),
            NavOutcome::Blocked => log::trace!("no page toward {direction:?}"),
        }
        if outcome.changed_page() {
            self.on_page_changed(now_ms);
        }
        outcome
    }

    fn on_page_changed(&mut self, now_ms: f64) {
        self.note_changes(now_ms);
        self.dots_visible = true;
        self.timers.cancel_slot(&mut self.dots_timer);
        if !self.is_page_dragging() {
            self.schedule_dots_hide(now_ms);
        }
    }

    /// Hide the page dots after a quiet period
    pub(crate) fn schedule_dots_hide(&mut self, now_ms: f64) {
        self.timers.cancel_slot(&mut self.dots_timer);
        self.dots_timer = Some(self.timers.schedule(
            TimerKind::PageDots,
            now_ms,
            self.config.navigation.page_dots_ms,
        ));
    }

    /// Check if the page indicator is showing
    #[inline]
    pub fn page_dots_visible(&self) -> bool {
        self.dots_visible
    }

    // =========================================================================
    // Keyboard and wheel
    // =========================================================================

    /// Handle key down
    pub fn handle_key_down(&mut self, key: Key, now_ms: f64) -> InputResult {
        if key == Key::Escape {
            return if self.cancel_drag() {
                InputResult::Handled
            } else {
                InputResult::Unhandled
            };
        }
        let direction = match key.direction() {
            Some(direction) => direction,
            None => return InputResult::Unhandled,
        };

        let vertical_locked = direction.is_vertical() && self.pages.config().lock_vertical_swipe;

        // Arrows carry a dragged item across pages, creating one if needed.
        // Open windows do not block them; overlays and the vertical lock do.
        if self.drag.is_dragging() {
            if self.blockers.modal_open || self.blockers.page_map_open || vertical_locked {
                return InputResult::Unhandled;
            }
            self.navigator.reset_budget();
            if self.navigate(direction, CreatePolicy::Always, now_ms).changed_page() {
                if let Some(session) = self.drag.session_mut() {
                    session.clear_target();
                }
            }
            return InputResult::Handled;
        }

        if self.is_navigation_blocked() || vertical_locked {
            return InputResult::Unhandled;
        }
        self.navigator.reset_budget();
        self.navigate(direction, CreatePolicy::IfSourceOccupied, now_ms);
        InputResult::Handled
    }

    /// Handle wheel or trackpad scroll
    pub fn handle_wheel(&mut self, dx: f32, dy: f32, now_ms: f64) -> InputResult {
        if self.is_navigation_blocked() || self.editing || self.drag.is_dragging() {
            return InputResult::Unhandled;
        }
        if self.wheel_lock.is_some() {
            return InputResult::Handled;
        }
        let nav = &self.config.navigation;
        let direction = match Direction::from_wheel(dx, dy, nav.wheel_min_delta) {
            Some(direction) => direction,
            None => return InputResult::Unhandled,
        };
        if direction.is_vertical() && self.pages.config().lock_vertical_swipe {
            return InputResult::Unhandled;
        }
        let cooldown = nav.wheel_cooldown_ms;

        self.navigator.reset_budget();
        if self.navigate(direction, CreatePolicy::IfSourceOccupied, now_ms).changed_page() {
            self.wheel_lock = Some(self.timers.schedule(TimerKind::WheelCooldown, now_ms, cooldown));
        }
        InputResult::Handled
    }

    /// Edge-hover timer fired while dragging
    pub(crate) fn on_page_flip(&mut self, timer: TimerId, direction: Direction, now_ms: f64) {
        let pointer = match self.drag.session_mut() {
            Some(session) => match session.flip.as_mut() {
                Some(arm) if arm.timer == Some(timer) && arm.direction == direction => {
                    arm.timer = None;
                    session.pointer
                }
                _ => return,
            },
            None => return,
        };
        if self.is_navigation_blocked() {
            log::trace!("page flip toward {direction:?} dropped while blocked");
            return;
        }

        self.navigator.reset_budget();
        if self.navigate(direction, CreatePolicy::Always, now_ms).changed_page() {
            self.drag_move(pointer, now_ms);
        }
    }

    // =========================================================================
    // Page map
    // =========================================================================

    /// Open the page map overlay
    pub fn open_page_map(&mut self) {
        self.blockers.page_map_open = true;
    }

    /// Close the page map overlay
    pub fn close_page_map(&mut self) {
        self.blockers.page_map_open = false;
    }

    #[inline]
    pub fn is_page_map_open(&self) -> bool {
        self.blockers.page_map_open
    }

    /// Activate a page chosen on the page map and close the map
    pub fn select_page(&mut self, id: PageId, now_ms: f64) -> bool {
        if !self.pages.contains(id) {
            return false;
        }
        self.close_page_map();
        if self.navigator.active() != id {
            self.navigator.set_active(id);
            self.on_page_changed(now_ms);
        }
        true
    }

    /// Add an empty page next to the active one on the map
    pub fn add_page(&mut self, now_ms: f64) -> Option<PageId> {
        let origin = self.pages.coord_of(self.navigator.active());
        let coord = self.pages.nearest_empty_coord(origin);
        let id = self.pages.create_page_at(coord)?;
        log::debug!("added page {id} at ({}, {})", coord.x, coord.y);
        self.note_changes(now_ms);
        Some(id)
    }

    /// Exchange the map coordinates of two pages
    pub fn swap_page_coords(&mut self, a: PageId, b: PageId, now_ms: f64) -> bool {
        let swapped = self.pages.swap_page_coords(a, b);
        if swapped {
            self.note_changes(now_ms);
        }
        swapped
    }

    /// Move a page to an empty map coordinate
    pub fn move_page_to_coord(&mut self, id: PageId, coord: PageCoord, now_ms: f64) -> bool {
        let moved = self.pages.move_page_to_coord(id, coord);
        if moved {
            self.note_changes(now_ms);
        }
        moved
    }

    /// Set or clear a page's custom name
    pub fn rename_page(&mut self, id: PageId, name: &str, now_ms: f64) {
        self.pages.rename(id, name);
        self.note_changes(now_ms);
    }

    /// Display label of a page
    pub fn page_label(&self, id: PageId) -> String {
        self.pages.label(id)
    }

    /// Update the swipe threshold and vertical lock
    pub fn set_swipe_preferences(&mut self, threshold: Option<f32>, lock_vertical: bool, now_ms: f64) {
        self.pages.set_swipe_preferences(threshold, lock_vertical);
        self.note_changes(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::item::{Item, ItemKind};
    use crate::math::GridRect;
    use crate::persistence::LayoutSnapshot;

    fn surface() -> DesktopSurface {
        let mut surface = DesktopSurface::default();
        surface.init(1280.0, 800.0);
        surface.hydrate(
            Some(LayoutSnapshot::new(
                vec![Item::new("a", ItemKind::App).at(4, 4)],
                Default::default(),
            )),
            0.0,
        );
        surface
    }

    #[test]
    fn test_arrow_creates_page_from_occupied_source() {
        let mut surface = surface();
        assert_eq!(surface.handle_key_down(Key::ArrowRight, 0.0), InputResult::Handled);
        assert_eq!(surface.active_page(), 1);
        // page 1 is empty, so no further page is created
        surface.handle_key_down(Key::ArrowRight, 10.0);
        assert_eq!(surface.active_page(), 1);
        // existing pages are still reachable
        surface.handle_key_down(Key::ArrowLeft, 20.0);
        assert_eq!(surface.active_page(), 0);
    }

    #[test]
    fn test_vertical_lock() {
        let mut surface = surface();
        surface.set_swipe_preferences(None, true, 0.0);
        assert_eq!(surface.handle_key_down(Key::ArrowDown, 0.0), InputResult::Unhandled);
        assert_eq!(surface.active_page(), 0);
    }

    #[test]
    fn test_blocked_by_window() {
        let mut surface = surface();
        surface.set_open_windows(2);
        assert_eq!(surface.handle_key_down(Key::ArrowRight, 0.0), InputResult::Unhandled);
        assert_eq!(surface.handle_wheel(100.0, 0.0, 0.0), InputResult::Unhandled);
        assert_eq!(surface.active_page(), 0);
    }

    #[test]
    fn test_wheel_cooldown() {
        let mut surface = surface();
        assert_eq!(surface.add_page(0.0), Some(1));
        assert_eq!(surface.pages.coord_of(1), PageCoord::new(1, 0));

        surface.handle_wheel(100.0, 0.0, 1000.0);
        assert_eq!(surface.active_page(), 1);
        assert_eq!(surface.handle_wheel(-100.0, 0.0, 1100.0), InputResult::Handled);
        assert_eq!(surface.active_page(), 1);
        surface.tick(1350.0);
        surface.handle_wheel(-100.0, 0.0, 1360.0);
        assert_eq!(surface.active_page(), 0);
    }

    #[test]
    fn test_small_wheel_ignored() {
        let mut surface = surface();
        assert_eq!(surface.handle_wheel(10.0, 5.0, 0.0), InputResult::Unhandled);
    }

    #[test]
    fn test_drag_arrows_create_pages() {
        let mut surface = surface();
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        assert!(surface.drag.is_dragging());

        for (i, expected) in [1, 2, 3].into_iter().enumerate() {
            surface.handle_key_down(Key::ArrowRight, 10.0 + i as f64);
            assert_eq!(surface.active_page(), expected);
            assert!(surface.drag.session().unwrap().placeholder.is_none());
        }

        surface.handle_pointer_move(frame.x + 6.0, frame.y + 6.0, 20.0);
        surface.handle_pointer_up(frame.x + 6.0, frame.y + 6.0, 30.0);
        assert_eq!(surface.store.get("a").unwrap().page_id, 3);
    }

    #[test]
    fn test_edge_flip_moves_drag_to_new_page() {
        let mut surface = surface();
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        surface.handle_pointer_move(1270.0, 400.0, 100.0);
        surface.tick(799.0);
        assert_eq!(surface.active_page(), 0);
        surface.tick(800.0);
        assert_eq!(surface.active_page(), 1);

        // the flip is spent until the pointer leaves the edge
        surface.tick(2000.0);
        assert_eq!(surface.active_page(), 1);

        surface.handle_pointer_up(1270.0, 400.0, 2100.0);
        assert_eq!(surface.store.get("a").unwrap().page_id, 1);
    }

    #[test]
    fn test_edge_flip_ignored_while_window_open() {
        let mut surface = surface();
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        surface.set_open_windows(1);
        surface.handle_pointer_move(1270.0, 400.0, 100.0);
        assert!(surface.drag.session().unwrap().flip.is_none());
        surface.tick(2000.0);
        assert_eq!(surface.active_page(), 0);
    }

    #[test]
    fn test_armed_edge_flip_dropped_when_blocked() {
        let mut surface = surface();
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        surface.handle_pointer_move(1270.0, 400.0, 100.0);
        assert!(surface.drag.session().unwrap().flip.is_some());

        surface.set_modal_open(true);
        surface.tick(800.0);
        assert_eq!(surface.active_page(), 0);
    }

    #[test]
    fn test_drag_arrows_ignored_under_overlay() {
        let mut surface = surface();
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        assert!(surface.drag.is_dragging());

        surface.set_modal_open(true);
        assert_eq!(surface.handle_key_down(Key::ArrowRight, 10.0), InputResult::Unhandled);
        assert_eq!(surface.active_page(), 0);

        surface.set_modal_open(false);
        surface.open_page_map();
        assert_eq!(surface.handle_key_down(Key::ArrowRight, 20.0), InputResult::Unhandled);
        assert_eq!(surface.active_page(), 0);

        surface.close_page_map();
        assert_eq!(surface.handle_key_down(Key::ArrowRight, 30.0), InputResult::Handled);
        assert_eq!(surface.active_page(), 1);
    }

    #[test]
    fn test_drag_arrows_respect_vertical_lock() {
        let mut surface = surface();
        surface.set_swipe_preferences(None, true, 0.0);
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        assert!(surface.drag.is_dragging());

        assert_eq!(surface.handle_key_down(Key::ArrowDown, 10.0), InputResult::Unhandled);
        assert_eq!(surface.handle_key_down(Key::ArrowUp, 20.0), InputResult::Unhandled);
        assert_eq!(surface.active_page(), 0);
        assert_eq!(surface.handle_key_down(Key::ArrowRight, 30.0), InputResult::Handled);
        assert_eq!(surface.active_page(), 1);
    }

    #[test]
    fn test_escape_cancels_drag() {
        let mut surface = surface();
        surface.set_editing(true);
        let frame = surface.cell_frame(GridRect { x: 4, y: 4, cols: 1, rows: 1 });
        surface.handle_pointer_down(frame.x + 5.0, frame.y + 5.0, Modifiers::NONE, 0.0);
        surface.handle_pointer_move(frame.x + 200.0, frame.y + 5.0, 10.0);
        assert_eq!(surface.handle_key_down(Key::Escape, 20.0), InputResult::Handled);
        assert!(!surface.drag.is_dragging());
        assert_eq!(surface.handle_key_down(Key::Escape, 30.0), InputResult::Unhandled);
    }

    #[test]
    fn test_select_page_closes_map() {
        let mut surface = surface();
        let id = surface.add_page(0.0).unwrap();
        surface.open_page_map();
        assert!(surface.is_navigation_blocked());
        assert!(!surface.select_page(42, 0.0));
        assert!(surface.select_page(id, 0.0));
        assert_eq!(surface.active_page(), id);
        assert!(!surface.is_page_map_open());
        assert!(surface.page_dots_visible());
    }

    #[test]
    fn test_page_dots_hide() {
        let mut surface = surface();
        surface.handle_key_down(Key::ArrowRight, 0.0);
        assert!(surface.page_dots_visible());
        surface.tick(4999.0);
        assert!(surface.page_dots_visible());
        surface.tick(5000.0);
        assert!(!surface.page_dots_visible());
    }

    #[test]
    fn test_page_map_edits() {
        let mut surface = surface();
        let id = surface.add_page(0.0).unwrap();
        assert!(!surface.swap_page_coords(0, id, 0.0));
        assert!(surface.move_page_to_coord(id, PageCoord::new(0, 1), 0.0));
        assert_eq!(surface.pages.coord_of(id), PageCoord::new(0, 1));
        surface.rename_page(id, "  Work ", 0.0);
        assert_eq!(surface.page_label(id), "Work");
        surface.rename_page(id, "", 0.0);
        assert_eq!(surface.page_label(id), "Page 2");
    }
}
