//! Pointer and touch handling for item drag, widget resize and the
//! background press

use crate::input::{edge_direction, DragSession, FlipArm, InputResult, Modifiers, PendingPress};
use crate::item::{ItemId, ItemKind};
use crate::math::{GridPos, GridRect, Rect, Vec2};
use crate::page::{CreatePolicy, PageDragSession};
use crate::timer::{TimerId, TimerKind};
use crate::transition::PageSnap;
use super::{BackgroundPress, DesktopSurface, PressSource, TapCandidate};

/// Tile under the pointer on the active page
#[derive(Clone, Debug)]
pub(crate) struct Hit {
    pub item_id: ItemId,
    pub kind: ItemKind,
    pub rect: GridRect,
    pub frame: Rect,
}

impl DesktopSurface {
    /// Screen rectangle of a grid rectangle on the active page
    pub(crate) fn cell_frame(&self, rect: GridRect) -> Rect {
        let origin = self.grid_bounds().position() + self.metrics.cell_offset(rect.pos());
        let size = self.metrics.tile_size(rect.footprint());
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    /// Find the topmost tile under a screen point
    pub(crate) fn hit_test(&mut self, point: Vec2) -> Option<Hit> {
        let page = self.navigator.active();
        let allocator = self.allocator();
        let rects = self.store.resolved_rects_on(page, &allocator, None);
        rects.into_iter().rev().find_map(|(item_id, rect)| {
            let frame = self.cell_frame(rect);
            if !frame.contains(point) {
                return None;
            }
            let kind = self.store.get(&item_id)?.kind;
            Some(Hit { item_id, kind, rect, frame })
        })
    }

    fn on_resize_handle(&self, hit: &Hit, point: Vec2) -> bool {
        let handle = self.config.gestures.resize_handle_px;
        self.editing
            && hit.kind.is_resizable()
            && point.x >= hit.frame.right() - handle
            && point.y >= hit.frame.bottom() - handle
    }

    // =========================================================================
    // Pointer events
    // =========================================================================

    /// Handle pointer down
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers, now_ms: f64) -> InputResult {
        let point = Vec2::new(x, y);
        self.last_pointer = point;

        // A session is already driving the layout
        if self.resize.is_active() || self.drag.is_dragging() {
            return InputResult::Handled;
        }

        match self.hit_test(point) {
            Some(hit) if self.on_resize_handle(&hit, point) => {
                self.resize.begin(hit.item_id, point, hit.rect.pos(), hit.rect.footprint());
                InputResult::Handled
            }
            Some(hit) => self.press_item(hit, point, modifiers, now_ms),
            None => self.press_background(point, PressSource::Pointer, now_ms),
        }
    }

    fn press_item(&mut self, hit: Hit, point: Vec2, modifiers: Modifiers, now_ms: f64) -> InputResult {
        self.navigator.reset_budget();
        let offset = point - hit.frame.position();
        let modifier = modifiers.starts_drag();
        self.tap = Some(TapCandidate {
            item_id: hit.item_id.clone(),
            press: point,
            modifier,
        });

        if self.editing || modifier {
            self.start_drag(&hit.item_id, offset, point, now_ms);
        } else {
            let timer = self
                .timers
                .schedule(TimerKind::LongPress, now_ms, self.config.gestures.long_press_ms);
            self.drag.begin_pending(PendingPress {
                item_id: hit.item_id,
                press: point,
                offset,
                timer,
            });
        }
        InputResult::Handled
    }

    /// Handle pointer move
    pub fn handle_pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> InputResult {
        let point = Vec2::new(x, y);
        self.last_pointer = point;

        if let Some(tap) = &self.tap {
            if tap.press.distance(point) > self.config.gestures.tap_distance_px {
                self.tap = None;
            }
        }

        if self.resize.is_active() {
            self.resize_move(point, now_ms);
            return InputResult::Handled;
        }
        if self.drag.is_dragging() {
            self.drag_move(point, now_ms);
            return InputResult::Handled;
        }
        if let Some(timer) = self.drag.cancel_pending_on_move(point, self.config.gestures.jitter_px) {
            log::trace!("long press cancelled by movement");
            self.timers.cancel(timer);
            return InputResult::Handled;
        }
        if self.drag.is_pending() {
            return InputResult::Handled;
        }
        self.background_move(point, PressSource::Pointer)
    }

    /// Handle pointer up
    pub fn handle_pointer_up(&mut self, x: f32, y: f32, now_ms: f64) -> InputResult {
        let point = Vec2::new(x, y);
        self.last_pointer = point;

        if let Some(session) = self.resize.end() {
            log::debug!("resize finished on {}", session.item_id);
            self.tap = None;
            return InputResult::Handled;
        }

        let (session, pending) = self.drag.finish();
        if let Some(timer) = pending {
            self.timers.cancel(timer);
        }
        let tap = self.tap.take();

        if let Some(session) = session {
            self.drop_drag(session, point, now_ms);
            return InputResult::Handled;
        }

        if let Some(tap) = tap {
            let within = tap.press.distance(point) <= self.config.gestures.tap_distance_px;
            if within && !tap.modifier && !self.editing {
                if let Some(item) = self.store.get(&tap.item_id) {
                    if item.kind.is_launchable() {
                        log::debug!("launch {}", item.id);
                        return InputResult::Launch { item_id: item.id.clone() };
                    }
                }
            }
            return InputResult::Handled;
        }

        self.release_background(point, PressSource::Pointer, now_ms)
    }

    // =========================================================================
    // Touch events (background only; tiles receive pointer events)
    // =========================================================================

    /// Handle touch start
    pub fn handle_touch_start(&mut self, x: f32, y: f32, now_ms: f64) -> InputResult {
        let point = Vec2::new(x, y);
        if self.hit_test(point).is_some() {
            return InputResult::Unhandled;
        }
        self.press_background(point, PressSource::Touch, now_ms)
    }

    /// Handle touch move
    pub fn handle_touch_move(&mut self, x: f32, y: f32) -> InputResult {
        self.background_move(Vec2::new(x, y), PressSource::Touch)
    }

    /// Handle touch end
    pub fn handle_touch_end(&mut self, x: f32, y: f32, now_ms: f64) -> InputResult {
        self.release_background(Vec2::new(x, y), PressSource::Touch, now_ms)
    }

    // =========================================================================
    // Item drag
    // =========================================================================

    /// Start dragging an item from a pointer position
    pub(crate) fn start_drag(&mut self, item_id: &str, offset: Vec2, pointer: Vec2, now_ms: f64) {
        let item = match self.store.get(item_id) {
            Some(item) => item.clone(),
            None => return,
        };
        let allocator = self.allocator();
        let origin = self.store.layout(&allocator).resolve(&item);
        self.drag.begin_drag(DragSession::new(
            item.id,
            offset,
            item.footprint,
            origin,
            item.page_id,
            pointer,
        ));
        self.drag_move(pointer, now_ms);
    }

    /// Long-press timer fired for a pending press
    pub(crate) fn on_long_press(&mut self, timer: TimerId, now_ms: f64) {
        let pending = match self.drag.take_pending(timer) {
            Some(pending) => pending,
            None => return,
        };
        self.tap = None;
        self.set_editing(true);
        let pointer = self.last_pointer;
        self.start_drag(&pending.item_id, pending.offset, pointer, now_ms);
    }

    /// Cell under the drag ghost and the tiles it could collide with
    fn drop_inputs(&mut self, item_id: &str, ghost: Vec2) -> (GridPos, Vec<(ItemId, GridRect)>) {
        let local = ghost - self.grid_bounds().position();
        let cell = self.metrics.cell_at(local);
        let allocator = self.allocator();
        let occupants = self
            .store
            .resolved_rects_on(self.navigator.active(), &allocator, Some(item_id));
        (cell, occupants)
    }

    /// Move the drag ghost, update the placeholder and arm edge flips
    pub(crate) fn drag_move(&mut self, point: Vec2, now_ms: f64) -> bool {
        let (item_id, ghost) = match self.drag.session() {
            Some(session) => (session.item_id.clone(), point - session.offset),
            None => return false,
        };
        let (cell, occupants) = self.drop_inputs(&item_id, ghost);
        let cols = self.metrics.cols;
        let edge = if self.is_navigation_blocked() {
            None
        } else {
            edge_direction(point, self.grid_bounds(), self.config.gestures.edge_threshold_px)
        };
        let flip_ms = self.config.gestures.page_flip_ms;

        let session = match self.drag.session_mut() {
            Some(session) => session,
            None => return false,
        };
        session.pointer = point;
        let changed = session.retarget(cell, cols, &occupants);

        match (edge, session.flip) {
            (None, Some(arm)) => {
                if let Some(timer) = arm.timer {
                    self.timers.cancel(timer);
                }
                session.flip = None;
            }
            (None, None) => {}
            // Still hovering the same edge: keep waiting, or stay spent
            (Some(direction), Some(arm)) if arm.direction == direction => {}
            (Some(direction), previous) => {
                if let Some(timer) = previous.and_then(|arm| arm.timer) {
                    self.timers.cancel(timer);
                }
                let timer = self
                    .timers
                    .schedule(TimerKind::PageFlip { direction }, now_ms, flip_ms);
                log::trace!("page flip armed toward {direction:?}");
                session.flip = Some(FlipArm {
                    direction,
                    timer: Some(timer),
                });
            }
        }
        changed
    }

    /// Commit a drag at `point`
    ///
    /// A drop swaps with the one tile the placeholder overlaps, the same rule
    /// the live swap preview uses, not only when the cells match exactly.
    fn drop_drag(&mut self, mut session: DragSession, point: Vec2, now_ms: f64) {
        if let Some(timer) = session.flip.and_then(|arm| arm.timer) {
            self.timers.cancel(timer);
        }

        if self.trash.is_some_and(|trash| trash.contains(point)) {
            log::debug!("{} dropped on trash", session.item_id);
            self.delete_item(&session.item_id, now_ms);
            return;
        }

        session.pointer = point;
        let (cell, occupants) = self.drop_inputs(&session.item_id, session.ghost_origin());
        session.retarget(cell, self.metrics.cols, &occupants);

        let active = self.navigator.active();
        let allocator = self.allocator();
        match (session.swap, session.placeholder) {
            (Some(swap), _) => {
                log::debug!("swapping {} with {}", session.item_id, swap.target_id);
                self.store.place(&session.item_id, Some(swap.target_rect.pos()), active);
                self.store
                    .place(&swap.target_id, Some(swap.displaced_rect.pos()), session.origin_page);
                self.store.settle_around(&session.item_id, &allocator);
                self.store.settle_around(&swap.target_id, &allocator);
            }
            (None, Some(placeholder)) => {
                log::debug!(
                    "dropped {} at ({}, {}) on page {active}",
                    session.item_id,
                    placeholder.x,
                    placeholder.y
                );
                self.store.place(&session.item_id, Some(placeholder.pos()), active);
                self.store.settle_around(&session.item_id, &allocator);
            }
            (None, None) => {}
        }
        self.note_changes(now_ms);
    }

    /// Abandon the drag, leaving the item where it was
    pub fn cancel_drag(&mut self) -> bool {
        let (session, pending) = self.drag.finish();
        if let Some(timer) = pending {
            self.timers.cancel(timer);
        }
        self.tap = None;
        match session {
            Some(session) => {
                if let Some(timer) = session.flip.and_then(|arm| arm.timer) {
                    self.timers.cancel(timer);
                }
                log::debug!("drag of {} cancelled", session.item_id);
                true
            }
            None => pending.is_some(),
        }
    }

    // =========================================================================
    // Widget resize
    // =========================================================================

    fn resize_move(&mut self, point: Vec2, now_ms: f64) -> bool {
        let session = match self.resize.session() {
            Some(session) => session.clone(),
            None => return false,
        };
        let candidate = match session.candidate(point, self.metrics.row_height, self.metrics.cols) {
            Some(footprint) => footprint,
            None => return false,
        };
        let page = match self.store.get(&session.item_id) {
            Some(item) => item.page_id,
            None => return false,
        };

        let allocator = self.allocator();
        let neighbours: Vec<GridRect> = self
            .store
            .resolved_rects_on(page, &allocator, Some(session.item_id.as_str()))
            .into_iter()
            .map(|(_, rect)| rect)
            .collect();
        if session.collides(candidate, &neighbours) {
            log::trace!(
                "resize of {} to {}x{} rejected",
                session.item_id,
                candidate.cols,
                candidate.rows
            );
            return false;
        }

        self.resize.accept(candidate);
        self.store.set_footprint(&session.item_id, candidate);
        self.store.place(&session.item_id, Some(session.position), page);
        self.store.settle_around(&session.item_id, &allocator);
        self.note_changes(now_ms);
        true
    }

    // =========================================================================
    // Background press
    // =========================================================================

    fn press_background(&mut self, point: Vec2, source: PressSource, now_ms: f64) -> InputResult {
        if self.background.is_some() {
            // The same finger reported through the other event family
            return InputResult::Handled;
        }
        if self.is_navigation_blocked() {
            return InputResult::Unhandled;
        }

        self.navigator.reset_budget();
        self.snap = None;
        let timer = (!self.editing).then(|| {
            self.timers.schedule(
                TimerKind::BackgroundLongPress,
                now_ms,
                self.config.gestures.background_long_press_ms,
            )
        });
        self.background = Some(BackgroundPress {
            source,
            start: point,
            timer,
            page_drag: (!self.editing).then(|| PageDragSession::new(point)),
            began_editing: self.editing,
        });
        InputResult::Handled
    }

    fn background_move(&mut self, point: Vec2, source: PressSource) -> InputResult {
        let extent = self.drag_extent();
        let axis_px = self.config.navigation.page_drag_axis_px;
        let cancel_px = self.config.gestures.background_cancel_px;
        let lock = self.pages.config().lock_vertical_swipe;

        let press = match self.background.as_mut() {
            Some(press) if press.source == source => press,
            _ => return InputResult::Unhandled,
        };
        if press.start.distance(point) > cancel_px {
            self.timers.cancel_slot(&mut press.timer);
        }

        let started = match press.page_drag.as_mut() {
            Some(drag) => {
                let was_dragging = drag.is_dragging();
                drag.update(point, extent, axis_px, lock);
                !was_dragging && drag.is_dragging()
            }
            None => false,
        };
        if started {
            // Page dots stay up for the whole drag
            self.timers.cancel_slot(&mut self.dots_timer);
            self.dots_visible = true;
        }
        InputResult::Handled
    }

    fn release_background(&mut self, point: Vec2, source: PressSource, now_ms: f64) -> InputResult {
        let press = match self.background.take() {
            Some(press) if press.source == source => press,
            other => {
                self.background = other;
                return InputResult::Unhandled;
            }
        };
        if let Some(timer) = press.timer {
            self.timers.cancel(timer);
        }

        if press.began_editing {
            self.set_editing(false);
            return InputResult::Handled;
        }

        let drag = match press.page_drag {
            Some(drag) => drag,
            None => return InputResult::Handled,
        };
        let snap_ms = self.config.navigation.page_snap_ms;

        if drag.is_dragging() {
            let mut through = None;
            if !self.editing && !self.is_navigation_blocked() {
                let lock = self.pages.config().lock_vertical_swipe;
                let threshold = self.config.navigation.snap_threshold_percent;
                through = drag
                    .release_direction(threshold, lock)
                    .filter(|&dir| self.navigate(dir, CreatePolicy::IfSourceOccupied, now_ms).changed_page());
            }
            self.snap = Some(PageSnap::new(now_ms, drag.snap_start(through), snap_ms));
            self.schedule_dots_hide(now_ms);
            return InputResult::Handled;
        }

        if !self.editing && !self.is_navigation_blocked() {
            let nav = &self.config.navigation;
            let threshold = nav.swipe_threshold(self.pages.config().swipe_threshold);
            let perpendicular = nav.perpendicular_tolerance(threshold);
            let lock = self.pages.config().lock_vertical_swipe;
            if let Some(direction) = drag.quick_swipe(point, threshold, perpendicular, lock) {
                log::trace!("quick swipe toward {direction:?}");
                self.navigate(direction, CreatePolicy::IfSourceOccupied, now_ms);
            }
        }
        InputResult::Handled
    }

    /// Check if a background press is panning the page strip
    pub fn is_page_dragging(&self) -> bool {
        self.background
            .as_ref()
            .and_then(|press| press.page_drag.as_ref())
            .is_some_and(PageDragSession::is_dragging)
    }
}
