//! Desktop surface coordinating all components
//!
//! This module is split into focused submodules:
//! - `items`: Adding and deleting tiles
//! - `pointer`: Pointer and touch handling, item drag and widget resize
//! - `navigation`: Keyboard, wheel, edge flips and page map selection
//! - `persistence`: Hydration, snapshots and debounced saving
//! - `rendering`: Render model for the host

mod items;
mod pointer;
mod navigation;
mod persistence;
mod rendering;

use serde::Serialize;

use crate::config::DesktopConfig;
use crate::grid::{CanvasInsets, Edge, GridMetrics, SlotAllocator};
use crate::input::{DragController, ResizeController};
use crate::item::{ItemId, PlacementStore};
use crate::math::{Rect, Size, Vec2};
use crate::page::{PageConfig, PageDragSession, PageGraph, PageId, PageNavigator};
use crate::persistence::{LayoutSnapshot, SaveDebouncer};
use crate::timer::{TimerId, TimerKind, TimerQueue};
use crate::transition::PageSnap;

pub use items::default_items;
pub use rendering::{GhostView, ItemView, PageView, RenderModel};

/// Conditions under which page navigation is ignored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavBlockers {
    /// A settings or gallery dialog is open
    pub modal_open: bool,
    pub page_map_open: bool,
    /// Number of host windows that are not minimized
    pub open_windows: usize,
    /// The pointer is interacting with a widget's content
    pub widget_interaction: bool,
}

impl NavBlockers {
    /// Check if any blocker is active
    #[inline]
    pub fn any(&self) -> bool {
        self.modal_open || self.page_map_open || self.open_windows > 0 || self.widget_interaction
    }
}

/// Where a background press came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PressSource {
    Pointer,
    Touch,
}

/// Press on empty background: long-press-to-edit and page drag
#[derive(Clone, Debug)]
pub(crate) struct BackgroundPress {
    pub source: PressSource,
    pub start: Vec2,
    pub timer: Option<TimerId>,
    pub page_drag: Option<PageDragSession>,
    /// Editing was already on when the press began
    pub began_editing: bool,
}

/// Item press that may end as a tap
#[derive(Clone, Debug)]
pub(crate) struct TapCandidate {
    pub item_id: ItemId,
    pub press: Vec2,
    pub modifier: bool,
}

/// Desktop surface coordinating all desktop components
///
/// This is the main entry point for desktop operations, managing:
/// - Placement store (items, positions, auto-layout)
/// - Page graph and navigator (page map, active page, creation budget)
/// - Drag and resize controllers
/// - Timer queue (long press, page flip, wheel cooldown, save debounce)
/// - Page snap animation
pub struct DesktopSurface {
    /// Engine configuration
    pub config: DesktopConfig,
    /// Item table
    pub store: PlacementStore,
    /// Page map
    pub pages: PageGraph,
    /// Active page and creation budget
    pub navigator: PageNavigator,
    /// Item drag state machine
    pub drag: DragController,
    /// Widget resize state machine
    pub resize: ResizeController,
    /// Pending timers
    pub timers: TimerQueue,
    pub(crate) metrics: GridMetrics,
    pub(crate) insets: CanvasInsets,
    pub(crate) viewport: Size,
    pub(crate) trash: Option<Rect>,
    pub(crate) blockers: NavBlockers,
    pub(crate) editing: bool,
    pub(crate) background: Option<BackgroundPress>,
    pub(crate) tap: Option<TapCandidate>,
    pub(crate) last_pointer: Vec2,
    pub(crate) snap: Option<PageSnap>,
    pub(crate) wheel_lock: Option<TimerId>,
    pub(crate) dots_timer: Option<TimerId>,
    pub(crate) dots_visible: bool,
    pub(crate) saver: SaveDebouncer,
    pub(crate) pending_save: Option<LayoutSnapshot>,
    pub(crate) saved_revisions: (u64, u64),
    pub(crate) hydrated: bool,
    pub(crate) windows: serde_json::Value,
}

impl Default for DesktopSurface {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl DesktopSurface {
    /// Create a new surface with no items
    pub fn new(config: DesktopConfig) -> Self {
        let metrics = GridMetrics::from_width(0.0, &config.grid);
        let saver = SaveDebouncer::new(config.save_debounce_ms);
        let pages = PageGraph::new(PageConfig::default());
        let store = PlacementStore::new();
        let saved_revisions = (store.revision(), pages.revision());
        Self {
            config,
            store,
            pages,
            navigator: PageNavigator::new(),
            drag: DragController::new(),
            resize: ResizeController::new(),
            timers: TimerQueue::new(),
            metrics,
            insets: CanvasInsets::default(),
            viewport: Size::ZERO,
            trash: None,
            blockers: NavBlockers::default(),
            editing: false,
            background: None,
            tap: None,
            last_pointer: Vec2::ZERO,
            snap: None,
            wheel_lock: None,
            dots_timer: None,
            dots_visible: false,
            saver,
            pending_save: None,
            saved_revisions,
            hydrated: false,
            windows: serde_json::Value::Null,
        }
    }

    /// Initialize the surface with screen dimensions
    pub fn init(&mut self, width: f32, height: f32) {
        self.resize(width, height);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.refresh_metrics();
    }

    /// Reserve space for chrome along one edge
    pub fn set_canvas_inset(&mut self, edge: Edge, px: f32) {
        self.insets.set(edge, px);
        self.refresh_metrics();
    }

    fn refresh_metrics(&mut self) {
        let width = self.insets.inner_size(self.viewport).width;
        let metrics = GridMetrics::from_width(width, &self.config.grid);
        if metrics.cols != self.metrics.cols {
            log::debug!("grid columns {} -> {}", self.metrics.cols, metrics.cols);
        }
        self.metrics = metrics;
    }

    /// Current grid metrics
    #[inline]
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Allocator for the current column count
    #[inline]
    pub fn allocator(&self) -> SlotAllocator {
        SlotAllocator::new(self.metrics.cols, self.config.grid.scan_rows)
    }

    /// Screen rectangle of the grid container
    pub fn grid_bounds(&self) -> Rect {
        let inner = self.insets.inner_size(self.viewport);
        Rect::new(self.insets.left, self.insets.top, inner.width, inner.height)
    }

    /// Container size used for page drag percentages
    pub(crate) fn drag_extent(&self) -> Size {
        let inner = self.insets.inner_size(self.viewport);
        let min = self.config.navigation.min_container_width;
        Size::new(
            if inner.width <= min { self.viewport.width } else { inner.width },
            if inner.height <= min { self.viewport.height } else { inner.height },
        )
    }

    /// Set the trash drop target (screen px), or remove it
    pub fn set_trash_rect(&mut self, rect: Option<Rect>) {
        self.trash = rect;
    }

    // =========================================================================
    // Editing mode
    // =========================================================================

    /// Check if editing mode is on
    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Turn editing mode on or off
    pub fn set_editing(&mut self, editing: bool) {
        if self.editing != editing {
            log::debug!("editing mode {}", if editing { "on" } else { "off" });
            self.editing = editing;
        }
    }

    /// Flip editing mode
    pub fn toggle_editing(&mut self) {
        self.set_editing(!self.editing);
    }

    // =========================================================================
    // Navigation blockers
    // =========================================================================

    /// Current blockers
    #[inline]
    pub fn blockers(&self) -> NavBlockers {
        self.blockers
    }

    /// Check if page navigation is currently ignored
    #[inline]
    pub fn is_navigation_blocked(&self) -> bool {
        self.blockers.any()
    }

    /// A modal dialog opened or closed
    pub fn set_modal_open(&mut self, open: bool) {
        self.blockers.modal_open = open;
    }

    /// Number of host windows that are not minimized
    pub fn set_open_windows(&mut self, count: usize) {
        self.blockers.open_windows = count;
    }

    /// The pointer entered or left a widget's interactive content
    pub fn set_widget_interaction(&mut self, active: bool) {
        self.blockers.widget_interaction = active;
    }

    /// Get the active page
    #[inline]
    pub fn active_page(&self) -> PageId {
        self.navigator.active()
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance time: fire due timers and settle finished animations.
    ///
    /// Returns true while something is animating or a timer fired.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let fired = self.timers.drain_due(now_ms);
        let any_fired = !fired.is_empty();
        for (id, kind) in fired {
            self.on_timer(id, kind, now_ms);
        }

        let animating = match &self.snap {
            Some(snap) if snap.is_complete(now_ms) => {
                self.snap = None;
                false
            }
            Some(_) => true,
            None => false,
        };
        animating || any_fired
    }

    fn on_timer(&mut self, id: TimerId, kind: TimerKind, now_ms: f64) {
        log::trace!("timer {id} fired: {kind:?}");
        match kind {
            TimerKind::LongPress => self.on_long_press(id, now_ms),
            TimerKind::BackgroundLongPress => {
                if let Some(press) = self.background.as_mut() {
                    if press.timer == Some(id) {
                        press.timer = None;
                        self.set_editing(true);
                    }
                }
            }
            TimerKind::PageFlip { direction } => self.on_page_flip(id, direction, now_ms),
            TimerKind::WheelCooldown => {
                if self.wheel_lock == Some(id) {
                    self.wheel_lock = None;
                }
            }
            TimerKind::SaveDebounce => {
                if self.saver.fire(id) {
                    self.pending_save = Some(self.snapshot());
                }
            }
            TimerKind::PageDots => {
                if self.dots_timer == Some(id) {
                    self.dots_timer = None;
                    self.dots_visible = false;
                }
            }
        }
    }

    /// Re-derive pages and schedule a save if the layout changed
    pub(crate) fn note_changes(&mut self, now_ms: f64) {
        self.pages
            .sync(&self.store.item_pages(), self.store.revision(), self.navigator.active());
        let revisions = (self.store.revision(), self.pages.revision());
        if revisions != self.saved_revisions {
            self.saved_revisions = revisions;
            if self.hydrated {
                self.saver.touch(&mut self.timers, now_ms);
            }
        }
    }
}
