//! Widget resize state machine

use crate::item::ItemId;
use crate::math::{Footprint, GridPos, GridRect, Vec2};

/// Live widget resize
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    pub item_id: ItemId,
    /// Pointer position when the handle was grabbed (screen px)
    pub origin: Vec2,
    /// Cell the widget is anchored at
    pub position: GridPos,
    pub start: Footprint,
    /// Last accepted footprint
    pub current: Footprint,
}

impl ResizeSession {
    /// Footprint for a pointer position, or `None` if it matches the current one.
    ///
    /// Both axes step by whole rows of `row_height` pixels. Columns are capped
    /// so the widget stays on a grid of `grid_cols` columns.
    pub fn candidate(&self, point: Vec2, row_height: f32, grid_cols: u32) -> Option<Footprint> {
        if row_height <= 0.0 {
            return None;
        }
        let delta = point - self.origin;
        let col_diff = (delta.x / row_height).round() as i64;
        let row_diff = (delta.y / row_height).round() as i64;

        let max_cols = (grid_cols as i64 - self.position.x as i64 + 1).max(1);
        let cols = (self.start.cols as i64 + col_diff).max(1).min(max_cols);
        let rows = (self.start.rows as i64 + row_diff).max(1);

        let footprint = Footprint::new(cols as u32, rows.min(u32::MAX as i64) as u32);
        (footprint != self.current).then_some(footprint)
    }

    /// Check a footprint against the neighbours on the same page
    pub fn collides(&self, footprint: Footprint, neighbours: &[GridRect]) -> bool {
        let rect = GridRect::new(self.position, footprint);
        neighbours.iter().any(|n| n.intersects(&rect))
    }
}

/// Owns the resize session, if any
#[derive(Clone, Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
}

impl ResizeController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the live session
    #[inline]
    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Check if a resize is in progress
    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Grab a widget's resize handle
    pub fn begin(&mut self, item_id: ItemId, origin: Vec2, position: GridPos, start: Footprint) {
        log::debug!("resize started on {item_id}");
        self.session = Some(ResizeSession {
            item_id,
            origin,
            position,
            start,
            current: start,
        });
    }

    /// Record an accepted footprint
    pub fn accept(&mut self, footprint: Footprint) {
        if let Some(session) = self.session.as_mut() {
            session.current = footprint;
        }
    }

    /// End the session
    pub fn end(&mut self) -> Option<ResizeSession> {
        self.session.take()
    }
}
