//! Item drag state machine
//!
//! `Idle -> Pending -> Dragging -> Idle`. A press on an item either starts
//! dragging at once (editing mode or a modifier held) or waits on a
//! long-press timer. The session tracks the grid cell under the pointer,
//! the placeholder the item would occupy, and a swap preview when exactly
//! one other tile is in the way.

use crate::item::ItemId;
use crate::math::{Footprint, GridPos, GridRect, Rect, Vec2};
use crate::page::{Direction, PageId};
use crate::timer::TimerId;

/// Another tile that would trade places with the dragged item on drop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapPreview {
    /// Tile being displaced
    pub target_id: ItemId,
    /// Where the dragged item lands (the occupant's cell)
    pub target_rect: GridRect,
    /// Where the displaced tile goes (the dragged item's starting cell)
    pub displaced_rect: GridRect,
}

/// A press waiting for the long-press timer
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPress {
    pub item_id: ItemId,
    /// Press point (screen px)
    pub press: Vec2,
    /// Press point relative to the tile's top-left corner
    pub offset: Vec2,
    pub timer: TimerId,
}

/// Edge-hover page flip in progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipArm {
    pub direction: Direction,
    /// `None` once the flip has fired; it re-arms only after leaving the edge
    pub timer: Option<TimerId>,
}

/// Live item drag
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub item_id: ItemId,
    /// Pointer position relative to the tile's top-left corner
    pub offset: Vec2,
    pub footprint: Footprint,
    /// Cell the item was drawn at when the drag started
    pub origin: GridPos,
    pub origin_page: PageId,
    /// Last pointer position (screen px)
    pub pointer: Vec2,
    pub placeholder: Option<GridRect>,
    pub swap: Option<SwapPreview>,
    pub flip: Option<FlipArm>,
}

impl DragSession {
    /// Create a session for a tile drawn at `origin`
    pub fn new(
        item_id: ItemId,
        offset: Vec2,
        footprint: Footprint,
        origin: GridPos,
        origin_page: PageId,
        pointer: Vec2,
    ) -> Self {
        Self {
            item_id,
            offset,
            footprint,
            origin,
            origin_page,
            pointer,
            placeholder: None,
            swap: None,
            flip: None,
        }
    }

    /// Top-left corner of the drag ghost (screen px)
    #[inline]
    pub fn ghost_origin(&self) -> Vec2 {
        self.pointer - self.offset
    }

    /// Recompute the placeholder for the pointer cell.
    ///
    /// The column is pulled left so the footprint stays on the grid.
    /// `occupants` are the drawn rectangles of the other tiles on the
    /// active page. Returns true when the placeholder or swap changed.
    pub fn retarget(&mut self, cell: GridPos, cols: u32, occupants: &[(ItemId, GridRect)]) -> bool {
        let last_x = cols.saturating_sub(self.footprint.cols).saturating_add(1).max(1);
        let pos = GridPos::new(cell.x.min(last_x), cell.y);
        let placeholder = GridRect::new(pos, self.footprint);

        let mut hits = occupants
            .iter()
            .filter(|(id, rect)| *id != self.item_id && rect.intersects(&placeholder));
        let swap = match (hits.next(), hits.next()) {
            (Some((id, rect)), None) => Some(SwapPreview {
                target_id: id.clone(),
                target_rect: GridRect::new(rect.pos(), self.footprint),
                displaced_rect: GridRect::new(self.origin, rect.footprint()),
            }),
            _ => None,
        };

        let changed = self.placeholder != Some(placeholder) || self.swap != swap;
        if changed {
            log::trace!("placeholder for {} at ({}, {})", self.item_id, pos.x, pos.y);
        }
        self.placeholder = Some(placeholder);
        self.swap = swap;
        changed
    }

    /// Forget the placeholder and swap preview (after a page change)
    pub fn clear_target(&mut self) {
        self.placeholder = None;
        self.swap = None;
    }
}

/// Drag phase
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Pending(PendingPress),
    Dragging(DragSession),
}

/// Owns the drag phase for item tiles
#[derive(Clone, Debug, Default)]
pub struct DragController {
    phase: DragPhase,
}

impl DragController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current phase
    #[inline]
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Check if an item is being dragged
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Check if a long press is pending
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, DragPhase::Pending(_))
    }

    /// Get the live session
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Get the live session mutably
    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match &mut self.phase {
            DragPhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Wait for a long press
    pub fn begin_pending(&mut self, pending: PendingPress) {
        log::trace!("long press pending on {}", pending.item_id);
        self.phase = DragPhase::Pending(pending);
    }

    /// Start dragging
    pub fn begin_drag(&mut self, session: DragSession) {
        log::debug!("drag started on {}", session.item_id);
        self.phase = DragPhase::Dragging(session);
    }

    /// Drop a pending press whose pointer moved past `jitter_px`.
    /// Returns the timer to cancel.
    pub fn cancel_pending_on_move(&mut self, point: Vec2, jitter_px: f32) -> Option<TimerId> {
        let timer = match &self.phase {
            DragPhase::Pending(p) if p.press.distance(point) > jitter_px => p.timer,
            _ => return None,
        };
        self.phase = DragPhase::Idle;
        Some(timer)
    }

    /// Take the pending press a fired timer belongs to
    pub fn take_pending(&mut self, timer: TimerId) -> Option<PendingPress> {
        match &self.phase {
            DragPhase::Pending(p) if p.timer == timer => {}
            _ => return None,
        }
        match std::mem::take(&mut self.phase) {
            DragPhase::Pending(p) => Some(p),
            _ => None,
        }
    }

    /// End whatever is in progress, returning the drag session if there was one
    /// and the pending timer to cancel if there was one
    pub fn finish(&mut self) -> (Option<DragSession>, Option<TimerId>) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => (None, None),
            DragPhase::Pending(p) => (None, Some(p.timer)),
            DragPhase::Dragging(session) => (Some(session), None),
        }
    }
}

/// Container edge the pointer is hovering near.
///
/// Checked in the order right, left, bottom, top.
pub fn edge_direction(point: Vec2, bounds: Rect, threshold: f32) -> Option<Direction> {
    if point.x >= bounds.right() - threshold {
        Some(Direction::Right)
    } else if point.x <= bounds.x + threshold {
        Some(Direction::Left)
    } else if point.y >= bounds.bottom() - threshold {
        Some(Direction::Down)
    } else if point.y <= bounds.y + threshold {
        Some(Direction::Up)
    } else {
        None
    }
}
