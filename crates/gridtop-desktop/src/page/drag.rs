//! Background drag that pans between pages

use serde::{Deserialize, Serialize};

use crate::math::{Size, Vec2};
use super::Direction;

/// Axis a page drag is locked to once it passes the commit distance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Live state of a background press that may turn into a page drag.
///
/// The offset is a percentage of the container size, clamped to ±100, and
/// moves the page strip under the finger until release.
#[derive(Clone, Debug, PartialEq)]
pub struct PageDragSession {
    origin: Vec2,
    axis: Option<Axis>,
    offset: Vec2,
    dragging: bool,
}

impl PageDragSession {
    /// Start tracking at the press point
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            axis: None,
            offset: Vec2::ZERO,
            dragging: false,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Committed axis, if any
    #[inline]
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// Strip offset in percent of the container
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Check if the press has become a page drag
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Track pointer movement. Returns true when the strip offset changed.
    ///
    /// The axis is decided once travel on either axis exceeds
    /// `axis_threshold`. A vertical axis with vertical navigation locked
    /// never becomes a drag.
    pub fn update(&mut self, point: Vec2, container: Size, axis_threshold: f32, lock_vertical: bool) -> bool {
        let delta = point - self.origin;
        let travel = delta.abs();

        let axis = match self.axis {
            Some(axis) => axis,
            None => {
                if travel.x <= axis_threshold && travel.y <= axis_threshold {
                    return false;
                }
                let axis = if travel.x >= travel.y { Axis::X } else { Axis::Y };
                self.axis = Some(axis);
                axis
            }
        };

        let offset = match axis {
            Axis::X => Vec2::new(percent(delta.x, container.width), 0.0),
            Axis::Y if lock_vertical => return false,
            Axis::Y => Vec2::new(0.0, percent(delta.y, container.height)),
        };
        self.dragging = true;
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        log::trace!("page drag offset ({:.1}%, {:.1}%)", offset.x, offset.y);
        true
    }

    /// Direction to snap through on release, if the offset passed the threshold.
    ///
    /// Dragging the strip left reveals the page to the right.
    pub fn release_direction(&self, threshold_percent: f32, lock_vertical: bool) -> Option<Direction> {
        let off = self.offset.abs();
        if off.x >= threshold_percent && off.x >= off.y {
            return Some(if self.offset.x < 0.0 { Direction::Right } else { Direction::Left });
        }
        if !lock_vertical && off.y >= threshold_percent && off.y >= off.x {
            return Some(if self.offset.y < 0.0 { Direction::Down } else { Direction::Up });
        }
        None
    }

    /// Starting offset of the settle animation after release.
    ///
    /// Snapping through shifts the offset by a full page so the strip keeps
    /// its visual position while the active page changes underneath.
    pub fn snap_start(&self, through: Option<Direction>) -> Vec2 {
        match through {
            Some(direction) => {
                let (dx, dy) = direction.delta();
                self.offset + Vec2::new(dx as f32 * 100.0, dy as f32 * 100.0)
            }
            None => self.offset,
        }
    }

    /// Flick that never became a page drag.
    ///
    /// Travel must exceed `threshold` on one axis while staying under
    /// `perpendicular` on the other. Horizontal wins when both qualify.
    pub fn quick_swipe(
        &self,
        release: Vec2,
        threshold: f32,
        perpendicular: f32,
        lock_vertical: bool,
    ) -> Option<Direction> {
        if self.dragging {
            return None;
        }
        let delta = release - self.origin;
        if delta.x.abs() > threshold && delta.y.abs() < perpendicular {
            return Some(if delta.x < 0.0 { Direction::Right } else { Direction::Left });
        }
        if delta.y.abs() > threshold && delta.x.abs() < perpendicular {
            if lock_vertical {
                return None;
            }
            return Some(if delta.y < 0.0 { Direction::Down } else { Direction::Up });
        }
        None
    }
}

fn percent(delta: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    (delta / extent * 100.0).clamp(-100.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_axis_not_committed_below_threshold() {
        let mut session = PageDragSession::new(Vec2::new(100.0, 100.0));
        assert!(!session.update(Vec2::new(105.0, 104.0), CONTAINER, 6.0, false));
        assert_eq!(session.axis(), None);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_horizontal_drag_offset() {
        let mut session = PageDragSession::new(Vec2::new(500.0, 400.0));
        assert!(session.update(Vec2::new(300.0, 410.0), CONTAINER, 6.0, false));
        assert_eq!(session.axis(), Some(Axis::X));
        assert!((session.offset().x + 20.0).abs() < 0.001);
        assert!((session.offset().y).abs() < 0.001);

        // axis stays fixed even if the finger turns vertical
        session.update(Vec2::new(300.0, 700.0), CONTAINER, 6.0, false);
        assert_eq!(session.axis(), Some(Axis::X));
    }

    #[test]
    fn test_offset_clamped() {
        let mut session = PageDragSession::new(Vec2::new(0.0, 0.0));
        session.update(Vec2::new(5000.0, 0.0), CONTAINER, 6.0, false);
        assert!((session.offset().x - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_vertical_lock() {
        let mut session = PageDragSession::new(Vec2::new(0.0, 0.0));
        assert!(!session.update(Vec2::new(0.0, 300.0), CONTAINER, 6.0, true));
        assert!(!session.is_dragging());
        assert_eq!(session.release_direction(30.0, true), None);
    }

    #[test]
    fn test_release_snaps_through() {
        let mut session = PageDragSession::new(Vec2::new(500.0, 400.0));
        session.update(Vec2::new(150.0, 400.0), CONTAINER, 6.0, false);
        assert_eq!(session.release_direction(30.0, false), Some(Direction::Right));
        let start = session.snap_start(Some(Direction::Right));
        assert!((start.x - 65.0).abs() < 0.001);
    }

    #[test]
    fn test_release_snaps_back() {
        let mut session = PageDragSession::new(Vec2::new(500.0, 400.0));
        session.update(Vec2::new(600.0, 400.0), CONTAINER, 6.0, false);
        assert_eq!(session.release_direction(30.0, false), None);
        assert!((session.snap_start(None).x - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_vertical_release() {
        let mut session = PageDragSession::new(Vec2::new(0.0, 400.0));
        session.update(Vec2::new(0.0, 0.0), CONTAINER, 6.0, false);
        assert_eq!(session.release_direction(30.0, false), Some(Direction::Down));
    }

    #[test]
    fn test_quick_swipe() {
        let session = PageDragSession::new(Vec2::new(500.0, 400.0));
        assert_eq!(session.quick_swipe(Vec2::new(460.0, 410.0), 30.0, 24.0, false), Some(Direction::Right));
        assert_eq!(session.quick_swipe(Vec2::new(540.0, 410.0), 30.0, 24.0, false), Some(Direction::Left));
        assert_eq!(session.quick_swipe(Vec2::new(460.0, 440.0), 30.0, 24.0, false), None);
        assert_eq!(session.quick_swipe(Vec2::new(480.0, 400.0), 30.0, 24.0, false), None);
        assert_eq!(session.quick_swipe(Vec2::new(505.0, 350.0), 30.0, 24.0, false), Some(Direction::Down));
        assert_eq!(session.quick_swipe(Vec2::new(505.0, 350.0), 30.0, 24.0, true), None);
    }
}
