//! Cancellable delayed callbacks driven by injected time
//!
//! Gestures and persistence schedule work here instead of touching a wall
//! clock. The host advances time by calling the engine's `tick(now_ms)`,
//! which drains every timer that has come due. A cancelled timer never
//! fires.

use serde::Serialize;

use crate::page::Direction;

/// Timer handle
pub type TimerId = u64;

/// What a timer does when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerKind {
    /// Item press held long enough to start editing
    LongPress,
    /// Background press held long enough to start editing
    BackgroundLongPress,
    /// Dragged item has hovered at a container edge
    PageFlip { direction: Direction },
    /// Wheel navigation is ignored until this fires
    WheelCooldown,
    /// Layout has been quiet long enough to save
    SaveDebounce,
    /// Hide the page indicator
    PageDots,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due_ms: f64,
}

/// Pending timers ordered by due time, then by scheduling order
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    next_id: TimerId,
    pending: Vec<Timer>,
}

impl TimerQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay_ms` after `now_ms`
    pub fn schedule(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64) -> TimerId {
        self.next_id += 1;
        let id = self.next_id;
        self.pending.push(Timer {
            id,
            kind,
            due_ms: now_ms + delay_ms.max(0.0),
        });
        log::trace!("scheduled {kind:?} as timer {id}");
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel an optional handle and clear it
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    /// Check if a timer is still pending
    #[inline]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time, for hosts that sleep until the next timer
    pub fn next_due(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|t| t.due_ms)
            .fold(None, |acc: Option<f64>, due| Some(acc.map_or(due, |a| a.min(due))))
    }

    /// Remove and return every timer due at `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<(TimerId, TimerKind)> {
        let mut due: Vec<Timer> = Vec::new();
        self.pending.retain(|t| {
            if t.due_ms <= now_ms {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| (t.id, t.kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_due() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(TimerKind::LongPress, 1000.0, 600.0);
        assert!(timers.drain_due(1599.0).is_empty());
        assert_eq!(timers.drain_due(1600.0), vec![(id, TimerKind::LongPress)]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(TimerKind::SaveDebounce, 0.0, 300.0);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.drain_due(10_000.0).is_empty());
    }

    #[test]
    fn test_cancel_slot_clears_handle() {
        let mut timers = TimerQueue::new();
        let mut slot = Some(timers.schedule(TimerKind::PageDots, 0.0, 5000.0));
        timers.cancel_slot(&mut slot);
        assert!(slot.is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_drain_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(TimerKind::WheelCooldown, 0.0, 350.0);
        let early = timers.schedule(TimerKind::LongPress, 0.0, 100.0);
        let flip = timers.schedule(
            TimerKind::PageFlip { direction: Direction::Right },
            0.0,
            100.0,
        );
        assert_eq!(timers.next_due(), Some(100.0));
        let fired: Vec<TimerId> = timers.drain_due(400.0).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![early, flip, late]);
    }
}
