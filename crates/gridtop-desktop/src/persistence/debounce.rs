//! Save debouncing

use crate::timer::{TimerId, TimerKind, TimerQueue};

/// Coalesces layout changes into one save after a quiet period.
///
/// Each change re-arms the timer, so a burst of edits saves once.
#[derive(Clone, Debug)]
pub struct SaveDebouncer {
    delay_ms: f64,
    timer: Option<TimerId>,
}

impl SaveDebouncer {
    /// Create a debouncer with the given quiet period
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            timer: None,
        }
    }

    /// Record a change at `now_ms`
    pub fn touch(&mut self, timers: &mut TimerQueue, now_ms: f64) {
        timers.cancel_slot(&mut self.timer);
        self.timer = Some(timers.schedule(TimerKind::SaveDebounce, now_ms, self.delay_ms));
    }

    /// Check whether a fired timer is the current one; clears it if so
    pub fn fire(&mut self, timer: TimerId) -> bool {
        if self.timer == Some(timer) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }
}
