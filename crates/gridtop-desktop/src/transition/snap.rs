//! Page strip settle animation

use crate::math::Vec2;
use super::ease_out_cubic;

/// Settles the page strip from a release offset back to rest.
///
/// Offsets are percentages of the container, the same unit the page drag
/// uses, so the strip continues from exactly where the finger left it.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSnap {
    /// Start time (ms timestamp)
    pub start_ms: f64,
    /// Offset at release
    pub from: Vec2,
    /// Animation length
    pub duration_ms: f64,
}

impl PageSnap {
    /// Create a settle animation starting now
    pub fn new(start_ms: f64, from: Vec2, duration_ms: f64) -> Self {
        Self {
            start_ms,
            from,
            duration_ms,
        }
    }

    /// Get the progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = (now_ms - self.start_ms) as f32;
        (elapsed / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Check if the animation is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Strip offset at `now_ms`
    pub fn offset(&self, now_ms: f64) -> Vec2 {
        self.from * (1.0 - ease_out_cubic(self.progress(now_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_endpoints() {
        let snap = PageSnap::new(1000.0, Vec2::new(65.0, 0.0), 400.0);
        assert!((snap.offset(1000.0).x - 65.0).abs() < 0.001);
        assert!((snap.offset(1400.0).x).abs() < 0.001);
        assert!(snap.is_complete(1400.0));
        assert!(!snap.is_complete(1399.0));
    }

    #[test]
    fn test_snap_moves_toward_zero() {
        let snap = PageSnap::new(0.0, Vec2::new(-40.0, 0.0), 400.0);
        let mid = snap.offset(200.0).x;
        assert!(mid > -40.0 && mid < 0.0);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let snap = PageSnap::new(0.0, Vec2::new(20.0, 0.0), 0.0);
        assert!(snap.is_complete(0.0));
        assert!(snap.offset(0.0).is_zero());
    }
}
