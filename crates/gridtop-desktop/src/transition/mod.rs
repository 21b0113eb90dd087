//! Time-based transitions
//!
//! Transitions store their start time and are sampled with the current
//! `now_ms`; nothing here runs on its own.

mod easing;
mod snap;

pub use easing::ease_out_cubic;
pub use snap::PageSnap;
