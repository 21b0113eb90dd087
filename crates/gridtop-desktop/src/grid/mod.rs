//! Grid geometry and slot allocation
//!
//! `GridMetrics` turns a container width into a column count and row
//! height; `SlotAllocator` finds free cells and settles overlapping tiles.

mod metrics;
mod allocator;

pub use metrics::{CanvasInsets, Edge, GridMetrics};
pub use allocator::{LayoutOverrides, SlotAllocator};
