//! Geometry types for the desktop surface
//!
//! Pixel-space types (`Vec2`, `Size`, `Rect`) describe pointer positions and
//! container bounds. Grid-space types (`GridPos`, `Footprint`, `GridRect`)
//! describe tiles on the 1-based cell grid.

mod vec2;
mod size;
mod rect;
mod grid;

pub use vec2::Vec2;
pub use size::Size;
pub use rect::Rect;
pub use grid::{Footprint, GridPos, GridRect};
