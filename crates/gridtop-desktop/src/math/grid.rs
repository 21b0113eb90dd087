//! Grid-space types
//!
//! Cells are addressed 1-based: the top-left cell is `(1, 1)`. A tile covers
//! the half-open ranges `[x, x + cols) × [y, y + rows)`.

use serde::{Deserialize, Serialize};

/// Top-left cell of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    /// The top-left cell of the grid
    pub const ORIGIN: GridPos = GridPos { x: 1, y: 1 };

    /// Create a new grid position, clamping both axes to at least 1
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x: x.max(1), y: y.max(1) }
    }
}

impl Default for GridPos {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Size of a tile in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub cols: u32,
    pub rows: u32,
}

impl Footprint {
    /// A single cell
    pub const UNIT: Footprint = Footprint { cols: 1, rows: 1 };

    /// Create a new footprint (minimum 1×1)
    #[inline]
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols: cols.max(1), rows: rows.max(1) }
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A tile's cell rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub cols: u32,
    pub rows: u32,
}

impl GridRect {
    /// Create a rectangle from a position and footprint
    #[inline]
    pub fn new(pos: GridPos, footprint: Footprint) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            cols: footprint.cols,
            rows: footprint.rows,
        }
    }

    /// Top-left cell
    #[inline]
    pub fn pos(&self) -> GridPos {
        GridPos { x: self.x, y: self.y }
    }

    #[inline]
    pub fn footprint(&self) -> Footprint {
        Footprint { cols: self.cols, rows: self.rows }
    }

    /// First column past the right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.cols
    }

    /// First row past the bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.rows
    }

    /// Check whether two rectangles share at least one cell
    #[inline]
    pub fn intersects(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Check whether the rectangle lies within `cols` columns
    #[inline]
    pub fn fits_columns(&self, cols: u32) -> bool {
        self.x >= 1 && self.right() - 1 <= cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: u32, y: u32, cols: u32, rows: u32) -> GridRect {
        GridRect { x, y, cols, rows }
    }

    #[test]
    fn test_intersects_overlap() {
        assert!(rect(1, 1, 2, 2).intersects(&rect(2, 2, 1, 1)));
        assert!(rect(2, 2, 1, 1).intersects(&rect(1, 1, 2, 2)));
    }

    #[test]
    fn test_intersects_adjacent_is_free() {
        assert!(!rect(1, 1, 2, 2).intersects(&rect(3, 1, 1, 1)));
        assert!(!rect(1, 1, 2, 2).intersects(&rect(1, 3, 2, 1)));
    }

    #[test]
    fn test_fits_columns() {
        assert!(rect(7, 1, 2, 1).fits_columns(8));
        assert!(!rect(8, 1, 2, 1).fits_columns(8));
    }

    #[test]
    fn test_minimums() {
        assert_eq!(GridPos::new(0, 0), GridPos::ORIGIN);
        assert_eq!(Footprint::new(0, 3), Footprint { cols: 1, rows: 3 });
    }
}
