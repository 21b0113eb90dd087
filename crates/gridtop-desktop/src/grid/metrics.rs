//! Responsive grid metrics

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::math::{Footprint, GridPos, Size, Vec2};

/// Side of the canvas a chrome element occupies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Space reserved by chrome (menu bar, dock, taskbar) around the grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasInsets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl CanvasInsets {
    /// Set one edge's inset. Negative values are treated as zero.
    pub fn set(&mut self, edge: Edge, px: f32) {
        let px = px.max(0.0);
        match edge {
            Edge::Top => self.top = px,
            Edge::Bottom => self.bottom = px,
            Edge::Left => self.left = px,
            Edge::Right => self.right = px,
        }
    }

    /// Grid container size inside a viewport
    pub fn inner_size(&self, viewport: Size) -> Size {
        Size::new(
            (viewport.width - self.left - self.right).max(0.0),
            (viewport.height - self.top - self.bottom).max(0.0),
        )
    }
}

/// Column count and cell dimensions for the current container width
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub cols: u32,
    pub col_width: f32,
    pub row_height: f32,
    pub gap: f32,
    pub row_gap: f32,
}

impl GridMetrics {
    /// Derive metrics from the container width.
    ///
    /// Widths of zero or less (container not laid out yet) use the narrow
    /// column count with the fallback row height.
    pub fn from_width(width: f32, config: &GridConfig) -> Self {
        if width.is_nan() || width <= 0.0 {
            return Self {
                cols: config.narrow_cols,
                col_width: config.fallback_row_height,
                row_height: config.fallback_row_height,
                gap: config.gap,
                row_gap: config.row_gap,
            };
        }

        let cols = if width >= config.wide_breakpoint {
            config.wide_cols
        } else if width >= config.medium_breakpoint {
            config.medium_cols
        } else {
            config.narrow_cols
        };
        let col_width = (width - config.gap * (cols as f32 - 1.0)) / cols as f32;

        Self {
            cols,
            col_width,
            row_height: col_width.max(config.min_row_height),
            gap: config.gap,
            row_gap: config.row_gap,
        }
    }

    /// Horizontal distance between the left edges of adjacent columns
    #[inline]
    pub fn col_pitch(&self) -> f32 {
        self.col_width + self.gap
    }

    /// Vertical distance between the top edges of adjacent rows
    #[inline]
    pub fn row_pitch(&self) -> f32 {
        self.row_height + self.row_gap
    }

    /// Cell under a point given relative to the grid's top-left corner.
    ///
    /// Columns clamp to `[1, cols]`; rows only clamp below at 1.
    pub fn cell_at(&self, local: Vec2) -> GridPos {
        let col = (local.x / self.col_pitch()).floor() as i64 + 1;
        let row = (local.y / self.row_pitch()).floor() as i64 + 1;
        GridPos {
            x: col.clamp(1, self.cols.max(1) as i64) as u32,
            y: row.clamp(1, u32::MAX as i64) as u32,
        }
    }

    /// Pixel offset of a cell's top-left corner from the grid origin
    #[inline]
    pub fn cell_offset(&self, pos: GridPos) -> Vec2 {
        Vec2::new(
            (pos.x.saturating_sub(1)) as f32 * self.col_pitch(),
            (pos.y.saturating_sub(1)) as f32 * self.row_pitch(),
        )
    }

    /// Pixel size of a tile with the given footprint
    pub fn tile_size(&self, footprint: Footprint) -> Size {
        let cols = footprint.cols as f32;
        let rows = footprint.rows as f32;
        Size::new(
            cols * self.col_width + (cols - 1.0) * self.gap,
            rows * self.row_height + (rows - 1.0) * self.row_gap,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: f32) -> GridMetrics {
        GridMetrics::from_width(width, &GridConfig::default())
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(metrics(500.0).cols, 8);
        assert_eq!(metrics(767.0).cols, 8);
        assert_eq!(metrics(768.0).cols, 12);
        assert_eq!(metrics(1023.0).cols, 12);
        assert_eq!(metrics(1024.0).cols, 16);
        assert_eq!(metrics(2560.0).cols, 16);
    }

    #[test]
    fn test_zero_width_fallback() {
        let m = metrics(0.0);
        assert_eq!(m.cols, 8);
        assert!((m.row_height - 96.0).abs() < 0.001);
        let m = metrics(-20.0);
        assert!((m.row_height - 96.0).abs() < 0.001);
    }

    #[test]
    fn test_row_height_matches_column_width() {
        // 1024 wide, 16 cols, 15 gaps of 16px => (1024 - 240) / 16 = 49
        let m = metrics(1024.0);
        assert!((m.col_width - 49.0).abs() < 0.001);
        assert!((m.row_height - 49.0).abs() < 0.001);
    }

    #[test]
    fn test_row_height_minimum() {
        // 300 wide, 8 cols: (300 - 112) / 8 = 23.5, clamped to 48
        let m = metrics(300.0);
        assert!((m.row_height - 48.0).abs() < 0.001);
    }

    #[test]
    fn test_cell_at_clamps() {
        let m = metrics(1024.0);
        assert_eq!(m.cell_at(Vec2::new(0.0, 0.0)), GridPos { x: 1, y: 1 });
        assert_eq!(m.cell_at(Vec2::new(-40.0, -40.0)), GridPos { x: 1, y: 1 });
        assert_eq!(m.cell_at(Vec2::new(5000.0, 0.0)).x, 16);
        // col pitch 65, row pitch 73
        assert_eq!(m.cell_at(Vec2::new(65.0, 73.0)), GridPos { x: 2, y: 2 });
        assert_eq!(m.cell_at(Vec2::new(64.0, 72.0)), GridPos { x: 1, y: 1 });
        assert_eq!(m.cell_at(Vec2::new(0.0, 7300.0)).y, 101);
    }

    #[test]
    fn test_cell_offset_round_trips_cell_at() {
        let m = metrics(1024.0);
        let pos = GridPos { x: 4, y: 3 };
        assert_eq!(m.cell_at(m.cell_offset(pos)), pos);
    }

    #[test]
    fn test_insets() {
        let mut insets = CanvasInsets::default();
        insets.set(Edge::Top, 32.0);
        insets.set(Edge::Bottom, 80.0);
        insets.set(Edge::Left, -5.0);
        let inner = insets.inner_size(Size::new(1280.0, 800.0));
        assert!((inner.width - 1280.0).abs() < 0.001);
        assert!((inner.height - 688.0).abs() < 0.001);
    }
}
