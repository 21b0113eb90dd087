//! Engine configuration
//!
//! Every tunable constant of the grid, the gesture recognizers and page
//! navigation lives here. Hosts may load overrides from TOML; missing keys
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{DesktopError, Result};

/// Grid sizing and slot search parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Container width (px) at which the medium column count applies
    pub medium_breakpoint: f32,
    /// Container width (px) at which the wide column count applies
    pub wide_breakpoint: f32,
    pub narrow_cols: u32,
    pub medium_cols: u32,
    pub wide_cols: u32,
    /// Horizontal gap between columns (px)
    pub gap: f32,
    /// Extra vertical spacing between rows (px)
    pub row_gap: f32,
    pub min_row_height: f32,
    /// Row height used when the container has no width yet
    pub fallback_row_height: f32,
    /// Rows scanned by the slot allocator before giving up on the preferred area
    pub scan_rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            medium_breakpoint: 768.0,
            wide_breakpoint: 1024.0,
            narrow_cols: 8,
            medium_cols: 12,
            wide_cols: 16,
            gap: 16.0,
            row_gap: 24.0,
            min_row_height: 48.0,
            fallback_row_height: 96.0,
            scan_rows: 10,
        }
    }
}

/// Pointer gesture thresholds and delays
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Hold time before an item press enters editing mode
    pub long_press_ms: f64,
    /// Movement that cancels a pending long press
    pub jitter_px: f32,
    /// Maximum travel for a press to count as a tap
    pub tap_distance_px: f32,
    /// Distance from the container edge that arms a page flip
    pub edge_threshold_px: f32,
    pub page_flip_ms: f64,
    pub background_long_press_ms: f64,
    /// Movement that cancels a pending background long press
    pub background_cancel_px: f32,
    /// Size of the resize corner on widgets while editing
    pub resize_handle_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 600.0,
            jitter_px: 10.0,
            tap_distance_px: 8.0,
            edge_threshold_px: 48.0,
            page_flip_ms: 700.0,
            background_long_press_ms: 3000.0,
            background_cancel_px: 30.0,
            resize_handle_px: 20.0,
        }
    }
}

/// Page navigation parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Wheel deltas below this on both axes are ignored
    pub wheel_min_delta: f32,
    pub wheel_cooldown_ms: f64,
    /// Travel that commits a background drag to an axis
    pub page_drag_axis_px: f32,
    /// Release offset (percent of the container) that snaps through to the next page
    pub snap_threshold_percent: f32,
    /// Swipe threshold used when the page settings do not set one
    pub default_swipe_threshold: f32,
    pub page_snap_ms: f64,
    /// How long the page indicator stays visible after a page change
    pub page_dots_ms: f64,
    /// Containers narrower than this use the viewport width for drag percentages
    pub min_container_width: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wheel_min_delta: 20.0,
            wheel_cooldown_ms: 350.0,
            page_drag_axis_px: 6.0,
            snap_threshold_percent: 30.0,
            default_swipe_threshold: 30.0,
            page_snap_ms: 400.0,
            page_dots_ms: 5000.0,
            min_container_width: 50.0,
        }
    }
}

impl NavigationConfig {
    /// Effective swipe threshold, clamped to 10..=120 px
    pub fn swipe_threshold(&self, configured: Option<f32>) -> f32 {
        configured
            .filter(|t| t.is_finite())
            .unwrap_or(self.default_swipe_threshold)
            .clamp(10.0, 120.0)
    }

    /// Perpendicular travel tolerated by a quick swipe
    pub fn perpendicular_tolerance(&self, threshold: f32) -> f32 {
        (threshold * 0.8).round().max(10.0)
    }
}

/// Top-level engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub grid: GridConfig,
    pub gestures: GestureConfig,
    pub navigation: NavigationConfig,
    /// Quiet period before a layout change is handed to the store
    pub save_debounce_ms: f64,
    /// Items that can be moved but never deleted
    pub protected_items: Vec<String>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            gestures: GestureConfig::default(),
            navigation: NavigationConfig::default(),
            save_debounce_ms: 300.0,
            protected_items: vec!["finder".to_string(), "browser".to_string()],
        }
    }
}

impl DesktopConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DesktopConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the layout math cannot work with
    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if grid.narrow_cols == 0 || grid.medium_cols == 0 || grid.wide_cols == 0 {
            return Err(DesktopError::Config("column counts must be at least 1".into()));
        }
        if grid.medium_breakpoint > grid.wide_breakpoint {
            return Err(DesktopError::Config(format!(
                "medium breakpoint {} exceeds wide breakpoint {}",
                grid.medium_breakpoint, grid.wide_breakpoint
            )));
        }
        if grid.gap < 0.0 || grid.row_gap < 0.0 {
            return Err(DesktopError::Config("gaps must not be negative".into()));
        }
        if grid.min_row_height <= 0.0 || grid.fallback_row_height <= 0.0 {
            return Err(DesktopError::Config("row heights must be positive".into()));
        }
        if grid.scan_rows == 0 {
            return Err(DesktopError::Config("scan_rows must be at least 1".into()));
        }
        if self.save_debounce_ms < 0.0 {
            return Err(DesktopError::Config("save_debounce_ms must not be negative".into()));
        }
        Ok(())
    }

    /// Check whether an item id is protected from deletion
    #[inline]
    pub fn is_protected(&self, item_id: &str) -> bool {
        self.protected_items.iter().any(|id| id == item_id)
    }
}
