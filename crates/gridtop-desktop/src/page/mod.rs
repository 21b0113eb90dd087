//! Pages: the 2-D page map, navigation between pages and the background
//! page-drag gesture.

mod config;
mod graph;
mod atlas;
mod navigator;
mod drag;

use serde::{Deserialize, Serialize};

pub use config::PageConfig;
pub use graph::PageGraph;
pub use navigator::{CreatePolicy, Direction, NavOutcome, PageNavigator};
pub use drag::{Axis, PageDragSession};

/// Page identifier
pub type PageId = u32;

/// The permanent home page
pub const HOME_PAGE: PageId = 0;

/// Integer position of a page on the page map
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageCoord {
    pub x: i32,
    pub y: i32,
}

impl PageCoord {
    /// Create a new coordinate
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by a delta
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}
