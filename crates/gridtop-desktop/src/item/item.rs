//! Item type

use serde::{Deserialize, Serialize};

use crate::math::{Footprint, GridPos, GridRect};
use crate::page::{PageId, HOME_PAGE};

/// Stable item identity
pub type ItemId = String;

/// What a tile represents. Content is rendered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    App,
    Folder,
    Widget,
}

impl ItemKind {
    /// Only widgets can change their footprint
    #[inline]
    pub fn is_resizable(self) -> bool {
        matches!(self, ItemKind::Widget)
    }

    /// Apps and folders open on tap; widgets handle their own input
    #[inline]
    pub fn is_launchable(self) -> bool {
        match self {
            ItemKind::App | ItemKind::Folder => true,
            ItemKind::Widget => false,
        }
    }
}

/// A tile on the desktop grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    pub kind: ItemKind,
    /// Display title
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub footprint: Footprint,
    /// Explicit top-left cell; `None` means auto-placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<GridPos>,
    #[serde(default)]
    pub page_id: PageId,
}

impl Item {
    /// Create a 1×1 auto-placed item on the home page
    pub fn new(id: impl Into<ItemId>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            footprint: Footprint::UNIT,
            position: None,
            page_id: HOME_PAGE,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the footprint
    pub fn with_footprint(mut self, cols: u32, rows: u32) -> Self {
        self.footprint = Footprint::new(cols, rows);
        self
    }

    /// Pin the item to a cell
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.position = Some(GridPos::new(x, y));
        self
    }

    /// Move the item to a page
    pub fn on_page(mut self, page_id: PageId) -> Self {
        self.page_id = page_id;
        self
    }

    /// Cell rectangle of an explicitly placed item
    #[inline]
    pub fn rect(&self) -> Option<GridRect> {
        self.position.map(|pos| GridRect::new(pos, self.footprint))
    }
}
