//! Render model: where every tile, page and drag affordance is drawn

use serde::Serialize;

use crate::item::{ItemId, ItemKind};
use crate::math::{Footprint, GridRect, Rect, Vec2};
use crate::page::{PageCoord, PageId};
use super::DesktopSurface;

/// Tile with grid and pixel coordinates for rendering
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub kind: ItemKind,
    pub title: String,
    /// Cells the tile is drawn at (explicit, auto-laid-out or swap preview)
    pub cell: GridRect,
    /// Pixel rectangle relative to the page's grid origin
    pub frame: Rect,
    /// Being dragged; the ghost is drawn instead
    pub dragging: bool,
    /// Drawn at its swap preview position
    pub previewing_swap: bool,
}

/// One page of the strip
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: PageId,
    pub label: String,
    pub coord: PageCoord,
    pub active: bool,
    /// Translation in percent of the container, including the strip offset
    pub translate: Vec2,
    pub items: Vec<ItemView>,
}

/// Tile following the pointer during a drag
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GhostView {
    pub item_id: ItemId,
    pub footprint: Footprint,
    /// Screen rectangle
    pub frame: Rect,
}

/// Everything the host needs to draw the desktop
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub active_page: PageId,
    pub editing: bool,
    pub cols: u32,
    pub col_width: f32,
    pub row_height: f32,
    pub gap: f32,
    pub row_gap: f32,
    /// Grid container in screen pixels
    pub grid_bounds: Rect,
    /// Live page strip offset in percent (page drag or snap animation)
    pub strip_offset: Vec2,
    pub page_dragging: bool,
    pub page_dots_visible: bool,
    pub page_map_open: bool,
    pub pages: Vec<PageView>,
    /// Drop target on the active page, relative to the grid origin
    pub placeholder: Option<Rect>,
    pub ghost: Option<GhostView>,
}

impl DesktopSurface {
    /// Strip offset at `now_ms`
    pub fn strip_offset(&self, now_ms: f64) -> Vec2 {
        let dragged = self
            .background
            .as_ref()
            .and_then(|press| press.page_drag.as_ref())
            .filter(|drag| drag.is_dragging())
            .map(|drag| drag.offset());
        match (dragged, &self.snap) {
            (Some(offset), _) => offset,
            (None, Some(snap)) => snap.offset(now_ms),
            (None, None) => Vec2::ZERO,
        }
    }

    /// Pixel rectangle of a grid rectangle relative to the grid origin
    fn local_frame(&self, cell: GridRect) -> Rect {
        let offset = self.metrics.cell_offset(cell.pos());
        let size = self.metrics.tile_size(cell.footprint());
        Rect::new(offset.x, offset.y, size.width, size.height)
    }

    /// Build the render model for `now_ms`
    pub fn render(&mut self, now_ms: f64) -> RenderModel {
        let allocator = self.allocator();
        let overrides = self.store.layout(&allocator).clone();
        let session = self.drag.session().cloned();
        let swap = session.as_ref().and_then(|s| s.swap.clone());

        let active = self.navigator.active();
        let active_coord = self.pages.coord_of(active);
        let strip = self.strip_offset(now_ms);

        let pages = self
            .pages
            .pages()
            .iter()
            .map(|&id| {
                let coord = self.pages.coord_of(id);
                let translate = Vec2::new(
                    (coord.x - active_coord.x) as f32 * 100.0 + strip.x,
                    (coord.y - active_coord.y) as f32 * 100.0 + strip.y,
                );
                let items = self
                    .store
                    .items_on(id)
                    .map(|item| {
                        let previewing_swap = swap.as_ref().is_some_and(|s| s.target_id == item.id);
                        let cell = match &swap {
                            Some(s) if previewing_swap => s.displaced_rect,
                            _ => overrides.resolved_rect(item),
                        };
                        ItemView {
                            id: item.id.clone(),
                            kind: item.kind,
                            title: item.title.clone(),
                            cell,
                            frame: self.local_frame(cell),
                            dragging: session.as_ref().is_some_and(|s| s.item_id == item.id),
                            previewing_swap,
                        }
                    })
                    .collect();
                PageView {
                    id,
                    label: self.pages.label(id),
                    coord,
                    active: id == active,
                    translate,
                    items,
                }
            })
            .collect();

        let placeholder = session
            .as_ref()
            .and_then(|s| s.swap.as_ref().map(|swap| swap.target_rect).or(s.placeholder))
            .map(|cell| self.local_frame(cell));
        let ghost = session.map(|s| {
            let origin = s.ghost_origin();
            let size = self.metrics.tile_size(s.footprint);
            GhostView {
                item_id: s.item_id,
                footprint: s.footprint,
                frame: Rect::new(origin.x, origin.y, size.width, size.height),
            }
        });

        RenderModel {
            active_page: active,
            editing: self.editing,
            cols: self.metrics.cols,
            col_width: self.metrics.col_width,
            row_height: self.metrics.row_height,
            gap: self.metrics.gap,
            row_gap: self.metrics.row_gap,
            grid_bounds: self.grid_bounds(),
            strip_offset: strip,
            page_dragging: self.is_page_dragging(),
            page_dots_visible: self.dots_visible,
            page_map_open: self.blockers.page_map_open,
            pages,
            placeholder,
            ghost,
        }
    }
}
