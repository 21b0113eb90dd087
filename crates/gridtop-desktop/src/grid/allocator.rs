//! Free-slot search and overlap settling

use std::collections::{BTreeMap, HashMap};

use crate::item::{Item, ItemId};
use crate::math::{Footprint, GridPos, GridRect};
use crate::page::PageId;

/// Render-time positions for items whose stored position is missing or
/// conflicts with an earlier item. Never written back to the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutOverrides {
    slots: HashMap<ItemId, GridPos>,
}

impl LayoutOverrides {
    /// Override for an item, if it has one
    #[inline]
    pub fn get(&self, item_id: &str) -> Option<GridPos> {
        self.slots.get(item_id).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position the item is drawn at
    pub fn resolve(&self, item: &Item) -> GridPos {
        self.get(&item.id)
            .or(item.position)
            .unwrap_or(GridPos::ORIGIN)
    }

    /// Rectangle the item is drawn at
    #[inline]
    pub fn resolved_rect(&self, item: &Item) -> GridRect {
        GridRect::new(self.resolve(item), item.footprint)
    }
}

/// Finds free cells on a grid with a fixed column count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotAllocator {
    cols: u32,
    scan_rows: u32,
}

impl SlotAllocator {
    /// Create an allocator for `cols` columns scanning `scan_rows` rows
    pub fn new(cols: u32, scan_rows: u32) -> Self {
        Self {
            cols: cols.max(1),
            scan_rows: scan_rows.max(1),
        }
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// First free cell in row-major order for a tile of `footprint`.
    ///
    /// The preferred area is the first `scan_rows` rows. When it is full the
    /// tile goes to column 1 of the first row below every occupied rectangle,
    /// so the result never overlaps `occupied`.
    pub fn find_free_slot(&self, footprint: Footprint, occupied: &[GridRect]) -> GridPos {
        if let Some(pos) = self.scan(footprint, occupied) {
            return pos;
        }
        let below = occupied.iter().map(GridRect::bottom).max().unwrap_or(1);
        log::warn!(
            "no free {}x{} slot in the first {} rows, placing at row {below}",
            footprint.cols,
            footprint.rows,
            self.scan_rows
        );
        GridPos::new(1, below)
    }

    /// Capped row-major scan
    fn scan(&self, footprint: Footprint, occupied: &[GridRect]) -> Option<GridPos> {
        if footprint.cols > self.cols {
            return None;
        }
        let last_x = self.cols - footprint.cols + 1;
        for y in 1..=self.scan_rows {
            for x in 1..=last_x {
                let candidate = GridRect::new(GridPos { x, y }, footprint);
                if !occupied.iter().any(|r| r.intersects(&candidate)) {
                    return Some(candidate.pos());
                }
            }
        }
        None
    }

    /// Rectangles of explicitly placed items on a page
    pub fn occupied_on_page<'a>(
        items: impl IntoIterator<Item = &'a Item>,
        page_id: PageId,
        ignore: Option<&str>,
    ) -> Vec<GridRect> {
        items
            .into_iter()
            .filter(|item| item.page_id == page_id && Some(item.id.as_str()) != ignore)
            .filter_map(Item::rect)
            .collect()
    }

    /// Compute display positions for every page.
    ///
    /// Items are visited per page in `(y, x)` order with unplaced items
    /// last. An explicit position is kept when it fits the columns and does
    /// not overlap an already accepted tile; anything else is re-slotted.
    pub fn layout_overrides(&self, items: &[Item]) -> LayoutOverrides {
        let mut pages: BTreeMap<PageId, Vec<&Item>> = BTreeMap::new();
        for item in items {
            pages.entry(item.page_id).or_default().push(item);
        }

        let mut overrides = LayoutOverrides::default();
        for (_, mut page_items) in pages {
            page_items.sort_by_key(|item| {
                item.position
                    .map_or((u32::MAX, u32::MAX), |pos| (pos.y, pos.x))
            });

            let mut accepted: Vec<GridRect> = Vec::with_capacity(page_items.len());
            for item in page_items {
                let explicit = item
                    .rect()
                    .filter(|rect| rect.fits_columns(self.cols))
                    .filter(|rect| !accepted.iter().any(|a| a.intersects(rect)));

                let rect = match explicit {
                    Some(rect) => rect,
                    None => {
                        let pos = self.find_free_slot(item.footprint, &accepted);
                        overrides.slots.insert(item.id.clone(), pos);
                        GridRect::new(pos, item.footprint)
                    }
                };
                accepted.push(rect);
            }
        }
        overrides
    }

    /// Relocate explicitly placed items that intersect `anchor_id` after it
    /// grew or moved.
    ///
    /// Items are visited in array order. Each one is moved to the first free
    /// slot on its page, where the anchor's new rectangle counts as occupied
    /// and the item's own old rectangle does not. Returns the moved ids.
    pub fn resolve_overlaps_after_resize(&self, items: &mut [Item], anchor_id: &str) -> Vec<ItemId> {
        let (anchor_rect, page_id) = match items.iter().find(|item| item.id == anchor_id) {
            Some(item) => match item.rect() {
                Some(rect) => (rect, item.page_id),
                None => return Vec::new(),
            },
            None => return Vec::new(),
        };

        let mut moved = Vec::new();
        for index in 0..items.len() {
            let (id, footprint) = {
                let item = &items[index];
                if item.id == anchor_id || item.page_id != page_id {
                    continue;
                }
                match item.rect() {
                    Some(rect) if rect.intersects(&anchor_rect) => {}
                    _ => continue,
                }
                (item.id.clone(), item.footprint)
            };

            let occupied = Self::occupied_on_page(items.iter(), page_id, Some(id.as_str()));
            let slot = self.find_free_slot(footprint, &occupied);
            log::debug!("settling {id} to ({}, {}) after {anchor_id} changed", slot.x, slot.y);
            items[index].position = Some(slot);
            moved.push(id);
        }
        moved
    }
}
