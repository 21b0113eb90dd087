//! Authoritative item table

use std::collections::{BTreeSet, HashSet};

use crate::grid::{LayoutOverrides, SlotAllocator};
use crate::math::{Footprint, GridPos, GridRect};
use crate::page::PageId;
use super::{Item, ItemId};

/// Overrides computed for one revision and allocator
#[derive(Clone, Debug)]
struct CachedLayout {
    revision: u64,
    allocator: SlotAllocator,
    overrides: LayoutOverrides,
}

/// Item table with a revision counter and a memoized auto-layout.
///
/// Every mutation bumps the revision, which invalidates the cached
/// `LayoutOverrides`.
#[derive(Clone, Debug, Default)]
pub struct PlacementStore {
    items: Vec<Item>,
    revision: u64,
    layout: Option<CachedLayout>,
}

impl PlacementStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a list, dropping duplicate ids
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        store.replace_all(items);
        store
    }

    /// All items in insertion order
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Monotonic change counter
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get an item by id
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Replace the whole table. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        let mut seen = HashSet::new();
        self.items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    log::warn!("dropping duplicate item id {}", item.id);
                }
                fresh
            })
            .collect();
        self.bump();
    }

    /// Add an item. Returns false if the id is already taken.
    pub fn insert(&mut self, item: Item) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        self.bump();
        true
    }

    /// Remove an item
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        self.bump();
        Some(item)
    }

    /// Set an item's position and page
    pub fn place(&mut self, id: &str, position: Option<GridPos>, page_id: PageId) -> bool {
        let index = match self.index_of(id) {
            Some(i) => i,
            None => return false,
        };
        let item = &mut self.items[index];
        if item.position == position && item.page_id == page_id {
            return false;
        }
        item.position = position;
        item.page_id = page_id;
        self.bump();
        true
    }

    /// Set an item's footprint
    pub fn set_footprint(&mut self, id: &str, footprint: Footprint) -> bool {
        let index = match self.index_of(id) {
            Some(i) => i,
            None => return false,
        };
        if self.items[index].footprint == footprint {
            return false;
        }
        self.items[index].footprint = footprint;
        self.bump();
        true
    }

    /// Page ids referenced by at least one item
    pub fn item_pages(&self) -> BTreeSet<PageId> {
        self.items.iter().map(|item| item.page_id).collect()
    }

    /// Check whether a page holds any item
    pub fn has_items_on(&self, page_id: PageId) -> bool {
        self.items.iter().any(|item| item.page_id == page_id)
    }

    /// Items on a page in table order
    pub fn items_on(&self, page_id: PageId) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.page_id == page_id)
    }

    /// Rectangles of explicitly placed items on a page
    pub fn explicit_rects_on(&self, page_id: PageId, ignore: Option<&str>) -> Vec<GridRect> {
        SlotAllocator::occupied_on_page(&self.items, page_id, ignore)
    }

    /// Display positions, recomputed only when the table or grid changed
    pub fn layout(&mut self, allocator: &SlotAllocator) -> &LayoutOverrides {
        let revision = self.revision;
        let fresh = matches!(
            &self.layout,
            Some(cached) if cached.revision == revision && cached.allocator == *allocator
        );
        if !fresh {
            self.layout = None;
        }
        let items = &self.items;
        &self
            .layout
            .get_or_insert_with(|| {
                log::trace!("recomputing layout overrides at revision {revision}");
                CachedLayout {
                    revision,
                    allocator: *allocator,
                    overrides: allocator.layout_overrides(items),
                }
            })
            .overrides
    }

    /// Rectangles as drawn (explicit or overridden) on a page
    pub fn resolved_rects_on(
        &mut self,
        page_id: PageId,
        allocator: &SlotAllocator,
        ignore: Option<&str>,
    ) -> Vec<(ItemId, GridRect)> {
        let overrides = self.layout(allocator).clone();
        self.items_on(page_id)
            .filter(|item| Some(item.id.as_str()) != ignore)
            .map(|item| (item.id.clone(), overrides.resolved_rect(item)))
            .collect()
    }

    /// Push explicitly placed neighbours out of `anchor_id`'s rectangle
    pub fn settle_around(&mut self, anchor_id: &str, allocator: &SlotAllocator) -> Vec<ItemId> {
        let moved = allocator.resolve_overlaps_after_resize(&mut self.items, anchor_id);
        if !moved.is_empty() {
            self.bump();
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn store() -> PlacementStore {
        PlacementStore::from_items(vec![
            Item::new("finder", ItemKind::App).at(1, 1),
            Item::new("notes", ItemKind::App),
            Item::new("clock", ItemKind::Widget).at(3, 1).with_footprint(2, 2).on_page(1),
        ])
    }

    #[test]
    fn test_duplicates_dropped() {
        let store = PlacementStore::from_items(vec![
            Item::new("a", ItemKind::App).at(1, 1),
            Item::new("a", ItemKind::App).at(4, 4),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().position, Some(GridPos { x: 1, y: 1 }));
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut store = store();
        let rev = store.revision();
        assert!(!store.insert(Item::new("notes", ItemKind::App)));
        assert_eq!(store.revision(), rev);
        assert!(store.insert(Item::new("mail", ItemKind::App)));
        assert!(store.revision() > rev);
    }

    #[test]
    fn test_place_and_remove() {
        let mut store = store();
        assert!(store.place("notes", Some(GridPos { x: 5, y: 2 }), 2));
        assert!(!store.place("notes", Some(GridPos { x: 5, y: 2 }), 2));
        assert_eq!(store.get("notes").unwrap().page_id, 2);
        assert!(store.remove("notes").is_some());
        assert!(store.remove("notes").is_none());
        assert!(!store.place("notes", None, 0));
    }

    #[test]
    fn test_item_pages() {
        let store = store();
        let pages: Vec<_> = store.item_pages().into_iter().collect();
        assert_eq!(pages, vec![0, 1]);
        assert!(store.has_items_on(1));
        assert!(!store.has_items_on(7));
    }

    #[test]
    fn test_layout_memoized_per_revision() {
        let mut store = store();
        let alloc = SlotAllocator::new(8, 10);
        assert_eq!(store.layout(&alloc).get("notes"), Some(GridPos { x: 2, y: 1 }));

        store.place("finder", Some(GridPos { x: 2, y: 1 }), 0);
        assert_eq!(store.layout(&alloc).get("notes"), Some(GridPos { x: 1, y: 1 }));
    }

    #[test]
    fn test_layout_recomputed_on_column_change() {
        let mut store = PlacementStore::from_items(vec![
            Item::new("wide", ItemKind::Widget).at(10, 1).with_footprint(4, 2),
        ]);
        assert!(store.layout(&SlotAllocator::new(16, 10)).is_empty());
        assert_eq!(
            store.layout(&SlotAllocator::new(8, 10)).get("wide"),
            Some(GridPos { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_settle_around_bumps_revision() {
        let mut store = PlacementStore::from_items(vec![
            Item::new("w", ItemKind::Widget).at(1, 1).with_footprint(2, 1),
            Item::new("b", ItemKind::App).at(2, 1),
        ]);
        let rev = store.revision();
        let moved = store.settle_around("w", &SlotAllocator::new(8, 10));
        assert_eq!(moved, vec!["b".to_string()]);
        assert!(store.revision() > rev);
    }
}
