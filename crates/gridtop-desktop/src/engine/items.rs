//! Adding and deleting tiles

use crate::item::{Item, ItemKind};
use crate::math::{Footprint, GridRect};
use super::DesktopSurface;

/// Layout used when nothing has been saved yet
pub fn default_items() -> Vec<Item> {
    vec![
        Item::new("finder", ItemKind::App).with_title("Finder").at(1, 1),
        Item::new("browser", ItemKind::App).with_title("Browser").at(2, 1),
        Item::new("terminal", ItemKind::App).with_title("Terminal").at(3, 1),
        Item::new("clock", ItemKind::Widget)
            .with_title("Clock")
            .with_footprint(2, 2)
            .at(1, 2),
        Item::new("system", ItemKind::Widget)
            .with_title("System")
            .with_footprint(2, 2)
            .at(3, 2),
    ]
}

impl DesktopSurface {
    /// Add a tile to the active page in the first free slot.
    ///
    /// Returns false if the id is already taken.
    pub fn add_item(&mut self, mut item: Item, now_ms: f64) -> bool {
        if self.store.contains(&item.id) {
            log::warn!("item {} already exists", item.id);
            return false;
        }
        let page = self.navigator.active();
        let allocator = self.allocator();
        let occupied: Vec<GridRect> = self
            .store
            .resolved_rects_on(page, &allocator, None)
            .into_iter()
            .map(|(_, rect)| rect)
            .collect();
        let slot = allocator.find_free_slot(item.footprint, &occupied);

        item.page_id = page;
        item.position = Some(slot);
        log::info!("adding {} at ({}, {}) on page {page}", item.id, slot.x, slot.y);
        self.store.insert(item);
        self.note_changes(now_ms);
        true
    }

    /// Add a widget with the given footprint to the active page
    pub fn add_widget(&mut self, id: &str, title: &str, cols: u32, rows: u32, now_ms: f64) -> bool {
        let item = Item::new(id, ItemKind::Widget)
            .with_title(title)
            .with_footprint(cols, rows);
        self.add_item(item, now_ms)
    }

    /// Remove a tile. Protected items cannot be deleted.
    pub fn delete_item(&mut self, id: &str, now_ms: f64) -> bool {
        if self.config.is_protected(id) {
            log::debug!("refusing to delete protected item {id}");
            return false;
        }
        if self.store.remove(id).is_none() {
            return false;
        }
        log::info!("deleted {id}");
        self.note_changes(now_ms);
        true
    }

    /// Change a widget's footprint outside of a resize gesture
    pub fn set_item_footprint(&mut self, id: &str, cols: u32, rows: u32, now_ms: f64) -> bool {
        if !self.store.set_footprint(id, Footprint::new(cols, rows)) {
            return false;
        }
        let allocator = self.allocator();
        self.store.settle_around(id, &allocator);
        self.note_changes(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GridPos;

    fn surface() -> DesktopSurface {
        let mut surface = DesktopSurface::default();
        surface.init(1280.0, 800.0);
        surface.hydrate(None, 0.0);
        surface
    }

    #[test]
    fn test_default_items_do_not_overlap() {
        let items = default_items();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert!(!a.rect().unwrap().intersects(&b.rect().unwrap()), "{} vs {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_add_item_takes_first_free_slot() {
        let mut surface = surface();
        assert!(surface.add_item(Item::new("notes", ItemKind::App), 0.0));
        assert_eq!(surface.store.get("notes").unwrap().position, Some(GridPos::new(4, 1)));
        assert!(!surface.add_item(Item::new("notes", ItemKind::App), 0.0));
    }

    #[test]
    fn test_add_widget_lands_on_active_page() {
        let mut surface = surface();
        surface.navigator.set_active(3);
        assert!(surface.add_widget("weather", "Weather", 2, 1, 0.0));
        let item = surface.store.get("weather").unwrap();
        assert_eq!(item.page_id, 3);
        assert_eq!(item.position, Some(GridPos::new(1, 1)));
        assert!(surface.pages.contains(3));
    }

    #[test]
    fn test_protected_items_survive_delete() {
        let mut surface = surface();
        assert!(!surface.delete_item("finder", 0.0));
        assert!(surface.delete_item("terminal", 0.0));
        assert!(!surface.delete_item("terminal", 0.0));
    }

    #[test]
    fn test_set_item_footprint_pushes_neighbours() {
        let mut surface = surface();
        assert!(surface.set_item_footprint("clock", 3, 2, 0.0));
        let system = surface.store.get("system").unwrap();
        assert!(!surface.store.get("clock").unwrap().rect().unwrap().intersects(&system.rect().unwrap()));
    }
}
