//! Page map: ids, order and coordinates

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{PageConfig, PageCoord, PageId, HOME_PAGE};

/// Ordered page list and coordinate index derived from the config
#[derive(Clone, Debug, Default)]
struct PageView {
    pages: Vec<PageId>,
    by_coord: HashMap<PageCoord, PageId>,
}

/// Inputs the view was last derived from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ViewKey {
    items_revision: u64,
    config_revision: u64,
    active: PageId,
}

/// Page ids mapped to 2-D coordinates.
///
/// A page exists when it is the home page, the active page, holds an item,
/// or is named in the order list or coordinate table. The derived view is
/// rebuilt only when one of those inputs changes.
#[derive(Clone, Debug, Default)]
pub struct PageGraph {
    config: PageConfig,
    config_revision: u64,
    item_pages: BTreeSet<PageId>,
    active: PageId,
    view: PageView,
    view_key: Option<ViewKey>,
}

impl PageGraph {
    /// Create a graph from persisted settings
    pub fn new(config: PageConfig) -> Self {
        let mut graph = Self {
            config,
            ..Self::default()
        };
        graph.rebuild();
        graph
    }

    /// Persisted settings (coordinates are normalized after each sync)
    #[inline]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Replace the persisted settings
    pub fn set_config(&mut self, config: PageConfig) {
        self.config = config;
        self.config_revision += 1;
        self.rebuild();
    }

    /// Change counter for the persisted settings
    #[inline]
    pub fn revision(&self) -> u64 {
        self.config_revision
    }

    /// Re-derive the page list from the current items and active page.
    ///
    /// Returns true when normalization wrote new coordinates.
    pub fn sync(&mut self, item_pages: &BTreeSet<PageId>, items_revision: u64, active: PageId) -> bool {
        let key = ViewKey {
            items_revision,
            config_revision: self.config_revision,
            active,
        };
        if self.view_key == Some(key) {
            return false;
        }
        self.item_pages = item_pages.clone();
        self.active = active;
        let wrote = self.rebuild();
        self.view_key = Some(ViewKey {
            items_revision,
            config_revision: self.config_revision,
            active,
        });
        wrote
    }

    /// Recompute the view from the cached inputs
    fn rebuild(&mut self) -> bool {
        let mut known: BTreeSet<PageId> = self.item_pages.clone();
        known.insert(HOME_PAGE);
        known.insert(self.active);
        known.extend(self.config.coords.keys().copied());
        known.extend(self.config.order.iter().copied());

        let pages = ordered_pages(&self.config.order, &known);
        let coords = normalize_coords(&self.config.coords, &pages);
        let wrote = coords != self.config.coords;
        if wrote {
            log::debug!(
                "assigned coordinates to {} page(s)",
                coords.len() - self.config.coords.len()
            );
            self.config.coords = coords;
            self.config_revision += 1;
        }

        let mut by_coord = HashMap::with_capacity(pages.len());
        for &id in &pages {
            let coord = self.coord_of(id);
            if let Some(previous) = by_coord.insert(coord, id) {
                log::warn!("pages {previous} and {id} share coordinate ({}, {})", coord.x, coord.y);
                by_coord.insert(coord, previous);
            }
        }
        self.view = PageView { pages, by_coord };
        wrote
    }

    /// Known pages in display order
    #[inline]
    pub fn pages(&self) -> &[PageId] {
        &self.view.pages
    }

    #[inline]
    pub fn contains(&self, id: PageId) -> bool {
        self.view.pages.contains(&id)
    }

    /// Position of a page in the display order
    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.view.pages.iter().position(|&p| p == id)
    }

    /// Coordinate of a page; unknown pages sit at the origin
    #[inline]
    pub fn coord_of(&self, id: PageId) -> PageCoord {
        self.config.coords.get(&id).copied().unwrap_or_default()
    }

    /// Page at a coordinate
    #[inline]
    pub fn page_at(&self, coord: PageCoord) -> Option<PageId> {
        self.view.by_coord.get(&coord).copied()
    }

    /// Highest id in use
    pub fn max_id(&self) -> PageId {
        self.view.pages.iter().copied().max().unwrap_or(HOME_PAGE)
    }

    /// Register a new page at an empty coordinate and return its id.
    ///
    /// The id is one past the highest known id. It is appended to the order
    /// list, which is first materialized from the current display order.
    pub fn create_page_at(&mut self, coord: PageCoord) -> Option<PageId> {
        if self.page_at(coord).is_some() {
            return None;
        }
        let id = self.max_id().checked_add(1)?;
        self.config.order = self.view.pages.clone();
        self.config.order.push(id);
        self.config.coords.insert(id, coord);
        self.config_revision += 1;
        self.rebuild();
        log::debug!("created page {id} at ({}, {})", coord.x, coord.y);
        Some(id)
    }

    /// Display label: the trimmed custom name, or `Page N`
    pub fn label(&self, id: PageId) -> String {
        if let Some(name) = self.config.names.get(&id) {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
        let index = self.index_of(id).unwrap_or(0);
        format!("Page {}", index + 1)
    }

    /// Set or clear a page's custom name
    pub fn rename(&mut self, id: PageId, name: &str) {
        if name.trim().is_empty() {
            self.config.names.remove(&id);
        } else {
            self.config.names.insert(id, name.to_string());
        }
        self.config_revision += 1;
    }

    /// Set the persisted swipe preferences
    pub fn set_swipe_preferences(&mut self, threshold: Option<f32>, lock_vertical: bool) {
        self.config.swipe_threshold = threshold;
        self.config.lock_vertical_swipe = lock_vertical;
        self.config_revision += 1;
    }

    pub(super) fn coords_mut(&mut self) -> &mut BTreeMap<PageId, PageCoord> {
        &mut self.config.coords
    }

    pub(super) fn commit_coords(&mut self) {
        self.config_revision += 1;
        self.rebuild();
    }
}

/// Explicit order first (known ids only, no repeats), then the rest ascending
pub(crate) fn ordered_pages(order: &[PageId], known: &BTreeSet<PageId>) -> Vec<PageId> {
    let mut pages = Vec::with_capacity(known.len());
    for &id in order {
        if known.contains(&id) && !pages.contains(&id) {
            pages.push(id);
        }
    }
    for &id in known {
        if !pages.contains(&id) {
            pages.push(id);
        }
    }
    pages
}

/// Give every page without a coordinate the next free column east of the
/// rightmost known page, on row 0, in id order. Existing coordinates are
/// kept.
pub(crate) fn normalize_coords(
    coords: &BTreeMap<PageId, PageCoord>,
    pages: &[PageId],
) -> BTreeMap<PageId, PageCoord> {
    let mut next = coords.clone();
    let mut max_x = coords.values().map(|c| c.x).max().unwrap_or(-1);
    let mut ids = pages.to_vec();
    ids.sort_unstable();
    for id in ids {
        if next.contains_key(&id) {
            continue;
        }
        max_x += 1;
        next.insert(id, PageCoord::new(max_x, 0));
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[PageId]) -> BTreeSet<PageId> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_home_page_always_present() {
        let graph = PageGraph::new(PageConfig::default());
        assert_eq!(graph.pages(), &[0]);
        assert_eq!(graph.coord_of(0), PageCoord::new(0, 0));
        assert_eq!(graph.page_at(PageCoord::new(0, 0)), Some(0));
    }

    #[test]
    fn test_item_pages_get_coordinates() {
        let mut graph = PageGraph::new(PageConfig::default());
        assert!(graph.sync(&ids(&[0, 2, 1]), 1, 0));
        assert_eq!(graph.pages(), &[0, 1, 2]);
        assert_eq!(graph.coord_of(1), PageCoord::new(1, 0));
        assert_eq!(graph.coord_of(2), PageCoord::new(2, 0));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut graph = PageGraph::new(PageConfig::default());
        graph.sync(&ids(&[0, 3]), 1, 0);
        let coords = graph.config().coords.clone();
        let revision = graph.revision();
        assert!(!graph.sync(&ids(&[0, 3]), 2, 0));
        assert_eq!(graph.config().coords, coords);
        assert_eq!(graph.revision(), revision);
    }

    #[test]
    fn test_normalize_starts_east_of_rightmost() {
        let mut coords = BTreeMap::new();
        coords.insert(0, PageCoord::new(0, 0));
        coords.insert(4, PageCoord::new(3, -1));
        let next = normalize_coords(&coords, &[0, 4, 5, 6]);
        assert_eq!(next[&5], PageCoord::new(4, 0));
        assert_eq!(next[&6], PageCoord::new(5, 0));
        assert_eq!(normalize_coords(&next, &[0, 4, 5, 6]), next);
    }

    #[test]
    fn test_order_then_ascending() {
        let pages = ordered_pages(&[3, 9, 1, 3], &ids(&[0, 1, 2, 3]));
        assert_eq!(pages, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_active_page_counts_as_known() {
        let mut graph = PageGraph::new(PageConfig::default());
        graph.sync(&ids(&[0]), 1, 5);
        assert!(graph.contains(5));
    }

    #[test]
    fn test_create_page_at() {
        let mut graph = PageGraph::new(PageConfig::default());
        graph.sync(&ids(&[0, 1]), 1, 0);
        let id = graph.create_page_at(PageCoord::new(0, 1)).unwrap();
        assert_eq!(id, 2);
        assert_eq!(graph.page_at(PageCoord::new(0, 1)), Some(2));
        assert_eq!(graph.config().order, vec![0, 1, 2]);
        assert_eq!(graph.create_page_at(PageCoord::new(0, 1)), None);
    }

    #[test]
    fn test_labels() {
        let mut config = PageConfig::default();
        config.order = vec![0, 1];
        config.names.insert(1, "  Work  ".into());
        let mut graph = PageGraph::new(config);
        graph.sync(&ids(&[0, 1, 2]), 1, 0);
        assert_eq!(graph.label(0), "Page 1");
        assert_eq!(graph.label(1), "Work");
        assert_eq!(graph.label(2), "Page 3");

        graph.rename(1, "   ");
        assert_eq!(graph.label(1), "Page 2");
    }
}
