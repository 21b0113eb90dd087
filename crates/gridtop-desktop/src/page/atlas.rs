//! Page map editing: rearranging pages on the coordinate plane

use super::{PageCoord, PageGraph, PageId, HOME_PAGE};

/// Ring search order around an origin
const RING_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Rings searched before falling back to the east neighbour
const RING_LIMIT: i32 = 5;

impl PageGraph {
    /// Exchange the coordinates of two pages. The home page never moves.
    pub fn swap_page_coords(&mut self, a: PageId, b: PageId) -> bool {
        if a == HOME_PAGE || b == HOME_PAGE || a == b {
            return false;
        }
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let coord_a = self.coord_of(a);
        let coord_b = self.coord_of(b);
        let coords = self.coords_mut();
        coords.insert(a, coord_b);
        coords.insert(b, coord_a);
        self.commit_coords();
        log::debug!("swapped pages {a} and {b} on the page map");
        true
    }

    /// Move a page to an empty coordinate. The home page never moves and
    /// occupied coordinates are refused.
    pub fn move_page_to_coord(&mut self, id: PageId, coord: PageCoord) -> bool {
        if id == HOME_PAGE || !self.contains(id) {
            return false;
        }
        match self.page_at(coord) {
            Some(occupant) if occupant != id => return false,
            Some(_) => return true,
            None => {}
        }
        self.coords_mut().insert(id, coord);
        self.commit_coords();
        log::debug!("moved page {id} to ({}, {})", coord.x, coord.y);
        true
    }

    /// Closest free coordinate around `origin`, searching rings of growing
    /// radius east, west, south, then north.
    pub fn nearest_empty_coord(&self, origin: PageCoord) -> PageCoord {
        for r in 1..=RING_LIMIT {
            for (dx, dy) in RING_DIRECTIONS {
                let coord = origin.offset(dx * r, dy * r);
                if self.page_at(coord).is_none() {
                    return coord;
                }
            }
        }
        origin.offset(1, 0)
    }

    /// Largest horizontal and vertical distance of any page from home
    pub fn extent(&self) -> (u32, u32) {
        let home = self.coord_of(HOME_PAGE);
        self.pages().iter().fold((0, 0), |(ex, ey), &id| {
            let coord = self.coord_of(id);
            (
                ex.max(coord.x.abs_diff(home.x)),
                ey.max(coord.y.abs_diff(home.y)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::page::PageConfig;

    fn graph_with(pages: &[PageId]) -> PageGraph {
        let mut graph = PageGraph::new(PageConfig::default());
        let set: BTreeSet<PageId> = pages.iter().copied().collect();
        graph.sync(&set, 1, 0);
        graph
    }

    #[test]
    fn test_swap_refuses_home() {
        let mut graph = graph_with(&[0, 1]);
        assert!(!graph.swap_page_coords(0, 1));
        assert_eq!(graph.coord_of(0), PageCoord::new(0, 0));
    }

    #[test]
    fn test_swap() {
        let mut graph = graph_with(&[0, 1, 2]);
        assert!(graph.swap_page_coords(1, 2));
        assert_eq!(graph.coord_of(1), PageCoord::new(2, 0));
        assert_eq!(graph.page_at(PageCoord::new(1, 0)), Some(2));
    }

    #[test]
    fn test_move_to_coord() {
        let mut graph = graph_with(&[0, 1, 2]);
        assert!(graph.move_page_to_coord(2, PageCoord::new(0, -1)));
        assert_eq!(graph.page_at(PageCoord::new(0, -1)), Some(2));
        assert!(!graph.move_page_to_coord(2, PageCoord::new(1, 0)));
        assert!(!graph.move_page_to_coord(0, PageCoord::new(5, 5)));
    }

    #[test]
    fn test_nearest_empty_coord_order() {
        let graph = graph_with(&[0, 1]);
        // east of home is page 1, so west comes next
        assert_eq!(graph.nearest_empty_coord(PageCoord::new(0, 0)), PageCoord::new(-1, 0));
        assert_eq!(graph.nearest_empty_coord(PageCoord::new(1, 0)), PageCoord::new(2, 0));
    }

    #[test]
    fn test_extent() {
        let mut graph = graph_with(&[0, 1, 2]);
        assert_eq!(graph.extent(), (2, 0));
        graph.move_page_to_coord(2, PageCoord::new(0, -3));
        assert_eq!(graph.extent(), (1, 3));
    }
}
