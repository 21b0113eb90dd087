//! Active page and directional navigation

use serde::{Deserialize, Serialize};

use super::{PageCoord, PageGraph, PageId, HOME_PAGE};

/// Direction on the page map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step on the page map (y grows downward)
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Dominant axis of a wheel delta, ignoring ticks below `min_delta` on
    /// both axes
    pub fn from_wheel(dx: f32, dy: f32, min_delta: f32) -> Option<Self> {
        if dx.abs() < min_delta && dy.abs() < min_delta {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// Whether a navigation may synthesize a page at an empty coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatePolicy {
    Never,
    /// Only when the page being left holds at least one item
    IfSourceOccupied,
    Always,
}

/// Result of a navigation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Switched to an existing page
    Moved(PageId),
    /// Created a page and switched to it
    Created(PageId),
    /// Nothing there and no page could be created
    Blocked,
}

impl NavOutcome {
    /// Check if the active page changed
    #[inline]
    pub fn changed_page(&self) -> bool {
        !matches!(self, NavOutcome::Blocked)
    }
}

/// Tracks the active page and the per-gesture page creation budget
#[derive(Clone, Debug)]
pub struct PageNavigator {
    active: PageId,
    budget: u32,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl PageNavigator {
    /// Create a navigator on the home page
    pub fn new() -> Self {
        Self {
            active: HOME_PAGE,
            budget: 1,
        }
    }

    /// Get the active page
    #[inline]
    pub fn active(&self) -> PageId {
        self.active
    }

    /// Activate a page directly (page map selection, hydration)
    pub fn set_active(&mut self, id: PageId) {
        if self.active != id {
            log::debug!("active page {} -> {id}", self.active);
            self.active = id;
        }
    }

    /// Remaining page creations for the current gesture
    #[inline]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Start a new discrete gesture with a budget of one page creation
    #[inline]
    pub fn reset_budget(&mut self) {
        self.budget = 1;
    }

    /// Step from the active page's coordinate by `(dx, dy)`
    pub fn move_by(
        &mut self,
        graph: &mut PageGraph,
        dx: i32,
        dy: i32,
        policy: CreatePolicy,
        source_occupied: bool,
    ) -> NavOutcome {
        let allow_create = match policy {
            CreatePolicy::Never => false,
            CreatePolicy::IfSourceOccupied => source_occupied,
            CreatePolicy::Always => true,
        };
        let target = graph.coord_of(self.active).offset(dx, dy);
        self.ensure_page_at(graph, target, allow_create)
    }

    /// Activate the page at `coord`, creating one if allowed and the budget
    /// is not spent
    pub fn ensure_page_at(
        &mut self,
        graph: &mut PageGraph,
        coord: PageCoord,
        allow_create: bool,
    ) -> NavOutcome {
        if let Some(existing) = graph.page_at(coord) {
            self.set_active(existing);
            return NavOutcome::Moved(existing);
        }
        if !allow_create || self.budget == 0 {
            return NavOutcome::Blocked;
        }
        match graph.create_page_at(coord) {
            Some(id) => {
                self.budget -= 1;
                self.set_active(id);
                NavOutcome::Created(id)
            }
            None => NavOutcome::Blocked,
        }
    }

    /// Fall back to the first known page if the active one disappeared
    pub fn ensure_active_known(&mut self, graph: &PageGraph) -> bool {
        if graph.contains(self.active) {
            return false;
        }
        let fallback = graph.pages().first().copied().unwrap_or(HOME_PAGE);
        log::debug!("active page {} no longer exists, using {fallback}", self.active);
        self.active = fallback;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::page::PageConfig;

    fn graph(pages: &[PageId]) -> PageGraph {
        let mut graph = PageGraph::new(PageConfig::default());
        let set: BTreeSet<PageId> = pages.iter().copied().collect();
        graph.sync(&set, 1, 0);
        graph
    }

    #[test]
    fn test_move_to_existing_page() {
        let mut graph = graph(&[0, 1]);
        let mut nav = PageNavigator::new();
        assert_eq!(nav.move_by(&mut graph, 1, 0, CreatePolicy::Never, false), NavOutcome::Moved(1));
        assert_eq!(nav.active(), 1);
        assert_eq!(nav.budget(), 1);
    }

    #[test]
    fn test_create_spends_budget() {
        let mut graph = graph(&[0]);
        let mut nav = PageNavigator::new();
        assert_eq!(nav.move_by(&mut graph, 0, 1, CreatePolicy::Always, false), NavOutcome::Created(1));
        assert_eq!(nav.budget(), 0);
        assert_eq!(nav.move_by(&mut graph, 0, 1, CreatePolicy::Always, false), NavOutcome::Blocked);
        assert_eq!(nav.active(), 1);

        nav.reset_budget();
        assert_eq!(nav.move_by(&mut graph, 0, 1, CreatePolicy::Always, false), NavOutcome::Created(2));
        assert_eq!(graph.coord_of(2), PageCoord::new(0, 2));
    }

    #[test]
    fn test_source_occupied_policy() {
        let mut graph = graph(&[0]);
        let mut nav = PageNavigator::new();
        assert_eq!(
            nav.move_by(&mut graph, 1, 0, CreatePolicy::IfSourceOccupied, false),
            NavOutcome::Blocked
        );
        assert_eq!(
            nav.move_by(&mut graph, 1, 0, CreatePolicy::IfSourceOccupied, true),
            NavOutcome::Created(1)
        );
    }

    #[test]
    fn test_fallback_to_first_page() {
        let graph = graph(&[0, 1]);
        let mut nav = PageNavigator::new();
        nav.set_active(9);
        assert!(nav.ensure_active_known(&graph));
        assert_eq!(nav.active(), 0);
        assert!(!nav.ensure_active_known(&graph));
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(Direction::from_wheel(5.0, 12.0, 20.0), None);
        assert_eq!(Direction::from_wheel(40.0, 12.0, 20.0), Some(Direction::Right));
        assert_eq!(Direction::from_wheel(-40.0, 12.0, 20.0), Some(Direction::Left));
        assert_eq!(Direction::from_wheel(3.0, -25.0, 20.0), Some(Direction::Up));
        assert_eq!(Direction::from_wheel(0.0, 25.0, 20.0), Some(Direction::Down));
    }
}
