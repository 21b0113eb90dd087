//! Snapshot serialization for the desktop layout

use serde::{Deserialize, Serialize};

use crate::error::{DesktopError, Result};
use crate::item::Item;
use crate::page::PageConfig;

/// Snapshot of the layout for persistence
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// Version for migration support
    #[serde(default)]
    pub version: u32,
    /// Every item on every page
    #[serde(default)]
    pub items: Vec<Item>,
    /// Page names, order and coordinates
    #[serde(default)]
    pub pages: PageConfig,
    /// Host window state, carried through untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub windows: serde_json::Value,
}

impl LayoutSnapshot {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new snapshot
    pub fn new(items: Vec<Item>, pages: PageConfig) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            items,
            pages,
            windows: serde_json::Value::Null,
        }
    }

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    pub fn migrate(&mut self) {
        // Version 0 layouts predate page ids; serde defaults put them on home.
        self.version = Self::CURRENT_VERSION;
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse JSON, migrating older versions and rejecting newer ones
    pub fn from_json(text: &str) -> Result<Self> {
        let mut snapshot: LayoutSnapshot = serde_json::from_str(text)?;
        if snapshot.version > Self::CURRENT_VERSION {
            return Err(DesktopError::Snapshot(format!(
                "snapshot version {} is newer than supported version {}",
                snapshot.version,
                Self::CURRENT_VERSION
            )));
        }
        if snapshot.needs_migration() {
            log::warn!(
                "migrating layout snapshot from version {} to {}",
                snapshot.version,
                Self::CURRENT_VERSION
            );
            snapshot.migrate();
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use crate::page::PageCoord;
    use pretty_assertions::assert_eq;

    fn sample() -> LayoutSnapshot {
        let mut pages = PageConfig::default();
        pages.coords.insert(0, PageCoord::new(0, 0));
        pages.coords.insert(1, PageCoord::new(1, 0));
        pages.names.insert(1, "Work".into());
        LayoutSnapshot::new(
            vec![
                Item::new("finder", ItemKind::App).at(1, 1),
                Item::new("clock", ItemKind::Widget).with_footprint(2, 2).on_page(1),
            ],
            pages,
        )
    }

    #[test]
    fn test_snapshot_creation() {
        let snapshot = sample();
        assert_eq!(snapshot.version, LayoutSnapshot::CURRENT_VERSION);
        assert_eq!(snapshot.items.len(), 2);
        assert!(!snapshot.needs_migration());
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = sample();
        let restored = LayoutSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_default() {
        let snapshot: LayoutSnapshot = Default::default();
        assert_eq!(snapshot.version, 0); // Default doesn't set CURRENT_VERSION
        assert!(snapshot.needs_migration());
    }

    #[test]
    fn test_legacy_snapshot_migrates() {
        let snapshot = LayoutSnapshot::from_json(r#"{"items":[{"id":"notes","kind":"app"}]}"#).unwrap();
        assert_eq!(snapshot.version, LayoutSnapshot::CURRENT_VERSION);
        assert_eq!(snapshot.items[0].page_id, 0);
    }

    #[test]
    fn test_future_version_rejected() {
        let err = LayoutSnapshot::from_json(r#"{"version":99}"#).unwrap_err();
        assert!(matches!(err, DesktopError::Snapshot(_)));
    }

    #[test]
    fn test_windows_passed_through() {
        let text = r#"{"version":1,"windows":[{"id":"w1","isMinimized":true}]}"#;
        let snapshot = LayoutSnapshot::from_json(text).unwrap();
        let again = LayoutSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(again.windows[0]["id"], "w1");
    }
}
