//! Persisted page settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PageCoord, PageId};

/// Page names, order, map coordinates and swipe preferences.
///
/// Stored alongside the item list. Ids that appear only here still count
/// as pages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    /// Custom page names
    pub names: BTreeMap<PageId, String>,
    /// Explicit page order; ids not listed follow in ascending order
    pub order: Vec<PageId>,
    /// Page map coordinates
    pub coords: BTreeMap<PageId, PageCoord>,
    /// Swipe distance (px) that navigates; clamped when read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
    /// Disable vertical page navigation
    pub lock_vertical_swipe: bool,
}
