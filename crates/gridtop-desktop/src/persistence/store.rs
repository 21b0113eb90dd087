//! Storage provider seam

use crate::error::{DesktopError, Result};
use super::LayoutSnapshot;

/// Where layouts are loaded from and saved to.
///
/// The engine never retries a failed save and never surfaces the error to
/// the user; it logs and carries on.
pub trait LayoutStore {
    /// Load the saved layout, if any
    fn load_layout(&mut self) -> Result<Option<LayoutSnapshot>>;

    /// Save a layout, replacing the previous one
    fn save_layout(&mut self, snapshot: &LayoutSnapshot) -> Result<()>;
}

/// In-memory store holding the last saved layout as JSON
#[derive(Clone, Debug, Default)]
pub struct MemoryLayoutStore {
    saved: Option<String>,
    saves: usize,
    failure: Option<String>,
}

impl MemoryLayoutStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a layout
    pub fn with_snapshot(snapshot: &LayoutSnapshot) -> Result<Self> {
        Ok(Self {
            saved: Some(snapshot.to_json()?),
            ..Self::default()
        })
    }

    /// Make every following save fail with `message`
    pub fn fail_saves(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Number of successful saves
    #[inline]
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Last saved JSON
    #[inline]
    pub fn raw(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn load_layout(&mut self) -> Result<Option<LayoutSnapshot>> {
        match &self.saved {
            Some(text) => Ok(Some(LayoutSnapshot::from_json(text)?)),
            None => Ok(None),
        }
    }

    fn save_layout(&mut self, snapshot: &LayoutSnapshot) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(DesktopError::Persistence(message.clone()));
        }
        self.saved = Some(snapshot.to_json()?);
        self.saves += 1;
        Ok(())
    }
}
