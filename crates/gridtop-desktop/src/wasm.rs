//! WASM exports for the desktop surface
//!
//! This module provides wasm-bindgen exports for the DesktopSurface, so a
//! web host can forward DOM events and draw from JSON render models.
//! Storage stays on the host side: it loads the saved JSON into
//! `hydrate_json` and polls `take_pending_save_json` after `tick`.

use wasm_bindgen::prelude::*;

use crate::config::DesktopConfig;
use crate::engine::DesktopSurface;
use crate::grid::Edge;
use crate::input::{Key, Modifiers};
use crate::math::Rect;
use crate::page::PageCoord;
use crate::persistence::LayoutSnapshot;

fn date_now() -> f64 {
    js_sys::Date::now()
}

fn edge_from_str(edge: &str) -> Option<Edge> {
    match edge {
        "top" => Some(Edge::Top),
        "bottom" => Some(Edge::Bottom),
        "left" => Some(Edge::Left),
        "right" => Some(Edge::Right),
        _ => None,
    }
}

/// Desktop controller for WASM - wraps DesktopSurface with JS-friendly API
#[wasm_bindgen]
pub struct DesktopController {
    surface: DesktopSurface,
}

impl Default for DesktopController {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl DesktopController {
    /// Create a controller with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            surface: DesktopSurface::default(),
        }
    }

    /// Create a controller from a TOML configuration
    #[wasm_bindgen]
    pub fn with_config_toml(source: &str) -> Result<DesktopController, JsValue> {
        let config = DesktopConfig::from_toml_str(source).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            surface: DesktopSurface::new(config),
        })
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize the desktop with screen dimensions
    #[wasm_bindgen]
    pub fn init(&mut self, width: f32, height: f32) {
        self.surface.init(width, height);
    }

    /// Resize the desktop viewport
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
    }

    /// Reserve space for chrome ("top", "bottom", "left" or "right")
    #[wasm_bindgen]
    pub fn set_canvas_inset(&mut self, edge: &str, px: f32) {
        if let Some(edge) = edge_from_str(edge) {
            self.surface.set_canvas_inset(edge, px);
        }
    }

    /// Set the trash drop target in screen pixels
    #[wasm_bindgen]
    pub fn set_trash_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.surface.set_trash_rect(Some(Rect::new(x, y, width, height)));
    }

    /// Remove the trash drop target
    #[wasm_bindgen]
    pub fn clear_trash_rect(&mut self) {
        self.surface.set_trash_rect(None);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Load a saved layout. Invalid or missing JSON loads the default layout.
    #[wasm_bindgen]
    pub fn hydrate_json(&mut self, json: Option<String>) {
        let snapshot = json.and_then(|text| match LayoutSnapshot::from_json(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("ignoring saved layout: {e}");
                None
            }
        });
        self.surface.hydrate(snapshot, date_now());
    }

    /// Layout JSON to write to storage, once per debounce window
    #[wasm_bindgen]
    pub fn take_pending_save_json(&mut self) -> Option<String> {
        let snapshot = self.surface.take_pending_save()?;
        match snapshot.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("failed to serialize layout: {e}");
                None
            }
        }
    }

    /// Host window state to save with the layout
    #[wasm_bindgen]
    pub fn set_windows_json(&mut self, json: &str) {
        match serde_json::from_str(json) {
            Ok(windows) => self.surface.set_windows(windows, date_now()),
            Err(e) => log::warn!("ignoring window state: {e}"),
        }
    }

    // =========================================================================
    // Time and rendering
    // =========================================================================

    /// Fire due timers. Returns true while animating.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.surface.tick(date_now())
    }

    /// Render model as JSON
    #[wasm_bindgen]
    pub fn get_render_json(&mut self) -> String {
        let model = self.surface.render(date_now());
        serde_json::to_string(&model).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen]
    pub fn get_active_page(&self) -> u32 {
        self.surface.active_page()
    }

    #[wasm_bindgen]
    pub fn is_editing(&self) -> bool {
        self.surface.is_editing()
    }

    #[wasm_bindgen]
    pub fn set_editing(&mut self, editing: bool) {
        self.surface.set_editing(editing);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle pointer down. Returns a JSON `InputResult`.
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, shift: bool, ctrl: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            ..Modifiers::NONE
        };
        let result = self.surface.handle_pointer_down(x, y, modifiers, date_now());
        serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
    }

    /// Handle pointer move
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle_pointer_move(x, y, date_now()).is_handled()
    }

    /// Handle pointer up. Returns a JSON `InputResult`; a launch carries the item id.
    #[wasm_bindgen]
    pub fn pointer_up(&mut self, x: f32, y: f32) -> String {
        let result = self.surface.handle_pointer_up(x, y, date_now());
        serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
    }

    #[wasm_bindgen]
    pub fn touch_start(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle_touch_start(x, y, date_now()).is_handled()
    }

    #[wasm_bindgen]
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle_touch_move(x, y).is_handled()
    }

    #[wasm_bindgen]
    pub fn touch_end(&mut self, x: f32, y: f32) -> bool {
        self.surface.handle_touch_end(x, y, date_now()).is_handled()
    }

    /// Handle a wheel event. Returns true if the host should prevent default.
    #[wasm_bindgen]
    pub fn wheel(&mut self, dx: f32, dy: f32) -> bool {
        self.surface.handle_wheel(dx, dy, date_now()).is_handled()
    }

    /// Handle a DOM `KeyboardEvent.key`
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.surface.handle_key_down(Key::from_dom(key), date_now()).is_handled()
    }

    // =========================================================================
    // Navigation blockers
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_modal_open(&mut self, open: bool) {
        self.surface.set_modal_open(open);
    }

    #[wasm_bindgen]
    pub fn set_open_windows(&mut self, count: u32) {
        self.surface.set_open_windows(count as usize);
    }

    #[wasm_bindgen]
    pub fn set_widget_interaction(&mut self, active: bool) {
        self.surface.set_widget_interaction(active);
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Add a widget to the active page
    #[wasm_bindgen]
    pub fn add_widget(&mut self, id: &str, title: &str, cols: u32, rows: u32) -> bool {
        self.surface.add_widget(id, title, cols, rows, date_now())
    }

    /// Delete an item (protected items are refused)
    #[wasm_bindgen]
    pub fn delete_item(&mut self, id: &str) -> bool {
        self.surface.delete_item(id, date_now())
    }

    // =========================================================================
    // Page map
    // =========================================================================

    #[wasm_bindgen]
    pub fn open_page_map(&mut self) {
        self.surface.open_page_map();
    }

    #[wasm_bindgen]
    pub fn close_page_map(&mut self) {
        self.surface.close_page_map();
    }

    #[wasm_bindgen]
    pub fn select_page(&mut self, id: u32) -> bool {
        self.surface.select_page(id, date_now())
    }

    #[wasm_bindgen]
    pub fn add_page(&mut self) -> Option<u32> {
        self.surface.add_page(date_now())
    }

    #[wasm_bindgen]
    pub fn swap_page_coords(&mut self, a: u32, b: u32) -> bool {
        self.surface.swap_page_coords(a, b, date_now())
    }

    #[wasm_bindgen]
    pub fn move_page_to_coord(&mut self, id: u32, x: i32, y: i32) -> bool {
        self.surface.move_page_to_coord(id, PageCoord::new(x, y), date_now())
    }

    #[wasm_bindgen]
    pub fn rename_page(&mut self, id: u32, name: &str) {
        self.surface.rename_page(id, name, date_now());
    }

    #[wasm_bindgen]
    pub fn set_swipe_preferences(&mut self, threshold: Option<f32>, lock_vertical: bool) {
        self.surface.set_swipe_preferences(threshold, lock_vertical, date_now());
    }
}
