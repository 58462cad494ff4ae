//! Window-manager tuning loaded from the key-value store, with built-in defaults.

use serde::{Deserialize, Serialize};

use crate::{
    model::{WindowPosition, WindowRect, WindowSize},
    window_manager::MIN_WINDOW_SIZE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Position of the first default-placed window.
    pub base_position: WindowPosition,
    /// Diagonal offset added per already-open window.
    pub stagger_step: i32,
    /// Open-count after which the stagger offset wraps back to the base.
    pub stagger_wrap: usize,
    pub default_size: WindowSize,
    /// Area available to windows, excluding the taskbar.
    pub viewport: WindowRect,
    pub cascade_origin: i32,
    pub cascade_step: i32,
    pub tile_spacing: i32,
    pub tile_row_height: i32,
    pub grid_spacing: i32,
    pub grid_aspect_ratio: f64,
    pub restore_on_boot: bool,
    pub max_restore_windows: usize,
    pub recent_apps_limit: usize,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            base_position: WindowPosition {
                left: 100,
                top: 100,
            },
            stagger_step: 30,
            stagger_wrap: 10,
            default_size: WindowSize {
                width: 800,
                height: 600,
            },
            viewport: WindowRect {
                x: 0,
                y: 0,
                w: 1280,
                h: 720,
            },
            cascade_origin: 50,
            cascade_step: 30,
            tile_spacing: 10,
            tile_row_height: 320,
            grid_spacing: 10,
            grid_aspect_ratio: 16.0 / 9.0,
            restore_on_boot: true,
            max_restore_windows: 12,
            recent_apps_limit: 10,
        }
    }
}

impl WindowManagerConfig {
    /// Default geometry for a window opened while `open_count` windows are live.
    pub fn staggered_rect(&self, open_count: usize) -> WindowRect {
        let wrap = self.stagger_wrap.max(1);
        let offset = (open_count % wrap) as i32 * self.stagger_step;
        WindowRect::from_parts(
            WindowPosition {
                left: self.base_position.left + offset,
                top: self.base_position.top + offset,
            },
            self.default_size,
        )
        .clamped_min(MIN_WINDOW_SIZE)
    }
}
