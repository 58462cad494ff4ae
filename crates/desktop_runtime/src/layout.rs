//! Bulk window arrangement: cascade, tile and grid.
//!
//! Every function here is pure. It takes the visible windows back to front and returns the
//! rectangle each included window should occupy; the reducer applies the placements and returns
//! those windows to [`crate::model::WindowState::Normal`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::WindowManagerConfig,
    model::{WindowId, WindowRecord, WindowRect, WindowSize},
    window_manager::{non_negative, MIN_WINDOW_SIZE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowLayout {
    Cascade,
    Tile,
    Grid,
}

impl WindowLayout {
    pub const ALL: [WindowLayout; 3] = [Self::Cascade, Self::Tile, Self::Grid];

    pub fn label(self) -> &'static str {
        match self {
            Self::Cascade => "Cascade",
            Self::Tile => "Tile",
            Self::Grid => "Grid",
        }
    }
}

impl fmt::Display for WindowLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cascade => "cascade",
            Self::Tile => "tile",
            Self::Grid => "grid",
        })
    }
}

impl FromStr for WindowLayout {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(Self::Cascade),
            "tile" => Ok(Self::Tile),
            "grid" => Ok(Self::Grid),
            other => Err(format!("unknown layout `{other}`")),
        }
    }
}

/// Layout constants taken from [`WindowManagerConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub cascade_origin: i32,
    pub cascade_step: i32,
    pub tile_spacing: i32,
    pub tile_row_height: i32,
    pub grid_spacing: i32,
    pub grid_aspect_ratio: f64,
    pub min_size: WindowSize,
}

impl From<&WindowManagerConfig> for LayoutParams {
    fn from(config: &WindowManagerConfig) -> Self {
        Self {
            cascade_origin: config.cascade_origin,
            cascade_step: config.cascade_step,
            tile_spacing: config.tile_spacing,
            tile_row_height: config.tile_row_height,
            grid_spacing: config.grid_spacing,
            grid_aspect_ratio: config.grid_aspect_ratio,
            min_size: MIN_WINDOW_SIZE,
        }
    }
}

/// Computes placements for `windows` (back to front) inside `viewport`.
pub fn arrange(
    layout: WindowLayout,
    windows: &[&WindowRecord],
    viewport: WindowRect,
    params: &LayoutParams,
) -> Vec<(WindowId, WindowRect)> {
    if windows.is_empty() {
        return Vec::new();
    }
    let placements = match layout {
        WindowLayout::Cascade => cascade(windows, viewport, params),
        WindowLayout::Tile => tile(windows, viewport, params),
        WindowLayout::Grid => grid(windows, viewport, params),
    };
    placements
        .into_iter()
        .map(|(id, rect)| (id, non_negative(rect)))
        .collect()
}

// Windows that would not fit inside the viewport at their cascade slot keep their geometry.
fn cascade(
    windows: &[&WindowRecord],
    viewport: WindowRect,
    params: &LayoutParams,
) -> Vec<(WindowId, WindowRect)> {
    windows
        .iter()
        .enumerate()
        .filter_map(|(index, window)| {
            let size = window.normal_rect().size();
            let offset = params.cascade_origin + index as i32 * params.cascade_step;
            let rect = WindowRect {
                x: viewport.x + offset,
                y: viewport.y + offset,
                w: size.width,
                h: size.height,
            };
            let fits = rect.x.saturating_add(rect.w) <= viewport.x.saturating_add(viewport.w)
                && rect.y.saturating_add(rect.h) <= viewport.y.saturating_add(viewport.h);
            fits.then_some((window.id, rect))
        })
        .collect()
}

fn tile(
    windows: &[&WindowRecord],
    viewport: WindowRect,
    params: &LayoutParams,
) -> Vec<(WindowId, WindowRect)> {
    let cols = (windows.len() as f64).sqrt().ceil().max(1.0) as i32;
    let tile_width = viewport.w / cols;
    let half_gap = params.tile_spacing / 2;

    windows
        .iter()
        .enumerate()
        .map(|(index, window)| {
            let col = index as i32 % cols;
            let row = index as i32 / cols;
            let rect = WindowRect {
                x: viewport.x + col * tile_width + half_gap,
                y: viewport.y + row * params.tile_row_height + half_gap,
                w: tile_width - params.tile_spacing,
                h: params.tile_row_height - params.tile_spacing,
            };
            (window.id, rect.clamped_min(params.min_size))
        })
        .collect()
}

fn grid(
    windows: &[&WindowRecord],
    viewport: WindowRect,
    params: &LayoutParams,
) -> Vec<(WindowId, WindowRect)> {
    let count = windows.len();
    let aspect = if params.grid_aspect_ratio > 0.0 {
        params.grid_aspect_ratio
    } else {
        16.0 / 9.0
    };
    let spacing = f64::from(params.grid_spacing);
    let view_w = f64::from(viewport.w.max(1));
    let view_h = f64::from(viewport.h.max(1));

    let cell_area = view_w * view_h / count as f64;
    let ideal_cell_width = (cell_area * aspect).sqrt();
    let cols = ((view_w / ideal_cell_width).floor() as usize).clamp(1, count);

    let cell_w = ((view_w - (cols as f64 + 1.0) * spacing) / cols as f64).max(1.0);
    let cell_h = cell_w / aspect;

    windows
        .iter()
        .enumerate()
        .map(|(index, window)| {
            let col = (index % cols) as f64;
            let row = (index / cols) as f64;
            let rect = WindowRect {
                x: viewport.x + (spacing + col * (cell_w + spacing)).floor() as i32,
                y: viewport.y + (spacing + row * (cell_h + spacing)).floor() as i32,
                w: cell_w.floor() as i32,
                h: cell_h.floor() as i32,
            };
            (window.id, rect.clamped_min(params.min_size))
        })
        .collect()
}
