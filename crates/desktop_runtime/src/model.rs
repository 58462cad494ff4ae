use desktop_app_contract::{AppId, WindowRuntimeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque reference to a managed window. Ids are never reused within a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Handle returned to callers of the window manager.
pub type WindowHandle = WindowId;

impl WindowId {
    pub fn runtime_id(self) -> WindowRuntimeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub left: i32,
    pub top: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn from_parts(position: WindowPosition, size: WindowSize) -> Self {
        Self {
            x: position.left,
            y: position.top,
            w: size.width,
            h: size.height,
        }
    }

    pub fn position(self) -> WindowPosition {
        WindowPosition {
            left: self.x,
            top: self.y,
        }
    }

    pub fn size(self) -> WindowSize {
        WindowSize {
            width: self.w,
            height: self.h,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn clamped_min(self, min: WindowSize) -> Self {
        Self {
            w: self.w.max(min.width),
            h: self.h.max(min.height),
            ..self
        }
    }
}

/// Display state of a window. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub state: WindowState,
    /// Current geometry. While maximized this is the viewport.
    pub rect: WindowRect,
    /// Geometry captured on entering [`WindowState::Maximized`].
    pub saved_geometry: Option<WindowRect>,
    pub z_order: u64,
    pub launch_params: Value,
}

impl WindowRecord {
    /// Geometry the window returns to when it is next shown as a normal window.
    pub fn normal_rect(&self) -> WindowRect {
        // Set only while maximized, or minimized straight from maximized.
        self.saved_geometry.unwrap_or(self.rect)
    }

    pub fn is_visible(&self) -> bool {
        self.state != WindowState::Minimized
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub next_z_order: u64,
    /// Live windows in creation order.
    pub windows: Vec<WindowRecord>,
    pub active_window: Option<WindowId>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            next_z_order: 1,
            windows: Vec::new(),
            active_window: None,
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window.and_then(|id| self.window(id))
    }

    pub fn is_active(&self, window_id: WindowId) -> bool {
        self.active_window == Some(window_id)
    }

    /// Live windows ordered back to front.
    pub fn windows_by_z(&self) -> Vec<&WindowRecord> {
        let mut windows: Vec<&WindowRecord> = self.windows.iter().collect();
        windows.sort_by_key(|w| (w.z_order, w.id));
        windows
    }

    pub fn top_z_order(&self) -> Option<u64> {
        self.windows.iter().map(|w| w.z_order).max()
    }

    /// The front-most live window for `app_id`, used for single-instance opens.
    pub fn live_window_for_app(&self, app_id: &AppId) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| &w.app_id == app_id)
            .max_by_key(|w| w.z_order)
            .map(|w| w.id)
    }

    pub fn peek_next_window_id(&self) -> WindowId {
        WindowId(self.next_window_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Corner regions that start a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeCorner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl ResizeCorner {
    pub const ALL: [ResizeCorner; 4] = [
        ResizeCorner::NorthWest,
        ResizeCorner::NorthEast,
        ResizeCorner::SouthWest,
        ResizeCorner::SouthEast,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
            Self::SouthWest => "sw",
            Self::SouthEast => "se",
        }
    }
}

/// Control region of a window surface that received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitRegion {
    TitleBar,
    Resize(ResizeCorner),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub corner: ResizeCorner,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// System-wide pointer interaction. At most one drag or resize is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session.window_id),
            Self::Resizing(session) => Some(session.window_id),
        }
    }
}

/// Caller-supplied overrides for [`crate::WindowManager::open_window`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenWindowOptions {
    pub title: Option<String>,
    pub position: Option<WindowPosition>,
    pub size: Option<WindowSize>,
    pub launch_params: Value,
    /// Create a new window even when one for the app is already open.
    pub force_new_instance: bool,
}

impl OpenWindowOptions {
    pub fn new_instance() -> Self {
        Self {
            force_new_instance: true,
            ..Self::default()
        }
    }
}

/// Fully resolved window creation request consumed by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindowRequest {
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub rect: WindowRect,
    pub launch_params: Value,
}
