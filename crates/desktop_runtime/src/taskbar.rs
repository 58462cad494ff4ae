//! Taskbar projection of window-manager state.

use desktop_app_contract::AppId;
use serde::{Deserialize, Serialize};

use crate::model::{DesktopState, WindowId, WindowState};

/// Visual treatment of a taskbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskbarVisual {
    /// The window is the active window.
    Active,
    /// Visible, but another window (or none) is active.
    Background,
    /// Hidden; rendered with the inactive marker.
    Minimized,
}

impl TaskbarVisual {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Background => "background",
            Self::Minimized => "minimized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub state: WindowState,
    pub is_active: bool,
}

impl TaskbarEntry {
    pub fn visual(&self) -> TaskbarVisual {
        if self.state == WindowState::Minimized {
            TaskbarVisual::Minimized
        } else if self.is_active {
            TaskbarVisual::Active
        } else {
            TaskbarVisual::Background
        }
    }
}

/// One entry per live window, in the order the windows were opened.
pub fn taskbar_entries(state: &DesktopState) -> Vec<TaskbarEntry> {
    state
        .windows
        .iter()
        .map(|window| TaskbarEntry {
            window_id: window.id,
            app_id: window.app_id.clone(),
            title: window.title.clone(),
            icon: window.icon.clone(),
            state: window.state,
            is_active: state.is_active(window.id),
        })
        .collect()
}

/// What a click on a taskbar button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarClick {
    RestoreAndFocus,
    Minimize,
    Focus,
}

/// Resolves the three-way taskbar toggle for `window_id`.
///
/// A hidden window is restored, the active window is minimized, and a visible background window
/// is focused rather than hidden.
pub fn resolve_taskbar_click(state: &DesktopState, window_id: WindowId) -> Option<TaskbarClick> {
    let window = state.window(window_id)?;
    Some(if window.state == WindowState::Minimized {
        TaskbarClick::RestoreAndFocus
    } else if state.is_active(window_id) {
        TaskbarClick::Minimize
    } else {
        TaskbarClick::Focus
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::model::{WindowRecord, WindowRect};

    fn state_with(windows: &[(u64, WindowState)], active: Option<u64>) -> DesktopState {
        let mut state = DesktopState::default();
        for (id, window_state) in windows {
            state.windows.push(WindowRecord {
                id: WindowId(*id),
                app_id: AppId::trusted("explorer"),
                title: format!("Explorer {id}"),
                icon: "folder".to_string(),
                state: *window_state,
                rect: WindowRect { x: 0, y: 0, w: 400, h: 300 },
                saved_geometry: None,
                z_order: *id,
                launch_params: Value::Null,
            });
        }
        state.active_window = active.map(WindowId);
        state
    }

    #[test]
    fn entries_follow_open_order_and_mark_visuals() {
        let state = state_with(
            &[(2, WindowState::Normal), (1, WindowState::Minimized), (3, WindowState::Maximized)],
            Some(3),
        );

        let visuals: Vec<_> = taskbar_entries(&state)
            .iter()
            .map(|entry| (entry.window_id.0, entry.visual()))
            .collect();

        assert_eq!(
            visuals,
            vec![
                (2, TaskbarVisual::Background),
                (1, TaskbarVisual::Minimized),
                (3, TaskbarVisual::Active),
            ]
        );
    }

    #[test]
    fn click_resolution_is_three_way() {
        let state = state_with(
            &[(1, WindowState::Minimized), (2, WindowState::Normal), (3, WindowState::Normal)],
            Some(3),
        );

        assert_eq!(
            resolve_taskbar_click(&state, WindowId(1)),
            Some(TaskbarClick::RestoreAndFocus)
        );
        assert_eq!(resolve_taskbar_click(&state, WindowId(2)), Some(TaskbarClick::Focus));
        assert_eq!(resolve_taskbar_click(&state, WindowId(3)), Some(TaskbarClick::Minimize));
        assert_eq!(resolve_taskbar_click(&state, WindowId(9)), None);
    }
}
