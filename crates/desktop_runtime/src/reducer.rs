//! Reducer actions, side-effect intents, and transition logic for the window manager.

use platform_host::Notification;
use thiserror::Error;

use crate::{
    layout::{arrange, LayoutParams, WindowLayout},
    model::{
        DesktopState, DragSession, InteractionState, OpenWindowRequest, PointerPosition,
        ResizeCorner, ResizeSession, WindowId, WindowPosition, WindowRecord, WindowRect,
        WindowSize, WindowState,
    },
    taskbar::{resolve_taskbar_click, TaskbarClick},
    window_manager::{
        focus_window_internal, next_window_id, next_z_order, resize_rect, MIN_WINDOW_SIZE,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Create a window from a fully resolved request. It becomes the active window.
    OpenWindow(OpenWindowRequest),
    /// Remove a window.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise a window and make it the active window, restoring it if minimized.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Hide a window without changing its stacking value.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a normal window into `viewport`, or restore a maximized one.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Area a maximized window occupies.
        viewport: WindowRect,
    },
    /// Taskbar button click (restore, minimize, or focus).
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Move a normal window to an absolute position.
    MoveWindow {
        /// Window to move.
        window_id: WindowId,
        /// New top-left corner.
        position: WindowPosition,
    },
    /// Resize a normal window, clamped to the minimum size.
    ResizeWindow {
        /// Window to resize.
        window_id: WindowId,
        /// Requested size.
        size: WindowSize,
    },
    /// Pointer-down on a title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Pointer-down on a resize corner.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Corner being dragged.
        corner: ResizeCorner,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Pointer moved anywhere on the page.
    PointerMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Pointer released anywhere on the page. Ends any drag or resize.
    PointerUp,
    /// Reposition every visible window.
    ArrangeWindows {
        /// Arrangement algorithm.
        layout: WindowLayout,
        /// Area to arrange into.
        viewport: WindowRect,
        /// Layout constants.
        params: LayoutParams,
    },
    /// The usable desktop area changed. Maximized windows follow it.
    SetViewport {
        /// New usable area.
        viewport: WindowRect,
    },
    /// Replace a window title.
    SetTitle {
        /// Window to retitle.
        window_id: WindowId,
        /// New title.
        title: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the window manager to execute.
pub enum RuntimeEffect {
    /// Mount app content for a newly created window.
    MountContent(WindowId),
    /// Run the content teardown hook of a closed window.
    TeardownContent(WindowId),
    /// Re-derive the taskbar and notify observers.
    SyncTaskbar,
    /// Persist the window layout snapshot.
    PersistLayout,
    /// Show a transient notification.
    Notify(Notification),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window {0:?} not found")]
    WindowNotFound(WindowId),
}

/// Applies a [`DesktopAction`] to the window collection and collects resulting side effects.
///
/// Geometry requests against windows that are not in [`WindowState::Normal`] are ignored, and a
/// drag or resize cannot start while another one is active.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not present.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = next_window_id(state);
            let z_order = next_z_order(state);
            state.windows.push(WindowRecord {
                id: window_id,
                app_id: req.app_id,
                title: req.title,
                icon: req.icon,
                state: WindowState::Normal,
                rect: req.rect.clamped_min(MIN_WINDOW_SIZE),
                saved_geometry: None,
                z_order,
                launch_params: req.launch_params,
            });
            state.active_window = Some(window_id);
            effects.push(RuntimeEffect::MountContent(window_id));
            effects.push(RuntimeEffect::SyncTaskbar);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::CloseWindow { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() == before_len {
                return Err(ReducerError::WindowNotFound(window_id));
            }
            if state.active_window == Some(window_id) {
                state.active_window = None;
            }
            if interaction.window_id() == Some(window_id) {
                *interaction = InteractionState::Idle;
            }
            effects.push(RuntimeEffect::TeardownContent(window_id));
            effects.push(RuntimeEffect::SyncTaskbar);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::FocusWindow { window_id } => {
            focus(state, window_id, &mut effects)?;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            if window.state != WindowState::Minimized {
                window.state = WindowState::Minimized;
                if state.active_window == Some(window_id) {
                    state.active_window = None;
                }
                if interaction.window_id() == Some(window_id) {
                    *interaction = InteractionState::Idle;
                }
                effects.push(RuntimeEffect::SyncTaskbar);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            let window = find_window_mut(state, window_id)?;
            match window.state {
                WindowState::Normal => {
                    window.saved_geometry = Some(window.rect);
                    window.rect = viewport;
                    window.state = WindowState::Maximized;
                }
                WindowState::Maximized => {
                    if let Some(saved) = window.saved_geometry.take() {
                        window.rect = saved;
                    }
                    window.state = WindowState::Normal;
                }
                WindowState::Minimized => return Ok(effects),
            }
            if interaction.window_id() == Some(window_id) {
                *interaction = InteractionState::Idle;
            }
            effects.push(RuntimeEffect::SyncTaskbar);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let click =
                resolve_taskbar_click(state, window_id).ok_or(ReducerError::WindowNotFound(window_id))?;
            let follow_up = match click {
                TaskbarClick::RestoreAndFocus | TaskbarClick::Focus => {
                    DesktopAction::FocusWindow { window_id }
                }
                TaskbarClick::Minimize => DesktopAction::MinimizeWindow { window_id },
            };
            effects.extend(reduce_desktop(state, interaction, follow_up)?);
        }
        DesktopAction::MoveWindow {
            window_id,
            position,
        } => {
            let window = find_window_mut(state, window_id)?;
            if window.state == WindowState::Normal {
                window.rect.x = position.left;
                window.rect.y = position.top;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ResizeWindow { window_id, size } => {
            let window = find_window_mut(state, window_id)?;
            if window.state == WindowState::Normal {
                window.rect.w = size.width;
                window.rect.h = size.height;
                window.rect = window.rect.clamped_min(MIN_WINDOW_SIZE);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            if !interaction.is_idle() {
                return Ok(effects);
            }
            focus(state, window_id, &mut effects)?;
            let window = find_window_mut(state, window_id)?;
            if window.state == WindowState::Normal {
                *interaction = InteractionState::Dragging(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start: window.rect,
                });
            }
        }
        DesktopAction::BeginResize {
            window_id,
            corner,
            pointer,
        } => {
            if !interaction.is_idle() {
                return Ok(effects);
            }
            focus(state, window_id, &mut effects)?;
            let window = find_window_mut(state, window_id)?;
            if window.state == WindowState::Normal {
                *interaction = InteractionState::Resizing(ResizeSession {
                    window_id,
                    corner,
                    pointer_start: pointer,
                    rect_start: window.rect,
                });
            }
        }
        DesktopAction::PointerMove { pointer } => {
            let next_rect = match &*interaction {
                InteractionState::Idle => None,
                InteractionState::Dragging(session) => Some((
                    session.window_id,
                    session.rect_start.offset(
                        pointer.x.saturating_sub(session.pointer_start.x),
                        pointer.y.saturating_sub(session.pointer_start.y),
                    ),
                )),
                InteractionState::Resizing(session) => Some((
                    session.window_id,
                    resize_rect(
                        session.rect_start,
                        session.corner,
                        pointer.x.saturating_sub(session.pointer_start.x),
                        pointer.y.saturating_sub(session.pointer_start.y),
                        MIN_WINDOW_SIZE,
                    ),
                )),
            };
            if let Some((window_id, rect)) = next_rect {
                match state.windows.iter_mut().find(|w| w.id == window_id) {
                    Some(window) if window.state == WindowState::Normal => window.rect = rect,
                    _ => *interaction = InteractionState::Idle,
                }
            }
        }
        DesktopAction::PointerUp => {
            if !interaction.is_idle() {
                *interaction = InteractionState::Idle;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ArrangeWindows {
            layout,
            viewport,
            params,
        } => {
            let placements = {
                let visible: Vec<&WindowRecord> = state
                    .windows_by_z()
                    .into_iter()
                    .filter(|w| w.is_visible())
                    .collect();
                arrange(layout, &visible, viewport, &params)
            };
            for (window_id, rect) in placements {
                let window = find_window_mut(state, window_id)?;
                window.rect = rect;
                window.saved_geometry = None;
                window.state = WindowState::Normal;
            }
            *interaction = InteractionState::Idle;
            effects.push(RuntimeEffect::SyncTaskbar);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::SetViewport { viewport } => {
            for window in state
                .windows
                .iter_mut()
                .filter(|w| w.state == WindowState::Maximized)
            {
                window.rect = viewport;
            }
        }
        DesktopAction::SetTitle { window_id, title } => {
            let window = find_window_mut(state, window_id)?;
            if window.title != title {
                window.title = title;
                effects.push(RuntimeEffect::SyncTaskbar);
            }
        }
    }

    Ok(effects)
}

fn focus(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let before_state = state
        .window(window_id)
        .map(|w| w.state)
        .ok_or(ReducerError::WindowNotFound(window_id))?;
    let before_active = state.active_window;

    focus_window_internal(state, window_id);

    let restored = before_state == WindowState::Minimized;
    if restored || before_active != state.active_window {
        effects.push(RuntimeEffect::SyncTaskbar);
    }
    if restored {
        effects.push(RuntimeEffect::PersistLayout);
    }
    Ok(())
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppId;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::config::WindowManagerConfig;

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1200,
        h: 760,
    };

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app: &str) -> WindowId {
        let rect = WindowManagerConfig::default().staggered_rect(state.windows.len());
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest {
                app_id: AppId::trusted(app),
                title: app.to_string(),
                icon: app.to_string(),
                rect,
                launch_params: Value::Null,
            }),
        )
        .expect("open window");
        state.windows.last().expect("window").id
    }

    fn record(state: &DesktopState, window_id: WindowId) -> &WindowRecord {
        state.window(window_id).expect("window exists")
    }

    #[test]
    fn open_window_activates_new_window_and_raises_z_order() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, "explorer");
        let second = open(&mut state, &mut interaction, "notepad");

        assert_eq!(state.active_window, Some(second));
        assert!(record(&state, second).z_order > record(&state, first).z_order);
        assert_eq!(record(&state, second).rect.x, 130);
    }

    #[test]
    fn open_emits_mount_taskbar_and_persist_effects() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow(OpenWindowRequest {
                app_id: AppId::trusted("paint"),
                title: "Paint".to_string(),
                icon: "paint".to_string(),
                rect: WindowRect { x: 0, y: 0, w: 10, h: 10 },
                launch_params: Value::Null,
            }),
        )
        .unwrap();

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::MountContent(WindowId(1)),
                RuntimeEffect::SyncTaskbar,
                RuntimeEffect::PersistLayout,
            ]
        );
        assert_eq!(state.windows[0].rect.size(), MIN_WINDOW_SIZE);
    }

    #[test]
    fn closing_active_window_clears_active_without_promotion() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let _first = open(&mut state, &mut interaction, "explorer");
        let second = open(&mut state, &mut interaction, "notepad");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: second },
        )
        .unwrap();

        assert_eq!(state.active_window, None);
        assert_eq!(effects[0], RuntimeEffect::TeardownContent(second));
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::CloseWindow { window_id: second },
            ),
            Err(ReducerError::WindowNotFound(second))
        );
    }

    #[test]
    fn minimize_keeps_z_order_and_clears_active() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "terminal");
        let z_before = record(&state, win).z_order;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: win },
        )
        .unwrap();

        assert_eq!(record(&state, win).state, WindowState::Minimized);
        assert_eq!(record(&state, win).z_order, z_before);
        assert_eq!(state.active_window, None);
    }

    #[test]
    fn taskbar_toggle_minimizes_if_active_and_restores_if_minimized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open(&mut state, &mut interaction, "explorer");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: win },
        )
        .expect("minimize");
        assert_eq!(record(&state, win).state, WindowState::Minimized);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: win },
        )
        .expect("restore");
        assert_eq!(record(&state, win).state, WindowState::Normal);
        assert_eq!(state.active_window, Some(win));
    }

    #[test]
    fn taskbar_toggle_on_background_window_focuses_instead_of_hiding() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let background = open(&mut state, &mut interaction, "explorer");
        let _front = open(&mut state, &mut interaction, "notepad");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow {
                window_id: background,
            },
        )
        .unwrap();

        assert_eq!(record(&state, background).state, WindowState::Normal);
        assert_eq!(state.active_window, Some(background));
    }

    #[test]
    fn focusing_already_focused_top_window_is_noop() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let _first = open(&mut state, &mut interaction, "explorer");
        let second = open(&mut state, &mut interaction, "calculator");
        let before = state.clone();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow { window_id: second },
        )
        .expect("focus focused window");

        assert_eq!(state, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn maximize_round_trip_restores_exact_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "paint");
        let original = record(&state, win).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: win,
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        assert_eq!(record(&state, win).rect, VIEWPORT);
        assert_eq!(record(&state, win).saved_geometry, Some(original));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: win,
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        assert_eq!(record(&state, win).rect, original);
        assert_eq!(record(&state, win).state, WindowState::Normal);
        assert_eq!(record(&state, win).saved_geometry, None);
    }

    #[test]
    fn focusing_window_minimized_from_maximized_restores_normal_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "paint");
        let original = record(&state, win).rect;

        for action in [
            DesktopAction::ToggleMaximize {
                window_id: win,
                viewport: VIEWPORT,
            },
            DesktopAction::MinimizeWindow { window_id: win },
            DesktopAction::FocusWindow { window_id: win },
        ] {
            reduce_desktop(&mut state, &mut interaction, action).unwrap();
        }

        assert_eq!(record(&state, win).state, WindowState::Normal);
        assert_eq!(record(&state, win).rect, original);
    }

    #[test]
    fn moving_window_tracks_pointer_and_persists_on_pointer_up() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open(&mut state, &mut interaction, "terminal");
        let original = record(&state, win).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 10, y: 10 },
            },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: PointerPosition { x: 35, y: 50 },
            },
        )
        .unwrap();

        let moved = record(&state, win).rect;
        assert_eq!(moved.x, original.x + 25);
        assert_eq!(moved.y, original.y + 40);

        let effects =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::PointerUp).unwrap();
        assert!(effects.contains(&RuntimeEffect::PersistLayout));
        assert!(interaction.is_idle());
    }

    #[test]
    fn maximized_window_does_not_start_a_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "browser");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: win,
                viewport: VIEWPORT,
            },
        )
        .unwrap();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();

        assert!(interaction.is_idle());
        assert_eq!(record(&state, win).rect, VIEWPORT);
    }

    #[test]
    fn second_interaction_is_ignored_while_one_is_active() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let first = open(&mut state, &mut interaction, "explorer");
        let second = open(&mut state, &mut interaction, "notepad");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: first,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: second,
                corner: ResizeCorner::SouthEast,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();

        assert_eq!(interaction.window_id(), Some(first));
        assert_eq!(state.active_window, Some(first));
    }

    #[test]
    fn resize_interaction_clamps_to_minimum() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "calculator");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: win,
                corner: ResizeCorner::SouthEast,
                pointer: PointerPosition { x: 900, y: 700 },
            },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();

        assert_eq!(record(&state, win).rect.size(), MIN_WINDOW_SIZE);
    }

    #[test]
    fn direct_geometry_requests_ignore_non_normal_windows() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "notepad");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: win },
        )
        .unwrap();
        let before = record(&state, win).rect;

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MoveWindow {
                window_id: win,
                position: WindowPosition { left: 5, top: 5 },
            },
        )
        .unwrap();

        assert!(effects.is_empty());
        assert_eq!(record(&state, win).rect, before);
    }

    #[test]
    fn viewport_change_refits_only_maximized_windows() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let normal = open(&mut state, &mut interaction, "notepad");
        let big = open(&mut state, &mut interaction, "paint");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: big,
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        let normal_rect = record(&state, normal).rect;
        let smaller = WindowRect { x: 0, y: 0, w: 900, h: 600 };

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetViewport { viewport: smaller },
        )
        .unwrap();

        assert_eq!(record(&state, big).rect, smaller);
        assert_eq!(record(&state, normal).rect, normal_rect);
    }

    #[test]
    fn arrange_skips_minimized_and_normalizes_maximized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let hidden = open(&mut state, &mut interaction, "explorer");
        let big = open(&mut state, &mut interaction, "paint");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: hidden },
        )
        .unwrap();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: big,
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        let hidden_rect = record(&state, hidden).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ArrangeWindows {
                layout: WindowLayout::Tile,
                viewport: VIEWPORT,
                params: LayoutParams::from(&WindowManagerConfig::default()),
            },
        )
        .unwrap();

        assert_eq!(record(&state, hidden).rect, hidden_rect);
        assert_eq!(record(&state, hidden).state, WindowState::Minimized);
        assert_eq!(record(&state, big).state, WindowState::Normal);
        assert_eq!(record(&state, big).saved_geometry, None);
        assert_eq!(record(&state, big).rect.w, 1190);
    }
}
