//! The window manager: sole owner of the window collection, mounted app contents and the
//! pointer interaction state.
//!
//! Every public operation runs the reducer, executes the resulting effects that belong to the
//! manager (mounting and tearing down content, notifying taskbar observers), queues the rest for
//! the host, and then applies app commands queued while it ran. Operations on stale handles are
//! logged and ignored.

use std::{collections::BTreeMap, fmt, rc::Rc};

use desktop_app_contract::{AppCommand, AppCommandQueue, AppContent, AppId, AppMountContext};
use leptos::logging;
use platform_host::Notification;
use thiserror::Error;

use crate::{
    apps::AppRegistry,
    config::WindowManagerConfig,
    layout::{LayoutParams, WindowLayout},
    model::{
        DesktopState, HitRegion, InteractionState, OpenWindowOptions, OpenWindowRequest,
        PointerPosition, WindowHandle, WindowId, WindowPosition, WindowRecord, WindowRect,
        WindowSize, WindowState,
    },
    persistence::PersistedLayout,
    recent::{RecentApp, RecentApps},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    shortcuts::ShortcutAction,
    taskbar::{taskbar_entries, TaskbarEntry},
    window_manager::within_restore_reach,
};

/// Upper bound on app commands applied after a single operation.
const MAX_SETTLE_COMMANDS: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowManagerError {
    #[error("application `{0}` is not registered")]
    UnknownApp(AppId),
}

/// Content mounted into a window's content area.
pub enum MountedContent {
    Live(Box<dyn AppContent>),
    /// The app factory failed; the window shows this message instead.
    Failed { message: String },
}

impl fmt::Debug for MountedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live(_) => f.write_str("Live(..)"),
            Self::Failed { message } => f.debug_struct("Failed").field("message", message).finish(),
        }
    }
}

type TaskbarObserver = Box<dyn FnMut(&[TaskbarEntry])>;

pub struct WindowManager {
    registry: AppRegistry,
    config: WindowManagerConfig,
    state: DesktopState,
    interaction: InteractionState,
    contents: BTreeMap<WindowId, MountedContent>,
    commands: AppCommandQueue,
    effects: Vec<RuntimeEffect>,
    taskbar_observers: Vec<TaskbarObserver>,
    recent: RecentApps,
    viewport: WindowRect,
    settling: bool,
}

impl WindowManager {
    pub fn new(registry: AppRegistry, config: WindowManagerConfig) -> Self {
        Self {
            registry,
            recent: RecentApps::new(config.recent_apps_limit),
            viewport: config.viewport,
            config,
            state: DesktopState::default(),
            interaction: InteractionState::default(),
            contents: BTreeMap::new(),
            commands: AppCommandQueue::new(),
            effects: Vec::new(),
            taskbar_observers: Vec::new(),
            settling: false,
        }
    }

    /// Opens a window for `app_id`, or focuses its existing window unless
    /// `options.force_new_instance` is set.
    ///
    /// # Errors
    ///
    /// Returns [`WindowManagerError::UnknownApp`] when `app_id` is not registered. An error
    /// notification is queued and no window is created.
    pub fn open_window(
        &mut self,
        app_id: &AppId,
        options: OpenWindowOptions,
    ) -> Result<WindowHandle, WindowManagerError> {
        let result = self.open_and_record(app_id, options);
        self.settle();
        result
    }

    /// Runs the content teardown hook and removes the window. Closing a stale handle is a no-op.
    pub fn close_window(&mut self, handle: WindowHandle) {
        self.dispatch(DesktopAction::CloseWindow { window_id: handle });
    }

    /// Closes every live window, iterating over the ids present when the call started.
    pub fn close_all_windows(&mut self) {
        let handles: Vec<WindowId> = self.state.windows.iter().map(|w| w.id).collect();
        for handle in handles {
            self.apply(DesktopAction::CloseWindow { window_id: handle });
        }
        self.settle();
    }

    pub fn minimize_window(&mut self, handle: WindowHandle) {
        self.dispatch(DesktopAction::MinimizeWindow { window_id: handle });
    }

    pub fn toggle_maximize(&mut self, handle: WindowHandle) {
        self.dispatch(DesktopAction::ToggleMaximize {
            window_id: handle,
            viewport: self.viewport,
        });
    }

    /// Raises the window, restoring it if minimized, and makes it the sole active window.
    pub fn bring_to_front(&mut self, handle: WindowHandle) {
        self.dispatch(DesktopAction::FocusWindow { window_id: handle });
    }

    /// Moves a normal window. Positions are not clamped to the viewport.
    pub fn drag_to(&mut self, handle: WindowHandle, left: i32, top: i32) {
        self.dispatch(DesktopAction::MoveWindow {
            window_id: handle,
            position: WindowPosition { left, top },
        });
    }

    /// Resizes a normal window, clamping to [`crate::MIN_WINDOW_SIZE`].
    pub fn resize_to(&mut self, handle: WindowHandle, width: i32, height: i32) {
        self.dispatch(DesktopAction::ResizeWindow {
            window_id: handle,
            size: WindowSize { width, height },
        });
    }

    /// Repositions every visible window. Minimized windows keep their geometry.
    pub fn arrange_windows(&mut self, layout: WindowLayout) {
        self.dispatch(DesktopAction::ArrangeWindows {
            layout,
            viewport: self.viewport,
            params: LayoutParams::from(&self.config),
        });
    }

    /// Live windows ordered back to front.
    pub fn get_windows(&self) -> Vec<&WindowRecord> {
        self.state.windows_by_z()
    }

    pub fn get_active_window(&self) -> Option<&WindowRecord> {
        self.state.active_window()
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&WindowRecord> {
        self.state.window(handle)
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        taskbar_entries(&self.state)
    }

    /// Three-way taskbar toggle: restore a hidden window, minimize the active one, focus the rest.
    pub fn click_taskbar_entry(&mut self, handle: WindowHandle) {
        self.dispatch(DesktopAction::ToggleTaskbarWindow { window_id: handle });
    }

    /// Registers a callback invoked with the full entry list after every taskbar-visible change.
    pub fn on_taskbar_change(&mut self, observer: impl FnMut(&[TaskbarEntry]) + 'static) {
        self.taskbar_observers.push(Box::new(observer));
    }

    /// Pointer-down on a window control region. Ignored while another interaction is active.
    pub fn pointer_down(&mut self, handle: WindowHandle, region: HitRegion, pointer: PointerPosition) {
        let action = match region {
            HitRegion::TitleBar => DesktopAction::BeginMove {
                window_id: handle,
                pointer,
            },
            HitRegion::Resize(corner) => DesktopAction::BeginResize {
                window_id: handle,
                corner,
                pointer,
            },
        };
        self.dispatch(action);
    }

    pub fn pointer_move(&mut self, pointer: PointerPosition) {
        if !self.interaction.is_idle() {
            self.dispatch(DesktopAction::PointerMove { pointer });
        }
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(DesktopAction::PointerUp);
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Updates the usable desktop area used by maximize and the layout algorithms.
    pub fn set_viewport(&mut self, viewport: WindowRect) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.dispatch(DesktopAction::SetViewport { viewport });
    }

    pub fn viewport(&self) -> WindowRect {
        self.viewport
    }

    /// Drains the effects the host is responsible for: persistence, taskbar refresh and
    /// notifications.
    pub fn take_effects(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Registers a callback run whenever app content queues a command.
    ///
    /// Commands sent from inside a manager operation are applied before it returns. Commands sent
    /// from app event handlers wait until the host calls [`Self::settle_app_commands`], which this
    /// callback should schedule. It may fire while the manager is borrowed.
    pub fn on_app_command(&mut self, waker: impl Fn() + 'static) {
        self.commands.set_waker(waker);
    }

    /// Applies app commands queued since the last operation.
    pub fn settle_app_commands(&mut self) {
        self.settle();
    }

    pub fn pending_app_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn content(&self, handle: WindowHandle) -> Option<&MountedContent> {
        self.contents.get(&handle)
    }

    pub fn apply_shortcut(&mut self, shortcut: ShortcutAction) {
        let active = self.state.active_window;
        match (shortcut, active) {
            (ShortcutAction::CycleFocus, _) => self.cycle_focus(),
            (ShortcutAction::ShowDesktop, _) => self.show_desktop(),
            (ShortcutAction::CloseActive, Some(handle)) => self.close_window(handle),
            (ShortcutAction::MinimizeActive, Some(handle)) => self.minimize_window(handle),
            (ShortcutAction::ToggleMaximizeActive, Some(handle)) => self.toggle_maximize(handle),
            (_, None) => {}
        }
    }

    /// Brings the bottom-most window to front, rotating through the stack.
    pub fn cycle_focus(&mut self) {
        let bottom = self.state.windows_by_z().first().map(|w| w.id);
        if let Some(handle) = bottom {
            self.bring_to_front(handle);
        }
    }

    /// Minimizes every visible window.
    pub fn show_desktop(&mut self) {
        let visible: Vec<WindowId> = self
            .state
            .windows
            .iter()
            .filter(|w| w.is_visible())
            .map(|w| w.id)
            .collect();
        for handle in visible {
            self.apply(DesktopAction::MinimizeWindow { window_id: handle });
        }
        self.settle();
    }

    pub fn persisted_layout(&self) -> PersistedLayout {
        PersistedLayout::from_state(&self.state)
    }

    /// Reopens persisted windows in ascending id order, up to `max_restore_windows`.
    ///
    /// Saved geometry is applied where present and minimized or maximized windows return to that
    /// state. Entries naming unregistered apps are skipped.
    pub fn restore_layout(&mut self, layout: &PersistedLayout) -> Vec<WindowHandle> {
        let mut restored = Vec::new();
        for (key, entry) in layout.entries_in_open_order() {
            if restored.len() >= self.config.max_restore_windows {
                logging::warn!(
                    "restored {} windows, skipping the rest of the saved layout",
                    restored.len()
                );
                break;
            }
            let app_id = match AppId::new(entry.app_id.as_str()) {
                Ok(app_id) if self.registry.contains(&app_id) => app_id,
                _ => {
                    logging::warn!(
                        "skipping saved window `{key}`: unknown app `{}`",
                        entry.app_id
                    );
                    continue;
                }
            };
            let default_rect = self.config.staggered_rect(self.state.windows.len());
            let saved = WindowRect::from_parts(
                entry.position.unwrap_or(default_rect.position()),
                entry.size.unwrap_or(default_rect.size()),
            );
            let rect = within_restore_reach(saved, self.viewport);
            let options = OpenWindowOptions {
                position: Some(rect.position()),
                size: Some(rect.size()),
                ..OpenWindowOptions::new_instance()
            };
            let Ok(handle) = self.open(&app_id, options) else {
                continue;
            };
            match entry.state {
                WindowState::Normal => {}
                WindowState::Minimized => {
                    self.apply(DesktopAction::MinimizeWindow { window_id: handle });
                }
                WindowState::Maximized => {
                    self.apply(DesktopAction::ToggleMaximize {
                        window_id: handle,
                        viewport: self.viewport,
                    });
                }
            }
            restored.push(handle);
        }
        self.settle();
        restored
    }

    pub fn recent_apps(&self) -> &[RecentApp] {
        self.recent.entries()
    }

    /// Replaces the recent-apps list, typically with the persisted one at boot.
    pub fn set_recent_apps(&mut self, entries: Vec<RecentApp>) {
        self.recent = RecentApps::from_entries(entries, self.config.recent_apps_limit);
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Applies one reducer action, then any app commands it triggered.
    pub fn dispatch(&mut self, action: DesktopAction) {
        self.apply(action);
        self.settle();
    }

    fn open_and_record(
        &mut self,
        app_id: &AppId,
        options: OpenWindowOptions,
    ) -> Result<WindowHandle, WindowManagerError> {
        let handle = self.open(app_id, options)?;
        if let Some(descriptor) = self.registry.get(app_id) {
            self.recent.record(app_id.clone(), descriptor.display_name.clone());
        }
        Ok(handle)
    }

    fn open(
        &mut self,
        app_id: &AppId,
        options: OpenWindowOptions,
    ) -> Result<WindowHandle, WindowManagerError> {
        let Some(descriptor) = self.registry.get(app_id) else {
            logging::warn!("open requested for unknown app `{app_id}`");
            self.push_effect(RuntimeEffect::Notify(Notification::error(
                "Application not found",
                format!("No application named `{app_id}` is installed."),
            )));
            return Err(WindowManagerError::UnknownApp(app_id.clone()));
        };

        if !options.force_new_instance {
            if let Some(existing) = self.state.live_window_for_app(app_id) {
                self.apply(DesktopAction::FocusWindow {
                    window_id: existing,
                });
                return Ok(existing);
            }
        }

        let default_rect = self.config.staggered_rect(self.state.windows.len());
        let request = OpenWindowRequest {
            app_id: app_id.clone(),
            title: options
                .title
                .unwrap_or_else(|| descriptor.display_name.clone()),
            icon: descriptor.icon.clone(),
            rect: WindowRect::from_parts(
                options.position.unwrap_or(default_rect.position()),
                options.size.unwrap_or(default_rect.size()),
            ),
            launch_params: options.launch_params,
        };
        let handle = self.state.peek_next_window_id();
        self.apply(DesktopAction::OpenWindow(request));
        Ok(handle)
    }

    fn apply(&mut self, action: DesktopAction) -> bool {
        match reduce_desktop(&mut self.state, &mut self.interaction, action) {
            Ok(effects) => {
                for effect in effects {
                    self.run_effect(effect);
                }
                true
            }
            Err(ReducerError::WindowNotFound(window_id)) => {
                logging::debug_warn!("ignoring operation on stale window {}", window_id.0);
                false
            }
        }
    }

    fn run_effect(&mut self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::MountContent(window_id) => self.mount(window_id),
            RuntimeEffect::TeardownContent(window_id) => self.teardown(window_id),
            RuntimeEffect::SyncTaskbar => {
                let entries = taskbar_entries(&self.state);
                for observer in &mut self.taskbar_observers {
                    observer(&entries);
                }
                self.push_effect(RuntimeEffect::SyncTaskbar);
            }
            RuntimeEffect::PersistLayout | RuntimeEffect::Notify(_) => self.push_effect(effect),
        }
    }

    fn push_effect(&mut self, effect: RuntimeEffect) {
        let coalesce = matches!(
            effect,
            RuntimeEffect::SyncTaskbar | RuntimeEffect::PersistLayout
        );
        if coalesce && self.effects.contains(&effect) {
            return;
        }
        self.effects.push(effect);
    }

    fn mount(&mut self, window_id: WindowId) {
        let Some(record) = self.state.window(window_id) else {
            return;
        };
        let context = AppMountContext {
            window_id: window_id.runtime_id(),
            app_id: record.app_id.clone(),
            launch_params: record.launch_params.clone(),
            host: self.commands.host_for(window_id.runtime_id()),
        };
        let factory = self
            .registry
            .get(&record.app_id)
            .map(|descriptor| Rc::clone(&descriptor.factory));

        let content = match factory {
            Some(factory) => match factory.mount(context) {
                Ok(content) => MountedContent::Live(content),
                Err(err) => {
                    logging::warn!("app `{}` failed to mount: {err}", record.app_id);
                    MountedContent::Failed {
                        message: err.to_string(),
                    }
                }
            },
            None => MountedContent::Failed {
                message: format!("application `{}` is not registered", record.app_id),
            },
        };
        self.contents.insert(window_id, content);
    }

    fn teardown(&mut self, window_id: WindowId) {
        self.commands.discard_from(window_id.runtime_id());
        if let Some(MountedContent::Live(mut content)) = self.contents.remove(&window_id) {
            content.teardown();
        }
    }

    fn settle(&mut self) {
        if self.settling {
            return;
        }
        self.settling = true;
        let mut applied = 0;
        while let Some((source, command)) = self.commands.pop() {
            if applied == MAX_SETTLE_COMMANDS {
                logging::warn!(
                    "dropping {} app commands queued in a single operation",
                    self.commands.len() + 1
                );
                while self.commands.pop().is_some() {}
                break;
            }
            applied += 1;
            self.apply_command(WindowId(source), command);
        }
        self.settling = false;
    }

    fn apply_command(&mut self, source: WindowId, command: AppCommand) {
        match command {
            AppCommand::CloseWindow => {
                self.apply(DesktopAction::CloseWindow { window_id: source });
            }
            AppCommand::OpenApp {
                app_id,
                launch_params,
                force_new_instance,
            } => {
                let options = OpenWindowOptions {
                    launch_params,
                    force_new_instance,
                    ..OpenWindowOptions::default()
                };
                if let Err(err) = self.open_and_record(&app_id, options) {
                    logging::debug_warn!("window {} requested an app open: {err}", source.0);
                }
            }
            AppCommand::SetTitle { title } => {
                self.apply(DesktopAction::SetTitle {
                    window_id: source,
                    title,
                });
            }
            AppCommand::Notify { title, body } => {
                self.push_effect(RuntimeEffect::Notify(Notification::info(title, body)));
            }
        }
    }
}
