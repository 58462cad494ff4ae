//! Runtime provider and context wiring for the desktop shell.
//!
//! [`DesktopProvider`] owns the [`WindowManager`] and mirrors its state into signals. The manager
//! is never borrowed while a signal is written, so effects triggered by those writes may read it
//! freely. UI composition stays in [`crate::components`].

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use desktop_app_contract::AppId;
use leptos::*;
use platform_host::{KeyValueStore, NoopNotificationService, Notification, NotificationService};

use crate::{
    apps::{builtin_registry, AppRegistry},
    effect_executor::{self, execute_effects, EffectHost},
    layout::WindowLayout,
    manager::WindowManager,
    model::{
        DesktopState, HitRegion, InteractionState, OpenWindowOptions, PointerPosition, WindowId,
        WindowRect,
    },
    persistence::{boot_layout, load_config, load_recent_apps, LocalStorageStore},
    recent::RecentApp,
    shortcuts::ShortcutAction,
    taskbar::TaskbarEntry,
};

/// User intents the view layer sends to the window manager.
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopCommand {
    Open {
        app_id: AppId,
        options: OpenWindowOptions,
    },
    Close(WindowId),
    CloseAll,
    Minimize(WindowId),
    ToggleMaximize(WindowId),
    Focus(WindowId),
    TaskbarClick(WindowId),
    PointerDown {
        window_id: WindowId,
        region: HitRegion,
        pointer: PointerPosition,
    },
    PointerMove(PointerPosition),
    PointerUp,
    Arrange(WindowLayout),
    Shortcut(ShortcutAction),
    SetViewport(WindowRect),
    /// Apply commands app content queued from its own event handlers.
    SettleAppCommands,
}

/// Applies one view-layer command to the manager.
pub fn apply_command(manager: &mut WindowManager, command: DesktopCommand) {
    match command {
        DesktopCommand::Open { app_id, options } => {
            if let Err(err) = manager.open_window(&app_id, options) {
                logging::debug_warn!("launcher open failed: {err}");
            }
        }
        DesktopCommand::Close(window_id) => manager.close_window(window_id),
        DesktopCommand::CloseAll => manager.close_all_windows(),
        DesktopCommand::Minimize(window_id) => manager.minimize_window(window_id),
        DesktopCommand::ToggleMaximize(window_id) => manager.toggle_maximize(window_id),
        DesktopCommand::Focus(window_id) => manager.bring_to_front(window_id),
        DesktopCommand::TaskbarClick(window_id) => manager.click_taskbar_entry(window_id),
        DesktopCommand::PointerDown {
            window_id,
            region,
            pointer,
        } => manager.pointer_down(window_id, region, pointer),
        DesktopCommand::PointerMove(pointer) => manager.pointer_move(pointer),
        DesktopCommand::PointerUp => manager.pointer_up(),
        DesktopCommand::Arrange(layout) => manager.arrange_windows(layout),
        DesktopCommand::Shortcut(shortcut) => manager.apply_shortcut(shortcut),
        DesktopCommand::SetViewport(viewport) => manager.set_viewport(viewport),
        DesktopCommand::SettleAppCommands => manager.settle_app_commands(),
    }
}

/// A notification currently shown as a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopCommand`] values.
pub struct DesktopRuntimeContext {
    /// The window manager. Borrowed only inside [`DesktopRuntimeContext::with_manager`] and dispatch.
    pub manager: StoredValue<WindowManager>,
    /// Host services used to execute runtime effects.
    pub host: StoredValue<EffectHost>,
    /// Window collection mirror.
    pub state: RwSignal<DesktopState>,
    /// Pointer drag/resize interaction mirror.
    pub interaction: RwSignal<InteractionState>,
    /// Taskbar entries, refreshed by the manager's taskbar observer.
    pub taskbar: RwSignal<Vec<TaskbarEntry>>,
    pub recent_apps: RwSignal<Vec<RecentApp>>,
    pub toasts: RwSignal<Vec<Toast>>,
    /// Command dispatch callback.
    pub dispatch: Callback<DesktopCommand>,
    /// Height reserved for the taskbar when measuring the viewport.
    pub taskbar_height_px: i32,
}

impl DesktopRuntimeContext {
    pub fn dispatch_command(&self, command: DesktopCommand) {
        self.dispatch.call(command);
    }

    /// Reads the manager. Must not be called while a dispatch is in progress.
    pub fn with_manager<U>(&self, f: impl FnOnce(&WindowManager) -> U) -> U {
        self.manager.with_value(f)
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    fn show_toasts(&self, notifications: Vec<Notification>, next_toast_id: StoredValue<u64>) {
        for notification in notifications {
            let id = next_toast_id.get_value();
            next_toast_id.set_value(id + 1);
            let duration = Duration::from_millis(u64::from(notification.duration_ms));
            self.toasts
                .update(|toasts| toasts.push(Toast { id, notification }));
            let runtime = *self;
            set_timeout(move || runtime.dismiss_toast(id), duration);
        }
    }
}

/// Usable desktop area: the browser viewport minus the taskbar.
pub fn desktop_viewport_rect(taskbar_height_px: i32) -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1280);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(720);

            return WindowRect {
                x: 0,
                y: 0,
                w: width.max(400),
                h: (height - taskbar_height_px).max(300),
            };
        }
    }

    WindowRect {
        x: 0,
        y: 0,
        w: 1280,
        h: 720 - taskbar_height_px,
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and restores the saved layout.
pub fn DesktopProvider(
    /// Applications available on the desktop. Defaults to the built-in set.
    #[prop(optional)]
    registry: Option<AppRegistry>,
    /// Key-value store for layout, recent apps and config. Defaults to `localStorage`.
    #[prop(optional)]
    store: Option<Rc<dyn KeyValueStore>>,
    /// Host notification sink, in addition to on-screen toasts.
    #[prop(optional)]
    notifier: Option<Rc<dyn NotificationService>>,
    /// Height reserved for the taskbar at the bottom of the page.
    #[prop(default = 40)]
    taskbar_height_px: i32,
    children: Children,
) -> impl IntoView {
    let store = store.unwrap_or_else(|| Rc::new(LocalStorageStore));
    let host = EffectHost {
        store: Rc::clone(&store),
        notifier: notifier.unwrap_or_else(|| Rc::new(NoopNotificationService)),
    };

    let config = load_config(store.as_ref());
    let restore_on_boot = config.restore_on_boot;
    let mut manager = WindowManager::new(registry.unwrap_or_else(builtin_registry), config);
    manager.set_viewport(desktop_viewport_rect(taskbar_height_px));
    manager.set_recent_apps(load_recent_apps(store.as_ref()));
    let layout = boot_layout(store.as_ref(), restore_on_boot);
    if !layout.is_empty() {
        let restored = manager.restore_layout(&layout);
        logging::log!("restored {} of {} saved windows", restored.len(), layout.len());
    }
    let boot_effects = manager.take_effects();
    let boot_toasts = execute_effects(boot_effects, &manager, &host);

    let pending_taskbar: Rc<RefCell<Option<Vec<TaskbarEntry>>>> = Rc::default();
    let sink = Rc::clone(&pending_taskbar);
    manager.on_taskbar_change(move |entries| *sink.borrow_mut() = Some(entries.to_vec()));

    let state = create_rw_signal(manager.state().clone());
    let interaction = create_rw_signal(manager.interaction().clone());
    let taskbar = create_rw_signal(manager.taskbar_entries());
    let recent_apps = create_rw_signal(manager.recent_apps().to_vec());
    let toasts = create_rw_signal(Vec::<Toast>::new());
    let next_toast_id = store_value(1_u64);
    let manager = store_value(manager);
    let host = store_value(host);

    let runtime_slot: StoredValue<Option<DesktopRuntimeContext>> = store_value(None);
    let dispatch = Callback::new(move |command: DesktopCommand| {
        let snapshot = manager.try_update_value(|manager| {
            apply_command(manager, command);
            let effects = manager.take_effects();
            let notifications = host.with_value(|host| execute_effects(effects, manager, host));
            (
                manager.state().clone(),
                manager.interaction().clone(),
                manager.recent_apps().to_vec(),
                notifications,
            )
        });
        let Some((next_state, next_interaction, next_recent, notifications)) = snapshot else {
            logging::warn!("desktop dispatch after the provider was disposed");
            return;
        };

        if state.with_untracked(|current| current != &next_state) {
            state.set(next_state);
        }
        if interaction.with_untracked(|current| current != &next_interaction) {
            interaction.set(next_interaction);
        }
        if recent_apps.with_untracked(|current| current != &next_recent) {
            recent_apps.set(next_recent);
        }
        let entries = pending_taskbar.borrow_mut().take();
        if let Some(entries) = entries {
            taskbar.set(entries);
        }
        if let Some(runtime) = runtime_slot.get_value() {
            runtime.show_toasts(notifications, next_toast_id);
        }
    });

    // App content queues commands from its own handlers; drain them once the current task ends.
    let settle_scheduled = Rc::new(Cell::new(false));
    manager.update_value(|manager| {
        manager.on_app_command(move || {
            if settle_scheduled.replace(true) {
                return;
            }
            let settle_scheduled = Rc::clone(&settle_scheduled);
            queue_microtask(move || {
                settle_scheduled.set(false);
                dispatch.call(DesktopCommand::SettleAppCommands);
            });
        });
    });

    let runtime = DesktopRuntimeContext {
        manager,
        host,
        state,
        interaction,
        taskbar,
        recent_apps,
        toasts,
        dispatch,
        taskbar_height_px,
    };
    runtime_slot.set_value(Some(runtime));
    runtime.show_toasts(boot_toasts, next_toast_id);

    provide_context(runtime);

    let unload_listener = window_event_listener(ev::beforeunload, move |_| {
        runtime.manager.with_value(|manager| {
            runtime
                .host
                .with_value(|host| effect_executor::persist(manager, host))
        });
    });
    on_cleanup(move || unload_listener.remove());

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use desktop_app_contract::{AppContent, AppHost, AppMountContext, AppMountError};

    use super::*;
    use crate::{
        apps::AppDescriptor,
        config::WindowManagerConfig,
        model::{ResizeCorner, WindowState},
    };

    fn manager() -> WindowManager {
        WindowManager::new(builtin_registry(), WindowManagerConfig::default())
    }

    fn open(manager: &mut WindowManager, app: &str) {
        apply_command(
            manager,
            DesktopCommand::Open {
                app_id: AppId::trusted(app),
                options: OpenWindowOptions::default(),
            },
        );
    }

    #[test]
    fn commands_drive_the_manager() {
        let mut manager = manager();
        open(&mut manager, "notepad");
        open(&mut manager, "terminal");
        let notepad = WindowId(1);

        apply_command(&mut manager, DesktopCommand::TaskbarClick(notepad));
        assert_eq!(manager.get_active_window().map(|w| w.id), Some(notepad));

        apply_command(&mut manager, DesktopCommand::ToggleMaximize(notepad));
        assert_eq!(
            manager.window(notepad).map(|w| w.state),
            Some(WindowState::Maximized)
        );

        apply_command(&mut manager, DesktopCommand::CloseAll);
        assert!(manager.get_windows().is_empty());
    }

    #[test]
    fn pointer_commands_resize_through_a_corner() {
        let mut manager = manager();
        open(&mut manager, "paint");
        let paint = WindowId(1);

        apply_command(
            &mut manager,
            DesktopCommand::PointerDown {
                window_id: paint,
                region: HitRegion::Resize(ResizeCorner::SouthEast),
                pointer: PointerPosition { x: 900, y: 700 },
            },
        );
        apply_command(
            &mut manager,
            DesktopCommand::PointerMove(PointerPosition { x: 950, y: 720 }),
        );
        apply_command(&mut manager, DesktopCommand::PointerUp);

        let rect = manager.window(paint).map(|w| w.rect);
        assert_eq!(rect, Some(WindowRect { x: 100, y: 100, w: 850, h: 620 }));
        assert!(manager.interaction().is_idle());
    }

    struct HostedContent;

    impl AppContent for HostedContent {
        fn render(&self) -> View {
            View::default()
        }
    }

    /// Registry with one app that hands its [`AppHost`] back to the test.
    fn hosted_manager(hosts: &Rc<RefCell<Vec<AppHost>>>) -> WindowManager {
        let hosts = Rc::clone(hosts);
        let registry = AppRegistry::new().register(AppDescriptor::new(
            AppId::trusted("notepad"),
            "Notepad",
            "N",
            move |context: AppMountContext| -> Result<Box<dyn AppContent>, AppMountError> {
                hosts.borrow_mut().push(context.host);
                Ok(Box::new(HostedContent) as Box<dyn AppContent>)
            },
        ));
        WindowManager::new(registry, WindowManagerConfig::default())
    }

    #[test]
    fn app_commands_from_content_handlers_wake_and_settle() {
        let hosts = Rc::new(RefCell::new(Vec::new()));
        let mut manager = hosted_manager(&hosts);
        let wakes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&wakes);
        manager.on_app_command(move || counter.set(counter.get() + 1));
        open(&mut manager, "notepad");
        let notepad = WindowId(1);
        let host = hosts.borrow()[0].clone();

        host.set_title("Notepad - draft.txt");
        host.notify("Saved", "draft.txt");
        host.close();

        assert_eq!(wakes.get(), 3);
        assert_eq!(manager.pending_app_commands(), 3);
        assert!(manager.window(notepad).is_some());

        apply_command(&mut manager, DesktopCommand::SettleAppCommands);

        assert_eq!(manager.pending_app_commands(), 0);
        assert_eq!(manager.window(notepad), None);
        let notified = manager
            .take_effects()
            .into_iter()
            .filter(|effect| matches!(effect, crate::reducer::RuntimeEffect::Notify(_)))
            .count();
        assert_eq!(notified, 1);
    }

    #[test]
    fn native_viewport_reserves_the_taskbar() {
        assert_eq!(desktop_viewport_rect(40).h, 680);
    }
}
