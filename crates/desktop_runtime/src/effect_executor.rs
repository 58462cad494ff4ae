//! Executes the runtime effects the window manager hands to its host.

use std::rc::Rc;

use leptos::logging;
use platform_host::{KeyValueStore, Notification, NotificationService};

use crate::{
    manager::WindowManager,
    persistence::{save_layout, save_recent_apps},
    reducer::RuntimeEffect,
};

/// Host services the executor writes to.
#[derive(Clone)]
pub struct EffectHost {
    pub store: Rc<dyn KeyValueStore>,
    pub notifier: Rc<dyn NotificationService>,
}

/// Runs `effects` in order and returns the notifications the view layer should show as toasts.
///
/// Persistence and notification-dispatch failures are logged and otherwise ignored.
pub fn execute_effects(
    effects: Vec<RuntimeEffect>,
    manager: &WindowManager,
    host: &EffectHost,
) -> Vec<Notification> {
    let mut toasts = Vec::new();
    for effect in effects {
        match effect {
            RuntimeEffect::PersistLayout => persist(manager, host),
            RuntimeEffect::Notify(notification) => {
                if let Err(err) = host.notifier.notify(&notification) {
                    logging::warn!("notification dispatch failed: {err}");
                }
                toasts.push(notification);
            }
            // Taskbar observers already ran inside the manager.
            RuntimeEffect::SyncTaskbar => {}
            RuntimeEffect::MountContent(_) | RuntimeEffect::TeardownContent(_) => {
                logging::debug_warn!("content effect reached the host: {effect:?}");
            }
        }
    }
    toasts
}

/// Saves the current layout and recent-apps list.
pub fn persist(manager: &WindowManager, host: &EffectHost) {
    if let Err(err) = save_layout(host.store.as_ref(), &manager.persisted_layout()) {
        logging::warn!("layout persist failed: {err}");
    }
    if let Err(err) = save_recent_apps(host.store.as_ref(), manager.recent_apps()) {
        logging::warn!("recent apps persist failed: {err}");
    }
}
