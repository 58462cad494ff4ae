//! Persisted window layout, recent-apps list and configuration, plus the `localStorage` adapter.

use std::collections::BTreeMap;

use leptos::logging;
use platform_host::{get_or, load_typed, save_typed, KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::WindowManagerConfig,
    model::{DesktopState, WindowId, WindowPosition, WindowSize, WindowState},
    recent::RecentApp,
};

pub const LAYOUT_KEY: &str = "webdesk.window-states.v1";
pub const RECENT_APPS_KEY: &str = "webdesk.recent-apps.v1";
pub const CONFIG_KEY: &str = "webdesk.config.v1";

/// One window's entry in the persisted layout. Missing geometry falls back to the default
/// placement on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    pub app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WindowPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WindowSize>,
    #[serde(default)]
    pub state: WindowState,
}

/// Layout snapshot keyed by window id, serialized as `{ "<id>": { appId, position, size, state } }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedLayout {
    pub windows: BTreeMap<String, PersistedWindow>,
}

impl PersistedLayout {
    /// Captures every live window. Maximized windows record their pre-maximize geometry.
    pub fn from_state(state: &DesktopState) -> Self {
        let windows = state
            .windows
            .iter()
            .map(|window| {
                let rect = window.normal_rect();
                (
                    window.id.0.to_string(),
                    PersistedWindow {
                        app_id: window.app_id.as_str().to_string(),
                        position: Some(rect.position()),
                        size: Some(rect.size()),
                        state: window.state,
                    },
                )
            })
            .collect();
        Self { windows }
    }

    /// Entries in ascending numeric window-id order; non-numeric keys sort last by text.
    pub fn entries_in_open_order(&self) -> Vec<(&str, &PersistedWindow)> {
        let mut entries: Vec<_> = self
            .windows
            .iter()
            .map(|(key, window)| (key.as_str(), window))
            .collect();
        entries.sort_by_key(|(key, _)| {
            let id = parse_window_key(key).map_or(u64::MAX, |id| id.0);
            (id, key.to_string())
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Parses a stored layout, skipping entries that do not decode.
    pub fn from_json_lenient(raw: &str) -> Result<Self, serde_json::Error> {
        let map: BTreeMap<String, Value> = serde_json::from_str(raw)?;
        let windows = map
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(window) => Some((key, window)),
                Err(err) => {
                    logging::warn!("skipping persisted window `{key}`: {err}");
                    None
                }
            })
            .collect();
        Ok(Self { windows })
    }
}

/// Writes `layout` under [`LAYOUT_KEY`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_layout<S: KeyValueStore + ?Sized>(
    store: &S,
    layout: &PersistedLayout,
) -> Result<(), StorageError> {
    save_typed(store, LAYOUT_KEY, layout)
}

/// Loads the persisted layout. Missing or unreadable data yields an empty layout.
pub fn load_layout<S: KeyValueStore + ?Sized>(store: &S) -> PersistedLayout {
    let raw = match store.load_raw(LAYOUT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PersistedLayout::default(),
        Err(err) => {
            logging::warn!("layout load failed: {err}");
            return PersistedLayout::default();
        }
    };
    PersistedLayout::from_json_lenient(&raw).unwrap_or_else(|err| {
        logging::warn!("discarding corrupt layout: {err}");
        PersistedLayout::default()
    })
}

/// Removes the persisted layout.
///
/// # Errors
///
/// Returns an error when the store delete fails.
pub fn clear_layout<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StorageError> {
    store.delete(LAYOUT_KEY)
}

/// Layout to reopen at boot. With restore disabled the saved layout is dropped from the store.
pub fn boot_layout<S: KeyValueStore + ?Sized>(store: &S, restore_on_boot: bool) -> PersistedLayout {
    if restore_on_boot {
        return load_layout(store);
    }
    if let Err(err) = clear_layout(store) {
        logging::warn!("clearing saved layout failed: {err}");
    }
    PersistedLayout::default()
}

pub fn load_recent_apps<S: KeyValueStore + ?Sized>(store: &S) -> Vec<RecentApp> {
    get_or(store, RECENT_APPS_KEY, Vec::new())
}

/// Writes the recent-apps list under [`RECENT_APPS_KEY`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_recent_apps<S: KeyValueStore + ?Sized>(
    store: &S,
    recent: &[RecentApp],
) -> Result<(), StorageError> {
    save_typed(store, RECENT_APPS_KEY, recent)
}

/// Loads the window-manager configuration, falling back to defaults field by field.
pub fn load_config<S: KeyValueStore + ?Sized>(store: &S) -> WindowManagerConfig {
    match load_typed(store, CONFIG_KEY) {
        Ok(Some(config)) => config,
        Ok(None) => WindowManagerConfig::default(),
        Err(err) => {
            logging::warn!("config load failed, using defaults: {err}");
            WindowManagerConfig::default()
        }
    }
}

/// Parses a persisted window key back into a [`WindowId`].
pub fn parse_window_key(key: &str) -> Option<WindowId> {
    key.parse().ok().map(WindowId)
}

/// Browser key-value store backed by `window.localStorage`. Every call is a no-op off wasm32.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStore for LocalStorageStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| StorageError::Backend(format!("localStorage get_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, raw_json)
                .map_err(|e| StorageError::Backend(format!("localStorage set_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Backend(format!("localStorage remove_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
