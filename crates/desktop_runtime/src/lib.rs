//! Browser desktop runtime: the window manager, its app registry and the Leptos shell around it.
//!
//! [`WindowManager`] is the single owner of the window collection. State transitions go through
//! [`reduce_desktop`]; the manager executes content effects itself and hands persistence,
//! taskbar and notification effects to its host. [`DesktopProvider`] and [`DesktopShell`] host
//! the manager in a Leptos view tree.

pub mod apps;
pub mod components;
pub mod config;
pub mod effect_executor;
pub mod layout;
pub mod manager;
pub mod model;
pub mod persistence;
pub mod recent;
pub mod reducer;
pub mod runtime_context;
pub mod shortcuts;
pub mod taskbar;
pub mod window_manager;

pub use apps::{builtin_registry, AppDescriptor, AppRegistry};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::WindowManagerConfig;
pub use layout::WindowLayout;
pub use manager::{MountedContent, WindowManager, WindowManagerError};
pub use model::*;
pub use persistence::{load_layout, save_layout, LocalStorageStore, PersistedLayout, PersistedWindow};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::DesktopCommand;
pub use shortcuts::{shortcut_for_key, KeyModifiers, ShortcutAction};
pub use taskbar::{TaskbarEntry, TaskbarVisual};
pub use window_manager::MIN_WINDOW_SIZE;
