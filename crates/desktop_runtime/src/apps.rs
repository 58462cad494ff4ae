//! Application registry: display metadata plus the mount capability for every launchable app.

mod placeholders;

use std::{collections::BTreeMap, fmt, rc::Rc};

use desktop_app_contract::{AppFactory, AppId};

/// Registry entry for one application.
#[derive(Clone)]
pub struct AppDescriptor {
    pub id: AppId,
    pub display_name: String,
    /// Glyph or icon token rendered in title bars and on the taskbar.
    pub icon: String,
    pub factory: Rc<dyn AppFactory>,
}

impl AppDescriptor {
    pub fn new(
        id: AppId,
        display_name: impl Into<String>,
        icon: impl Into<String>,
        factory: impl AppFactory + 'static,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            icon: icon.into(),
            factory: Rc::new(factory),
        }
    }
}

impl fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// Lookup-only mapping from [`AppId`] to [`AppDescriptor`], injected into the window manager.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    apps: BTreeMap<AppId, AppDescriptor>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the descriptor registered under `descriptor.id`.
    pub fn register(mut self, descriptor: AppDescriptor) -> Self {
        self.apps.insert(descriptor.id.clone(), descriptor);
        self
    }

    pub fn get(&self, app_id: &AppId) -> Option<&AppDescriptor> {
        self.apps.get(app_id)
    }

    pub fn contains(&self, app_id: &AppId) -> bool {
        self.apps.contains_key(app_id)
    }

    /// Descriptors sorted by app id.
    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.values()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Registry of the applications shipped with the desktop.
pub fn builtin_registry() -> AppRegistry {
    placeholders::BUILTIN_APPS
        .iter()
        .fold(AppRegistry::new(), |registry, app| {
            registry.register(AppDescriptor::new(
                AppId::trusted(app.id),
                app.display_name,
                app.icon,
                placeholders::factory_for(app),
            ))
        })
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppCommandQueue, AppMountContext, AppMountError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn mount(registry: &AppRegistry, app: &str, launch_params: serde_json::Value) -> bool {
        let app_id = AppId::trusted(app);
        let descriptor = registry.get(&app_id).expect("registered");
        descriptor
            .factory
            .mount(AppMountContext {
                window_id: 1,
                app_id,
                launch_params,
                host: AppCommandQueue::new().host_for(1),
            })
            .is_ok()
    }

    #[test]
    fn builtin_registry_lists_every_shipped_app() {
        let registry = builtin_registry();
        let ids: Vec<_> = registry.iter().map(|app| app.id.as_str().to_string()).collect();

        assert_eq!(
            ids,
            vec![
                "browser",
                "calculator",
                "calendar",
                "explorer",
                "notepad",
                "paint",
                "settings",
                "terminal",
            ]
        );
        assert!(!registry.contains(&AppId::trusted("solitaire")));
    }

    #[test]
    fn builtin_apps_mount_with_default_params() {
        let registry = builtin_registry();
        for app in registry.iter() {
            assert!(mount(&registry, app.id.as_str(), serde_json::Value::Null), "{}", app.id);
        }
    }

    #[test]
    fn browser_rejects_non_string_url() {
        let registry = builtin_registry();
        assert!(mount(&registry, "browser", json!({ "url": "https://example.org" })));
        assert!(!mount(&registry, "browser", json!({ "url": 42 })));
    }

    #[test]
    fn register_replaces_existing_descriptor() {
        let failing = |_: AppMountContext| -> Result<Box<dyn desktop_app_contract::AppContent>, AppMountError> {
            Err(AppMountError::Failed("boom".to_string()))
        };
        let registry = builtin_registry().register(AppDescriptor::new(
            AppId::trusted("notepad"),
            "Broken Notepad",
            "N",
            failing,
        ));

        assert_eq!(registry.len(), 8);
        assert_eq!(
            registry.get(&AppId::trusted("notepad")).map(|app| app.display_name.as_str()),
            Some("Broken Notepad")
        );
        assert!(!mount(&registry, "notepad", serde_json::Value::Null));
    }
}
