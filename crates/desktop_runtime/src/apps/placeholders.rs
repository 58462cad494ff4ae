//! Built-in placeholder app implementations. The desktop hosts them like any other app; their
//! internals are intentionally shallow.

use desktop_app_contract::{AppContent, AppHost, AppMountContext, AppMountError};
use leptos::*;
use serde_json::Value;

pub(super) struct BuiltinApp {
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    /// Launch-param key the app reads, if any. Its value must be a string.
    pub param_key: Option<&'static str>,
    pub blurb: &'static str,
}

pub(super) static BUILTIN_APPS: [BuiltinApp; 8] = [
    BuiltinApp {
        id: "notepad",
        display_name: "Notepad",
        icon: "📝",
        param_key: Some("file"),
        blurb: "Plain-text editing with local autosave.",
    },
    BuiltinApp {
        id: "calculator",
        display_name: "Calculator",
        icon: "🧮",
        param_key: None,
        blurb: "Basic arithmetic with a running history.",
    },
    BuiltinApp {
        id: "paint",
        display_name: "Paint",
        icon: "🎨",
        param_key: None,
        blurb: "Brush, line and fill tools on an 800x600 canvas.",
    },
    BuiltinApp {
        id: "browser",
        display_name: "Browser",
        icon: "🌐",
        param_key: Some("url"),
        blurb: "Pages load inside a sandboxed frame.",
    },
    BuiltinApp {
        id: "explorer",
        display_name: "File Explorer",
        icon: "📁",
        param_key: Some("path"),
        blurb: "Browse the mock file system.",
    },
    BuiltinApp {
        id: "settings",
        display_name: "Settings",
        icon: "⚙️",
        param_key: None,
        blurb: "Theme, wallpaper and window behavior.",
    },
    BuiltinApp {
        id: "calendar",
        display_name: "Calendar",
        icon: "📅",
        param_key: None,
        blurb: "Month view with local events.",
    },
    BuiltinApp {
        id: "terminal",
        display_name: "Terminal",
        icon: "💻",
        param_key: Some("cwd"),
        blurb: "A toy shell over the mock file system.",
    },
];

pub(super) fn factory_for(
    app: &'static BuiltinApp,
) -> impl Fn(AppMountContext) -> Result<Box<dyn AppContent>, AppMountError> {
    move |context: AppMountContext| {
        let detail = match app.param_key {
            Some(key) => string_param(&context.launch_params, key)?,
            None => None,
        };
        Ok(Box::new(PlaceholderContent {
            app,
            detail,
            host: context.host,
        }) as Box<dyn AppContent>)
    }
}

fn string_param(params: &Value, key: &str) -> Result<Option<String>, AppMountError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => Ok(Some(raw.clone())),
        Some(other) => Err(AppMountError::InvalidLaunchParams(format!(
            "`{key}` must be a string, got {other}"
        ))),
    }
}

struct PlaceholderContent {
    app: &'static BuiltinApp,
    detail: Option<String>,
    host: AppHost,
}

impl AppContent for PlaceholderContent {
    fn render(&self) -> View {
        let app = self.app;
        let detail = self
            .detail
            .clone()
            .map(|value| format!("{}: {value}", app.param_key.unwrap_or("param")));
        let rename_host = self.host.clone();
        let notify_host = self.host.clone();
        let close_host = self.host.clone();

        view! {
            <div class=format!("app-shell app-{}-shell", app.id)>
                <div class="app-toolbar" role="note">
                    <strong>{format!("{} (Placeholder)", app.display_name)}</strong>
                    <span>{app.blurb}</span>
                </div>
                {detail.map(|text| view! { <p class="app-detail">{text}</p> })}
                <div class="app-toolbar" role="group" aria-label="Placeholder controls">
                    <button
                        type="button"
                        class="app-action"
                        on:click=move |_| rename_host.set_title(format!("{} *", app.display_name))
                    >
                        "Mark modified"
                    </button>
                    <button
                        type="button"
                        class="app-action"
                        on:click=move |_| notify_host.notify(app.display_name, "Nothing to save yet.")
                    >
                        "Save"
                    </button>
                    <button type="button" class="app-action" on:click=move |_| close_host.close()>
                        "Quit"
                    </button>
                </div>
                <div class="app-statusbar">
                    <span>{format!("Window #{}", self.host.window_id())}</span>
                </div>
            </div>
        }
        .into_view()
    }

    fn teardown(&mut self) {
        logging::log!("{} in window {} torn down", self.app.id, self.host.window_id());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn string_param_accepts_missing_null_and_strings() {
        assert_eq!(string_param(&Value::Null, "url"), Ok(None));
        assert_eq!(string_param(&json!({ "url": null }), "url"), Ok(None));
        assert_eq!(
            string_param(&json!({ "url": "https://example.org" }), "url"),
            Ok(Some("https://example.org".to_string()))
        );
    }

    #[test]
    fn string_param_rejects_other_types() {
        assert!(matches!(
            string_param(&json!({ "path": ["a"] }), "path"),
            Err(AppMountError::InvalidLaunchParams(_))
        ));
    }
}
