use super::*;
use desktop_app_contract::AppId;

use crate::{
    layout::WindowLayout,
    model::OpenWindowOptions,
    taskbar::{TaskbarEntry, TaskbarVisual},
};

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let launcher_open = create_rw_signal(false);
    let launcher_apps = runtime.with_manager(|manager| {
        manager
            .registry()
            .iter()
            .map(|app| (app.id.clone(), app.display_name.clone(), app.icon.clone()))
            .collect::<Vec<_>>()
    });

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Taskbar"
            style=format!("height:{}px;", runtime.taskbar_height_px)
        >
            <div class="taskbar-start">
                <button
                    class="taskbar-start-button"
                    aria-expanded=move || launcher_open.get().to_string()
                    on:click=move |_| launcher_open.update(|open| *open = !*open)
                >
                    "Start"
                </button>
                <Show when=move || launcher_open.get() fallback=|| ()>
                    <div class="launcher" role="menu">
                        <Show when=move || !runtime.recent_apps.with(Vec::is_empty) fallback=|| ()>
                            <div class="launcher-section">
                                <span class="launcher-heading">"Recent"</span>
                                <For
                                    each=move || runtime.recent_apps.get()
                                    key=|recent| recent.app_id.clone()
                                    let:recent
                                >
                                    <LaunchButton
                                        app_id=recent.app_id.clone()
                                        label=recent.display_name.clone()
                                        icon=String::new()
                                        launcher_open=launcher_open
                                    />
                                </For>
                            </div>
                        </Show>
                        <div class="launcher-section">
                            <span class="launcher-heading">"Applications"</span>
                            {launcher_apps
                                .iter()
                                .map(|(app_id, label, icon)| {
                                    view! {
                                        <LaunchButton
                                            app_id=app_id.clone()
                                            label=label.clone()
                                            icon=icon.clone()
                                            launcher_open=launcher_open
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                        <div class="launcher-section" role="group" aria-label="Arrange windows">
                            {WindowLayout::ALL
                                .into_iter()
                                .map(|layout| {
                                    view! {
                                        <button
                                            role="menuitem"
                                            on:click=move |_| {
                                                launcher_open.set(false);
                                                runtime.dispatch_command(DesktopCommand::Arrange(layout));
                                            }
                                        >
                                            {layout.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                            <button
                                role="menuitem"
                                on:click=move |_| {
                                    launcher_open.set(false);
                                    runtime.dispatch_command(DesktopCommand::CloseAll);
                                }
                            >
                                "Close all"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
            <div class="taskbar-windows">
                <For
                    each=move || runtime.taskbar.get()
                    key=|entry| (entry.window_id, entry.title.clone(), entry.visual())
                    let:entry
                >
                    <TaskbarButton entry=entry />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn LaunchButton(
    app_id: AppId,
    label: String,
    icon: String,
    launcher_open: RwSignal<bool>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    view! {
        <button
            role="menuitem"
            class="launcher-item"
            on:click=move |_| {
                launcher_open.set(false);
                runtime.dispatch_command(DesktopCommand::Open {
                    app_id: app_id.clone(),
                    options: OpenWindowOptions::default(),
                });
            }
        >
            <span aria-hidden="true">{icon}</span>
            <span>{label}</span>
        </button>
    }
}

#[component]
fn TaskbarButton(entry: TaskbarEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let visual = entry.visual();
    let window_id = entry.window_id;

    view! {
        <button
            class=format!("taskbar-entry {}", visual.class_name())
            aria-pressed=(visual == TaskbarVisual::Active).to_string()
            title=entry.title.clone()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_command(DesktopCommand::TaskbarClick(window_id));
            }
        >
            <span class="taskbar-entry-icon" aria-hidden="true">{entry.icon.clone()}</span>
            <span class="taskbar-entry-title">{entry.title.clone()}</span>
        </button>
    }
}
