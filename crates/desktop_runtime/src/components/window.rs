use super::*;
use crate::{
    manager::MountedContent,
    model::{HitRegion, ResizeCorner, WindowId, WindowState},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = Signal::derive(move || {
        runtime
            .state
            .with(|state| state.window(window_id).cloned())
    });
    let is_active = Signal::derive(move || runtime.state.with(|state| state.is_active(window_id)));

    let focus = move |_: web_sys::PointerEvent| {
        if !is_active.get_untracked() {
            runtime.dispatch_command(DesktopCommand::Focus(window_id));
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_command(DesktopCommand::PointerDown {
            window_id,
            region: HitRegion::TitleBar,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_command(DesktopCommand::ToggleMaximize(window_id));
    };

    let window_state = move || window.with(|win| win.as_ref().map(|win| win.state));
    let is_maximized = move || window_state() == Some(WindowState::Maximized);
    let class_name = move || {
        let state_class = match window_state() {
            Some(WindowState::Minimized) => " minimized",
            Some(WindowState::Maximized) => " maximized",
            _ => "",
        };
        format!(
            "desktop-window{}{}",
            if is_active.get() { " active" } else { "" },
            state_class
        )
    };
    let style = move || {
        window.with(|win| {
            win.as_ref()
                .map(|win| {
                    format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                        win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_order
                    )
                })
                .unwrap_or_default()
        })
    };
    let title = move || window.with(|win| win.as_ref().map(|win| win.title.clone()).unwrap_or_default());
    let icon = move || window.with(|win| win.as_ref().map(|win| win.icon.clone()).unwrap_or_default());

    view! {
        <section
            class=class_name
            style=style
            on:pointerdown=focus
            role="dialog"
            aria-label=title
            data-window-id=window_id.0.to_string()
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">{icon}</span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_command(DesktopCommand::Minimize(window_id));
                        }
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || if is_maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_command(DesktopCommand::ToggleMaximize(window_id));
                        }
                    >
                        {move || if is_maximized() { "❐" } else { "□" }}
                    </button>
                    <button
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_command(DesktopCommand::Close(window_id));
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=window_id />
            </div>
            <Show when=move || window_state() == Some(WindowState::Normal) fallback=|| ()>
                {ResizeCorner::ALL
                    .into_iter()
                    .map(|corner| view! { <WindowResizeHandle window_id=window_id corner=corner /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, corner: ResizeCorner) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle corner-{}", corner.class_name());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_command(DesktopCommand::PointerDown {
            window_id,
            region: HitRegion::Resize(corner),
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

/// Renders the mounted app, or the fallback surface when mounting failed.
#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime.with_manager(|manager| match manager.content(window_id) {
        Some(MountedContent::Live(content)) => content.render(),
        Some(MountedContent::Failed { message }) => {
            let message = message.clone();
            view! {
                <div class="window-error" role="alert">
                    <strong>"This application failed to start."</strong>
                    <p>{message}</p>
                    <button
                        type="button"
                        on:click=move |_| runtime.dispatch_command(DesktopCommand::Close(window_id))
                    >
                        "Close"
                    </button>
                </div>
            }
            .into_view()
        }
        None => view! { <p>"Closed"</p> }.into_view(),
    });

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}
